use std::fmt;

use crate::types::Type;

/// Error raised by the typed interpreter.
///
/// Trees produced by [`crate::typed::typing`] and run in an environment built
/// with [`crate::typed::TypedEnvironment::bind_host`] only fail with
/// `UnboundVariable` when the environment lacks a free variable. A
/// `WitnessMismatch` means a hand-built tree or environment disagrees with the
/// static types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    UnboundVariable {
        name: String,
    },
    WitnessMismatch {
        /// Descriptor the tree requires
        expected: Type,
        /// Descriptor the value carries
        found: Type,
        /// What was being resolved
        context: String,
    },
}

impl RuntimeError {
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        RuntimeError::UnboundVariable { name: name.into() }
    }

    pub fn witness_mismatch(expected: Type, found: Type, context: impl Into<String>) -> Self {
        RuntimeError::WitnessMismatch {
            expected,
            found,
            context: context.into(),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::UnboundVariable { name } => {
                write!(f, "Runtime error: unbound variable: {}", name)
            }
            RuntimeError::WitnessMismatch {
                expected,
                found,
                context,
            } => write!(
                f,
                "Runtime error: witness mismatch in {}: expected {}, found {}",
                context, expected, found
            ),
        }
    }
}

impl std::error::Error for RuntimeError {}
