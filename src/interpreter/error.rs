use std::fmt;

use super::Value;

/// Error raised while interpreting an untyped [`crate::ast::Expression`].
///
/// A well-typed program run in an environment consistent with its type
/// environment never produces `TypeMismatch` or `NotAFunction`.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Reference to a name that is not bound, or a recursive binding used
    /// before its value exists.
    UnboundVariable { name: String },

    /// An operand evaluated to the wrong kind of value.
    TypeMismatch {
        /// Kind of value that was required (`"number"`, `"boolean"`, ...)
        expected: &'static str,
        /// The value that was actually produced
        found: Value,
        /// Node kind that required the operand
        context: &'static str,
    },

    /// The function position of an application is not a closure.
    NotAFunction { found: Value, context: &'static str },
}

impl EvalError {
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        EvalError::UnboundVariable { name: name.into() }
    }

    pub fn type_mismatch(expected: &'static str, found: Value, context: &'static str) -> Self {
        EvalError::TypeMismatch {
            expected,
            found,
            context,
        }
    }

    pub fn not_a_function(found: Value, context: &'static str) -> Self {
        EvalError::NotAFunction { found, context }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::UnboundVariable { name } => {
                write!(f, "Runtime error: unbound variable: {}", name)
            }
            EvalError::TypeMismatch {
                expected,
                found,
                context,
            } => write!(
                f,
                "Runtime error: type mismatch in {}: expected {}, found {} {}",
                context,
                expected,
                found.kind(),
                found
            ),
            EvalError::NotAFunction { found, context } => write!(
                f,
                "Runtime error: cannot call non-function value in {}: {}",
                context, found
            ),
        }
    }
}

impl std::error::Error for EvalError {}
