//! End-to-end run of a program through both evaluation paths.
//!
//! ```text
//! Expression --type_check--> Type
//!            --typing------> SomeTypedExpr --interpret_erased--> HostValue
//!            --interpret---------------------------------------> Value
//! ```
//!
//! A program is only run once it type checks, and the two results must agree.

use std::fmt;

use log::debug;

use crate::ast::Expression;
use crate::interpreter::{Environment, EvalError, Value, interpret};
use crate::typed::{HostValue, RuntimeError, TypedEnvironment, interpret_erased, typing};
use crate::types::{Type, TypeEnvironment, TypeError, type_check};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub ty: Type,
    pub value: Value,
    pub typed_value: HostValue,
}

#[derive(Debug)]
pub enum PipelineError {
    Type(TypeError),
    Eval(EvalError),
    Runtime(RuntimeError),
    /// The typing producer returned a different descriptor than the checker
    TypingDiverged { checked: Type, produced: Type },
    /// The evaluators returned different values
    Disagreement { value: Value, typed_value: HostValue },
}

impl From<TypeError> for PipelineError {
    fn from(err: TypeError) -> Self {
        PipelineError::Type(err)
    }
}

impl From<EvalError> for PipelineError {
    fn from(err: EvalError) -> Self {
        PipelineError::Eval(err)
    }
}

impl From<RuntimeError> for PipelineError {
    fn from(err: RuntimeError) -> Self {
        PipelineError::Runtime(err)
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PipelineError::Type(err) => write!(f, "{}", err),
            PipelineError::Eval(err) => write!(f, "{}", err),
            PipelineError::Runtime(err) => write!(f, "{}", err),
            PipelineError::TypingDiverged { checked, produced } => write!(
                f,
                "typing produced {} but the checker computed {}",
                produced, checked
            ),
            PipelineError::Disagreement { value, typed_value } => write!(
                f,
                "interpreters disagree: untyped {}, typed {}",
                value, typed_value
            ),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Type(err) => Some(err),
            PipelineError::Eval(err) => Some(err),
            PipelineError::Runtime(err) => Some(err),
            _ => None,
        }
    }
}

/// Check, then run `expr` through both interpreters in empty environments.
pub fn run(expr: &Expression) -> Result<Outcome, PipelineError> {
    let ty = type_check(expr, &TypeEnvironment::empty())?;
    debug!("program has type {}", ty);

    let (typed, produced) = typing(expr, &TypeEnvironment::empty())?;
    if produced != ty {
        return Err(PipelineError::TypingDiverged {
            checked: ty,
            produced,
        });
    }

    let typed_value = interpret_erased(&typed, &TypedEnvironment::empty())?;
    let value = interpret(expr, &Environment::empty())?;
    if !typed_value.agrees_with(&value) {
        return Err(PipelineError::Disagreement { value, typed_value });
    }

    Ok(Outcome {
        ty,
        value,
        typed_value,
    })
}
