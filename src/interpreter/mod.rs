mod error;
mod eval;
mod value;

pub use error::EvalError;
pub use value::Value;

use crate::ast::Expression;
use crate::env::Env;

/// Runtime environment of the untyped interpreter
pub type Environment = Env<Value>;

/// Evaluate `expr` in `env` by eager substitution.
pub fn interpret(expr: &Expression, env: &Environment) -> Result<Value, EvalError> {
    expr.eval(env)
}
