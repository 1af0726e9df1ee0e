use std::fmt;
use std::rc::Rc;

use crate::ast::Expression;

use super::Environment;

/// Runtime value representation
#[derive(Debug, Clone)]
pub enum Value {
    Number(i64),
    Boolean(bool),
    /// Function value with the environment of its definition site
    Closure {
        parameter: String,
        body: Rc<Expression>,
        env: Environment,
    },
}

impl Value {
    /// Name of the value's shape, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Closure { .. } => "function",
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_closure(&self) -> bool {
        matches!(self, Value::Closure { .. })
    }
}

/// Numbers and booleans compare by value. Closures never compare equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Closure { parameter, .. } => write!(f, "<closure \\{}>", parameter),
        }
    }
}
