use std::fmt;
use std::rc::Rc;

use crate::env::Env;
use crate::interpreter::Value;
use crate::types::{Type, TypeEnvironment};

use super::error::RuntimeError;
use super::witness::Ty;

/// Host function between host types `A` and `B`.
pub type HostFn<A, B> = Rc<dyn Fn(A) -> Result<B, RuntimeError>>;

/// A function value tagged with its descriptor.
#[derive(Clone)]
pub struct HostFunction {
    ty: Type,
    call: HostFn<HostValue, HostValue>,
}

impl HostFunction {
    pub fn new(
        ty: Type,
        call: impl Fn(HostValue) -> Result<HostValue, RuntimeError> + 'static,
    ) -> Self {
        HostFunction {
            ty,
            call: Rc::new(call),
        }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn call(&self, argument: HostValue) -> Result<HostValue, RuntimeError> {
        (self.call)(argument)
    }
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostFunction").field(&self.ty).finish()
    }
}

/// Result of the typed interpreter once the static index has been erased.
#[derive(Debug, Clone)]
pub enum HostValue {
    Number(i64),
    Boolean(bool),
    Function(HostFunction),
}

impl HostValue {
    /// Descriptor of the value's shape; for functions, the tagged type.
    pub fn ty(&self) -> Type {
        match self {
            HostValue::Number(_) => Type::Num,
            HostValue::Boolean(_) => Type::Bool,
            HostValue::Function(function) => function.ty().clone(),
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            HostValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            HostValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether an untyped interpreter result describes the same value.
    ///
    /// Functions are opaque on both sides, so any closure agrees with any
    /// host function.
    pub fn agrees_with(&self, value: &Value) -> bool {
        match (self, value) {
            (HostValue::Number(a), Value::Number(b)) => a == b,
            (HostValue::Boolean(a), Value::Boolean(b)) => a == b,
            (HostValue::Function(_), Value::Closure { .. }) => true,
            _ => false,
        }
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::Number(a), HostValue::Number(b)) => a == b,
            (HostValue::Boolean(a), HostValue::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Number(n) => write!(f, "{}", n),
            HostValue::Boolean(b) => write!(f, "{}", b),
            HostValue::Function(function) => write!(f, "<function : {}>", function.ty()),
        }
    }
}

/// An environment entry of the typed interpreter: a value plus the witness
/// it was bound under.
#[derive(Debug, Clone)]
pub struct Witnessed {
    pub value: HostValue,
    pub witness: Type,
}

impl Witnessed {
    pub fn new(value: HostValue, witness: Type) -> Self {
        Witnessed { value, witness }
    }
}

impl fmt::Display for Witnessed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.value, self.witness)
    }
}

/// Runtime environment of the typed interpreter
pub type TypedEnvironment = Env<Witnessed>;

impl Env<Witnessed> {
    /// Bind a host value under the witness of its static type.
    pub fn bind_host<T: Ty>(&self, name: impl Into<String>, host: T::Host) -> Self {
        self.bind(name, Witnessed::new(T::into_host_value(host), T::descriptor()))
    }

    /// The descriptors of every visible binding, for checking programs that
    /// will run in this environment.
    pub fn type_environment(&self) -> TypeEnvironment {
        TypeEnvironment::with_bindings(
            self.bindings()
                .into_iter()
                .rev()
                .map(|(name, entry)| (name, entry.witness)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::{Fun, Num};

    #[test]
    fn test_bind_host_records_witness() {
        let env = TypedEnvironment::empty().bind_host::<Num>("x", 7);
        let entry = env.lookup("x").unwrap();
        assert_eq!(entry.witness, Type::Num);
        assert_eq!(entry.value, HostValue::Number(7));
    }

    #[test]
    fn test_type_environment_keeps_shadowing() {
        let succ: HostFn<i64, i64> = Rc::new(|n| Ok(n + 1));
        let env = TypedEnvironment::empty()
            .bind_host::<Num>("x", 1)
            .bind_host::<Fun<Num, Num>>("x", succ);

        let types = env.type_environment();
        assert_eq!(
            types.lookup("x"),
            Some(Type::function(Type::Num, Type::Num))
        );
    }

    #[test]
    fn test_agrees_with_untyped_values() {
        assert!(HostValue::Number(3).agrees_with(&Value::Number(3)));
        assert!(!HostValue::Number(3).agrees_with(&Value::Number(4)));
        assert!(!HostValue::Boolean(true).agrees_with(&Value::Number(1)));
    }

    #[test]
    fn test_display() {
        let f = HostFunction::new(Type::function(Type::Num, Type::Bool), |_| {
            Ok(HostValue::Boolean(true))
        });
        assert_eq!(
            HostValue::Function(f).to_string(),
            "<function : Num -> Bool>"
        );
        assert_eq!(HostValue::Number(-2).to_string(), "-2");
    }
}
