//! Evaluator for the untyped AST
//!
//! Eager, innermost-first: operands are evaluated before the node that uses
//! them, except for the branches of a conditional, of which exactly one runs.

use log::trace;

use crate::ast::Expression;
use crate::stack;

use super::Environment;
use super::error::EvalError;
use super::value::Value;

impl Expression {
    pub fn eval(&self, env: &Environment) -> Result<Value, EvalError> {
        stack::grow(|| self.eval_node(env))
    }

    fn eval_node(&self, env: &Environment) -> Result<Value, EvalError> {
        match self {
            Expression::NumberLiteral(n) => Ok(Value::Number(*n)),

            Expression::BooleanLiteral(b) => Ok(Value::Boolean(*b)),

            Expression::Add(left, right) => {
                let left = expect_number(left.eval(env)?, self)?;
                let right = expect_number(right.eval(env)?, self)?;
                Ok(Value::Number(left.wrapping_add(right)))
            }

            Expression::GreaterThan(left, right) => {
                let left = expect_number(left.eval(env)?, self)?;
                let right = expect_number(right.eval(env)?, self)?;
                Ok(Value::Boolean(left > right))
            }

            Expression::Conditional {
                predicate,
                on_true,
                on_false,
            } => match predicate.eval(env)? {
                Value::Boolean(true) => on_true.eval(env),
                Value::Boolean(false) => on_false.eval(env),
                other => Err(EvalError::type_mismatch("boolean", other, self.kind())),
            },

            Expression::Binding { name, value, body } => {
                // The value is evaluated outside its own binding
                let value = value.eval(env)?;
                body.eval(&env.bind(name.clone(), value))
            }

            Expression::RecursiveBinding {
                name, value, body, ..
            } => {
                let rec_env = env.bind_pending(name.clone());
                let value = value.eval(&rec_env)?;
                if !value.is_closure() {
                    return Err(EvalError::type_mismatch("function", value, self.kind()));
                }
                trace!("fixing up recursive binding {}", name);
                rec_env.set(name, value);
                body.eval(&rec_env)
            }

            Expression::Reference(name) => env
                .lookup(name)
                .ok_or_else(|| EvalError::unbound_variable(name.clone())),

            Expression::FunctionLiteral {
                parameter, body, ..
            } => Ok(Value::Closure {
                parameter: parameter.clone(),
                body: body.clone(),
                env: env.clone(),
            }),

            Expression::Apply { function, argument } => {
                let function = function.eval(env)?;
                let argument = argument.eval(env)?;
                function.apply(argument, self.kind())
            }
        }
    }
}

impl Value {
    /// Call a closure: the argument is bound inside the closure's own
    /// environment, never the caller's.
    pub fn apply(self, argument: Value, context: &'static str) -> Result<Value, EvalError> {
        match self {
            Value::Closure {
                parameter,
                body,
                env,
            } => {
                trace!("applying \\{} to {}", parameter, argument);
                body.eval(&env.bind(parameter, argument))
            }
            other => Err(EvalError::not_a_function(other, context)),
        }
    }
}

fn expect_number(value: Value, node: &Expression) -> Result<i64, EvalError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(EvalError::type_mismatch("number", other, node.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_wraps_on_overflow() {
        let expr = Expression::add(Expression::number(i64::MAX), Expression::number(1));
        let result = expr.eval(&Environment::empty()).unwrap();
        assert_eq!(result, Value::Number(i64::MIN));
    }

    #[test]
    fn test_recursive_binding_requires_function() {
        let expr = Expression::untyped_recursive_binding(
            "x",
            Expression::number(1),
            Expression::reference("x"),
        );
        let result = expr.eval(&Environment::empty());
        assert!(matches!(
            result,
            Err(EvalError::TypeMismatch {
                expected: "function",
                ..
            })
        ));
    }

    #[test]
    fn test_recursive_value_cannot_read_itself() {
        let expr = Expression::untyped_recursive_binding(
            "x",
            Expression::reference("x"),
            Expression::reference("x"),
        );
        let result = expr.eval(&Environment::empty());
        assert!(matches!(result, Err(EvalError::UnboundVariable { name }) if name == "x"));
    }

    #[test]
    fn test_apply_non_function() {
        let expr = Expression::apply(Expression::number(1), Expression::number(2));
        let result = expr.eval(&Environment::empty());
        assert!(matches!(result, Err(EvalError::NotAFunction { .. })));
    }
}
