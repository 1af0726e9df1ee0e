//! Typed interpreter
//!
//! Evaluates typed trees to host values. Addition and comparison read their
//! operands at the host type `i64` directly; everything crossing a dynamic
//! boundary (references, function arguments and results) goes through a
//! witness check.

use log::trace;

use crate::stack;
use crate::types::Type;

use super::error::RuntimeError;
use super::expr::{Node, SomeTypedExpr, TypedExpr};
use super::host::{HostFunction, HostValue, TypedEnvironment, Witnessed};
use super::witness::{Ty, agree};

/// Evaluate `expr` to a host value of its static type.
pub fn interpret_typed<T: Ty>(
    expr: &TypedExpr<T>,
    env: &TypedEnvironment,
) -> Result<T::Host, RuntimeError> {
    let value = eval(expr.node(), &T::descriptor(), env)?;
    T::from_host_value(value)
}

/// Evaluate a tree whose type is only known at runtime.
///
/// The result is checked against the tree's descriptor.
pub fn interpret_erased(
    expr: &SomeTypedExpr,
    env: &TypedEnvironment,
) -> Result<HostValue, RuntimeError> {
    let value = eval(expr.node(), expr.ty(), env)?;
    expect_shape(value, expr.ty(), "evaluation result")
}

/// `ty` is the descriptor of `node`, threaded down from its parent.
fn eval(node: &Node, ty: &Type, env: &TypedEnvironment) -> Result<HostValue, RuntimeError> {
    stack::grow(|| eval_node(node, ty, env))
}

fn eval_node(node: &Node, ty: &Type, env: &TypedEnvironment) -> Result<HostValue, RuntimeError> {
    match node {
        Node::Number(n) => Ok(HostValue::Number(*n)),

        Node::Boolean(b) => Ok(HostValue::Boolean(*b)),

        Node::Add(left, right) => {
            let left = interpret_typed(left, env)?;
            let right = interpret_typed(right, env)?;
            Ok(HostValue::Number(left.wrapping_add(right)))
        }

        Node::GreaterThan(left, right) => {
            let left = interpret_typed(left, env)?;
            let right = interpret_typed(right, env)?;
            Ok(HostValue::Boolean(left > right))
        }

        Node::Conditional {
            predicate,
            on_true,
            on_false,
        } => {
            if interpret_typed(predicate, env)? {
                eval(on_true, ty, env)
            } else {
                eval(on_false, ty, env)
            }
        }

        Node::Binding { name, value, body } => {
            let bound = interpret_erased(value, env)?;
            let env = env.bind(name.clone(), Witnessed::new(bound, value.ty().clone()));
            eval(body, ty, &env)
        }

        Node::RecursiveBinding {
            name,
            annotation,
            value,
            body,
        } => {
            let rec_env = env.bind_pending(name.clone());
            let bound = eval(value, annotation, &rec_env)?;
            trace!("fixing up recursive binding {} : {}", name, annotation);
            rec_env.set(name, Witnessed::new(bound, annotation.clone()));
            eval(body, ty, &rec_env)
        }

        Node::Reference(name) => {
            let entry = env
                .lookup(name)
                .ok_or_else(|| RuntimeError::unbound_variable(name.clone()))?;
            let context = format!("reference to {}", name);
            if !agree(ty, &entry.witness) {
                return Err(RuntimeError::witness_mismatch(
                    ty.clone(),
                    entry.witness,
                    context,
                ));
            }
            let found = entry.value.ty();
            if !agree(&entry.witness, &found) {
                return Err(RuntimeError::witness_mismatch(entry.witness, found, context));
            }
            Ok(entry.value)
        }

        Node::Function {
            parameter,
            parameter_ty,
            body,
        } => {
            let captured = env.clone();
            let parameter = parameter.clone();
            let parameter_ty = parameter_ty.clone();
            let body = body.clone();
            Ok(HostValue::Function(HostFunction::new(
                ty.clone(),
                move |argument| {
                    let call_env = captured.bind(
                        parameter.clone(),
                        Witnessed::new(argument, parameter_ty.clone()),
                    );
                    interpret_erased(&body, &call_env)
                },
            )))
        }

        Node::Apply { function, argument } => {
            let callee = interpret_erased(function, env)?;
            let argument = interpret_erased(argument, env)?;
            match callee {
                HostValue::Function(callee) => {
                    expect_shape(callee.call(argument)?, ty, "application")
                }
                other => Err(RuntimeError::witness_mismatch(
                    function.ty().clone(),
                    other.ty(),
                    "application",
                )),
            }
        }
    }
}

fn expect_shape(
    value: HostValue,
    ty: &Type,
    context: &'static str,
) -> Result<HostValue, RuntimeError> {
    let found = value.ty();
    if agree(ty, &found) {
        Ok(value)
    } else {
        Err(RuntimeError::witness_mismatch(ty.clone(), found, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::{Bool, Fun, Num};

    fn make_env() -> TypedEnvironment {
        TypedEnvironment::empty()
    }

    #[test]
    fn eval_add_wraps() {
        let expr = TypedExpr::add(TypedExpr::number(i64::MAX), TypedExpr::number(1));
        assert_eq!(interpret_typed(&expr, &make_env()), Ok(i64::MIN));
    }

    #[test]
    fn eval_conditional_picks_branch() {
        let expr = TypedExpr::conditional(
            TypedExpr::greater_than(TypedExpr::number(1), TypedExpr::number(2)),
            TypedExpr::boolean(false),
            TypedExpr::boolean(true),
        );
        assert_eq!(interpret_typed(&expr, &make_env()), Ok(true));
    }

    #[test]
    fn eval_function_to_host_closure() {
        let inc: TypedExpr<Fun<Num, Num>> = TypedExpr::function(
            "n",
            TypedExpr::add(TypedExpr::reference("n"), TypedExpr::number(1)),
        );
        let host = interpret_typed(&inc, &make_env()).unwrap();
        assert_eq!(host(41), Ok(42));
    }

    #[test]
    fn eval_reference_checks_witness() {
        let env = make_env().bind_host::<Num>("x", 1);
        let expr: TypedExpr<Bool> = TypedExpr::reference("x");
        assert_eq!(
            interpret_typed(&expr, &env),
            Err(RuntimeError::witness_mismatch(
                Type::Bool,
                Type::Num,
                "reference to x"
            ))
        );
    }

    #[test]
    fn eval_reference_checks_value_shape() {
        let env = make_env().bind("x", Witnessed::new(HostValue::Boolean(true), Type::Num));
        let expr: TypedExpr<Num> = TypedExpr::reference("x");
        assert!(matches!(
            interpret_typed(&expr, &env),
            Err(RuntimeError::WitnessMismatch { .. })
        ));
    }

    #[test]
    fn eval_erased_checks_result_against_descriptor() {
        // A host function that breaks its own signature
        let liar = HostFunction::new(Type::function(Type::Num, Type::Num), |_| {
            Ok(HostValue::Boolean(true))
        });
        let env = make_env().bind(
            "liar",
            Witnessed::new(
                HostValue::Function(liar),
                Type::function(Type::Num, Type::Num),
            ),
        );
        let expr = TypedExpr::<Num>::apply(
            TypedExpr::<Fun<Num, Num>>::reference("liar"),
            TypedExpr::number(1),
        )
        .erase();

        assert_eq!(
            interpret_erased(&expr, &env),
            Err(RuntimeError::witness_mismatch(
                Type::Num,
                Type::Bool,
                "application"
            ))
        );
    }

    #[test]
    fn eval_unbound_reference() {
        let expr: TypedExpr<Num> = TypedExpr::reference("y");
        assert_eq!(
            interpret_typed(&expr, &make_env()),
            Err(RuntimeError::unbound_variable("y"))
        );
    }
}
