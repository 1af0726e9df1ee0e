//! Typing producer
//!
//! Walks an untyped [`Expression`] under a type environment and either builds
//! the equivalent typed tree or fails with the same [`TypeError`] that
//! [`crate::types::type_check`] reports for that expression. Where a child's
//! type is fixed by its parent, the child is cast to its static index through
//! the witness; elsewhere the checked constructors of [`SomeTypedExpr`] do
//! the comparison.

use crate::ast::Expression;
use crate::stack;
use crate::types::check::recursive_annotation;
use crate::types::{Type, TypeEnvironment, TypeError};

use super::expr::{SomeTypedExpr, TypedExpr};
use super::witness::{Bool, Num};

/// Produce a typed tree for `expr` together with its descriptor.
pub fn typing(
    expr: &Expression,
    env: &TypeEnvironment,
) -> Result<(SomeTypedExpr, Type), TypeError> {
    let typed = produce(expr, env)?;
    let ty = typed.ty().clone();
    Ok((typed, ty))
}

fn produce(expr: &Expression, env: &TypeEnvironment) -> Result<SomeTypedExpr, TypeError> {
    stack::grow(|| produce_node(expr, env)).map_err(|err| err.with_context(expr.kind()))
}

fn produce_node(expr: &Expression, env: &TypeEnvironment) -> Result<SomeTypedExpr, TypeError> {
    match expr {
        Expression::NumberLiteral(n) => Ok(TypedExpr::number(*n).erase()),

        Expression::BooleanLiteral(b) => Ok(TypedExpr::boolean(*b).erase()),

        Expression::Add(left, right) => {
            let left = produce(left, env)?.cast::<Num>()?;
            let right = produce(right, env)?.cast::<Num>()?;
            Ok(TypedExpr::add(left, right).erase())
        }

        Expression::GreaterThan(left, right) => {
            let left = produce(left, env)?.cast::<Num>()?;
            let right = produce(right, env)?.cast::<Num>()?;
            Ok(TypedExpr::greater_than(left, right).erase())
        }

        Expression::Conditional {
            predicate,
            on_true,
            on_false,
        } => {
            let predicate = produce(predicate, env)?.cast::<Bool>()?;
            let on_true = produce(on_true, env)?;
            let on_false = produce(on_false, env)?;
            SomeTypedExpr::conditional(predicate, on_true, on_false)
        }

        Expression::Binding { name, value, body } => {
            let value = produce(value, env)?;
            let body = produce(body, &env.bind(name.clone(), value.ty().clone()))?;
            Ok(SomeTypedExpr::binding(name.clone(), value, body))
        }

        Expression::RecursiveBinding {
            name,
            annotation,
            value,
            body,
        } => {
            let annotation = recursive_annotation(name, annotation.as_ref())?;
            let rec_env = env.bind(name.clone(), annotation.clone());
            let value = produce(value, &rec_env)?;
            if value.ty() != &annotation {
                return Err(TypeError::type_mismatch(annotation, value.ty().clone()));
            }
            let body = produce(body, &rec_env)?;
            SomeTypedExpr::recursive_binding(name.clone(), annotation, value, body)
        }

        Expression::Reference(name) => {
            let ty = env
                .lookup(name)
                .ok_or_else(|| TypeError::unbound_variable(name.clone()))?;
            Ok(SomeTypedExpr::reference(name.clone(), ty))
        }

        Expression::FunctionLiteral {
            parameter,
            annotation,
            body,
        } => {
            let parameter_ty = annotation
                .clone()
                .ok_or_else(|| TypeError::missing_annotation(parameter.clone()))?;
            let body = produce(body, &env.bind(parameter.clone(), parameter_ty.clone()))?;
            Ok(SomeTypedExpr::function(parameter.clone(), parameter_ty, body))
        }

        Expression::Apply { function, argument } => {
            let function = produce(function, env)?;
            // Reject a non-function before looking at the argument
            if !function.ty().is_function() {
                return Err(TypeError::not_a_function(function.ty().clone()));
            }
            let argument = produce(argument, env)?;
            SomeTypedExpr::apply(function, argument)
        }
    }
}
