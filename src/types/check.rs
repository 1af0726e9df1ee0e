//! Static type checker
//!
//! Mirrors the interpreter case by case but computes descriptors instead of
//! values. There is no inference: function parameters and recursive bindings
//! carry their types as annotations.

use crate::ast::Expression;
use crate::stack;

use super::TypeEnvironment;
use super::error::TypeError;
use super::ty::Type;

/// Compute the type of `expr` under `env`.
///
/// The first ill-typed subexpression fails the whole check. Errors carry the
/// kind of the innermost node that rejected them.
pub fn type_check(expr: &Expression, env: &TypeEnvironment) -> Result<Type, TypeError> {
    stack::grow(|| check_node(expr, env)).map_err(|err| err.with_context(expr.kind()))
}

/// Check that `expr` has exactly the type `expected`.
pub fn expect(expr: &Expression, expected: &Type, env: &TypeEnvironment) -> Result<(), TypeError> {
    let found = type_check(expr, env)?;
    if &found == expected {
        Ok(())
    } else {
        Err(TypeError::type_mismatch(expected.clone(), found))
    }
}

fn check_node(expr: &Expression, env: &TypeEnvironment) -> Result<Type, TypeError> {
    match expr {
        Expression::NumberLiteral(_) => Ok(Type::Num),

        Expression::BooleanLiteral(_) => Ok(Type::Bool),

        Expression::Add(left, right) => {
            expect(left, &Type::Num, env)?;
            expect(right, &Type::Num, env)?;
            Ok(Type::Num)
        }

        Expression::GreaterThan(left, right) => {
            expect(left, &Type::Num, env)?;
            expect(right, &Type::Num, env)?;
            Ok(Type::Bool)
        }

        Expression::Conditional {
            predicate,
            on_true,
            on_false,
        } => {
            expect(predicate, &Type::Bool, env)?;
            let branch_ty = type_check(on_true, env)?;
            expect(on_false, &branch_ty, env)?;
            Ok(branch_ty)
        }

        Expression::Binding { name, value, body } => {
            let value_ty = type_check(value, env)?;
            type_check(body, &env.bind(name.clone(), value_ty))
        }

        Expression::RecursiveBinding {
            name,
            annotation,
            value,
            body,
        } => {
            let value_ty = recursive_annotation(name, annotation.as_ref())?;
            let rec_env = env.bind(name.clone(), value_ty.clone());
            expect(value, &value_ty, &rec_env)?;
            type_check(body, &rec_env)
        }

        Expression::Reference(name) => env
            .lookup(name)
            .ok_or_else(|| TypeError::unbound_variable(name.clone())),

        Expression::FunctionLiteral {
            parameter,
            annotation,
            body,
        } => {
            let parameter_ty = annotation
                .clone()
                .ok_or_else(|| TypeError::missing_annotation(parameter.clone()))?;
            let body_ty = type_check(body, &env.bind(parameter.clone(), parameter_ty.clone()))?;
            Ok(Type::function(parameter_ty, body_ty))
        }

        Expression::Apply { function, argument } => {
            let function_ty = type_check(function, env)?;
            let (parameter_ty, result_ty) = function_ty
                .as_function()
                .ok_or_else(|| TypeError::not_a_function(function_ty.clone()))?;
            expect(argument, parameter_ty, env)?;
            Ok(result_ty.clone())
        }
    }
}

/// The annotated type of a recursive binding, which must be a function type.
pub(crate) fn recursive_annotation(name: &str, annotation: Option<&Type>) -> Result<Type, TypeError> {
    match annotation {
        Some(ty) if ty.is_function() => Ok(ty.clone()),
        Some(ty) => Err(TypeError::not_a_function(ty.clone())),
        None => Err(TypeError::missing_annotation(name)),
    }
}
