use std::rc::Rc;

use crate::types::Type;

/// Untyped program tree.
///
/// Trees are immutable once built. Children sit behind `Rc` so a closure can
/// hold on to its body without copying it.
///
/// # Variants
///
/// * `NumberLiteral` / `BooleanLiteral` - constants
/// * `Add` / `GreaterThan` - arithmetic and comparison on numbers
/// * `Conditional` - `if predicate then on_true else on_false`
/// * `Binding` - non-recursive `let`; `value` does not see `name`
/// * `RecursiveBinding` - `let rec`; `value` sees `name` and must be a function
/// * `Reference` - variable use
/// * `FunctionLiteral` - unary function introduction
/// * `Apply` - unary function application
///
/// `annotation` fields are ignored by the interpreter but required by the type
/// checker, which does no inference.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    NumberLiteral(i64),
    BooleanLiteral(bool),
    Add(Rc<Expression>, Rc<Expression>),
    GreaterThan(Rc<Expression>, Rc<Expression>),
    Conditional {
        predicate: Rc<Expression>,
        on_true: Rc<Expression>,
        on_false: Rc<Expression>,
    },
    Binding {
        name: String,
        value: Rc<Expression>,
        body: Rc<Expression>,
    },
    RecursiveBinding {
        name: String,
        annotation: Option<Type>,
        value: Rc<Expression>,
        body: Rc<Expression>,
    },
    Reference(String),
    FunctionLiteral {
        parameter: String,
        annotation: Option<Type>,
        body: Rc<Expression>,
    },
    Apply {
        function: Rc<Expression>,
        argument: Rc<Expression>,
    },
}

impl Expression {
    pub fn number(value: i64) -> Self {
        Expression::NumberLiteral(value)
    }

    pub fn boolean(value: bool) -> Self {
        Expression::BooleanLiteral(value)
    }

    pub fn add(left: Expression, right: Expression) -> Self {
        Expression::Add(Rc::new(left), Rc::new(right))
    }

    pub fn greater_than(left: Expression, right: Expression) -> Self {
        Expression::GreaterThan(Rc::new(left), Rc::new(right))
    }

    pub fn conditional(predicate: Expression, on_true: Expression, on_false: Expression) -> Self {
        Expression::Conditional {
            predicate: Rc::new(predicate),
            on_true: Rc::new(on_true),
            on_false: Rc::new(on_false),
        }
    }

    pub fn binding(name: impl Into<String>, value: Expression, body: Expression) -> Self {
        Expression::Binding {
            name: name.into(),
            value: Rc::new(value),
            body: Rc::new(body),
        }
    }

    /// `let rec name : annotation = value in body`
    pub fn recursive_binding(
        name: impl Into<String>,
        annotation: Type,
        value: Expression,
        body: Expression,
    ) -> Self {
        Expression::RecursiveBinding {
            name: name.into(),
            annotation: Some(annotation),
            value: Rc::new(value),
            body: Rc::new(body),
        }
    }

    /// `let rec` without a type annotation; runs, but does not type check.
    pub fn untyped_recursive_binding(
        name: impl Into<String>,
        value: Expression,
        body: Expression,
    ) -> Self {
        Expression::RecursiveBinding {
            name: name.into(),
            annotation: None,
            value: Rc::new(value),
            body: Rc::new(body),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Expression::Reference(name.into())
    }

    /// `\parameter : annotation => body`
    pub fn function(parameter: impl Into<String>, annotation: Type, body: Expression) -> Self {
        Expression::FunctionLiteral {
            parameter: parameter.into(),
            annotation: Some(annotation),
            body: Rc::new(body),
        }
    }

    /// Function literal without a parameter annotation; runs, but does not type check.
    pub fn untyped_function(parameter: impl Into<String>, body: Expression) -> Self {
        Expression::FunctionLiteral {
            parameter: parameter.into(),
            annotation: None,
            body: Rc::new(body),
        }
    }

    pub fn apply(function: Expression, argument: Expression) -> Self {
        Expression::Apply {
            function: Rc::new(function),
            argument: Rc::new(argument),
        }
    }

    /// Curried application: `apply_many(f, [a, b])` is `f(a)(b)`.
    pub fn apply_many(function: Expression, arguments: impl IntoIterator<Item = Expression>) -> Self {
        arguments
            .into_iter()
            .fold(function, |function, argument| Expression::apply(function, argument))
    }

    /// Short node name used in error context.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::NumberLiteral(_) => "number literal",
            Expression::BooleanLiteral(_) => "boolean literal",
            Expression::Add(_, _) => "addition",
            Expression::GreaterThan(_, _) => "comparison",
            Expression::Conditional { .. } => "conditional",
            Expression::Binding { .. } => "binding",
            Expression::RecursiveBinding { .. } => "recursive binding",
            Expression::Reference(_) => "reference",
            Expression::FunctionLiteral { .. } => "function literal",
            Expression::Apply { .. } => "application",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_many_is_curried() {
        let expr = Expression::apply_many(
            Expression::reference("f"),
            [Expression::number(1), Expression::number(2)],
        );
        let expected = Expression::apply(
            Expression::apply(Expression::reference("f"), Expression::number(1)),
            Expression::number(2),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_apply_many_without_arguments() {
        let expr = Expression::apply_many(Expression::reference("f"), []);
        assert_eq!(expr, Expression::reference("f"));
    }

    #[test]
    fn test_builders_keep_annotations() {
        let expr = Expression::function("x", Type::Num, Expression::reference("x"));
        match expr {
            Expression::FunctionLiteral { annotation, .. } => assert_eq!(annotation, Some(Type::Num)),
            other => panic!("expected function literal, got {:?}", other),
        }
    }
}
