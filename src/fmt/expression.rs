//! Pretty printer for expressions
//!
//! Prints trees in a small concrete notation:
//!
//! ```text
//! let rec sum : Num -> Num = \n : Num => if n > 0 then n + sum(n + -1) else 0 end in sum(3)
//! ```
//!
//! Binders (`let`, `let rec`, `\`) extend as far right as possible, so they are
//! parenthesised whenever they appear as an operand or in function position.

use std::fmt::{self, Display, Write};

use crate::ast::Expression;
use crate::typed::{SomeTypedExpr, Ty, TypedExpr};
use crate::types::Type;

/// Binders and conditionals
const PREC_BINDER: u8 = 0;
const PREC_COMPARISON: u8 = 3;
const PREC_ADDITION: u8 = 4;
/// Function position of an application
const PREC_CALLEE: u8 = 100;

struct Formatter {
    buffer: String,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_display(&mut self, value: impl Display) {
        // Writing into a String cannot fail
        let _ = write!(self.buffer, "{}", value);
    }

    fn finish(self) -> String {
        self.buffer
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_expression(self, &mut formatter, PREC_BINDER);
        f.write_str(&formatter.finish())
    }
}

impl Display for SomeTypedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expression())
    }
}

impl<T: Ty> Display for TypedExpr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expression())
    }
}

fn format_expression(expr: &Expression, fmt: &mut Formatter, precedence: u8) {
    match expr {
        Expression::NumberLiteral(n) => fmt.write_display(n),
        Expression::BooleanLiteral(b) => fmt.write_str(if *b { "true" } else { "false" }),
        Expression::Reference(name) => fmt.write_str(name),
        Expression::Add(left, right) => {
            format_binary_op(left, "+", right, PREC_ADDITION, fmt, precedence)
        }
        Expression::GreaterThan(left, right) => {
            format_binary_op(left, ">", right, PREC_COMPARISON, fmt, precedence)
        }
        Expression::Conditional {
            predicate,
            on_true,
            on_false,
        } => {
            fmt.write_str("if ");
            format_expression(predicate, fmt, PREC_BINDER);
            fmt.write_str(" then ");
            format_expression(on_true, fmt, PREC_BINDER);
            fmt.write_str(" else ");
            format_expression(on_false, fmt, PREC_BINDER);
            fmt.write_str(" end");
        }
        Expression::Binding { name, value, body } => with_parens(fmt, precedence, |fmt| {
            fmt.write_str("let ");
            fmt.write_str(name);
            fmt.write_str(" = ");
            format_expression(value, fmt, PREC_BINDER);
            fmt.write_str(" in ");
            format_expression(body, fmt, PREC_BINDER);
        }),
        Expression::RecursiveBinding {
            name,
            annotation,
            value,
            body,
        } => with_parens(fmt, precedence, |fmt| {
            fmt.write_str("let rec ");
            fmt.write_str(name);
            format_annotation(annotation.as_ref(), fmt);
            fmt.write_str(" = ");
            format_expression(value, fmt, PREC_BINDER);
            fmt.write_str(" in ");
            format_expression(body, fmt, PREC_BINDER);
        }),
        Expression::FunctionLiteral {
            parameter,
            annotation,
            body,
        } => with_parens(fmt, precedence, |fmt| {
            fmt.write_str("\\");
            fmt.write_str(parameter);
            format_annotation(annotation.as_ref(), fmt);
            fmt.write_str(" => ");
            format_expression(body, fmt, PREC_BINDER);
        }),
        Expression::Apply { function, argument } => {
            format_expression(function, fmt, PREC_CALLEE);
            fmt.write_str("(");
            format_expression(argument, fmt, PREC_BINDER);
            fmt.write_str(")");
        }
    }
}

fn format_binary_op(
    left: &Expression,
    symbol: &str,
    right: &Expression,
    op_prec: u8,
    fmt: &mut Formatter,
    parent_prec: u8,
) {
    let needs_parens = op_prec < parent_prec;

    if needs_parens {
        fmt.write_str("(");
    }

    format_expression(left, fmt, op_prec);
    fmt.write_str(" ");
    fmt.write_str(symbol);
    fmt.write_str(" ");
    format_expression(right, fmt, op_prec + 1);

    if needs_parens {
        fmt.write_str(")");
    }
}

fn with_parens(fmt: &mut Formatter, precedence: u8, body: impl FnOnce(&mut Formatter)) {
    let needs_parens = precedence > PREC_BINDER;
    if needs_parens {
        fmt.write_str("(");
    }
    body(fmt);
    if needs_parens {
        fmt.write_str(")");
    }
}

fn format_annotation(annotation: Option<&Type>, fmt: &mut Formatter) {
    if let Some(ty) = annotation {
        fmt.write_str(" : ");
        fmt.write_str(&ty.pretty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_binding() {
        let expr = Expression::binding(
            "x",
            Expression::number(1),
            Expression::add(Expression::reference("x"), Expression::number(2)),
        );
        assert_eq!(expr.to_string(), "let x = 1 in x + 2");
    }

    #[test]
    fn test_format_nested_addition() {
        let left_nested = Expression::add(
            Expression::add(Expression::number(1), Expression::number(2)),
            Expression::number(3),
        );
        let right_nested = Expression::add(
            Expression::number(1),
            Expression::add(Expression::number(2), Expression::number(3)),
        );
        assert_eq!(left_nested.to_string(), "1 + 2 + 3");
        assert_eq!(right_nested.to_string(), "1 + (2 + 3)");
    }

    #[test]
    fn test_format_comparison_of_sums() {
        let expr = Expression::greater_than(
            Expression::add(Expression::number(1), Expression::number(2)),
            Expression::number(3),
        );
        assert_eq!(expr.to_string(), "1 + 2 > 3");
    }

    #[test]
    fn test_format_function_and_application() {
        let id = Expression::function("x", Type::Num, Expression::reference("x"));
        assert_eq!(id.to_string(), "\\x : Num => x");

        let call = Expression::apply(id, Expression::number(1));
        assert_eq!(call.to_string(), "(\\x : Num => x)(1)");
    }

    #[test]
    fn test_format_curried_application() {
        let expr = Expression::apply_many(
            Expression::reference("f"),
            [Expression::number(1), Expression::number(2)],
        );
        assert_eq!(expr.to_string(), "f(1)(2)");
    }

    #[test]
    fn test_format_recursive_binding() {
        let expr = Expression::recursive_binding(
            "f",
            Type::function(Type::Num, Type::Num),
            Expression::function("n", Type::Num, Expression::reference("n")),
            Expression::apply(Expression::reference("f"), Expression::number(0)),
        );
        assert_eq!(
            expr.to_string(),
            "let rec f : Num -> Num = \\n : Num => n in f(0)"
        );
    }

    #[test]
    fn test_format_conditional() {
        let expr = Expression::conditional(
            Expression::boolean(true),
            Expression::number(1),
            Expression::number(0),
        );
        assert_eq!(expr.to_string(), "if true then 1 else 0 end");
    }

    #[test]
    fn test_format_unannotated() {
        let expr = Expression::untyped_function("x", Expression::reference("x"));
        assert_eq!(expr.to_string(), "\\x => x");
    }
}
