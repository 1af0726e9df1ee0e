//! Bundled example programs
//!
//! There is no parser; these trees are built with the [`Expression`]
//! builders and serve as demos for the `pl` binary and as fixtures in tests.

use crate::ast::Expression;
use crate::types::Type;

/// A named example program.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Expression,
}

impl Sample {
    pub fn program(&self) -> Expression {
        (self.build)()
    }
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "range-sum",
        description: "recursive sum of the numbers 1 to 10",
        build: range_sum,
    },
    Sample {
        name: "fibonacci",
        description: "doubly recursive fibonacci of 12",
        build: fibonacci,
    },
    Sample {
        name: "static-scoping",
        description: "a function sees the binding in scope where it was defined",
        build: static_scoping,
    },
    Sample {
        name: "closure-capture",
        description: "a curried adder keeps its first argument",
        build: closure_capture,
    },
    Sample {
        name: "shadowing",
        description: "an inner binding hides an outer one of the same name",
        build: shadowing,
    },
    Sample {
        name: "higher-order",
        description: "a function applied twice through a parameter",
        build: higher_order,
    },
    Sample {
        name: "maximum",
        description: "the larger of two numbers",
        build: maximum,
    },
    Sample {
        name: "untaken-branch",
        description: "an unbound name in a branch that never runs",
        build: untaken_branch,
    },
    Sample {
        name: "ill-typed-addition",
        description: "adding a boolean to a number",
        build: ill_typed_addition,
    },
];

pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|sample| sample.name == name)
}

fn num_to_num() -> Type {
    Type::function(Type::Num, Type::Num)
}

fn var(name: &str) -> Expression {
    Expression::reference(name)
}

fn num(n: i64) -> Expression {
    Expression::number(n)
}

/// ```text
/// let rec sum : Num -> Num -> Num =
///   \lower : Num => \upper : Num =>
///     if lower > upper then 0 else lower + sum(lower + 1)(upper) end
/// in sum(1)(10)
/// ```
pub fn range_sum() -> Expression {
    range_sum_to(10)
}

/// [`range_sum`] with `upper` in place of `10`; recursion depth grows with it.
pub fn range_sum_to(upper: i64) -> Expression {
    let body = Expression::conditional(
        Expression::greater_than(var("lower"), var("upper")),
        num(0),
        Expression::add(
            var("lower"),
            Expression::apply_many(
                var("sum"),
                [Expression::add(var("lower"), num(1)), var("upper")],
            ),
        ),
    );
    Expression::recursive_binding(
        "sum",
        Type::function(Type::Num, num_to_num()),
        Expression::function(
            "lower",
            Type::Num,
            Expression::function("upper", Type::Num, body),
        ),
        Expression::apply_many(var("sum"), [num(1), num(upper)]),
    )
}

/// `let rec fib : Num -> Num = \n : Num => if 2 > n then n else fib(n + -1) + fib(n + -2) end in fib(12)`
pub fn fibonacci() -> Expression {
    let fib_of = |offset| Expression::apply(var("fib"), Expression::add(var("n"), num(offset)));
    Expression::recursive_binding(
        "fib",
        num_to_num(),
        Expression::function(
            "n",
            Type::Num,
            Expression::conditional(
                Expression::greater_than(num(2), var("n")),
                var("n"),
                Expression::add(fib_of(-1), fib_of(-2)),
            ),
        ),
        Expression::apply(var("fib"), num(12)),
    )
}

/// `let x = 1 in let f = \y : Num => x + y in let x = 100 in f(2)`
pub fn static_scoping() -> Expression {
    Expression::binding(
        "x",
        num(1),
        Expression::binding(
            "f",
            Expression::function("y", Type::Num, Expression::add(var("x"), var("y"))),
            Expression::binding("x", num(100), Expression::apply(var("f"), num(2))),
        ),
    )
}

/// `let make_adder = \n : Num => \m : Num => n + m in let add3 = make_adder(3) in add3(1)`
pub fn closure_capture() -> Expression {
    Expression::binding(
        "make_adder",
        Expression::function(
            "n",
            Type::Num,
            Expression::function("m", Type::Num, Expression::add(var("n"), var("m"))),
        ),
        Expression::binding(
            "add3",
            Expression::apply(var("make_adder"), num(3)),
            Expression::apply(var("add3"), num(1)),
        ),
    )
}

/// `let x = 1 in let x = x + 1 in x`
pub fn shadowing() -> Expression {
    Expression::binding(
        "x",
        num(1),
        Expression::binding("x", Expression::add(var("x"), num(1)), var("x")),
    )
}

/// `let twice = \f : Num -> Num => \x : Num => f(f(x)) in twice(\n : Num => n + 3)(10)`
pub fn higher_order() -> Expression {
    Expression::binding(
        "twice",
        Expression::function(
            "f",
            num_to_num(),
            Expression::function(
                "x",
                Type::Num,
                Expression::apply(var("f"), Expression::apply(var("f"), var("x"))),
            ),
        ),
        Expression::apply_many(
            var("twice"),
            [
                Expression::function("n", Type::Num, Expression::add(var("n"), num(3))),
                num(10),
            ],
        ),
    )
}

/// `let max = \a : Num => \b : Num => if a > b then a else b end in max(3)(7)`
pub fn maximum() -> Expression {
    Expression::binding(
        "max",
        Expression::function(
            "a",
            Type::Num,
            Expression::function(
                "b",
                Type::Num,
                Expression::conditional(
                    Expression::greater_than(var("a"), var("b")),
                    var("a"),
                    var("b"),
                ),
            ),
        ),
        Expression::apply_many(var("max"), [num(3), num(7)]),
    )
}

/// `if true then 1 else undefined end`
///
/// Runs untyped, but is rejected by the type checker.
pub fn untaken_branch() -> Expression {
    Expression::conditional(Expression::boolean(true), num(1), var("undefined"))
}

/// `1 + true`
pub fn ill_typed_addition() -> Expression {
    Expression::add(num(1), Expression::boolean(true))
}
