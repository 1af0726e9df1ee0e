//! # Expression AST
//!
//! Programs are trees of [`Expression`] nodes. There is no parser: trees are
//! built in code with the builder functions on [`Expression`], or taken from
//! [`crate::samples`].
//!
//! ```text
//! let y = 1 in
//! let f = \x : Num => x + y in
//! let y = 2 in
//! f(3)
//! ```
//!
//! ```ignore
//! Expression::binding("y", Expression::number(1),
//!     Expression::binding("f",
//!         Expression::function("x", Type::Num,
//!             Expression::add(Expression::reference("x"), Expression::reference("y"))),
//!         Expression::binding("y", Expression::number(2),
//!             Expression::apply(Expression::reference("f"), Expression::number(3)))))
//! ```
//!
//! Functions are strictly unary. Multi-argument functions are curried, see
//! [`Expression::apply_many`].

pub mod expression;

pub use expression::Expression;
