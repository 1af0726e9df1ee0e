//! Code formatting for expressions
//!
//! This module provides `Display` for the untyped [`Expression`](crate::ast::Expression)
//! and for typed trees, which print in the same notation with every
//! annotation present.

pub mod expression;
