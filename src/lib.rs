//! # pl - A Small Expression Language with Two Evaluators
//!
//! `pl` is a toy functional language: numbers, booleans, addition, comparison,
//! conditionals, `let`, `let rec` and unary first-class functions. There is no
//! parser; programs are built as trees with the [`ast::Expression`] builders.
//!
//! ## Architecture Overview
//!
//! 1. **AST** (`ast`) - The untyped expression tree
//! 2. **Environments** (`env`) - Persistent name-to-value maps shared by every phase
//! 3. **Interpreter** (`interpreter`) - Untyped eager evaluator with closures
//! 4. **Type Checking** (`types`) - Monomorphic checker over annotated trees
//! 5. **Typed Trees** (`typed`) - Type-indexed trees, witnesses, and a typed evaluator
//!
//! ## Pipeline Flow
//!
//! ```text
//! Expression
//!     ├─[interpreter::interpret]──────────────────────────────→ Value
//!     ├─[types::type_check]──→ Type
//!     └─[typed::typing]──→ SomeTypedExpr ─[typed::interpret_erased]─→ HostValue
//! ```
//!
//! The untyped path runs any tree and fails at runtime on misuse. The typed
//! path refuses ill-typed trees up front; the only runtime failures left are
//! those caused by an environment that disagrees with the static types.
//!
//! ## Key Design Decisions
//!
//! ### Static Scoping
//! A function literal evaluates to a closure over the environment at its
//! definition. Application binds the argument in that captured environment,
//! never in the caller's.
//!
//! ### Recursion Without Nulls
//! `let rec` allocates a pending cell, evaluates the function in an
//! environment containing it, then fills the cell once. Reading the cell
//! before it is filled is an unbound-variable error.
//!
//! ### No Inference
//! Function parameters and recursive bindings carry type annotations; the
//! checker computes every other type bottom-up.
//!
//! ## Module Structure
//!
//! - [`ast`] - Expression tree and builders
//! - [`env`] - Persistent environments
//! - [`interpreter`] - Untyped evaluation
//! - [`types`] - Type descriptors and the checker
//! - [`typed`] - Typed trees and typed evaluation
//! - [`fmt`] - Pretty-printing
//! - [`samples`] - Bundled example programs
//! - [`pipeline`] - Check and run a program through both evaluators
//!
//! ## Example Program
//!
//! ```text
//! let rec sum : Num -> Num -> Num =
//!   \lower : Num => \upper : Num =>
//!     if lower > upper then 0 else lower + sum(lower + 1)(upper) end
//! in sum(1)(10)
//! ```
//!
//! Built by [`samples::range_sum`]; both evaluators produce `55`.

pub mod ast;
pub mod env;
pub mod fmt;
pub mod interpreter;
pub mod pipeline;
pub mod samples;
mod stack;
pub mod typed;
pub mod types;
