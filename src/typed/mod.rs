//! # Typed Expressions
//!
//! The second evaluation path: an untyped [`Expression`](crate::ast::Expression)
//! is turned into a typed tree by [`typing`], and that tree is run by
//! [`interpret_typed`] or [`interpret_erased`] to a host value.
//!
//! ## Pipeline
//!
//! ```text
//! Expression --typing--> SomeTypedExpr --cast::<T>--> TypedExpr<T>
//!                              |                           |
//!                       interpret_erased             interpret_typed
//!                              v                           v
//!                          HostValue                    T::Host
//! ```
//!
//! ## What Is Guaranteed Statically
//!
//! Nodes with a fixed result type are only constructible from children of
//! the right index: [`TypedExpr::add`] takes two `TypedExpr<Num>` and there is
//! no way to pass a `TypedExpr<Bool>`. Evaluating those nodes needs no
//! runtime check at all.
//!
//! Variables are the exception. [`TypedExpr::reference`] can be built at any
//! index, because the typed tree does not track its environment in the type.
//! The typed interpreter therefore records the witness of every binding and
//! compares it with the reference's index on lookup. Trees produced by
//! [`typing`] always pass that check; hand-built trees may fail it with
//! [`RuntimeError::WitnessMismatch`].
//!
//! ## Related Modules
//!
//! - [`crate::types`] - Descriptors and the checker whose errors [`typing`] reproduces
//! - [`crate::env`] - The environment shared by all evaluators

mod error;
mod eval;
mod expr;
mod host;
mod typing;
mod witness;

pub use error::RuntimeError;
pub use eval::{interpret_erased, interpret_typed};
pub use expr::{SomeTypedExpr, TypedExpr};
pub use host::{HostFn, HostFunction, HostValue, TypedEnvironment, Witnessed};
pub use typing::typing;
pub use witness::{Bool, Equal, Fun, Num, Ty, TypeWitness};
