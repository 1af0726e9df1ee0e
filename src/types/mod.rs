pub mod check;
pub mod error;
pub mod ty;

pub use check::{expect, type_check};
pub use error::TypeError;
pub use ty::Type;

use crate::env::Env;

/// Names in scope during type checking, mapped to their descriptors
pub type TypeEnvironment = Env<Type>;
