//! # Type Error Definitions
//!
//! This module defines error types for the type checking phase.
//! Errors can occur during checking when:
//!
//! - A variable is used but not defined (`UnboundVariable`)
//! - Two types that must be equal are not (`TypeMismatch`)
//! - A non-function is applied, or annotated as a recursive function (`NotAFunction`)
//! - A function or recursive binding lacks its type annotation (`MissingAnnotation`)
//!
//! Checking stops at the first error; there are no partial results.
//!
//! ## Related Modules
//!
//! - [`crate::types::check`] - The type checker producing these errors
//! - [`crate::typed`] - The typing producer and witness casts, which reuse them

use std::fmt;

use super::ty::Type;

/// Type error encountered during type checking.
///
/// # Example Error Messages
///
/// ```text
/// Type error: unbound variable: x
/// Type error: type mismatch in addition: expected Num, found Bool
/// Type error: expected a function type, found Num in application
/// Type error: missing type annotation for x in function literal
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Reference to an undefined variable.
    UnboundVariable {
        /// The undefined variable name
        name: String,
    },

    /// Two descriptors that are required to be equal are not.
    TypeMismatch {
        /// The type that was expected
        expected: Type,
        /// The type that was actually found
        found: Type,
        /// Node kind where the mismatch occurred
        context: String,
    },

    /// A function type was required.
    NotAFunction {
        /// The non-function type
        found: Type,
        /// Node kind that required a function
        context: String,
    },

    /// A parameter or recursive binding has no type annotation.
    MissingAnnotation {
        /// The unannotated name
        name: String,
        /// Node kind carrying the name
        context: String,
    },
}

impl TypeError {
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        TypeError::UnboundVariable { name: name.into() }
    }

    pub fn type_mismatch(expected: Type, found: Type) -> Self {
        TypeError::TypeMismatch {
            expected,
            found,
            context: String::new(),
        }
    }

    pub fn not_a_function(found: Type) -> Self {
        TypeError::NotAFunction {
            found,
            context: String::new(),
        }
    }

    pub fn missing_annotation(name: impl Into<String>) -> Self {
        TypeError::MissingAnnotation {
            name: name.into(),
            context: String::new(),
        }
    }

    /// Attach the node kind where the error occurred, unless one is already set.
    ///
    /// Errors bubble up through every enclosing node; the innermost context is
    /// the useful one.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            TypeError::TypeMismatch { context: ctx, .. }
            | TypeError::NotAFunction { context: ctx, .. }
            | TypeError::MissingAnnotation { context: ctx, .. } => {
                if ctx.is_empty() {
                    *ctx = context.into();
                }
            }
            TypeError::UnboundVariable { .. } => {}
        }
        self
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeError::UnboundVariable { name } => {
                write!(f, "Type error: unbound variable: {}", name)
            }
            TypeError::TypeMismatch {
                expected,
                found,
                context,
            } => {
                write!(f, "Type error: type mismatch")?;
                if !context.is_empty() {
                    write!(f, " in {}", context)?;
                }
                write!(
                    f,
                    ": expected {}, found {}",
                    expected.pretty(),
                    found.pretty()
                )
            }
            TypeError::NotAFunction { found, context } => {
                write!(f, "Type error: expected a function type, found {}", found)?;
                if !context.is_empty() {
                    write!(f, " in {}", context)?;
                }
                Ok(())
            }
            TypeError::MissingAnnotation { name, context } => {
                write!(f, "Type error: missing type annotation for {}", name)?;
                if !context.is_empty() {
                    write!(f, " in {}", context)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for TypeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mismatch_with_context() {
        let err = TypeError::type_mismatch(Type::Num, Type::Bool).with_context("addition");
        assert_eq!(
            err.to_string(),
            "Type error: type mismatch in addition: expected Num, found Bool"
        );
    }

    #[test]
    fn test_innermost_context_wins() {
        let err = TypeError::not_a_function(Type::Num)
            .with_context("application")
            .with_context("binding");
        assert_eq!(
            err,
            TypeError::NotAFunction {
                found: Type::Num,
                context: "application".to_string()
            }
        );
    }

    #[test]
    fn test_display_unbound() {
        let err = TypeError::unbound_variable("x").with_context("reference");
        assert_eq!(err.to_string(), "Type error: unbound variable: x");
    }
}
