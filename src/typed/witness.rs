//! # Type-Level Markers and Runtime Witnesses
//!
//! [`TypedExpr`](super::TypedExpr) is indexed by a marker type standing for
//! the descriptor the node evaluates to:
//!
//! | Descriptor      | Marker      | Host value                                          |
//! |-----------------|-------------|-----------------------------------------------------|
//! | `Num`           | [`Num`]     | `i64`                                               |
//! | `Bool`          | [`Bool`]    | `bool`                                              |
//! | `A -> B`        | [`Fun<A, B>`] | `Rc<dyn Fn(A::Host) -> Result<B::Host, RuntimeError>>` |
//!
//! Markers exist only at compile time. At runtime each one is represented by
//! a [`TypeWitness`], which carries the descriptor so values crossing the
//! dynamic boundary (environment lookups, erased subtrees) can be checked
//! before they are trusted. Every conversion from the dynamic [`HostValue`]
//! back to a host type goes through such a check; nothing is downcast blindly.

use std::marker::PhantomData;
use std::rc::Rc;

use log::{debug, trace};

use crate::types::Type;

use super::error::RuntimeError;
use super::host::{HostFn, HostFunction, HostValue};

/// A type index of the typed AST.
pub trait Ty: Sized + 'static {
    /// Host representation of values of this type
    type Host: Clone + 'static;

    fn descriptor() -> Type;

    fn witness() -> TypeWitness<Self> {
        TypeWitness {
            descriptor: Self::descriptor(),
            marker: PhantomData,
        }
    }

    fn into_host_value(host: Self::Host) -> HostValue;

    /// Checked conversion out of the dynamic representation.
    fn from_host_value(value: HostValue) -> Result<Self::Host, RuntimeError>;
}

/// Index of numeric expressions
#[derive(Debug, Clone, Copy)]
pub struct Num;

/// Index of boolean expressions
#[derive(Debug, Clone, Copy)]
pub struct Bool;

/// Index of functions from `A` to `B`
#[derive(Debug, Clone, Copy)]
pub struct Fun<A, B>(PhantomData<fn() -> (A, B)>);

impl Ty for Num {
    type Host = i64;

    fn descriptor() -> Type {
        Type::Num
    }

    fn into_host_value(host: i64) -> HostValue {
        HostValue::Number(host)
    }

    fn from_host_value(value: HostValue) -> Result<i64, RuntimeError> {
        match value {
            HostValue::Number(n) => Ok(n),
            other => Err(RuntimeError::witness_mismatch(
                Type::Num,
                other.ty(),
                "host conversion",
            )),
        }
    }
}

impl Ty for Bool {
    type Host = bool;

    fn descriptor() -> Type {
        Type::Bool
    }

    fn into_host_value(host: bool) -> HostValue {
        HostValue::Boolean(host)
    }

    fn from_host_value(value: HostValue) -> Result<bool, RuntimeError> {
        match value {
            HostValue::Boolean(b) => Ok(b),
            other => Err(RuntimeError::witness_mismatch(
                Type::Bool,
                other.ty(),
                "host conversion",
            )),
        }
    }
}

impl<A: Ty, B: Ty> Ty for Fun<A, B> {
    type Host = HostFn<A::Host, B::Host>;

    fn descriptor() -> Type {
        Type::function(A::descriptor(), B::descriptor())
    }

    fn into_host_value(host: Self::Host) -> HostValue {
        HostValue::Function(HostFunction::new(Self::descriptor(), move |argument| {
            let argument = A::from_host_value(argument)?;
            Ok(B::into_host_value(host(argument)?))
        }))
    }

    fn from_host_value(value: HostValue) -> Result<Self::Host, RuntimeError> {
        match value {
            HostValue::Function(function) if Self::witness().cast(function.ty()).is_some() => {
                let host: Self::Host = Rc::new(move |argument| {
                    B::from_host_value(function.call(A::into_host_value(argument))?)
                });
                Ok(host)
            }
            other => Err(RuntimeError::witness_mismatch(
                Self::descriptor(),
                other.ty(),
                "host conversion",
            )),
        }
    }
}

/// Runtime evidence for the marker type `T`.
///
/// Only [`Ty::witness`] creates one, so the descriptor inside always
/// describes `T`.
pub struct TypeWitness<T> {
    descriptor: Type,
    marker: PhantomData<fn() -> T>,
}

impl<T: Ty> TypeWitness<T> {
    pub fn descriptor(&self) -> &Type {
        &self.descriptor
    }

    /// Compare a descriptor found at runtime with this witness.
    ///
    /// On success, returns the proof that the value described by `found`
    /// may be used at type `T`.
    pub fn cast(&self, found: &Type) -> Option<Equal<T>> {
        agree(&self.descriptor, found).then_some(Equal {
            marker: PhantomData,
        })
    }

    /// Compare two witnesses; a proof means `U` and `T` are the same type.
    pub fn same_as<U: Ty>(&self, other: &TypeWitness<U>) -> Option<Equal<T>> {
        self.cast(&other.descriptor)
    }
}

impl<T> Clone for TypeWitness<T> {
    fn clone(&self) -> Self {
        TypeWitness {
            descriptor: self.descriptor.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for TypeWitness<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TypeWitness").field(&self.descriptor).finish()
    }
}

/// Proof that a descriptor checked by [`TypeWitness::cast`] is the
/// descriptor of `T`.
#[derive(Debug)]
pub struct Equal<T> {
    marker: PhantomData<fn() -> T>,
}

/// Compare an expected descriptor with one found at runtime.
pub(crate) fn agree(expected: &Type, found: &Type) -> bool {
    if expected == found {
        trace!("witness {} accepted", expected);
        true
    } else {
        debug!("witness mismatch: expected {}, found {}", expected, found);
        false
    }
}
