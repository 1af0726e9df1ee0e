//! # Persistent Environments
//!
//! Both evaluators and the type checker look names up in an [`Env`]: a
//! persistent, singly-linked list of frames ordered most-recent-first.
//!
//! ```text
//! e1 = [y: 2] -> [x: 1] -> []
//! e2 = e1.bind("x", 3)   =>   [x: 3] -> [y: 2] -> [x: 1] -> []
//!                                        ^ shared with e1
//! ```
//!
//! [`Env::bind`] never touches the receiver; it allocates one frame that points
//! at the old list. That is what makes shadowing and static scoping work: a
//! closure holding `e1` keeps seeing `x = 1` no matter how many environments are
//! later derived from it.
//!
//! ## Recursive Bindings
//!
//! The only mutation is the recursive-binding fixup. [`Env::bind_pending`]
//! allocates a frame whose slot is `Pending`; the evaluator evaluates the
//! bound function in that environment (so the function captures the frame) and
//! then fills the slot exactly once with `set`. A pending slot looks unbound to
//! [`Env::lookup`].
//!
//! ## Related Modules
//!
//! - [`crate::interpreter`] - `Env<Value>` as the runtime environment
//! - [`crate::types`] - `Env<Type>` as the type environment
//! - [`crate::typed`] - `Env<Witnessed>` pairing values with type witnesses

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;

/// Contents of a single binding cell.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<V> {
    /// Allocated for a recursive binding, not yet filled in.
    Pending,
    Ready(V),
}

struct Frame<V> {
    name: String,
    slot: RefCell<Slot<V>>,
    next: Env<V>,
}

/// Persistent association of names to values, most recent binding first.
pub struct Env<V> {
    head: Option<Rc<Frame<V>>>,
}

// Only names are printed: a recursive closure's environment contains the
// closure itself.
impl<V> fmt::Debug for Env<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list()
            .entries(self.frames().map(|frame| &frame.name))
            .finish()
    }
}

impl<V> Clone for Env<V> {
    fn clone(&self) -> Self {
        Env {
            head: self.head.clone(),
        }
    }
}

impl<V> Default for Env<V> {
    fn default() -> Self {
        Env::empty()
    }
}

impl<V> Env<V> {
    pub fn empty() -> Self {
        Env { head: None }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Return a new environment with `name` bound to `value`.
    pub fn bind(&self, name: impl Into<String>, value: V) -> Self {
        self.push(name.into(), Slot::Ready(value))
    }

    /// Return a new environment with a pending cell for `name`.
    ///
    /// Until the cell is filled, looking `name` up fails as if it were unbound.
    pub fn bind_pending(&self, name: impl Into<String>) -> Self {
        self.push(name.into(), Slot::Pending)
    }

    fn push(&self, name: String, slot: Slot<V>) -> Self {
        Env {
            head: Some(Rc::new(Frame {
                name,
                slot: RefCell::new(slot),
                next: self.clone(),
            })),
        }
    }

    fn frames(&self) -> Frames<'_, V> {
        Frames {
            current: self.head.as_deref(),
        }
    }

    /// Overwrite the nearest cell for `name`.
    ///
    /// Only the recursive-binding fixup calls this, on a cell it has just
    /// created with [`Env::bind_pending`]. Returns `false` if `name` is absent.
    pub(crate) fn set(&self, name: &str, value: V) -> bool {
        match self.frames().find(|frame| frame.name == name) {
            Some(frame) => {
                let mut slot = frame.slot.borrow_mut();
                debug_assert!(
                    matches!(*slot, Slot::Pending),
                    "recursive binding {} filled twice",
                    name
                );
                *slot = Slot::Ready(value);
                true
            }
            None => false,
        }
    }
}

impl<V: Clone> Env<V> {
    /// Find the value of the nearest binding for `name`.
    ///
    /// A pending recursive cell shadows outer bindings and reports `None`.
    pub fn lookup(&self, name: &str) -> Option<V> {
        self.frames()
            .find(|frame| frame.name == name)
            .and_then(|frame| match &*frame.slot.borrow() {
                Slot::Ready(value) => Some(value.clone()),
                Slot::Pending => None,
            })
    }

    /// All filled bindings, most recent first, including shadowed ones.
    pub fn bindings(&self) -> Vec<(String, V)> {
        self.frames()
            .filter_map(|frame| match &*frame.slot.borrow() {
                Slot::Ready(value) => Some((frame.name.clone(), value.clone())),
                Slot::Pending => None,
            })
            .collect()
    }

    /// Build an environment from `(name, value)` pairs; later pairs shadow earlier ones.
    pub fn with_bindings<N: Into<String>>(bindings: impl IntoIterator<Item = (N, V)>) -> Self {
        bindings
            .into_iter()
            .fold(Env::empty(), |env, (name, value)| env.bind(name, value))
    }
}

struct Frames<'a, V> {
    current: Option<&'a Frame<V>>,
}

impl<'a, V> Iterator for Frames<'a, V> {
    type Item = &'a Frame<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.current?;
        self.current = frame.next.head.as_deref();
        Some(frame)
    }
}

impl<V: fmt::Display> fmt::Display for Env<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries = self
            .frames()
            .map(|frame| match &*frame.slot.borrow() {
                Slot::Ready(value) => format!("{}: {}", frame.name, value),
                Slot::Pending => format!("{}: <pending>", frame.name),
            })
            .join(", ");
        write!(f, "[{}]", entries)
    }
}
