//! Stack growth for the recursive tree walks
//!
//! Evaluation recurses once per nested node and once per call, so a deep
//! `let rec` loop outgrows a thread's default stack long before it runs out
//! of memory. Every walk enters its per-node step through [`grow`].

/// Remaining stack below which a new segment is allocated
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each newly allocated segment
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

pub(crate) fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, f)
}
