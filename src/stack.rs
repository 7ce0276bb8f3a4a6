//! Stack growth for evaluation that nests with the input.
//!
//! Continuations run inside the parser that produced them, so a repetition over `n` items or a grammar nested `n`
//! levels deep uses stack in proportion to `n`. With the `stacker` feature those frames spill onto heap-allocated
//! stack segments instead of overflowing the thread's stack.

#[cfg(feature = "stacker")]
const RED_ZONE: usize = 64 * 1024;
#[cfg(feature = "stacker")]
const STACK_GROWTH: usize = 1024 * 1024;

#[cfg(feature = "stacker")]
#[inline]
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, f)
}

#[cfg(not(feature = "stacker"))]
#[inline]
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
