//! Single-assignment result slots and the binding adapter behind `completable`.
//!
//! A result slot receives the outcome of exactly one computation: it starts
//! out pending and is settled at most once, with either a value or an error.
//! Every family member can be bound to a slot with `completable(slot)`, which
//! yields an effect of the same arity that runs the member and settles the
//! slot with whatever it produced.
//!
//! The slot is supplied by the caller. Anything implementing [`Settle`] can be
//! used; [`ResultSlot`] is the implementation shipped with this crate. With the
//! `async` feature it can also be awaited.
//!
//! # Concurrency
//!
//! The adapter checks [`Settle::is_settled`] before running the primitive and
//! skips it for a settled slot. That check and the later settlement are two
//! separate steps: two adapters sharing one slot and invoked concurrently may
//! both run their primitives. The slot still keeps only the first outcome.
//! Bind one slot to one adapter when the primitive must run at most once.
//!
//! # Examples
//!
//! ```
//! use crayfish_functional::{ResultSlot, Supplyable};
//!
//! let slot = ResultSlot::<i32, String>::new();
//! let task = Supplyable::new(|| Ok(5)).completable(slot.clone());
//!
//! task.run();
//! assert_eq!(slot.peek(), Some(Ok(5)));
//! ```

mod result_slot;

pub use result_slot::ResultSlot;

use std::sync::Arc;

use crate::unchecked;

/// A single-assignment outcome container.
///
/// Implementations must keep the first settlement and ignore every later one.
pub trait Settle<T, E> {
    /// Whether an outcome has already been stored.
    fn is_settled(&self) -> bool;

    /// Store `outcome` unless the slot is already settled.
    ///
    /// Returns `true` when this call settled the slot.
    fn settle(&self, outcome: Result<T, E>) -> bool;
}

impl<T, E, S> Settle<T, E> for Arc<S>
where
    S: Settle<T, E> + ?Sized,
{
    fn is_settled(&self) -> bool {
        (**self).is_settled()
    }

    fn settle(&self, outcome: Result<T, E>) -> bool {
        (**self).settle(outcome)
    }
}

impl<T, E, S> Settle<T, E> for &S
where
    S: Settle<T, E> + ?Sized,
{
    fn is_settled(&self) -> bool {
        (**self).is_settled()
    }

    fn settle(&self, outcome: Result<T, E>) -> bool {
        (**self).settle(outcome)
    }
}

#[cfg(feature = "async")]
impl<T, E> Settle<T, E> for tokio::sync::OnceCell<Result<T, E>> {
    fn is_settled(&self) -> bool {
        self.initialized()
    }

    fn settle(&self, outcome: Result<T, E>) -> bool {
        self.set(outcome).is_ok()
    }
}

/// Run `primitive` into `slot` unless the slot is already settled.
///
/// An unwind carrying an `E` (a nested non-fallible call that failed) lands in
/// the failure channel like a returned `Err`.
pub(crate) fn settle_with<S, T, E, F>(slot: &S, primitive: F)
where
    S: Settle<T, E> + ?Sized,
    E: 'static,
    F: FnOnce() -> Result<T, E>,
{
    if slot.is_settled() {
        #[cfg(feature = "tracing")]
        tracing::trace!("result slot already settled, primitive skipped");
        return;
    }
    let outcome = unchecked::catch::<_, E>(primitive).and_then(|outcome| outcome);
    if outcome.is_err() {
        #[cfg(feature = "tracing")]
        tracing::debug!("primitive failed, settling result slot with its error");
    }
    slot.settle(outcome);
}
