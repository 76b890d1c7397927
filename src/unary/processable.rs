//! Fallible effects without input or output.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::slot::{settle_with, Settle};
use crate::unchecked;
use crate::with;
use crate::Supplyable;

type ProcessFn<E> = Arc<dyn Fn() -> Result<(), E> + Send + Sync>;

/// A side effect that may fail with `E`.
///
/// A `Processable` is also a producer of `()`: see [`supplyable`](Self::supplyable)
/// and [`supplied`](Self::supplied).
///
/// # Examples
///
/// ```
/// use crayfish_functional::Processable;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = {
///     let hits = Arc::clone(&hits);
///     Processable::<String>::new(move || {
///         hits.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     })
/// };
///
/// counter.run();
/// assert_eq!(counter.execute(), Ok(()));
/// assert_eq!(hits.load(Ordering::SeqCst), 2);
/// ```
pub struct Processable<E = Infallible> {
    inner: ProcessFn<E>,
}

impl<E> Clone for Processable<E> {
    fn clone(&self) -> Self {
        Processable {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for Processable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processable")
            .field("inner", &"<function>")
            .finish()
    }
}

impl<E> Processable<E>
where
    E: 'static,
{
    /// Adapt a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<(), E> + Send + Sync + 'static,
    {
        Processable { inner: Arc::new(f) }
    }

    /// Adapt an infallible closure.
    pub fn cast<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move || {
            f();
            Ok(())
        })
    }

    /// Run the effect, reporting failure as `Err`.
    pub fn execute(&self) -> Result<(), E> {
        (self.inner)()
    }

    /// Run the effect, unwinding with the error as payload on failure.
    pub fn run(&self)
    where
        E: Send,
    {
        unchecked::rethrow(self.execute())
    }

    /// This effect seen as a producer of `()`.
    pub fn supplyable(&self) -> Supplyable<(), E> {
        let this = self.clone();
        Supplyable::new(move || this.execute())
    }

    /// This effect seen as a producer of an always absent `R`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crayfish_functional::Processable;
    ///
    /// let noop = Processable::<String>::cast(|| ());
    /// assert_eq!(noop.supplied::<u64>().execute(), Ok(None));
    /// ```
    pub fn supplied<R>(&self) -> Supplyable<Option<R>, E>
    where
        R: 'static,
    {
        let this = self.clone();
        Supplyable::new(move || this.execute().map(|()| None))
    }

    /// Run `processable` first, then this effect.
    pub fn previously(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move || with::voidable(&this).primarily(&processable))
    }

    /// Run this effect, then `processable`.
    pub fn further_run(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move || with::voidable(&this).further(&processable))
    }

    /// Bind this effect to a result slot, settling it with `()` or the failure.
    pub fn completable<S>(&self, slot: S) -> Processable<Infallible>
    where
        S: Settle<(), E> + Send + Sync + 'static,
    {
        let this = self.clone();
        Processable::new(move || {
            settle_with(&slot, || this.execute());
            Ok(())
        })
    }
}
