//! Fallible producers.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::slot::{settle_with, Settle};
use crate::unchecked;
use crate::with;
use crate::{Consumable, Functional, Processable};

type SupplyFn<T, E> = Arc<dyn Fn() -> Result<T, E> + Send + Sync>;

/// A producer of `T` that may fail with `E`.
///
/// `Supplyable` is the 0-ary transform of the family. It wraps one closure
/// and is cheap to clone; combinators build new producers and leave the
/// original untouched.
///
/// # Type Parameters
///
/// * `T` - The produced value
/// * `E` - The failure (defaults to `std::convert::Infallible`)
///
/// # Examples
///
/// ```
/// use crayfish_functional::Supplyable;
///
/// let answer = Supplyable::<_, String>::new(|| Ok(42));
/// assert_eq!(answer.execute(), Ok(42));
/// assert_eq!(answer.get(), 42);
/// ```
pub struct Supplyable<T, E = Infallible> {
    inner: SupplyFn<T, E>,
}

impl<T, E> Clone for Supplyable<T, E> {
    fn clone(&self) -> Self {
        Supplyable {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> fmt::Debug for Supplyable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supplyable")
            .field("inner", &"<function>")
            .finish()
    }
}

impl<T, E> Supplyable<T, E>
where
    T: 'static,
    E: 'static,
{
    /// Adapt a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Supplyable { inner: Arc::new(f) }
    }

    /// Adapt an infallible closure; the primitive always succeeds.
    ///
    /// # Examples
    ///
    /// ```
    /// use crayfish_functional::Supplyable;
    ///
    /// let hello = Supplyable::<_, String>::cast(|| "hello");
    /// assert_eq!(hello.execute(), Ok("hello"));
    /// ```
    pub fn cast<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new(move || Ok(f()))
    }

    /// Produce the value, reporting failure as `Err`.
    pub fn execute(&self) -> Result<T, E> {
        (self.inner)()
    }

    /// Produce the value, unwinding with the error as payload on failure.
    ///
    /// See [`unchecked`](crate::unchecked) for how to recover the error.
    pub fn get(&self) -> T
    where
        E: Send,
    {
        unchecked::rethrow(self.execute())
    }

    /// An effect that produces the value and drops it.
    pub fn processable(&self) -> Processable<E> {
        let this = self.clone();
        Processable::new(move || this.execute().map(drop))
    }

    /// Run `processable` before producing the value.
    ///
    /// If `processable` fails the producer is never invoked.
    ///
    /// # Examples
    ///
    /// ```
    /// use crayfish_functional::{Processable, Supplyable};
    ///
    /// let guard = Processable::new(|| Err("closed".to_string()));
    /// let value = Supplyable::new(|| Ok(1)).previously(guard);
    /// assert_eq!(value.execute(), Err("closed".to_string()));
    /// ```
    pub fn previously(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move || with::with(&this).primarily(&processable))
    }

    /// Produce the value, then run `processable`, then return the value.
    pub fn further_run(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move || with::with(&this).further(&processable))
    }

    /// Produce the value, hand a copy to `consumable`, then return it.
    pub fn further_accept(&self, consumable: Consumable<T, E>) -> Self
    where
        T: Clone,
    {
        let this = self.clone();
        Self::new(move || with::with(&this).consume(&consumable))
    }

    /// Produce the value and map it through `functional`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crayfish_functional::{Functional, Supplyable};
    ///
    /// let three = Supplyable::<_, String>::new(|| Ok(3));
    /// let label = three.further_apply(Functional::cast(|n: i32| format!("#{}", n)));
    /// assert_eq!(label.get(), "#3");
    /// ```
    pub fn further_apply<S>(&self, functional: Functional<T, S, E>) -> Supplyable<S, E>
    where
        S: 'static,
    {
        let this = self.clone();
        Supplyable::new(move || with::with(&this).transform(&functional))
    }

    /// Bind this producer to a result slot.
    ///
    /// The returned effect settles `slot` with the produced value or the
    /// failure, unless the slot is already settled, in which case the
    /// producer is not invoked at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use crayfish_functional::{ResultSlot, Supplyable};
    ///
    /// let slot = ResultSlot::<i32, String>::new();
    /// let bound = Supplyable::new(|| Ok(5)).completable(slot.clone());
    ///
    /// bound.run();
    /// assert_eq!(slot.peek(), Some(Ok(5)));
    /// ```
    pub fn completable<S>(&self, slot: S) -> Processable<Infallible>
    where
        S: Settle<T, E> + Send + Sync + 'static,
    {
        let this = self.clone();
        Processable::new(move || {
            settle_with(&slot, || this.execute());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Probe;

    fn recorded(probe: &Probe, value: i32) -> Supplyable<i32, String> {
        let probe = probe.clone();
        Supplyable::new(move || {
            probe.record("supply");
            Ok(value)
        })
    }

    fn step(probe: &Probe, name: &'static str) -> Processable<String> {
        let probe = probe.clone();
        Processable::new(move || {
            probe.record(name);
            Ok(())
        })
    }

    #[test]
    fn execute_and_get_agree() {
        let probe = Probe::new();
        let supplier = recorded(&probe, 7);
        assert_eq!(supplier.execute(), Ok(7));
        assert_eq!(supplier.get(), 7);
        assert_eq!(probe.count("supply"), 2);
    }

    #[test]
    fn get_unwinds_with_original_error() {
        let supplier = Supplyable::<i32, _>::new(|| Err("no supply".to_string()));
        assert_eq!(
            unchecked::catch::<_, String>(|| supplier.get()),
            Err("no supply".to_string())
        );
    }

    #[test]
    fn cast_never_fails() {
        let supplier = Supplyable::<_, String>::cast(|| 'x');
        assert_eq!(supplier.execute(), Ok('x'));
    }

    #[test]
    fn processable_discards_value() {
        let probe = Probe::new();
        let effect = recorded(&probe, 1).processable();
        assert_eq!(effect.execute(), Ok(()));
        assert_eq!(probe.count("supply"), 1);
    }

    #[test]
    fn previously_runs_effect_first() {
        let probe = Probe::new();
        let supplier = recorded(&probe, 2).previously(step(&probe, "before"));
        assert_eq!(supplier.execute(), Ok(2));
        assert_eq!(probe.calls(), vec!["before", "supply"]);
    }

    #[test]
    fn previously_failure_skips_supplier() {
        let probe = Probe::new();
        let supplier =
            recorded(&probe, 2).previously(Processable::new(|| Err("halt".to_string())));
        assert_eq!(supplier.execute(), Err("halt".to_string()));
        assert_eq!(probe.count("supply"), 0);
    }

    #[test]
    fn further_run_runs_effect_after() {
        let probe = Probe::new();
        let supplier = recorded(&probe, 3).further_run(step(&probe, "after"));
        assert_eq!(supplier.execute(), Ok(3));
        assert_eq!(probe.calls(), vec!["supply", "after"]);
    }

    #[test]
    fn further_run_skipped_on_failure() {
        let probe = Probe::new();
        let supplier = Supplyable::<i32, _>::new(|| Err("dry".to_string()))
            .further_run(step(&probe, "after"));
        assert_eq!(supplier.execute(), Err("dry".to_string()));
        assert!(probe.calls().is_empty());
    }

    #[test]
    fn further_accept_sees_value() {
        let probe = Probe::new();
        let seen = probe.clone();
        let supplier = recorded(&probe, 4).further_accept(Consumable::new(move |x: i32| {
            seen.record(format!("accept {}", x));
            Ok(())
        }));
        assert_eq!(supplier.execute(), Ok(4));
        assert_eq!(probe.calls(), vec!["supply", "accept 4"]);
    }

    #[test]
    fn further_apply_maps_value_once() {
        let probe = Probe::new();
        let supplier = recorded(&probe, 5).further_apply(Functional::new(|x: i32| Ok(x * 10)));
        assert_eq!(supplier.execute(), Ok(50));
        assert_eq!(probe.count("supply"), 1);
    }

    #[test]
    fn chained_combinators_evaluate_supplier_once() {
        let probe = Probe::new();
        let supplier = recorded(&probe, 6)
            .previously(step(&probe, "before"))
            .further_run(step(&probe, "after"))
            .further_apply(Functional::new(|x: i32| Ok(x + 1)));
        assert_eq!(supplier.execute(), Ok(7));
        assert_eq!(probe.calls(), vec!["before", "supply", "after"]);
    }

    #[test]
    fn completable_settles_once() {
        let probe = Probe::new();
        let slot = crate::ResultSlot::<i32, String>::new();
        let bound = recorded(&probe, 5).completable(slot.clone());
        bound.run();
        bound.run();
        assert_eq!(slot.peek(), Some(Ok(5)));
        assert_eq!(probe.count("supply"), 1);
    }

    #[test]
    fn completable_reports_failure() {
        let slot = crate::ResultSlot::<i32, String>::new();
        Supplyable::new(|| Err("empty".to_string()))
            .completable(slot.clone())
            .run();
        assert_eq!(slot.peek(), Some(Err("empty".to_string())));
    }
}
