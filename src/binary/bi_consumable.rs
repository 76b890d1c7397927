//! Fallible effects over two arguments.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::slot::{settle_with, Settle};
use crate::unchecked;
use crate::with::With;
use crate::{BiFunctional, Consumable, Functional, Processable};

type BiConsumeFn<T, U, E> = Arc<dyn Fn(T, U) -> Result<(), E> + Send + Sync>;

/// A side effect over `(T, U)` that may fail with `E`.
///
/// # Examples
///
/// ```
/// use crayfish_functional::BiConsumable;
///
/// let put = BiConsumable::<&str, i32, String>::new(|key, value| {
///     if key.is_empty() { Err(format!("no key for {}", value)) } else { Ok(()) }
/// });
///
/// let put_answer = put.left("answer");
/// assert_eq!(put_answer.execute(42), Ok(()));
/// assert_eq!(put.right(7).execute(""), Err("no key for 7".to_string()));
/// ```
pub struct BiConsumable<T, U, E = Infallible> {
    inner: BiConsumeFn<T, U, E>,
}

impl<T, U, E> Clone for BiConsumable<T, U, E> {
    fn clone(&self) -> Self {
        BiConsumable {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, U, E> fmt::Debug for BiConsumable<T, U, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiConsumable")
            .field("inner", &"<function>")
            .finish()
    }
}

impl<T, U, E> BiConsumable<T, U, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
{
    /// Adapt a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T, U) -> Result<(), E> + Send + Sync + 'static,
    {
        BiConsumable { inner: Arc::new(f) }
    }

    /// Adapt an infallible closure.
    pub fn cast<F>(f: F) -> Self
    where
        F: Fn(T, U) + Send + Sync + 'static,
    {
        Self::new(move |left, right| {
            f(left, right);
            Ok(())
        })
    }

    /// Run the effect, reporting failure as `Err`.
    pub fn execute(&self, left: T, right: U) -> Result<(), E> {
        (self.inner)(left, right)
    }

    /// Run the effect, unwinding with the error as payload on failure.
    pub fn accept(&self, left: T, right: U)
    where
        E: Send,
    {
        unchecked::rethrow(self.execute(left, right))
    }

    /// Fix the first argument.
    pub fn left(&self, left: T) -> Consumable<U, E>
    where
        T: Clone + Send + Sync,
    {
        let this = self.clone();
        Consumable::new(move |right| this.execute(left.clone(), right))
    }

    /// Fix the second argument.
    pub fn right(&self, right: U) -> Consumable<T, E>
    where
        U: Clone + Send + Sync,
    {
        let this = self.clone();
        Consumable::new(move |left| this.execute(left, right.clone()))
    }

    /// Fix both arguments.
    pub fn processable(&self, left: T, right: U) -> Processable<E>
    where
        T: Clone + Send + Sync,
        U: Clone + Send + Sync,
    {
        let this = self.clone();
        Processable::new(move || this.execute(left.clone(), right.clone()))
    }

    /// This effect seen as a transform yielding `()`.
    pub fn functional(&self) -> BiFunctional<T, U, (), E> {
        let this = self.clone();
        BiFunctional::new(move |left, right| this.execute(left, right))
    }

    /// This effect seen as a transform yielding an always absent `R`.
    pub fn functionally<R>(&self) -> BiFunctional<T, U, Option<R>, E>
    where
        R: 'static,
    {
        let this = self.clone();
        BiFunctional::new(move |left, right| this.execute(left, right).map(|()| None))
    }

    /// Run `processable` before this effect.
    pub fn previously(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |left, right| {
            With::new(|| this.execute(left, right)).primarily(&processable)
        })
    }

    /// Run this effect, then `processable`.
    pub fn further_run(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |left, right| {
            With::new(|| this.execute(left, right)).further(&processable)
        })
    }

    /// Run this effect, then `after`, both on the same arguments.
    pub fn and_then(&self, after: BiConsumable<T, U, E>) -> Self
    where
        T: Clone,
        U: Clone,
    {
        let this = self.clone();
        Self::new(move |left: T, right: U| {
            this.execute(left.clone(), right.clone())?;
            after.execute(left, right)
        })
    }

    /// Source the first argument from `functional`.
    pub fn with_left<L>(&self, functional: Functional<L, T, E>) -> BiConsumable<L, U, E>
    where
        L: 'static,
    {
        let this = self.clone();
        BiConsumable::new(move |left, right| {
            With::new(|| functional.execute(left)).then(|left| this.execute(left, right))
        })
    }

    /// Source the second argument from `functional`.
    pub fn with_right<H>(&self, functional: Functional<H, U, E>) -> BiConsumable<T, H, E>
    where
        H: 'static,
    {
        let this = self.clone();
        BiConsumable::new(move |left, right| {
            With::new(|| functional.execute(right)).then(|right| this.execute(left, right))
        })
    }

    /// Bind this effect to a result slot, settling it with `()` or the failure.
    pub fn completable<S>(&self, slot: S) -> BiConsumable<T, U, Infallible>
    where
        S: Settle<(), E> + Send + Sync + 'static,
    {
        let this = self.clone();
        BiConsumable::new(move |left, right| {
            settle_with(&slot, || this.execute(left, right));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Probe;
    use crate::ResultSlot;

    fn recorded(probe: &Probe) -> BiConsumable<&'static str, i32, String> {
        let probe = probe.clone();
        BiConsumable::new(move |name, n| {
            probe.record(format!("{}={}", name, n));
            if n < 0 {
                Err(format!("{} is negative", name))
            } else {
                Ok(())
            }
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
    fn accept_and_execute() {
        let probe = Probe::new();
        let c = recorded(&probe);
        c.accept("a", 1);
        assert_eq!(c.execute("b", -1), Err("b is negative".to_string()));
        assert_eq!(
            unchecked::catch::<_, String>(|| c.accept("c", -2)),
            Err("c is negative".to_string())
        );
        assert_eq!(probe.calls(), vec!["a=1", "b=-1", "c=-2"]);
    }

    #[test]
    fn cast_wraps_native_closure() {
        let probe = Probe::new();
        let inner = probe.clone();
        let c = BiConsumable::<i32, i32, String>::cast(move |a, b| inner.record(format!("{}", a + b)));
        c.accept(2, 3);
        assert_eq!(probe.calls(), vec!["5"]);
    }

    #[test]
    fn projections_forward_to_single_call() {
        let probe = Probe::new();
        let c = recorded(&probe);
        c.left("x").accept(1);
        c.right(2).accept("y");
        c.processable("z", 3).run();
        assert_eq!(probe.calls(), vec!["x=1", "y=2", "z=3"]);
    }

    #[test]
    fn functional_lifts_to_absent_result() {
        let probe = Probe::new();
        let c = recorded(&probe);
        assert_eq!(c.functional().execute("a", 1), Ok(()));
        assert_eq!(c.functionally::<u8>().execute("b", 2), Ok(None));
    }

    #[test]
    fn hooks_run_in_order_and_short_circuit() {
        let probe = Probe::new();
        let c = recorded(&probe)
            .previously(step(&probe, "before"))
            .further_run(step(&probe, "after"));
        c.accept("ok", 1);
        assert_eq!(c.execute("bad", -1), Err("bad is negative".to_string()));
        assert_eq!(
            probe.calls(),
            vec!["before", "ok=1", "after", "before", "bad=-1"]
        );
    }

    #[test]
    fn and_then_runs_after_on_same_arguments() {
        let probe = Probe::new();
        let c = recorded(&probe).and_then(recorded(&probe));
        c.accept("twice", 2);
        assert_eq!(probe.calls(), vec!["twice=2", "twice=2"]);
    }

    #[test]
    fn with_left_and_with_right_replace_one_position() {
        let probe = Probe::new();
        let names = Functional::new(|id: u8| Ok(if id == 0 { "zero" } else { "other" }));
        let doubled = Functional::new(|x: i32| Ok(x * 2));
        recorded(&probe).with_left(names).accept(0, 5);
        recorded(&probe).with_right(doubled).accept("d", 4);
        assert_eq!(probe.calls(), vec!["zero=5", "d=8"]);
    }

    #[test]
    fn completable_settles_once() {
        let probe = Probe::new();
        let slot = ResultSlot::<(), String>::new();
        let bound = recorded(&probe).completable(slot.clone());
        bound.accept("first", 1);
        bound.accept("second", 2);
        assert_eq!(slot.peek(), Some(Ok(())));
        assert_eq!(probe.calls(), vec!["first=1"]);
    }
}
