//! Fallible effects over one argument.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::slot::{settle_with, Settle};
use crate::unchecked;
use crate::with::With;
use crate::{Functional, Processable};

type ConsumeFn<T, E> = Arc<dyn Fn(T) -> Result<(), E> + Send + Sync>;

/// A side effect over a `T` that may fail with `E`.
///
/// A `Consumable` is also a transform yielding nothing: see
/// [`functional`](Self::functional) and [`functionally`](Self::functionally).
///
/// # Examples
///
/// ```
/// use crayfish_functional::Consumable;
///
/// let positive = Consumable::new(|x: i32| {
///     if x > 0 { Ok(()) } else { Err(format!("{} is not positive", x)) }
/// });
///
/// assert_eq!(positive.execute(1), Ok(()));
/// assert_eq!(positive.execute(-1), Err("-1 is not positive".to_string()));
/// ```
pub struct Consumable<T, E = Infallible> {
    inner: ConsumeFn<T, E>,
}

impl<T, E> Clone for Consumable<T, E> {
    fn clone(&self) -> Self {
        Consumable {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> fmt::Debug for Consumable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumable")
            .field("inner", &"<function>")
            .finish()
    }
}

impl<T, E> Consumable<T, E>
where
    T: 'static,
    E: 'static,
{
    /// Adapt a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> Result<(), E> + Send + Sync + 'static,
    {
        Consumable { inner: Arc::new(f) }
    }

    /// Adapt an infallible closure.
    pub fn cast<F>(f: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self::new(move |parameter| {
            f(parameter);
            Ok(())
        })
    }

    /// Run the effect on `parameter`, reporting failure as `Err`.
    pub fn execute(&self, parameter: T) -> Result<(), E> {
        (self.inner)(parameter)
    }

    /// Run the effect on `parameter`, unwinding with the error on failure.
    pub fn accept(&self, parameter: T)
    where
        E: Send,
    {
        unchecked::rethrow(self.execute(parameter))
    }

    /// Fix the argument, giving a 0-ary effect.
    ///
    /// `parameter` is captured now and cloned for every run.
    pub fn processable(&self, parameter: T) -> Processable<E>
    where
        T: Clone + Send + Sync,
    {
        let this = self.clone();
        Processable::new(move || this.execute(parameter.clone()))
    }

    /// This effect seen as a transform yielding `()`.
    pub fn functional(&self) -> Functional<T, (), E> {
        let this = self.clone();
        Functional::new(move |parameter| this.execute(parameter))
    }

    /// This effect seen as a transform yielding an always absent `R`.
    pub fn functionally<R>(&self) -> Functional<T, Option<R>, E>
    where
        R: 'static,
    {
        let this = self.clone();
        Functional::new(move |parameter| this.execute(parameter).map(|()| None))
    }

    /// Run `processable` before this effect.
    pub fn previously(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |parameter| {
            With::new(|| this.execute(parameter)).primarily(&processable)
        })
    }

    /// Run this effect, then `processable`.
    pub fn further_run(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |parameter| With::new(|| this.execute(parameter)).further(&processable))
    }

    /// Run this effect, then `after`, both on the same argument.
    ///
    /// `after` is skipped when this effect fails.
    pub fn and_then(&self, after: Consumable<T, E>) -> Self
    where
        T: Clone,
    {
        let this = self.clone();
        Self::new(move |parameter: T| {
            this.execute(parameter.clone())?;
            after.execute(parameter)
        })
    }

    /// Source the argument from `functional`: the result consumes a `P`.
    pub fn with_param<P>(&self, functional: Functional<P, T, E>) -> Consumable<P, E>
    where
        P: 'static,
    {
        let this = self.clone();
        Consumable::new(move |parameter| {
            With::new(|| functional.execute(parameter)).then(|value| this.execute(value))
        })
    }

    /// Bind this effect to a result slot, settling it with `()` or the failure.
    pub fn completable<S>(&self, slot: S) -> Consumable<T, Infallible>
    where
        S: Settle<(), E> + Send + Sync + 'static,
    {
        let this = self.clone();
        Consumable::new(move |parameter| {
            settle_with(&slot, || this.execute(parameter));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Probe;
    use crate::ResultSlot;

    fn recorded(probe: &Probe) -> Consumable<i32, String> {
        let probe = probe.clone();
        Consumable::new(move |x: i32| {
            probe.record(format!("consume {}", x));
            if x < 0 {
                Err(format!("negative {}", x))
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
    fn accept_matches_execute() {
        let probe = Probe::new();
        let consumer = recorded(&probe);
        consumer.accept(1);
        assert_eq!(consumer.execute(2), Ok(()));
        assert_eq!(probe.calls(), vec!["consume 1", "consume 2"]);
    }

    #[test]
    fn accept_unwinds_with_original_error() {
        let consumer = recorded(&Probe::new());
        assert_eq!(
            unchecked::catch::<_, String>(|| consumer.accept(-3)),
            Err("negative -3".to_string())
        );
    }

    #[test]
    fn cast_wraps_native_consumer() {
        let probe = Probe::new();
        let inner = probe.clone();
        let consumer = Consumable::<&str, String>::cast(move |s| inner.record(s));
        consumer.accept("native");
        assert_eq!(probe.calls(), vec!["native"]);
    }

    #[test]
    fn processable_captures_argument_by_value() {
        let probe = Probe::new();
        let mut argument = 5;
        let effect = recorded(&probe).processable(argument);
        argument = 6;
        effect.run();
        effect.run();
        assert_eq!(argument, 6);
        assert_eq!(probe.calls(), vec!["consume 5", "consume 5"]);
    }

    #[test]
    fn functional_lifts_to_absent_result() {
        let probe = Probe::new();
        assert_eq!(recorded(&probe).functional().execute(1), Ok(()));
        assert_eq!(
            recorded(&probe).functionally::<String>().execute(2),
            Ok(None)
        );
        assert_eq!(
            recorded(&probe).functionally::<String>().execute(-2),
            Err("negative -2".to_string())
        );
    }

    #[test]
    fn previously_and_further_run_order() {
        let probe = Probe::new();
        let consumer = recorded(&probe)
            .previously(step(&probe, "before"))
            .further_run(step(&probe, "after"));
        consumer.accept(1);
        assert_eq!(probe.calls(), vec!["before", "consume 1", "after"]);
    }

    #[test]
    fn further_run_skipped_on_failure() {
        let probe = Probe::new();
        let consumer = recorded(&probe).further_run(step(&probe, "after"));
        assert_eq!(consumer.execute(-1), Err("negative -1".to_string()));
        assert_eq!(probe.count("after"), 0);
    }

    #[test]
    fn and_then_runs_both_in_order() {
        let probe = Probe::new();
        let second = {
            let probe = probe.clone();
            Consumable::new(move |x: i32| {
                probe.record(format!("second {}", x));
                Ok(())
            })
        };
        let both = recorded(&probe).and_then(second);
        both.accept(4);
        assert_eq!(both.execute(-4), Err("negative -4".to_string()));
        assert_eq!(probe.calls(), vec!["consume 4", "second 4", "consume -4"]);
    }

    #[test]
    fn with_param_composes_upstream() {
        let probe = Probe::new();
        let length = Functional::new(|s: &str| Ok::<_, String>(s.len() as i32));
        let consumer = recorded(&probe).with_param(length);
        consumer.accept("four");
        assert_eq!(probe.calls(), vec!["consume 4"]);
    }

    #[test]
    fn with_param_upstream_failure_skips_consumer() {
        let probe = Probe::new();
        let broken = Functional::<&str, i32, String>::new(|_| Err("unparsable".to_string()));
        let consumer = recorded(&probe).with_param(broken);
        assert_eq!(consumer.execute("x"), Err("unparsable".to_string()));
        assert_eq!(probe.total(), 0);
    }

    #[test]
    fn completable_settles_with_unit() {
        let probe = Probe::new();
        let slot = ResultSlot::<(), String>::new();
        let bound = recorded(&probe).completable(slot.clone());
        bound.accept(-1);
        bound.accept(1);
        assert_eq!(slot.peek(), Some(Err("negative -1".to_string())));
        assert_eq!(probe.calls(), vec!["consume -1"]);
    }
}
