//! Sequencing side effects around one deferred value.
//!
//! A [`With`] owns a value source that has not run yet. Each operation
//! consumes the `With`, so the source is evaluated at most once, and places a
//! side effect strictly before or strictly after that evaluation. The
//! sequencing combinators of every family member (`previously`,
//! `further_run`, `further_accept`, `further_apply`, parameter sourcing) are
//! built on these operations.
//!
//! # Examples
//!
//! ```
//! use crayfish_functional::with::{valued, with};
//! use crayfish_functional::{Functional, Processable, Supplyable};
//!
//! let double = Functional::<i32, i32, String>::new(|x| Ok(x * 2));
//! assert_eq!(valued(21).transform(&double), Ok(42));
//!
//! let source = Supplyable::<i32, String>::new(|| Ok(7));
//! let log = Processable::new(|| Ok(()));
//! assert_eq!(with(&source).further(&log), Ok(7));
//! ```

use std::fmt;

use crate::{Consumable, Functional, Processable, Supplyable};

/// A deferred value with ordered side effects.
///
/// `F` is the value source, a `FnOnce() -> Result<X, E>`.
pub struct With<F> {
    source: F,
}

impl<F> fmt::Debug for With<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("With")
            .field("source", &"<function>")
            .finish()
    }
}

impl<F, X, E> With<F>
where
    F: FnOnce() -> Result<X, E>,
    X: 'static,
    E: 'static,
{
    /// Wrap a value source without running it.
    pub fn new(source: F) -> Self {
        With { source }
    }

    /// Evaluate the source.
    pub fn value(self) -> Result<X, E> {
        (self.source)()
    }

    /// Evaluate the value and map it through `functional`.
    pub fn transform<Y>(self, functional: &Functional<X, Y, E>) -> Result<Y, E>
    where
        Y: 'static,
    {
        functional.execute(self.value()?)
    }

    /// Evaluate the value and map it through a plain closure.
    pub fn then<Y>(self, f: impl FnOnce(X) -> Result<Y, E>) -> Result<Y, E> {
        f(self.value()?)
    }

    /// Evaluate the value, hand a copy to `consumable`, then return it.
    pub fn consume(self, consumable: &Consumable<X, E>) -> Result<X, E>
    where
        X: Clone,
    {
        let value = self.value()?;
        consumable.execute(value.clone())?;
        Ok(value)
    }

    /// Evaluate the value, run `processable`, then return the value.
    ///
    /// A failing source means `processable` never runs.
    pub fn further(self, processable: &Processable<E>) -> Result<X, E> {
        let value = self.value()?;
        processable.execute()?;
        Ok(value)
    }

    /// Run `processable`, then evaluate and return the value.
    ///
    /// A failing `processable` means the source is never evaluated.
    pub fn primarily(self, processable: &Processable<E>) -> Result<X, E> {
        processable.execute()?;
        self.value()
    }
}

/// A `With` whose value comes from `supplyable`.
pub fn with<X, E>(supplyable: &Supplyable<X, E>) -> With<impl FnOnce() -> Result<X, E> + '_>
where
    X: 'static,
    E: 'static,
{
    With::new(move || supplyable.execute())
}

/// A `With` over a value that is already known.
pub fn valued<X: 'static, E: 'static>(value: X) -> With<impl FnOnce() -> Result<X, E>> {
    With::new(move || Ok(value))
}

/// A `With` whose value is `()`, produced by running `processable`.
pub fn voidable<E>(processable: &Processable<E>) -> With<impl FnOnce() -> Result<(), E> + '_>
where
    E: 'static,
{
    With::new(move || processable.execute())
}

/// A `With` over the absent value of type `X`.
pub fn nulled<X: 'static, E: 'static>() -> With<impl FnOnce() -> Result<Option<X>, E>> {
    valued(None)
}

/// A `With` over `()`.
pub fn voided<E: 'static>() -> With<impl FnOnce() -> Result<(), E>> {
    valued(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Probe;

    fn counted(probe: &Probe, value: i32) -> With<impl FnOnce() -> Result<i32, String> + '_> {
        With::new(move || {
            probe.record("value");
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
    fn source_is_not_evaluated_until_observed() {
        let probe = Probe::new();
        let _wither = counted(&probe, 1);
        assert_eq!(probe.count("value"), 0);
    }

    #[test]
    fn transform_applies_functional_once() {
        let probe = Probe::new();
        let add = Functional::new(|x: i32| Ok::<_, String>(x + 1));
        assert_eq!(counted(&probe, 1).transform(&add), Ok(2));
        assert_eq!(probe.count("value"), 1);
    }

    #[test]
    fn transform_failure_is_returned() {
        let probe = Probe::new();
        let broken = Functional::<i32, i32, String>::new(|_| Err("broken".to_string()));
        assert_eq!(counted(&probe, 1).transform(&broken), Err("broken".to_string()));
        assert_eq!(probe.count("value"), 1);
    }

    #[test]
    fn consume_passes_value_and_returns_it() {
        let probe = Probe::new();
        let seen = Probe::new();
        let consumer = {
            let seen = seen.clone();
            Consumable::new(move |x: i32| {
                seen.record(format!("saw {}", x));
                Ok::<_, String>(())
            })
        };
        assert_eq!(counted(&probe, 5).consume(&consumer), Ok(5));
        assert_eq!(seen.calls(), vec!["saw 5"]);
        assert_eq!(probe.count("value"), 1);
    }

    #[test]
    fn further_runs_after_value() {
        let probe = Probe::new();
        assert_eq!(counted(&probe, 3).further(&step(&probe, "after")), Ok(3));
        assert_eq!(probe.calls(), vec!["value", "after"]);
    }

    #[test]
    fn further_skipped_when_value_fails() {
        let probe = Probe::new();
        let failing = With::new(|| Err::<i32, _>("no value".to_string()));
        assert_eq!(
            failing.further(&step(&probe, "after")),
            Err("no value".to_string())
        );
        assert!(probe.calls().is_empty());
    }

    #[test]
    fn primarily_runs_before_value() {
        let probe = Probe::new();
        assert_eq!(counted(&probe, 3).primarily(&step(&probe, "before")), Ok(3));
        assert_eq!(probe.calls(), vec!["before", "value"]);
    }

    #[test]
    fn primarily_failure_skips_value() {
        let probe = Probe::new();
        let failing = Processable::new(|| Err("refused".to_string()));
        assert_eq!(
            counted(&probe, 3).primarily(&failing),
            Err("refused".to_string())
        );
        assert_eq!(probe.count("value"), 0);
    }

    #[test]
    fn constructors() {
        let source = Supplyable::<_, String>::new(|| Ok("computed"));
        assert_eq!(with(&source).value(), Ok("computed"));
        assert_eq!(valued::<_, String>(10).value(), Ok(10));
        assert_eq!(nulled::<i32, String>().value(), Ok(None));
        assert_eq!(voided::<String>().value(), Ok(()));

        let probe = Probe::new();
        let effect = step(&probe, "effect");
        assert_eq!(voidable(&effect).value(), Ok(()));
        assert_eq!(probe.count("effect"), 1);
    }
}
