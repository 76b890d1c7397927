//! Fallible transforms over one argument.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::slot::{settle_with, Settle};
use crate::unchecked;
use crate::with::{self, With};
use crate::{Consumable, Processable, Supplyable};

type ApplyFn<T, R, E> = Arc<dyn Fn(T) -> Result<R, E> + Send + Sync>;

/// A transform from `T` to `R` that may fail with `E`.
///
/// # Type Parameters
///
/// * `T` - The argument
/// * `R` - The result; an absent result (`None`, `()`) is a legitimate value
/// * `E` - The failure (defaults to `std::convert::Infallible`)
///
/// # Examples
///
/// ```
/// use crayfish_functional::Functional;
///
/// let double = Functional::<i32, i32, String>::new(|x| Ok(x * 2));
/// let plus_one = Functional::new(|y: i32| Ok(y + 1));
///
/// assert_eq!(double.further_apply(plus_one).apply(3), 7);
/// ```
pub struct Functional<T, R, E = Infallible> {
    inner: ApplyFn<T, R, E>,
}

impl<T, R, E> Clone for Functional<T, R, E> {
    fn clone(&self) -> Self {
        Functional {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, R, E> fmt::Debug for Functional<T, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Functional")
            .field("inner", &"<function>")
            .finish()
    }
}

impl<T, R, E> Functional<T, R, E>
where
    T: 'static,
    R: 'static,
    E: 'static,
{
    /// Adapt a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> Result<R, E> + Send + Sync + 'static,
    {
        Functional { inner: Arc::new(f) }
    }

    /// Adapt an infallible closure; the primitive always succeeds.
    pub fn cast<F>(f: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self::new(move |parameter| Ok(f(parameter)))
    }

    /// Apply the transform, reporting failure as `Err`.
    pub fn execute(&self, parameter: T) -> Result<R, E> {
        (self.inner)(parameter)
    }

    /// Apply the transform, unwinding with the error as payload on failure.
    pub fn apply(&self, parameter: T) -> R
    where
        E: Send,
    {
        unchecked::rethrow(self.execute(parameter))
    }

    /// Fix the argument, giving a producer.
    ///
    /// `parameter` is captured now and cloned for every invocation.
    pub fn supplyable(&self, parameter: T) -> Supplyable<R, E>
    where
        T: Clone + Send + Sync,
    {
        let this = self.clone();
        Supplyable::new(move || this.execute(parameter.clone()))
    }

    /// Fix the argument and drop the result, giving a 0-ary effect.
    pub fn processable(&self, parameter: T) -> Processable<E>
    where
        T: Clone + Send + Sync,
    {
        let this = self.clone();
        Processable::new(move || this.execute(parameter.clone()).map(drop))
    }

    /// Drop the result, giving an effect over `T`.
    pub fn consumable(&self) -> Consumable<T, E> {
        let this = self.clone();
        Consumable::new(move |parameter| this.execute(parameter).map(drop))
    }

    /// Run `processable` before applying the transform.
    ///
    /// If `processable` fails the transform is never applied.
    pub fn previously(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |parameter| {
            With::new(|| this.execute(parameter)).primarily(&processable)
        })
    }

    /// Apply the transform, run `processable`, return the transform's result.
    ///
    /// If the transform fails `processable` never runs.
    pub fn further_run(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |parameter| With::new(|| this.execute(parameter)).further(&processable))
    }

    /// Apply the transform, hand a copy of the result to `consumable`, return the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use crayfish_functional::{Consumable, Functional};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let audit = {
    ///     let seen = Arc::clone(&seen);
    ///     Consumable::<i32, String>::cast(move |x| seen.lock().unwrap().push(x))
    /// };
    ///
    /// let square = Functional::new(|x: i32| Ok(x * x)).further_accept(audit);
    /// assert_eq!(square.apply(4), 16);
    /// assert_eq!(*seen.lock().unwrap(), vec![16]);
    /// ```
    pub fn further_accept(&self, consumable: Consumable<R, E>) -> Self
    where
        R: Clone,
    {
        let this = self.clone();
        Self::new(move |parameter| With::new(|| this.execute(parameter)).consume(&consumable))
    }

    /// Apply the transform, then `functional` to its result.
    pub fn further_apply<S>(&self, functional: Functional<R, S, E>) -> Functional<T, S, E>
    where
        S: 'static,
    {
        let this = self.clone();
        Functional::new(move |parameter| {
            With::new(|| this.execute(parameter)).transform(&functional)
        })
    }

    /// Source the argument from `functional`: the composition `self ∘ functional`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crayfish_functional::Functional;
    ///
    /// let parse = Functional::new(|s: &str| s.parse::<i32>().map_err(|e| e.to_string()));
    /// let double = Functional::new(|x: i32| Ok(x * 2));
    ///
    /// let parse_and_double = double.with_param(parse);
    /// assert_eq!(parse_and_double.execute("21"), Ok(42));
    /// assert!(parse_and_double.execute("x").is_err());
    /// ```
    pub fn with_param<P>(&self, functional: Functional<P, T, E>) -> Functional<P, R, E>
    where
        P: 'static,
    {
        let this = self.clone();
        Functional::new(move |parameter| {
            With::new(|| functional.execute(parameter)).then(|value| this.execute(value))
        })
    }

    /// Source the argument from `supplyable`, giving a producer.
    pub fn with_param_from(&self, supplyable: Supplyable<T, E>) -> Supplyable<R, E> {
        let this = self.clone();
        Supplyable::new(move || with::with(&supplyable).transform(&this))
    }

    /// Bind this transform to a result slot.
    ///
    /// The returned effect settles `slot` with the result or the failure,
    /// unless the slot is already settled, in which case the transform is
    /// not applied.
    pub fn completable<S>(&self, slot: S) -> Consumable<T, Infallible>
    where
        S: Settle<R, E> + Send + Sync + 'static,
    {
        let this = self.clone();
        Consumable::new(move |parameter| {
            settle_with(&slot, || this.execute(parameter));
            Ok(())
        })
    }
}

impl<T, E> Functional<T, T, E>
where
    T: 'static,
    E: 'static,
{
    /// The transform returning its argument unchanged.
    pub fn identity() -> Self {
        Self::new(Ok)
    }
}
