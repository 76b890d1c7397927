//! Fallible transforms over two arguments.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::slot::{settle_with, Settle};
use crate::unchecked;
use crate::with::{self, With};
use crate::{BiConsumable, Consumable, Functional, Processable, Supplyable};

type BiApplyFn<T, U, R, E> = Arc<dyn Fn(T, U) -> Result<R, E> + Send + Sync>;

/// A transform from `(T, U)` to `R` that may fail with `E`.
///
/// Fixing one argument with [`left`](Self::left) or [`right`](Self::right)
/// gives a [`Functional`] over the other one.
///
/// # Examples
///
/// ```
/// use crayfish_functional::BiFunctional;
///
/// let divide = BiFunctional::new(|a: i32, b: i32| {
///     a.checked_div(b).ok_or_else(|| "division by zero".to_string())
/// });
///
/// assert_eq!(divide.apply(10, 2), 5);
/// assert_eq!(divide.left(12).apply(4), 3);
/// assert_eq!(divide.right(0).execute(1), Err("division by zero".to_string()));
/// ```
pub struct BiFunctional<T, U, R, E = Infallible> {
    inner: BiApplyFn<T, U, R, E>,
}

impl<T, U, R, E> Clone for BiFunctional<T, U, R, E> {
    fn clone(&self) -> Self {
        BiFunctional {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, U, R, E> fmt::Debug for BiFunctional<T, U, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiFunctional")
            .field("inner", &"<function>")
            .finish()
    }
}

impl<T, U, R, E> BiFunctional<T, U, R, E>
where
    T: 'static,
    U: 'static,
    R: 'static,
    E: 'static,
{
    /// Adapt a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T, U) -> Result<R, E> + Send + Sync + 'static,
    {
        BiFunctional { inner: Arc::new(f) }
    }

    /// Adapt an infallible closure; the primitive always succeeds.
    pub fn cast<F>(f: F) -> Self
    where
        F: Fn(T, U) -> R + Send + Sync + 'static,
    {
        Self::new(move |left, right| Ok(f(left, right)))
    }

    /// Apply the transform, reporting failure as `Err`.
    pub fn execute(&self, left: T, right: U) -> Result<R, E> {
        (self.inner)(left, right)
    }

    /// Apply the transform, unwinding with the error as payload on failure.
    pub fn apply(&self, left: T, right: U) -> R
    where
        E: Send,
    {
        unchecked::rethrow(self.execute(left, right))
    }

    /// Fix the first argument.
    ///
    /// `left` is captured now and cloned for every invocation.
    pub fn left(&self, left: T) -> Functional<U, R, E>
    where
        T: Clone + Send + Sync,
    {
        let this = self.clone();
        Functional::new(move |right| this.execute(left.clone(), right))
    }

    /// Fix the second argument.
    pub fn right(&self, right: U) -> Functional<T, R, E>
    where
        U: Clone + Send + Sync,
    {
        let this = self.clone();
        Functional::new(move |left| this.execute(left, right.clone()))
    }

    /// Fix both arguments, giving a producer.
    pub fn supplyable(&self, left: T, right: U) -> Supplyable<R, E>
    where
        T: Clone + Send + Sync,
        U: Clone + Send + Sync,
    {
        let this = self.clone();
        Supplyable::new(move || this.execute(left.clone(), right.clone()))
    }

    /// Fix both arguments and drop the result.
    pub fn processable(&self, left: T, right: U) -> Processable<E>
    where
        T: Clone + Send + Sync,
        U: Clone + Send + Sync,
    {
        let this = self.clone();
        Processable::new(move || this.execute(left.clone(), right.clone()).map(drop))
    }

    /// Drop the result.
    pub fn consumable(&self) -> BiConsumable<T, U, E> {
        let this = self.clone();
        BiConsumable::new(move |left, right| this.execute(left, right).map(drop))
    }

    /// Run `processable` before applying the transform.
    pub fn previously(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |left, right| {
            With::new(|| this.execute(left, right)).primarily(&processable)
        })
    }

    /// Apply the transform, then run `processable`, returning the result.
    pub fn further_run(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |left, right| {
            With::new(|| this.execute(left, right)).further(&processable)
        })
    }

    /// Apply the transform and hand a copy of the result to `consumable`.
    pub fn further_accept(&self, consumable: Consumable<R, E>) -> Self
    where
        R: Clone,
    {
        let this = self.clone();
        Self::new(move |left, right| {
            With::new(|| this.execute(left, right)).consume(&consumable)
        })
    }

    /// Apply the transform, then `functional` to its result.
    pub fn further_apply<S>(&self, functional: Functional<R, S, E>) -> BiFunctional<T, U, S, E>
    where
        S: 'static,
    {
        let this = self.clone();
        BiFunctional::new(move |left, right| {
            With::new(|| this.execute(left, right)).transform(&functional)
        })
    }

    /// Chain the result into `functional`.
    pub fn and_then<S>(&self, functional: Functional<R, S, E>) -> BiFunctional<T, U, S, E>
    where
        S: 'static,
    {
        let this = self.clone();
        BiFunctional::new(move |left, right| functional.execute(this.execute(left, right)?))
    }

    /// Source the first argument from `functional`.
    pub fn with_left<L>(&self, functional: Functional<L, T, E>) -> BiFunctional<L, U, R, E>
    where
        L: 'static,
    {
        let this = self.clone();
        BiFunctional::new(move |left, right| {
            With::new(|| functional.execute(left)).then(|left| this.execute(left, right))
        })
    }

    /// Source the first argument from `supplyable`, leaving a transform of the second.
    pub fn with_left_from(&self, supplyable: Supplyable<T, E>) -> Functional<U, R, E> {
        let this = self.clone();
        Functional::new(move |right| with::with(&supplyable).then(|left| this.execute(left, right)))
    }

    /// Source the second argument from `functional`.
    pub fn with_right<H>(&self, functional: Functional<H, U, E>) -> BiFunctional<T, H, R, E>
    where
        H: 'static,
    {
        let this = self.clone();
        BiFunctional::new(move |left, right| {
            With::new(|| functional.execute(right)).then(|right| this.execute(left, right))
        })
    }

    /// Source the second argument from `supplyable`, leaving a transform of the first.
    pub fn with_right_from(&self, supplyable: Supplyable<U, E>) -> Functional<T, R, E> {
        let this = self.clone();
        Functional::new(move |left| with::with(&supplyable).then(|right| this.execute(left, right)))
    }

    /// Bind this transform to a result slot.
    ///
    /// The slot receives the result or the failure of the first invocation
    /// that finds it pending.
    pub fn completable<S>(&self, slot: S) -> BiConsumable<T, U, Infallible>
    where
        S: Settle<R, E> + Send + Sync + 'static,
    {
        let this = self.clone();
        BiConsumable::new(move |left, right| {
            settle_with(&slot, || this.execute(left, right));
            Ok(())
        })
    }
}
