//! Fallible transforms over three arguments.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::slot::{settle_with, Settle};
use crate::unchecked;
use crate::with::{self, With};
use crate::{BiFunctional, Consumable, Functional, Processable, Supplyable, TreConsumable};

type TreApplyFn<T, U, V, R, E> = Arc<dyn Fn(T, U, V) -> Result<R, E> + Send + Sync>;

/// A transform from `(T, U, V)` to `R` that may fail with `E`.
///
/// # Examples
///
/// ```
/// use crayfish_functional::{Functional, TreFunctional};
///
/// let clamp = TreFunctional::<i32, i32, i32, i32, String>::new(|low, value, high| {
///     if low > high {
///         Err(format!("empty range {}..{}", low, high))
///     } else {
///         Ok(value.max(low).min(high))
///     }
/// });
///
/// let percent = clamp.left(0).right(100);
/// assert_eq!(percent.apply(140), 100);
///
/// let label = clamp.and_then(Functional::cast(|v: i32| format!("{}%", v)));
/// assert_eq!(label.apply(0, 42, 100), "42%");
/// ```
pub struct TreFunctional<T, U, V, R, E = Infallible> {
    inner: TreApplyFn<T, U, V, R, E>,
}

impl<T, U, V, R, E> Clone for TreFunctional<T, U, V, R, E> {
    fn clone(&self) -> Self {
        TreFunctional {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, U, V, R, E> fmt::Debug for TreFunctional<T, U, V, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreFunctional")
            .field("inner", &"<function>")
            .finish()
    }
}

impl<T, U, V, R, E> TreFunctional<T, U, V, R, E>
where
    T: 'static,
    U: 'static,
    V: 'static,
    R: 'static,
    E: 'static,
{
    /// Adapt a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T, U, V) -> Result<R, E> + Send + Sync + 'static,
    {
        TreFunctional { inner: Arc::new(f) }
    }

    /// Adapt an infallible closure; the primitive always succeeds.
    pub fn cast<F>(f: F) -> Self
    where
        F: Fn(T, U, V) -> R + Send + Sync + 'static,
    {
        Self::new(move |left, middle, right| Ok(f(left, middle, right)))
    }

    /// Apply the transform, reporting failure as `Err`.
    pub fn execute(&self, left: T, middle: U, right: V) -> Result<R, E> {
        (self.inner)(left, middle, right)
    }

    /// Apply the transform, unwinding with the error as payload on failure.
    pub fn apply(&self, left: T, middle: U, right: V) -> R
    where
        E: Send,
    {
        unchecked::rethrow(self.execute(left, middle, right))
    }

    /// Fix the first argument.
    pub fn left(&self, left: T) -> BiFunctional<U, V, R, E>
    where
        T: Clone + Send + Sync,
    {
        let this = self.clone();
        BiFunctional::new(move |middle, right| this.execute(left.clone(), middle, right))
    }

    /// Fix the second argument.
    pub fn middle(&self, middle: U) -> BiFunctional<T, V, R, E>
    where
        U: Clone + Send + Sync,
    {
        let this = self.clone();
        BiFunctional::new(move |left, right| this.execute(left, middle.clone(), right))
    }

    /// Fix the third argument.
    pub fn right(&self, right: V) -> BiFunctional<T, U, R, E>
    where
        V: Clone + Send + Sync,
    {
        let this = self.clone();
        BiFunctional::new(move |left, middle| this.execute(left, middle, right.clone()))
    }

    /// Fix all three arguments, giving a producer.
    pub fn supplyable(&self, left: T, middle: U, right: V) -> Supplyable<R, E>
    where
        T: Clone + Send + Sync,
        U: Clone + Send + Sync,
        V: Clone + Send + Sync,
    {
        let this = self.clone();
        Supplyable::new(move || this.execute(left.clone(), middle.clone(), right.clone()))
    }

    /// Fix all three arguments and drop the result.
    pub fn processable(&self, left: T, middle: U, right: V) -> Processable<E>
    where
        T: Clone + Send + Sync,
        U: Clone + Send + Sync,
        V: Clone + Send + Sync,
    {
        let this = self.clone();
        Processable::new(move || {
            this.execute(left.clone(), middle.clone(), right.clone())
                .map(drop)
        })
    }

    /// Drop the result.
    pub fn consumable(&self) -> TreConsumable<T, U, V, E> {
        let this = self.clone();
        TreConsumable::new(move |left, middle, right| {
            this.execute(left, middle, right).map(drop)
        })
    }

    /// Run `processable` before applying the transform.
    pub fn previously(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |left, middle, right| {
            With::new(|| this.execute(left, middle, right)).primarily(&processable)
        })
    }

    /// Apply the transform, then run `processable`, returning the result.
    pub fn further_run(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |left, middle, right| {
            With::new(|| this.execute(left, middle, right)).further(&processable)
        })
    }

    /// Apply the transform and hand a copy of the result to `consumable`.
    pub fn further_accept(&self, consumable: Consumable<R, E>) -> Self
    where
        R: Clone,
    {
        let this = self.clone();
        Self::new(move |left, middle, right| {
            With::new(|| this.execute(left, middle, right)).consume(&consumable)
        })
    }

    /// Apply the transform, then `functional` to its result.
    pub fn further_apply<S>(
        &self,
        functional: Functional<R, S, E>,
    ) -> TreFunctional<T, U, V, S, E>
    where
        S: 'static,
    {
        let this = self.clone();
        TreFunctional::new(move |left, middle, right| {
            With::new(|| this.execute(left, middle, right)).transform(&functional)
        })
    }

    /// Chain the result into `functional`.
    pub fn and_then<S>(&self, functional: Functional<R, S, E>) -> TreFunctional<T, U, V, S, E>
    where
        S: 'static,
    {
        let this = self.clone();
        TreFunctional::new(move |left, middle, right| {
            functional.execute(this.execute(left, middle, right)?)
        })
    }

    /// Source the first argument from `functional`.
    pub fn with_left<L>(&self, functional: Functional<L, T, E>) -> TreFunctional<L, U, V, R, E>
    where
        L: 'static,
    {
        let this = self.clone();
        TreFunctional::new(move |left, middle, right| {
            With::new(|| functional.execute(left)).then(|left| this.execute(left, middle, right))
        })
    }

    /// Source the first argument from `supplyable`.
    pub fn with_left_from(&self, supplyable: Supplyable<T, E>) -> BiFunctional<U, V, R, E> {
        let this = self.clone();
        BiFunctional::new(move |middle, right| {
            with::with(&supplyable).then(|left| this.execute(left, middle, right))
        })
    }

    /// Source the second argument from `functional`.
    pub fn with_middle<M>(&self, functional: Functional<M, U, E>) -> TreFunctional<T, M, V, R, E>
    where
        M: 'static,
    {
        let this = self.clone();
        TreFunctional::new(move |left, middle, right| {
            With::new(|| functional.execute(middle))
                .then(|middle| this.execute(left, middle, right))
        })
    }

    /// Source the second argument from `supplyable`.
    pub fn with_middle_from(&self, supplyable: Supplyable<U, E>) -> BiFunctional<T, V, R, E> {
        let this = self.clone();
        BiFunctional::new(move |left, right| {
            with::with(&supplyable).then(|middle| this.execute(left, middle, right))
        })
    }

    /// Source the third argument from `functional`.
    pub fn with_right<H>(&self, functional: Functional<H, V, E>) -> TreFunctional<T, U, H, R, E>
    where
        H: 'static,
    {
        let this = self.clone();
        TreFunctional::new(move |left, middle, right| {
            With::new(|| functional.execute(right))
                .then(|right| this.execute(left, middle, right))
        })
    }

    /// Source the third argument from `supplyable`.
    pub fn with_right_from(&self, supplyable: Supplyable<V, E>) -> BiFunctional<T, U, R, E> {
        let this = self.clone();
        BiFunctional::new(move |left, middle| {
            with::with(&supplyable).then(|right| this.execute(left, middle, right))
        })
    }

    /// Bind this transform to a result slot.
    pub fn completable<S>(&self, slot: S) -> TreConsumable<T, U, V, Infallible>
    where
        S: Settle<R, E> + Send + Sync + 'static,
    {
        let this = self.clone();
        TreConsumable::new(move |left, middle, right| {
            settle_with(&slot, || this.execute(left, middle, right));
            Ok(())
        })
    }
}
