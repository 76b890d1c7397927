//! Fallible effects over three arguments.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::slot::{settle_with, Settle};
use crate::unchecked;
use crate::with::With;
use crate::{BiConsumable, Functional, Processable, TreFunctional};

type TreConsumeFn<T, U, V, E> = Arc<dyn Fn(T, U, V) -> Result<(), E> + Send + Sync>;

/// A side effect over `(T, U, V)` that may fail with `E`.
pub struct TreConsumable<T, U, V, E = Infallible> {
    inner: TreConsumeFn<T, U, V, E>,
}

impl<T, U, V, E> Clone for TreConsumable<T, U, V, E> {
    fn clone(&self) -> Self {
        TreConsumable {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, U, V, E> fmt::Debug for TreConsumable<T, U, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreConsumable")
            .field("inner", &"<function>")
            .finish()
    }
}

impl<T, U, V, E> TreConsumable<T, U, V, E>
where
    T: 'static,
    U: 'static,
    V: 'static,
    E: 'static,
{
    /// Adapt a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T, U, V) -> Result<(), E> + Send + Sync + 'static,
    {
        TreConsumable { inner: Arc::new(f) }
    }

    /// Adapt an infallible closure.
    pub fn cast<F>(f: F) -> Self
    where
        F: Fn(T, U, V) + Send + Sync + 'static,
    {
        Self::new(move |left, middle, right| {
            f(left, middle, right);
            Ok(())
        })
    }

    /// Run the effect, reporting failure as `Err`.
    pub fn execute(&self, left: T, middle: U, right: V) -> Result<(), E> {
        (self.inner)(left, middle, right)
    }

    /// Run the effect, unwinding with the error as payload on failure.
    pub fn accept(&self, left: T, middle: U, right: V)
    where
        E: Send,
    {
        unchecked::rethrow(self.execute(left, middle, right))
    }

    /// Fix the first argument.
    pub fn left(&self, left: T) -> BiConsumable<U, V, E>
    where
        T: Clone + Send + Sync,
    {
        let this = self.clone();
        BiConsumable::new(move |middle, right| this.execute(left.clone(), middle, right))
    }

    /// Fix the second argument.
    pub fn middle(&self, middle: U) -> BiConsumable<T, V, E>
    where
        U: Clone + Send + Sync,
    {
        let this = self.clone();
        BiConsumable::new(move |left, right| this.execute(left, middle.clone(), right))
    }

    /// Fix the third argument.
    pub fn right(&self, right: V) -> BiConsumable<T, U, E>
    where
        V: Clone + Send + Sync,
    {
        let this = self.clone();
        BiConsumable::new(move |left, middle| this.execute(left, middle, right.clone()))
    }

    /// Fix all three arguments.
    pub fn processable(&self, left: T, middle: U, right: V) -> Processable<E>
    where
        T: Clone + Send + Sync,
        U: Clone + Send + Sync,
        V: Clone + Send + Sync,
    {
        let this = self.clone();
        Processable::new(move || this.execute(left.clone(), middle.clone(), right.clone()))
    }

    /// This effect seen as a transform yielding `()`.
    pub fn functional(&self) -> TreFunctional<T, U, V, (), E> {
        let this = self.clone();
        TreFunctional::new(move |left, middle, right| this.execute(left, middle, right))
    }

    /// This effect seen as a transform yielding an always absent `R`.
    pub fn functionally<R>(&self) -> TreFunctional<T, U, V, Option<R>, E>
    where
        R: 'static,
    {
        let this = self.clone();
        TreFunctional::new(move |left, middle, right| {
            this.execute(left, middle, right).map(|()| None)
        })
    }

    /// Run `processable` before this effect.
    pub fn previously(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |left, middle, right| {
            With::new(|| this.execute(left, middle, right)).primarily(&processable)
        })
    }

    /// Run this effect, then `processable`.
    pub fn further_run(&self, processable: Processable<E>) -> Self {
        let this = self.clone();
        Self::new(move |left, middle, right| {
            With::new(|| this.execute(left, middle, right)).further(&processable)
        })
    }

    /// Run this effect, then `after`, both on the same arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use crayfish_functional::TreConsumable;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let log = Arc::new(Mutex::new(Vec::new()));
    /// let write = |tag: &'static str| {
    ///     let log = Arc::clone(&log);
    ///     TreConsumable::<i32, i32, i32, String>::cast(move |a, b, c| {
    ///         log.lock().unwrap().push(format!("{} {}", tag, a + b + c))
    ///     })
    /// };
    ///
    /// write("first").and_then(write("second")).accept(1, 2, 3);
    /// assert_eq!(*log.lock().unwrap(), vec!["first 6", "second 6"]);
    /// ```
    pub fn and_then(&self, after: TreConsumable<T, U, V, E>) -> Self
    where
        T: Clone,
        U: Clone,
        V: Clone,
    {
        let this = self.clone();
        Self::new(move |left: T, middle: U, right: V| {
            this.execute(left.clone(), middle.clone(), right.clone())?;
            after.execute(left, middle, right)
        })
    }

    /// Source the first argument from `functional`.
    pub fn with_left<L>(&self, functional: Functional<L, T, E>) -> TreConsumable<L, U, V, E>
    where
        L: 'static,
    {
        let this = self.clone();
        TreConsumable::new(move |left, middle, right| {
            With::new(|| functional.execute(left)).then(|left| this.execute(left, middle, right))
        })
    }

    /// Source the second argument from `functional`.
    pub fn with_middle<M>(&self, functional: Functional<M, U, E>) -> TreConsumable<T, M, V, E>
    where
        M: 'static,
    {
        let this = self.clone();
        TreConsumable::new(move |left, middle, right| {
            With::new(|| functional.execute(middle))
                .then(|middle| this.execute(left, middle, right))
        })
    }

    /// Source the third argument from `functional`.
    pub fn with_right<H>(&self, functional: Functional<H, V, E>) -> TreConsumable<T, U, H, E>
    where
        H: 'static,
    {
        let this = self.clone();
        TreConsumable::new(move |left, middle, right| {
            With::new(|| functional.execute(right))
                .then(|right| this.execute(left, middle, right))
        })
    }

    /// Bind this effect to a result slot, settling it with `()` or the failure.
    pub fn completable<S>(&self, slot: S) -> TreConsumable<T, U, V, Infallible>
    where
        S: Settle<(), E> + Send + Sync + 'static,
    {
        let this = self.clone();
        TreConsumable::new(move |left, middle, right| {
            settle_with(&slot, || this.execute(left, middle, right));
            Ok(())
        })
    }
}
