//! A clonable single-assignment slot, awaitable with the `async` feature.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
#[cfg(feature = "async")]
use tokio::sync::Notify;

use super::Settle;

struct Shared<T, E> {
    outcome: Mutex<Option<Result<T, E>>>,
    #[cfg(feature = "async")]
    settled: Notify,
}

impl<T, E> Shared<T, E> {
    fn new(outcome: Option<Result<T, E>>) -> Self {
        Shared {
            outcome: Mutex::new(outcome),
            #[cfg(feature = "async")]
            settled: Notify::new(),
        }
    }

    fn peek(&self) -> Option<Result<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.outcome.lock().clone()
    }
}

/// A single-assignment slot holding the outcome of one computation.
///
/// Clones share the same slot. The first call to [`complete`](Self::complete),
/// [`fail`](Self::fail) or [`settle`](Self::settle) wins; every later call is a
/// no-op returning `false`.
///
/// # Examples
///
/// ```
/// use crayfish_functional::ResultSlot;
///
/// let slot = ResultSlot::<i32, String>::new();
/// assert!(!slot.is_settled());
///
/// assert!(slot.complete(5));
/// assert!(!slot.fail("too late".to_string()));
///
/// assert!(slot.is_completed());
/// assert_eq!(slot.peek(), Some(Ok(5)));
/// ```
pub struct ResultSlot<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> ResultSlot<T, E> {
    /// Create a pending slot.
    pub fn new() -> Self {
        ResultSlot {
            shared: Arc::new(Shared::new(None)),
        }
    }

    /// Create a slot that is already settled with `outcome`.
    pub fn settled(outcome: Result<T, E>) -> Self {
        ResultSlot {
            shared: Arc::new(Shared::new(Some(outcome))),
        }
    }

    /// Whether an outcome has been stored.
    pub fn is_settled(&self) -> bool {
        self.shared.outcome.lock().is_some()
    }

    /// Whether the slot was settled with a value.
    pub fn is_completed(&self) -> bool {
        matches!(*self.shared.outcome.lock(), Some(Ok(_)))
    }

    /// Whether the slot was settled with an error.
    pub fn is_failed(&self) -> bool {
        matches!(*self.shared.outcome.lock(), Some(Err(_)))
    }

    /// Settle with a value.
    pub fn complete(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settle with an error.
    pub fn fail(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    /// Settle with `outcome` unless already settled, releasing every waiter.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        {
            let mut stored = self.shared.outcome.lock();
            if stored.is_some() {
                #[cfg(feature = "tracing")]
                tracing::trace!("result slot already settled, late outcome ignored");
                return false;
            }
            *stored = Some(outcome);
        }
        #[cfg(feature = "async")]
        self.shared.settled.notify_waiters();
        true
    }

    /// A copy of the stored outcome, or `None` while pending.
    pub fn peek(&self) -> Option<Result<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.shared.peek()
    }

    /// A future resolving to a copy of the outcome once the slot is settled.
    ///
    /// Dropping the future before the slot settles deregisters it.
    ///
    /// # Examples
    ///
    /// ```
    /// use crayfish_functional::ResultSlot;
    ///
    /// # tokio_test::block_on(async {
    /// let slot = ResultSlot::<&str, ()>::new();
    /// let writer = slot.clone();
    /// std::thread::spawn(move || writer.complete("ready"));
    ///
    /// assert_eq!(slot.wait().await, Ok("ready"));
    /// # });
    /// ```
    #[cfg(feature = "async")]
    pub fn wait(&self) -> impl std::future::Future<Output = Result<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        let shared = Arc::clone(&self.shared);
        async move {
            loop {
                // Registered before the check, so a settle in between still wakes us.
                let settled = shared.settled.notified();
                if let Some(outcome) = shared.peek() {
                    return outcome;
                }
                settled.await;
            }
        }
    }
}

impl<T, E> Default for ResultSlot<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for ResultSlot<T, E> {
    fn clone(&self) -> Self {
        ResultSlot {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> fmt::Debug for ResultSlot<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match &*self.shared.outcome.lock() {
            None => "pending",
            Some(Ok(_)) => "completed",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("ResultSlot").field("status", &status).finish()
    }
}

impl<T, E> Settle<T, E> for ResultSlot<T, E> {
    fn is_settled(&self) -> bool {
        ResultSlot::is_settled(self)
    }

    fn settle(&self, outcome: Result<T, E>) -> bool {
        ResultSlot::settle(self, outcome)
    }
}
