//! Testing utilities for code built on the function family.
//!
//! This module provides a call recorder for checking evaluation order and
//! invocation counts, plus assertion macros for result slots.
//!
//! # Examples
//!
//! ## Probe
//!
//! ```rust
//! use crayfish_functional::testing::Probe;
//! use crayfish_functional::{Functional, Processable};
//!
//! let probe = Probe::new();
//!
//! let hook = {
//!     let probe = probe.clone();
//!     Processable::<String>::new(move || {
//!         probe.record("hook");
//!         Ok(())
//!     })
//! };
//! let double = {
//!     let probe = probe.clone();
//!     Functional::new(move |x: i32| {
//!         probe.record("double");
//!         Ok(x * 2)
//!     })
//! };
//!
//! assert_eq!(double.previously(hook).apply(4), 8);
//! assert_eq!(probe.calls(), vec!["hook", "double"]);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use crayfish_functional::{assert_completed, assert_failed, assert_pending, ResultSlot};
//!
//! let slot = ResultSlot::<i32, String>::new();
//! assert_pending!(slot);
//!
//! slot.complete(5);
//! assert_completed!(slot, 5);
//!
//! let failed = ResultSlot::<i32, String>::settled(Err("boom".to_string()));
//! assert_failed!(failed, "boom".to_string());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

/// Thread-safe, ordered record of named calls.
///
/// Clones share the same record, so a probe can be moved into several
/// closures and inspected afterwards.
///
/// # Example
///
/// ```rust
/// use crayfish_functional::testing::Probe;
///
/// let probe = Probe::new();
/// let inner = probe.clone();
/// std::thread::spawn(move || inner.record("worker")).join().unwrap();
///
/// probe.record("main");
/// assert_eq!(probe.calls(), vec!["worker", "main"]);
/// assert_eq!(probe.count("main"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Probe {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Probe {
    /// Create an empty probe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call to the record.
    pub fn record(&self, name: impl Into<String>) {
        self.calls.lock().push(name.into());
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// How many times `name` was recorded.
    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|call| *call == name).count()
    }

    /// Total number of recorded calls.
    pub fn total(&self) -> usize {
        self.calls.lock().len()
    }
}

/// Assert that a result slot has not been settled.
///
/// # Example
///
/// ```rust
/// use crayfish_functional::{assert_pending, ResultSlot};
///
/// let slot = ResultSlot::<i32, ()>::new();
/// assert_pending!(slot);
/// ```
#[macro_export]
macro_rules! assert_pending {
    ($slot:expr) => {
        match $slot.peek() {
            None => {}
            Some(outcome) => {
                panic!("Expected pending slot, got settled: {:?}", outcome);
            }
        }
    };
}

/// Assert that a result slot was settled with a value.
///
/// With a second argument the value is compared as well.
///
/// # Example
///
/// ```rust
/// use crayfish_functional::{assert_completed, ResultSlot};
///
/// let slot = ResultSlot::<_, ()>::settled(Ok("done"));
/// assert_completed!(slot);
/// assert_completed!(slot, "done");
/// ```
#[macro_export]
macro_rules! assert_completed {
    ($slot:expr) => {
        match $slot.peek() {
            Some(Ok(_)) => {}
            Some(Err(e)) => panic!("Expected completed slot, got failure: {:?}", e),
            None => panic!("Expected completed slot, got pending"),
        }
    };
    ($slot:expr, $expected:expr) => {
        match $slot.peek() {
            Some(Ok(value)) => assert_eq!(value, $expected),
            Some(Err(e)) => panic!("Expected completed slot, got failure: {:?}", e),
            None => panic!("Expected completed slot, got pending"),
        }
    };
}

/// Assert that a result slot was settled with an error.
///
/// With a second argument the error is compared as well.
///
/// # Example
///
/// ```rust
/// use crayfish_functional::{assert_failed, ResultSlot};
///
/// let slot = ResultSlot::<i32, _>::settled(Err("refused"));
/// assert_failed!(slot);
/// assert_failed!(slot, "refused");
/// ```
#[macro_export]
macro_rules! assert_failed {
    ($slot:expr) => {
        match $slot.peek() {
            Some(Err(_)) => {}
            Some(Ok(v)) => panic!("Expected failed slot, got value: {:?}", v),
            None => panic!("Expected failed slot, got pending"),
        }
    };
    ($slot:expr, $expected:expr) => {
        match $slot.peek() {
            Some(Err(error)) => assert_eq!(error, $expected),
            Some(Ok(v)) => panic!("Expected failed slot, got value: {:?}", v),
            None => panic!("Expected failed slot, got pending"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResultSlot;

    #[test]
    fn probe_starts_empty() {
        let probe = Probe::new();
        assert_eq!(probe.total(), 0);
        assert!(probe.calls().is_empty());
    }

    #[test]
    fn probe_keeps_order_and_counts() {
        let probe = Probe::new();
        probe.record("a");
        probe.record("b");
        probe.record("a");
        assert_eq!(probe.calls(), vec!["a", "b", "a"]);
        assert_eq!(probe.count("a"), 2);
        assert_eq!(probe.count("c"), 0);
        assert_eq!(probe.total(), 3);
    }

    #[test]
    fn probe_clones_share_record() {
        let probe = Probe::new();
        probe.clone().record("shared");
        assert_eq!(probe.count("shared"), 1);
    }

    #[test]
    fn assert_pending_macro() {
        let slot = ResultSlot::<i32, String>::new();
        assert_pending!(slot);
    }

    #[test]
    fn assert_completed_macro() {
        let slot = ResultSlot::<_, String>::settled(Ok(42));
        assert_completed!(slot);
        assert_completed!(slot, 42);
    }

    #[test]
    fn assert_failed_macro() {
        let slot = ResultSlot::<i32, _>::settled(Err("error"));
        assert_failed!(slot);
        assert_failed!(slot, "error");
    }

    #[test]
    #[should_panic(expected = "Expected pending slot, got settled")]
    fn assert_pending_panics_on_settled() {
        let slot = ResultSlot::<i32, String>::settled(Ok(1));
        assert_pending!(slot);
    }

    #[test]
    #[should_panic(expected = "Expected completed slot, got failure")]
    fn assert_completed_panics_on_failure() {
        let slot = ResultSlot::<i32, _>::settled(Err("error"));
        assert_completed!(slot);
    }

    #[test]
    #[should_panic(expected = "Expected failed slot, got pending")]
    fn assert_failed_panics_on_pending() {
        let slot = ResultSlot::<i32, String>::new();
        assert_failed!(slot);
    }
}
