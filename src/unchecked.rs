//! The non-fallible call surface.
//!
//! Every family member exposes a fallible primitive (`execute`) that returns a
//! `Result`, and a non-fallible call (`get`, `run`, `accept`, `apply`) that
//! hands back the plain value. The non-fallible call does not wrap, rename or
//! stringify a failure: it unwinds with the original error value as the panic
//! payload. [`catch`] is the inverse, turning such an unwind back into the
//! `Err` it started as.
//!
//! # Examples
//!
//! ```
//! use crayfish_functional::{unchecked, Functional};
//!
//! let half = Functional::new(|x: i32| {
//!     if x % 2 == 0 { Ok(x / 2) } else { Err(format!("{} is odd", x)) }
//! });
//!
//! assert_eq!(half.apply(10), 5);
//!
//! let recovered = unchecked::catch::<_, String>(|| half.apply(7));
//! assert_eq!(recovered, Err("7 is odd".to_string()));
//! ```
//!
//! # Panic hook
//!
//! The unwind goes through the process panic hook like any other panic. With
//! the default hook every failed non-fallible call prints a `panicked at ...`
//! line to stderr, even when [`catch`] or a result slot recovers the error.
//! Callers who recover failures routinely should install a hook that skips
//! their error payloads:
//!
//! ```
//! use crayfish_functional::{unchecked, Supplyable};
//! use std::panic;
//!
//! #[derive(Debug, PartialEq)]
//! struct Rejected(u32);
//!
//! let default_hook = panic::take_hook();
//! panic::set_hook(Box::new(move |info| {
//!     if info.payload().downcast_ref::<Rejected>().is_none() {
//!         default_hook(info);
//!     }
//! }));
//!
//! let quota = Supplyable::<u32, Rejected>::new(|| Err(Rejected(429)));
//! assert_eq!(unchecked::catch(|| quota.get()), Err(Rejected(429)));
//! ```

use std::panic::{self, AssertUnwindSafe};

/// Unwrap an outcome, re-signalling a failure as an unwinding panic.
///
/// The panic payload is `error` itself, so [`catch`] (or
/// `std::panic::catch_unwind` plus `downcast`) observes the very same value.
/// The panic hook runs first; see the module docs for silencing it.
pub fn rethrow<T, E>(outcome: Result<T, E>) -> T
where
    E: Send + 'static,
{
    match outcome {
        Ok(value) => value,
        Err(error) => panic::panic_any(error),
    }
}

/// Run `f`, turning an unwind whose payload is an `E` back into `Err(E)`.
///
/// Panics carrying any other payload keep unwinding untouched.
///
/// # Examples
///
/// ```
/// use crayfish_functional::{unchecked, Supplyable};
///
/// #[derive(Debug, PartialEq)]
/// struct Timeout(u32);
///
/// let slow = Supplyable::<i32, Timeout>::new(|| Err(Timeout(30)));
/// assert_eq!(unchecked::catch(|| slow.get()), Err(Timeout(30)));
/// ```
pub fn catch<R, E>(f: impl FnOnce() -> R) -> Result<R, E>
where
    E: 'static,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<E>() {
            Ok(error) => Err(*error),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}
