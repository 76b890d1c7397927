//! # Crayfish Functional
//!
//! A family of fallible function types for Rust.
//!
//! Every member wraps one closure that may fail and exposes it twice: as a
//! fallible primitive (`execute`) returning `Result`, and as a non-fallible
//! call (`get`, `run`, `accept`, `apply`) that unwinds with the original error
//! as payload. Members are immutable, cheap to clone and `Send + Sync`;
//! every combinator returns a new member.
//!
//! | Arity | Producer / transform | Effect |
//! |-------|----------------------|--------|
//! | 0 | [`Supplyable<T, E>`] | [`Processable<E>`] |
//! | 1 | [`Functional<T, R, E>`] | [`Consumable<T, E>`] |
//! | 2 | [`BiFunctional<T, U, R, E>`] | [`BiConsumable<T, U, E>`] |
//! | 3 | [`TreFunctional<T, U, V, R, E>`] | [`TreConsumable<T, U, V, E>`] |
//!
//! ## Quick Example
//!
//! ```rust
//! use crayfish_functional::prelude::*;
//!
//! let area = BiFunctional::<u32, u32, u32, String>::new(|w, h| {
//!     w.checked_mul(h).ok_or_else(|| "area overflow".to_string())
//! });
//!
//! // Partial application fixes an argument by value
//! let square_row = area.left(4);
//! assert_eq!(square_row.apply(5), 20);
//!
//! // Sequencing keeps the primitive to a single evaluation
//! let doubled = square_row.further_apply(Functional::new(|a: u32| Ok(a * 2)));
//! assert_eq!(doubled.execute(5), Ok(40));
//!
//! // Binding to a result slot
//! let slot = ResultSlot::new();
//! area.completable(slot.clone()).accept(u32::MAX, 2);
//! assert_eq!(slot.peek(), Some(Err("area overflow".to_string())));
//! ```
//!
//! ## Features
//!
//! - `async`: `ResultSlot::wait` and a [`Settle`] impl for
//!   `tokio::sync::OnceCell<Result<T, E>>`
//! - `tracing`: `instrument(span)` on every member, trace events from result slots

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod binary;
pub mod slot;
pub mod ternary;
pub mod testing;
#[cfg(feature = "tracing")]
pub mod tracing;
pub mod unary;
pub mod unchecked;
pub mod with;

// Re-exports
pub use binary::{BiConsumable, BiFunctional};
pub use slot::{ResultSlot, Settle};
pub use ternary::{TreConsumable, TreFunctional};
pub use unary::{Consumable, Functional, Processable, Supplyable};
pub use with::With;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::binary::{BiConsumable, BiFunctional};
    pub use crate::slot::{ResultSlot, Settle};
    pub use crate::ternary::{TreConsumable, TreFunctional};
    #[cfg(feature = "tracing")]
    pub use crate::tracing::Instrument;
    pub use crate::unary::{Consumable, Functional, Processable, Supplyable};
    pub use crate::with::With;
}
