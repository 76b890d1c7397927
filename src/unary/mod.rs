//! The base family: arity 0 and 1.
//!
//! | Type | Shape | Primitive | Non-fallible call |
//! |------|-------|-----------|-------------------|
//! | [`Supplyable<T, E>`] | producer | `execute() -> Result<T, E>` | `get()` |
//! | [`Processable<E>`] | effect | `execute() -> Result<(), E>` | `run()` |
//! | [`Consumable<T, E>`] | effect over `T` | `execute(T) -> Result<(), E>` | `accept(T)` |
//! | [`Functional<T, R, E>`] | transform | `execute(T) -> Result<R, E>` | `apply(T)` |

mod consumable;
mod functional;
mod processable;
mod supplyable;

pub use consumable::Consumable;
pub use functional::Functional;
pub use processable::Processable;
pub use supplyable::Supplyable;
