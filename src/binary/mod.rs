//! The binary family: arity 2.
//!
//! Both members project down to the unary family by fixing one argument:
//! `left(t)` keeps the second position open, `right(u)` keeps the first.

mod bi_consumable;
mod bi_functional;

pub use bi_consumable::BiConsumable;
pub use bi_functional::BiFunctional;
