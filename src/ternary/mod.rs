//! The ternary family: arity 3.
//!
//! Fixing the `left`, `middle` or `right` argument yields a member of the
//! binary family over the two remaining positions, in their original order.

mod tre_consumable;
mod tre_functional;

pub use tre_consumable::TreConsumable;
pub use tre_functional::TreFunctional;
