//! Shopping cart module.
//!
//! Contains the cart engine, its snapshots, and order summary pricing.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine, CartSnapshot};
pub use pricing::{CartPricing, PricingRules};
