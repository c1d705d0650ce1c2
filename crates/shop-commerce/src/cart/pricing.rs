//! Order summary pricing.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Tax and shipping rules applied to a cart subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PricingRules {
    /// Sales tax in basis points (800 = 8%).
    pub tax_rate_bps: u32,
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
    /// Shipping charged below the threshold.
    pub flat_shipping: Money,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            tax_rate_bps: 800,
            free_shipping_threshold: Money::from_units(50),
            flat_shipping: Money::from_cents(999),
        }
    }
}

impl PricingRules {
    /// Price a subtotal.
    pub fn price(&self, subtotal: Money) -> CartPricing {
        let shipping_total = if subtotal.is_zero() || subtotal > self.free_shipping_threshold {
            Money::ZERO
        } else {
            self.flat_shipping
        };
        let tax_total = subtotal.basis_points(self.tax_rate_bps);

        CartPricing {
            subtotal,
            shipping_total,
            tax_total,
            grand_total: subtotal + shipping_total + tax_total,
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Tax amount.
    pub tax_total: Money,
    /// Final total (subtotal + shipping + tax).
    pub grand_total: Money,
}

impl CartPricing {
    /// Check if the order ships free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }
}
