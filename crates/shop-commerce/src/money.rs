//! Money type for representing prices and totals.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The remote API
//! speaks decimal numbers (`89.99`), so the serde form is a decimal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Number of minor units per major unit.
const CENTS_PER_UNIT: i64 = 100;

/// A monetary amount in cents.
///
/// Prices are non-negative; negative values only appear transiently when a
/// caller builds one by hand and are clamped to zero on construction from a
/// decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// A zero amount.
    pub const ZERO: Money = Money { cents: 0 };

    /// Create a Money value from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a Money value from whole units (e.g. dollars).
    pub const fn from_units(units: i64) -> Self {
        Self {
            cents: units.saturating_mul(CENTS_PER_UNIT),
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use shop_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.cents(), 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() || amount <= 0.0 {
            return Self::ZERO;
        }
        Self::from_cents((amount * CENTS_PER_UNIT as f64).round() as i64)
    }

    /// Amount in cents.
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Format without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn times(&self, quantity: u32) -> Money {
        Money::from_cents(self.cents.saturating_mul(i64::from(quantity)))
    }

    /// Take a rate expressed in basis points (800 = 8%), rounded half up.
    pub fn basis_points(&self, bps: u32) -> Money {
        let scaled = i128::from(self.cents) * i128::from(bps);
        let rounded = (scaled + 5_000) / 10_000;
        Money::from_cents(rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.cents.saturating_add(other.cents))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        self.times(quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}", Money::from_cents(-self.cents).display_amount())
        } else {
            write!(f, "${}", self.display_amount())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Money::from_decimal)
    }
}
