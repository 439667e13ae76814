//! Type-safe price representation using decimal arithmetic.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative amount of money in the shop currency (Bangladeshi taka).
///
/// Prices are clamped to zero on construction; the catalog never carries
/// negative amounts, and a corrupted feed must not produce one either.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, clamping negative amounts to zero.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.max(Decimal::ZERO))
    }

    /// Create a price from a floating-point feed value.
    ///
    /// Non-finite or out-of-range values degrade to zero rather than failing;
    /// the feed is best-effort.
    #[must_use]
    pub fn from_major_units(value: f64) -> Self {
        Decimal::try_from(value).map_or(Self::ZERO, Self::new)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // normalize() drops trailing zeros so whole amounts render as "৳ 500"
        write!(f, "৳ {}", self.0.normalize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_amount_clamps_to_zero() {
        let price = Price::new(Decimal::new(-500, 0));
        assert_eq!(price, Price::ZERO);
    }

    #[test]
    fn test_from_major_units() {
        let price = Price::from_major_units(500.0);
        assert_eq!(price.amount(), Decimal::new(500, 0));
    }

    #[test]
    fn test_from_major_units_non_finite_degrades_to_zero() {
        assert_eq!(Price::from_major_units(f64::NAN), Price::ZERO);
        assert_eq!(Price::from_major_units(f64::INFINITY), Price::ZERO);
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Price::from_major_units(500.0);
        let total: Price = [unit.times(2), unit.times(1)].into_iter().sum();
        assert_eq!(total, Price::from_major_units(1500.0));
    }

    #[test]
    fn test_display_drops_trailing_zeros() {
        assert_eq!(Price::from_major_units(500.0).to_string(), "৳ 500");
        assert_eq!(Price::from_major_units(12.5).to_string(), "৳ 12.5");
        assert_eq!(Price::ZERO.to_string(), "৳ 0");
    }

    #[test]
    fn test_serde_round_trip() {
        let price = Price::from_major_units(149.99);
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, back);
    }
}
