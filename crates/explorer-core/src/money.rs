//! # Money Module
//!
//! Catalog prices and how they are shown.
//!
//! ## Price vs Money
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  The catalog sends prices as JSON decimals:  "price": 9.999            │
//! │                                                                         │
//! │  Price(9.999)  ── kept exactly as received                             │
//! │     │             ordering: f64::total_cmp, so 9.999 < 10.0            │
//! │     │             wire:     written back out as 9.999                  │
//! │     │                                                                   │
//! │     ▼  to_money()  (rounding happens here and only here)               │
//! │  Money(1000)   ── integer cents for display: "$10.00"                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use explorer_core::money::{Money, Price};
//!
//! let price = Price::new(109.95).unwrap();
//! assert_eq!(price.to_money().cents(), 10995);
//! assert_eq!(price.to_string(), "$109.95");
//!
//! assert!(Price::new(9.999).unwrap() < Price::new(10.0).unwrap());
//! assert_eq!(Price::from(Money::from_cents(500)).value(), 5.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Zero-cost wrapper, exact cent arithmetic
/// - **Display only**: catalog prices stay [`Price`]; `Money` is what a card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use explorer_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount in major units.
    ///
    /// Rounds to the nearest cent (half away from zero), which absorbs the
    /// binary representation error of values like `22.3`.
    ///
    /// ## Example
    /// ```rust
    /// use explorer_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(22.3).unwrap().cents(), 2230);
    /// assert_eq!(Money::from_decimal(7.95).unwrap().cents(), 795);
    /// assert!(Money::from_decimal(f64::NAN).is_err());
    /// ```
    pub fn from_decimal(amount: f64) -> CoreResult<Self> {
        if !amount.is_finite() {
            return Err(CoreError::InvalidAmount {
                value: amount,
                reason: "must be finite".to_string(),
            });
        }

        let cents = (amount * 100.0).round();
        if cents > i64::MAX as f64 || cents < i64::MIN as f64 {
            return Err(CoreError::InvalidAmount {
                value: amount,
                reason: "out of range".to_string(),
            });
        }

        Ok(Money(cents as i64))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value as a decimal in major units.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the product card does: `$109.95`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Price Type
// =============================================================================

/// A catalog price in major units, kept at full precision.
///
/// ## Invariants
/// - Finite and non-negative (`-0.0` is stored as `0.0`)
/// - Totally ordered, so price sorts never see an incomparable pair
///
/// On the wire it is a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(try_from = "f64", into = "f64")]
#[ts(export)]
pub struct Price(f64);

impl Price {
    /// Creates a price, rejecting NaN, infinities and negative amounts.
    pub fn new(amount: f64) -> CoreResult<Self> {
        if !amount.is_finite() {
            return Err(CoreError::InvalidAmount {
                value: amount,
                reason: "must be finite".to_string(),
            });
        }
        if amount < 0.0 {
            return Err(CoreError::InvalidAmount {
                value: amount,
                reason: "must not be negative".to_string(),
            });
        }

        // Adding 0.0 turns -0.0 into 0.0.
        Ok(Price(amount + 0.0))
    }

    /// The amount exactly as received.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Rounds to the nearest cent for display.
    ///
    /// Prices beyond the i64 cent range saturate; such a price is not a real
    /// catalog price and only needs to display as something.
    pub fn to_money(&self) -> Money {
        Money::from_decimal(self.0).unwrap_or(Money::from_cents(i64::MAX))
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = CoreError;

    fn try_from(amount: f64) -> CoreResult<Self> {
        Price::new(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Exact for any cent amount a fixture or test would use.
impl From<Money> for Price {
    fn from(money: Money) -> Self {
        Price(money.to_decimal().max(0.0) + 0.0)
    }
}

/// Shows the rounded display amount: `$109.95`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_money().fmt(f)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(109.95).unwrap().cents(), 10995);
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal(15.0).unwrap().cents(), 1500);
        assert_eq!(Money::from_decimal(0.0).unwrap(), Money::zero());
    }

    #[test]
    fn test_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN).is_err());
        assert!(Money::from_decimal(f64::INFINITY).is_err());
        assert!(Money::from_decimal(1e300).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_ordering_is_numeric() {
        let cheap = Money::from_cents(995);
        let pricey = Money::from_cents(10995);
        assert!(cheap < pricey);
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Priced {
        price: Price,
    }

    #[test]
    fn test_price_wire_format_is_lossless() {
        let parsed: Priced = serde_json::from_str(r#"{"price": 9.999}"#).unwrap();
        assert_eq!(parsed.price.value(), 9.999);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"price":9.999}"#);

        let integer: Priced = serde_json::from_str(r#"{"price": 56}"#).unwrap();
        assert_eq!(integer.price.value(), 56.0);
    }

    #[test]
    fn test_price_rejects_strings_and_negatives() {
        assert!(serde_json::from_str::<Priced>(r#"{"price": "22.3"}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price": -1.5}"#).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_sub_cent_prices_keep_their_order() {
        let a = Price::new(9.999).unwrap();
        let b = Price::new(10.0).unwrap();

        assert!(a < b);
        assert_ne!(a, b);
        // Both display as the same rounded amount.
        assert_eq!(a.to_money(), b.to_money());
        assert_eq!(a.to_string(), "$10.00");
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let zero = Price::new(-0.0).unwrap();
        assert_eq!(zero.cmp(&Price::new(0.0).unwrap()), Ordering::Equal);
        assert_eq!(Price::from(Money::zero()), zero);
    }
}
