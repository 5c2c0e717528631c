//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog API sends prices as JSON numbers:  "price": 19.99          │
//! │                                                                         │
//! │  Summing floats for a cart total:                                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: convert once at the edge, then add integers              │
//! │    19.99  ──► 1999 minor units ──► cart math in i64 ──► 19.99 on wire   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 3297);
//!
//! let parsed = Money::from_major_units(19.99).unwrap();
//! assert_eq!(parsed.cents(), 1999);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Largest magnitude (in major units) that converts to cents without loss.
const MAX_MAJOR_UNITS: f64 = 90_071_992_547_409.0;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents / paise).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine::line_total ──► Cart::total_price ──► "Rs 1998.00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a decimal amount in major units (as sent by the catalog API).
    ///
    /// Rounds to the nearest cent. Returns `None` for NaN, infinities and
    /// magnitudes that cannot be represented exactly in cents.
    pub fn from_major_units(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount.abs() > MAX_MAJOR_UNITS {
            return None;
        }
        Some(Money((amount * 100.0).round() as i64))
    }

    /// Returns the value as a decimal in major units (for the wire only).
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX).cents(), i64::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency symbol.
///
/// The symbol is a display setting and is added by the app config.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Sums saturate at the i64 bounds instead of wrapping.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter: a non-negative price as a JSON number in major units.
///
/// ## Usage
/// ```rust,ignore
/// #[serde(with = "crate::money::major_units")]
/// pub price: Money,
/// ```
///
/// `999` and `999.0` both read as 99900 cents; writing emits `999.0`.
/// Negative or non-finite numbers are rejected.
pub mod major_units {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_major_units())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        let money = Money::from_major_units(amount)
            .ok_or_else(|| D::Error::custom(format!("price out of range: {amount}")))?;
        if money.is_negative() {
            return Err(D::Error::custom(format!("price must not be negative: {amount}")));
        }
        Ok(money)
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_units_rounds_to_cent() {
        assert_eq!(Money::from_major_units(19.99).unwrap().cents(), 1999);
        assert_eq!(Money::from_major_units(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_major_units(999.0).unwrap().cents(), 99900);
        assert!(Money::from_major_units(f64::NAN).is_none());
        assert!(Money::from_major_units(f64::INFINITY).is_none());
        assert!(Money::from_major_units(1e20).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);

        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(Money::from_cents(i64::MIN) + Money::from_cents(-1), Money::from_cents(i64::MIN));
        assert_eq!(
            Money::from_cents(10_000_000_000).multiply_quantity(i64::from(u32::MAX)),
            max
        );

        let total: Money = vec![max, Money::from_cents(500)].into_iter().sum();
        assert_eq!(total, max);
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Priced {
        #[serde(with = "major_units")]
        price: Money,
    }

    #[test]
    fn test_major_units_wire_format() {
        let p: Priced = serde_json::from_str(r#"{"price": 999}"#).unwrap();
        assert_eq!(p.price.cents(), 99900);

        let p: Priced = serde_json::from_str(r#"{"price": 19.99}"#).unwrap();
        assert_eq!(p.price.cents(), 1999);
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"price":19.99}"#);

        assert!(serde_json::from_str::<Priced>(r#"{"price": -1}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price": "12"}"#).is_err());
    }
}
