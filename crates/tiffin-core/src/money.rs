//! # Money Module
//!
//! Provides the `Money` type for rupee amounts.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The storefront API sends amounts as JSON numbers of rupees:           │
//! │    { "outstanding": 1520.5, "amount": 12.1 }                           │
//! │                                                                         │
//! │  Summing those as f64 drifts:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    Convert once at the JSON boundary, add integers afterwards          │
//! │    1520.5 → 152050 paise                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiffin_core::money::Money;
//!
//! let price = Money::from_paise(14950); // ₹ 149.50
//! let total = price + Money::from_rupees(10.0);
//! assert_eq!(total.paise(), 15950);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount held as whole paise.
///
/// ## Wire Format
/// The API speaks rupees as plain JSON numbers, so `Money` serialises as a
/// number too: integers for whole rupees (`250`), floats otherwise (`12.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from a rupee amount, rounded to the nearest paisa.
    ///
    /// ## Example
    /// ```rust
    /// use tiffin_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(12.346).paise(), 1235);
    /// assert_eq!(Money::from_rupees(-5.5).paise(), -550);
    /// ```
    pub fn from_rupees(rupees: f64) -> Self {
        Money((rupees * 100.0).round() as i64)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount as a float of rupees (for display and the wire only).
    #[inline]
    pub fn as_rupees_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Share of `total` that `self` represents, in basis points (10000 = 100%).
    ///
    /// Returns 0 when `total` is zero or negative.
    ///
    /// ## Example
    /// ```rust
    /// use tiffin_core::money::Money;
    ///
    /// let part = Money::from_paise(2500);
    /// let total = Money::from_paise(10000);
    /// assert_eq!(part.share_bps(total), 2500); // 25.00%
    /// ```
    pub fn share_bps(&self, total: Money) -> u32 {
        if total.0 <= 0 || self.0 <= 0 {
            return 0;
        }
        // i128 keeps large revenue totals from overflowing
        let bps = (self.0 as i128 * 10000 + total.0 as i128 / 2) / total.0 as i128;
        bps.min(10000) as u32
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the console prints it: `₹ 149.50`, `₹ 20`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        if self.paise_part() == 0 {
            write!(f, "{}₹ {}", sign, self.rupees().abs())
        } else {
            write!(f, "{}₹ {}.{:02}", sign, self.rupees().abs(), self.paise_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.paise_part() == 0 {
            serializer.serialize_i64(self.rupees())
        } else {
            serializer.serialize_f64(self.as_rupees_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rupees = f64::deserialize(deserializer)?;
        if !rupees.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok(Money::from_rupees(rupees))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees_rounds_to_paisa() {
        assert_eq!(Money::from_rupees(10.0).paise(), 1000);
        assert_eq!(Money::from_rupees(0.1 + 0.2).paise(), 30);
        assert_eq!(Money::from_rupees(149.999).paise(), 15000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(14950).to_string(), "₹ 149.50");
        assert_eq!(Money::from_paise(2000).to_string(), "₹ 20");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹ 5.50");
        assert_eq!(Money::zero().to_string(), "₹ 0");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(250);
        assert_eq!((a + b).paise(), 1250);
        assert_eq!((a - b).paise(), 750);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.paise(), 1500);
    }

    #[test]
    fn test_json_wire_format() {
        let whole: Money = serde_json::from_str("250").unwrap();
        assert_eq!(whole.paise(), 25000);
        assert_eq!(serde_json::to_string(&whole).unwrap(), "250");

        let frac: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(frac.paise(), 1250);
        assert_eq!(serde_json::to_string(&frac).unwrap(), "12.5");
    }

    #[test]
    fn test_share_bps() {
        let total = Money::from_paise(30000);
        assert_eq!(Money::from_paise(10000).share_bps(total), 3333);
        assert_eq!(Money::from_paise(10000).share_bps(Money::zero()), 0);
        assert_eq!(Money::zero().share_bps(total), 0);
    }
}
