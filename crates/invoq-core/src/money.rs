//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Satang                                           │
//! │    ฿500.50 is stored as 50050 satang (i64)                              │
//! │    All comparisons and signatures are exact                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoq_core::money::Money;
//!
//! // Create from satang (preferred)
//! let amount = Money::from_satang(50000); // ฿500.00
//!
//! // Or parse what the shopkeeper typed
//! let amount: Money = "500.50".parse().unwrap();
//! assert_eq!(amount.satang(), 50050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in satang (1/100 baht).
///
/// ## Design Decisions
/// - **i64**: Large enough for any realistic lock amount
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No float constructors**: Amounts enter as satang or parsed strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from satang (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use invoq_core::money::Money;
    ///
    /// let amount = Money::from_satang(50050); // ฿500.50
    /// assert_eq!(amount.satang(), 50050);
    /// ```
    #[inline]
    pub const fn from_satang(satang: i64) -> Self {
        Money(satang)
    }

    /// Creates a Money value from whole baht.
    #[inline]
    pub const fn from_baht(baht: i64) -> Self {
        Money(baht * 100)
    }

    /// Returns the value in satang.
    #[inline]
    pub const fn satang(&self) -> i64 {
        self.0
    }

    /// Returns the whole-baht portion.
    #[inline]
    pub const fn baht(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the satang portion (always 0-99).
    #[inline]
    pub const fn satang_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Formats the amount the way it appears inside submission signatures:
    /// whole-baht amounts drop the fraction entirely.
    ///
    /// ## Example
    /// ```rust
    /// use invoq_core::money::Money;
    ///
    /// assert_eq!(Money::from_satang(50000).compact(), "500");
    /// assert_eq!(Money::from_satang(50050).compact(), "500.50");
    /// ```
    pub fn compact(&self) -> String {
        if self.0 % 100 == 0 {
            format!("{}", self.baht())
        } else {
            format!("{}.{:02}", self.baht(), self.satang_part())
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with the baht sign, for logs and messages.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}฿{}.{:02}", sign, self.baht().abs(), self.satang_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Parse failure for user-entered amounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMoneyError {
    /// The input was empty or all whitespace.
    #[error("amount is empty")]
    Empty,

    /// The input was not a decimal number with at most two fraction digits.
    #[error("invalid amount: '{0}'")]
    Invalid(String),

    /// Amounts entering the intake flow are never negative.
    #[error("amount cannot be negative: '{0}'")]
    Negative(String),
}

/// Parses a user-entered decimal amount ("500", "500.5", "500.50").
///
/// At most two fraction digits are accepted; a single fraction digit is
/// scaled ("500.5" == "500.50"). No thousands separators.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (baht_str, fraction_str) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if baht_str.starts_with('-') {
            return Err(ParseMoneyError::Negative(s.to_string()));
        }

        let baht: i64 = baht_str
            .parse()
            .map_err(|_| ParseMoneyError::Invalid(s.to_string()))?;

        let satang: i64 = match fraction_str.len() {
            0 => 0,
            1 | 2 => {
                let digits: i64 = fraction_str
                    .parse()
                    .map_err(|_| ParseMoneyError::Invalid(s.to_string()))?;
                if fraction_str.len() == 1 {
                    digits * 10
                } else {
                    digits
                }
            }
            _ => return Err(ParseMoneyError::Invalid(s.to_string())),
        };

        // A typed amount can fit i64 as baht yet overflow as satang
        baht.checked_mul(100)
            .and_then(|v| v.checked_add(satang))
            .map(Money)
            .ok_or_else(|| ParseMoneyError::Invalid(s.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_satang() {
        let amount = Money::from_satang(50050);
        assert_eq!(amount.satang(), 50050);
        assert_eq!(amount.baht(), 500);
        assert_eq!(amount.satang_part(), 50);
    }

    #[test]
    fn test_from_baht() {
        assert_eq!(Money::from_baht(500).satang(), 50000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_satang(50000)), "฿500.00");
        assert_eq!(format!("{}", Money::from_satang(50050)), "฿500.50");
        assert_eq!(format!("{}", Money::from_satang(0)), "฿0.00");
    }

    #[test]
    fn test_compact_drops_whole_baht_fraction() {
        assert_eq!(Money::from_satang(50000).compact(), "500");
        assert_eq!(Money::from_satang(50050).compact(), "500.50");
        assert_eq!(Money::from_satang(5).compact(), "0.05");
    }

    #[test]
    fn test_parse_whole_amount() {
        let amount: Money = "500".parse().unwrap();
        assert_eq!(amount.satang(), 50000);
    }

    #[test]
    fn test_parse_fraction_digits() {
        // One fraction digit scales to tens of satang
        assert_eq!("500.5".parse::<Money>().unwrap().satang(), 50050);
        assert_eq!("500.50".parse::<Money>().unwrap().satang(), 50050);
        assert_eq!("500.05".parse::<Money>().unwrap().satang(), 50005);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!("   ".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert!(matches!(
            "five hundred".parse::<Money>(),
            Err(ParseMoneyError::Invalid(_))
        ));
        assert!(matches!(
            "500.123".parse::<Money>(),
            Err(ParseMoneyError::Invalid(_))
        ));
        assert!(matches!(
            "-500".parse::<Money>(),
            Err(ParseMoneyError::Negative(_))
        ));
    }

    #[test]
    fn test_parse_rejects_overflowing_amounts() {
        // Fits i64 as baht but not as satang
        let huge = i64::MAX.to_string();
        assert!(matches!(
            huge.parse::<Money>(),
            Err(ParseMoneyError::Invalid(_))
        ));
        assert!(matches!(
            "92233720368547759".parse::<Money>(),
            Err(ParseMoneyError::Invalid(_))
        ));
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(Money::from_satang(100).is_positive());
    }
}
