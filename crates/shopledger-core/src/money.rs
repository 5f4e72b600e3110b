//! # Money Module
//!
//! Provides the `Money` type for prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  As a float:    9.99 is stored as 9.9900000000000002131628...           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "9.99" ──parse──► 999 cents ──store──► INTEGER column                │
//! │    999 cents ──display──► "$9.99"                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopledger_core::money::Money;
//!
//! let price: Money = "9.99".parse().unwrap();
//! assert_eq!(price.cents(), 999);
//! assert_eq!(price.to_string(), "$9.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed so that the parser can hand a negative value to the catalog,
/// which is where negative prices are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use shopledger_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
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

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Sum of two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Amount times a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use shopledger_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(999).checked_mul(5), Some(Money::from_cents(4995)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal text as typed by an operator.
///
/// ## Accepted Forms
/// ```text
/// "9.99"   → 999        "$3.25" → 325
/// "10"     → 1000       ".5"    → 50
/// "0.5"    → 50         "-1.00" → -100   (rejected later by the catalog)
///
/// "9.999"  → InvalidFormat (more than two decimal places)
/// "abc"    → InvalidFormat
/// ""       → InvalidFormat
/// ```
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let raw = s.trim();
        let (negative, body) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let body = body.strip_prefix('$').unwrap_or(body);

        let (major, minor) = body.split_once('.').unwrap_or((body, ""));
        if major.is_empty() && minor.is_empty() {
            return Err(invalid("expected a decimal number"));
        }
        if !major.chars().chain(minor.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }
        if minor.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("value is too large"))?
        };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("expected digits"))? * 10,
            _ => minor.parse().map_err(|_| invalid("expected digits"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("value is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

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

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(999)), "$9.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!("9.99".parse::<Money>().unwrap().cents(), 999);
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("0.5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("$3.25".parse::<Money>().unwrap().cents(), 325);
        assert_eq!("  7.00 ".parse::<Money>().unwrap().cents(), 700);
        assert_eq!("0".parse::<Money>().unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_negative_is_left_to_the_catalog() {
        let price: Money = "-1.50".parse().unwrap();
        assert!(price.is_negative());
        assert_eq!(price.cents(), -150);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("9.999".parse::<Money>().is_err());
        assert!("1,50".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(a.checked_mul(3), Some(Money::from_cents(3000)));
        assert_eq!(Money::zero().checked_mul(i64::MAX), Some(Money::zero()));
    }

    #[test]
    fn test_arithmetic_overflow_is_none() {
        let max = Money::from_cents(i64::MAX);

        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(max.checked_mul(2), None);
        assert_eq!(Money::from_cents(2).checked_mul(i64::MAX), None);
    }
}
