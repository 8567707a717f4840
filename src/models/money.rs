//! Money type for representing currency amounts
//!
//! Amounts are stored in cents (i64) to avoid floating-point precision
//! issues.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use thiserror::Error;

/// Errors from parsing a money amount
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("invalid amount format: '{0}'")]
    InvalidFormat(String),
}

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole currency units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Fractional part, 0-99
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a money amount from a decimal string
    ///
    /// Accepts "20", "20.5", "20.50", "-3.25", "$20.50", "$-3.25". Units and
    /// fraction must be digits only; the sign applies to the whole amount.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let input = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        // A single sign, before or after the currency symbol
        let (mut negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let rest = match rest.strip_prefix('-') {
            Some(rest) if !negative => {
                negative = true;
                rest
            }
            Some(_) => return Err(invalid()),
            None => rest,
        };

        let digits_only = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        let (units, fraction_cents) = match rest.split_once('.') {
            Some((units, fraction)) => {
                if !digits_only(fraction) || fraction.len() > 2 {
                    return Err(invalid());
                }
                let mut cents: i64 = fraction.parse().map_err(|_| invalid())?;
                if fraction.len() == 1 {
                    cents *= 10;
                }
                (units, cents)
            }
            None => (rest, 0),
        };

        if !digits_only(units) {
            return Err(invalid());
        }
        let units: i64 = units.parse().map_err(|_| invalid())?;

        let cents = units * 100 + fraction_cents;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse("20.50").unwrap(), Money::from_cents(2050));
        assert_eq!(Money::parse("20.5").unwrap(), Money::from_cents(2050));
        assert_eq!(Money::parse("20").unwrap(), Money::from_cents(2000));
    }

    #[test]
    fn test_parse_with_symbol_and_sign() {
        assert_eq!(Money::parse("$20.50").unwrap(), Money::from_cents(2050));
        assert_eq!(Money::parse("-3.25").unwrap(), Money::from_cents(-325));
        assert_eq!(Money::parse("-$3.25").unwrap(), Money::from_cents(-325));
    }

    #[test]
    fn test_parse_sign_after_symbol_applies_to_whole_amount() {
        assert_eq!(Money::parse("$-3.25").unwrap(), Money::from_cents(-325));
        assert!(Money::parse("-$-3.25").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("twenty").is_err());
        assert!(Money::parse("20.505").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_digit_fraction() {
        assert!(Money::parse("3.-5").is_err());
        assert!(Money::parse("3.").is_err());
        assert!(Money::parse("3.x").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2050).to_string(), "$20.50");
        assert_eq!(Money::from_cents(-325).to_string(), "-$3.25");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let total = Money::from_cents(1000) + Money::from_cents(250);
        assert_eq!(total, Money::from_cents(1250));
        assert_eq!(total - Money::from_cents(250), Money::from_cents(1000));
    }
}
