//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that summing thousands of
//! expenses never drifts. Conversion to a floating-point number only happens
//! at the very end, when a value is written out for display.

use serde::Serializer;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use crate::error::{SpendlogError, SpendlogResult};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single expense or budget may hold (99,999,999.99)
    pub const MAX: Money = Money(9_999_999_999);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use spendlog::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_decimal_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, or `None` if the sum leaves the i64 range
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Parse a decimal amount such as "10.50", "-3.5" or "42"
    ///
    /// At most two fraction digits are accepted; a value with more precision
    /// than the stored scale is rejected rather than silently truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match body.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (body, ""),
        };

        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(MoneyParseError::InvalidFormat(trimmed.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(trimmed.to_string()));
        }

        let units: i64 = whole
            .parse()
            .map_err(|_| MoneyParseError::OutOfRange(trimmed.to_string()))?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction.parse::<i64>().unwrap_or(0),
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(|| MoneyParseError::OutOfRange(trimmed.to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Parse an amount column read back from storage
    ///
    /// Failure means the stored record is corrupt, so it is reported as a
    /// data integrity error naming the owning record.
    pub fn from_stored(raw: &str, owner: impl fmt::Display) -> SpendlogResult<Self> {
        Self::parse(raw).map_err(|e| SpendlogError::DataIntegrity(format!("{}: {}", owner, e)))
    }

    /// Render as plain decimal text with two fraction digits ("1234.50")
    ///
    /// This is the persisted form of every amount column.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }

    /// Convert to a floating-point number for output
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
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

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Add `amount` to a running total
///
/// Stored amounts are capped well below the i64 range, so a sum that
/// overflows can only come from tampered data.
pub fn accumulate(total: &mut Money, amount: Money) -> SpendlogResult<()> {
    let sum = total.checked_add(amount).ok_or_else(|| {
        SpendlogError::DataIntegrity(format!("total overflows adding {} to {}", amount, total))
    })?;
    *total = sum;
    Ok(())
}

/// Serialize a Money value as a JSON number (e.g. `14000.5`)
///
/// Use with `#[serde(serialize_with = "...")]` on output structs.
pub fn serialize_as_number<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(money.as_f64())
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    TooPrecise(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Empty money amount"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Money amount has more than two decimals: '{}'", s)
            }
            MoneyParseError::OutOfRange(s) => write!(f, "Money amount out of range: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
