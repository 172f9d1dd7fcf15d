//! Decimal money type rendered with 2 decimal places.
//!
//! Uses `rust_decimal` internally so amounts compare exactly without
//! floating-point errors. Values keep the precision they were parsed with;
//! only rendering rounds to cents.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// A decimal amount, displayed with exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use transaction_history::Money;
///
/// let amount = Money::from_str("127.8").unwrap();
/// assert_eq!(amount.to_string(), "127.80");
/// assert!(Money::from_str("127.851").unwrap() > Money::from_str("127.85").unwrap());
/// assert_eq!(Money::from_str("3500").unwrap().to_currency_string(), "$3,500.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Decimal places used when rendering.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Wraps a `Decimal` without changing its precision.
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns `true` if this value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the magnitude of this value.
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Value rounded half away from zero to [`Money::SCALE`] places.
    fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Renders the magnitude as US currency, e.g. `$1,234.50`.
    ///
    /// The sign is dropped; callers derive it from context (a transaction's
    /// direction, for instance).
    pub fn to_currency_string(&self) -> String {
        let plain = self.abs().to_string();
        let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        format!("${}.{}", grouped, cents)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Money::new(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}
