//! Money types with precise decimal arithmetic
//!
//! Premiums, targets and totals are carried as `Money` so that discount
//! arithmetic stays exact. All amounts are euro amounts; only the two-decimal
//! display is locale-aware in the sense that it appends the `€` sign.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Number of decimal places used when displaying an amount
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Number of decimal places an amount is stored with
pub const AMOUNT_DECIMAL_PLACES: u32 = 4;

/// Errors that can occur during money operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount {0} has more than 4 decimal places")]
    ExcessPrecision(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount
///
/// Money uses rust_decimal for precise arithmetic without floating-point errors.
/// Amounts are stored with 4 decimal places internally so that a two-decimal
/// premium multiplied by a two-decimal rate is represented exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value
    ///
    /// Amounts are rounded to 4 decimal places; parsing through `FromStr`
    /// rejects finer input instead.
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: amount.round_dp(AMOUNT_DECIMAL_PLACES),
        }
    }

    /// Creates Money from an integer amount in cents
    pub fn from_minor(minor_units: i64) -> Self {
        Self::new(Decimal::new(minor_units, DISPLAY_DECIMAL_PLACES))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self { amount: dec!(0) }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
        }
    }

    /// Checked addition that returns an error when the sum is not representable
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.amount
            .checked_add(other.amount)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction that returns an error when the difference is not representable
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.amount
            .checked_sub(other.amount)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Multiplies by a scalar (e.g., for rate calculations)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor)
    }

    /// Returns `self / other` as a plain ratio
    pub fn ratio_to(&self, other: &Money) -> Result<Decimal, MoneyError> {
        if other.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        self.amount
            .checked_div(other.amount)
            .ok_or_else(|| MoneyError::InvalidAmount(format!("{} / {}", self.amount, other.amount)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.dp$}€",
            self.amount.round_dp(DISPLAY_DECIMAL_PLACES),
            dp = DISPLAY_DECIMAL_PLACES as usize
        )
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses `"500"`, `"499.90"`, `"499,90"` or `"499.90€"`
    ///
    /// Input with more than 4 significant decimal places is rejected rather
    /// than rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('€').trim();
        let normalized = trimmed.replace(',', ".");
        let amount = Decimal::from_str(&normalized)
            .map_err(|_| MoneyError::InvalidAmount(s.to_string()))?;
        if amount.normalize().scale() > AMOUNT_DECIMAL_PLACES {
            return Err(MoneyError::ExcessPrecision(s.to_string()));
        }
        Ok(Money::new(amount))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.amount + other.amount)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.amount - other.amount)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

/// Represents a percentage rate (e.g., a discount or the share of a premium kept)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.05 for 5%)
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 5 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a money amount
    pub fn apply(&self, money: &Money) -> Money {
        money.multiply(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}
