//! Money types with precise decimal arithmetic
//!
//! Every figure in the portal is a Brazilian real amount. Values are stored as
//! `rust_decimal::Decimal` so sums across thousands of accounts and dozens of
//! organizations stay exact; nothing in this module touches floating point.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Internal precision for stored amounts
pub const MONEY_PRECISION: u32 = 4;

/// Display precision (centavos)
pub const CENT_PRECISION: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount in reais
///
/// Amounts are rounded to four decimal places on construction so that values
/// parsed from user input and values produced by arithmetic compare equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero reais
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a new Money value
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(MONEY_PRECISION))
    }

    /// Creates Money from an integer amount of centavos
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, CENT_PRECISION))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Rounds to centavos using banker's rounding
    pub fn round_to_cents(&self) -> Self {
        Self(self.0.round_dp_with_strategy(
            CENT_PRECISION,
            rust_decimal::RoundingStrategy::MidpointNearestEven,
        ))
    }

    /// Checked addition that reports overflow instead of panicking
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction that reports overflow instead of panicking
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Share of `whole` represented by this amount
    ///
    /// Returns a zero percentage when `whole` is zero, so derived columns are
    /// always finite.
    pub fn share_of(&self, whole: &Money) -> Percentage {
        Percentage::of(*self, *whole)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {:.2}", self.round_to_cents().0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Money::ZERO);
        }
        Decimal::from_str(trimmed)
            .map(Money::new)
            .map_err(|e| MoneyError::InvalidAmount(format!("{trimmed}: {e}")))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::new(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A percentage share (e.g. finalística share of a total)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage {
    /// The share as a fraction (e.g. 0.05 for 5%)
    value: Decimal,
}

impl Percentage {
    /// A zero share
    pub const ZERO: Percentage = Percentage { value: Decimal::ZERO };

    /// Creates a percentage from a fraction (e.g. 0.05 for 5%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a percentage from a percent figure (e.g. 5.0 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Share of `part` in `whole`, zero when `whole` is zero
    pub fn of(part: Money, whole: Money) -> Self {
        if whole.is_zero() {
            return Self::ZERO;
        }
        match part.amount().checked_div(whole.amount()) {
            Some(value) => Self { value },
            None => Self::ZERO,
        }
    }

    /// Returns the share as a fraction
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the share as a percent figure
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Returns true if the share is zero
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.as_percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.50));
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_from_cents() {
        let m = Money::from_cents(10050);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00));
        let b = Money::new(dec!(50.00));

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
        assert_eq!((b - a).amount(), dec!(-50.00));
    }

    #[test]
    fn test_money_parsing() {
        assert_eq!("1234.5".parse::<Money>().unwrap(), Money::new(dec!(1234.5)));
        assert_eq!("".parse::<Money>().unwrap(), Money::ZERO);
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(dec!(1500)).to_string(), "R$ 1500.00");
    }

    #[test]
    fn test_share_of_zero_total_is_zero() {
        let part = Money::new(dec!(10));
        assert_eq!(part.share_of(&Money::ZERO), Percentage::ZERO);
    }

    #[test]
    fn test_percentage_of() {
        let pct = Percentage::of(Money::new(dec!(110)), Money::new(dec!(150)));
        assert_eq!(pct.as_percentage().round_dp(1), dec!(73.3));
        assert_eq!(pct.to_string(), "73.3%");
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::from_cents(1), Money::from_cents(2), Money::from_cents(3)];
        let total: Money = values.iter().sum();
        assert_eq!(total, Money::from_cents(6));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn money_arithmetic_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_cents(a);
            let mb = Money::from_cents(b);
            let mc = Money::from_cents(c);

            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }

        #[test]
        fn share_is_never_outside_bounds_for_parts(
            whole in 0i64..1_000_000_000i64,
            frac in 0u32..=100u32
        ) {
            let whole = Money::from_cents(whole);
            let part = Money::new(whole.amount() * Decimal::from(frac) / dec!(100));
            let pct = part.share_of(&whole);

            prop_assert!(pct.as_decimal() >= Decimal::ZERO);
            prop_assert!(pct.as_decimal() <= Decimal::ONE);
        }
    }
}
