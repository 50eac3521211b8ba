use std::{fmt, iter::Sum, ops::Add};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{RateError, Result};

const MAX_SCALE: u32 = 28;

/// Value of one unit of a foreign currency in PLN, kept as an exact decimal
/// fraction (mantissa over a power of ten).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExactRate(Decimal);

impl ExactRate {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses a bank cell such as `4,1234`: the digits on both sides of the
    /// comma form the numerator, the denominator is ten to the number of
    /// fractional digits.
    pub fn parse_comma_decimal(cell: &str) -> Result<Self> {
        Self::parse_with_separator(cell, ',')
    }

    /// Parses a rate typed by a user, accepting either `4,30` or `4.30`.
    pub fn parse_user(input: &str) -> Result<Self> {
        let separator = if input.contains(',') { ',' } else { '.' };
        Self::parse_with_separator(input, separator)
    }

    fn parse_with_separator(input: &str, separator: char) -> Result<Self> {
        let bad = |reason: &str| RateError::BadRate {
            value: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (whole, fraction) = match trimmed.split_once(separator) {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(bad("empty value"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(bad("expected only digits around the decimal separator"));
        }
        let scale = u32::try_from(fraction.len())
            .ok()
            .filter(|scale| *scale <= MAX_SCALE)
            .ok_or_else(|| bad("too many fractional digits"))?;

        let digits = format!("{whole}{fraction}");
        let mantissa: i128 = digits
            .parse()
            .map_err(|e: std::num::ParseIntError| bad(&e.to_string()))?;
        let value = Decimal::try_from_i128_with_scale(mantissa, scale)
            .map_err(|e| bad(&e.to_string()))?;

        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Numerator and denominator of the rate as it was parsed, unreduced.
    pub fn numer_denom(&self) -> (i128, i128) {
        (self.0.mantissa(), 10i128.pow(self.0.scale()))
    }

    /// Rounds half away from zero to `dp` decimal places.
    pub fn round_dp(&self, dp: u32) -> Self {
        Self(round_half_up(self.0, dp))
    }
}

pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl Add for ExactRate {
    type Output = ExactRate;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for ExactRate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self(Decimal::ZERO), Add::add)
    }
}

impl From<Decimal> for ExactRate {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for ExactRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
