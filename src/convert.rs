use rust_decimal::Decimal;

use crate::{
    error::{RateError, Result},
    exact_rate::{ExactRate, round_half_up},
};

pub const AMOUNT_DP: u32 = 2;

/// Rate the salary is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divisor {
    /// Trailing average from the aggregator.
    Average(ExactRate),
    /// Rate supplied by the user, bypassing aggregation.
    Override(ExactRate),
}

impl Divisor {
    pub fn rate(&self) -> ExactRate {
        match self {
            Divisor::Average(rate) | Divisor::Override(rate) => *rate,
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, Divisor::Override(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub salary: u64,
    pub divisor: Divisor,
    pub last_rate: ExactRate,
    /// Salary in the foreign currency, rounded to cents.
    pub exchanged: Decimal,
    /// `exchanged` converted back to PLN at `last_rate`, rounded to grosze.
    pub round_trip: Decimal,
}

pub fn convert(salary: u64, divisor: Divisor, last_rate: ExactRate) -> Result<ConversionResult> {
    if salary == 0 {
        return Err(RateError::InvalidSalary);
    }
    let rate = divisor.rate();
    if rate.is_zero() {
        return Err(RateError::InvalidRate(rate.to_string()));
    }

    let exchanged = Decimal::from(salary)
        .checked_div(rate.as_decimal())
        .map(|amount| round_half_up(amount, AMOUNT_DP))
        .ok_or_else(|| RateError::InvalidRate(rate.to_string()))?;
    let round_trip = exchanged
        .checked_mul(last_rate.as_decimal())
        .map(|amount| round_half_up(amount, AMOUNT_DP))
        .ok_or_else(|| RateError::InvalidRate(last_rate.to_string()))?;

    Ok(ConversionResult {
        salary,
        divisor,
        last_rate,
        exchanged,
        round_trip,
    })
}
