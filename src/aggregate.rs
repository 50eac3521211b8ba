use rust_decimal::Decimal;

use crate::{
    currency::Currency,
    error::{RateError, Result},
    exact_rate::ExactRate,
};

pub const AVERAGE_DP: u32 = 4;

/// Average and latest rate of one currency over a window.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    currency: Currency,
    average: ExactRate,
    last: ExactRate,
    sample_count: usize,
}

impl AggregateResult {
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Mean rate, already rounded to four decimal places.
    pub fn average(&self) -> ExactRate {
        self.average
    }

    pub fn last(&self) -> ExactRate {
        self.last
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// The trailing average is at least as high as today's rate.
    pub fn favorable(&self) -> bool {
        self.average >= self.last
    }
}

/// Reduces chronologically ordered rates to their average and last value.
/// The sum is exact; the average is rounded once, here.
pub fn aggregate(rates: &[ExactRate], currency: Currency) -> Result<AggregateResult> {
    let Some(last) = rates.last().copied() else {
        return Err(RateError::EmptyWindow {
            currency: currency.to_string(),
        });
    };

    let sum: ExactRate = rates.iter().copied().sum();
    let mean = sum.as_decimal() / Decimal::from(rates.len());
    let average = ExactRate::new(mean).round_dp(AVERAGE_DP);

    Ok(AggregateResult {
        currency,
        average,
        last,
        sample_count: rates.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(cell: &str) -> ExactRate {
        ExactRate::parse_comma_decimal(cell).unwrap()
    }

    #[test]
    fn averages_without_float_drift() {
        let rates = [rate("4,1000"), rate("4,3000"), rate("4,2000")];
        let result = aggregate(&rates, Currency::Eur).unwrap();

        assert_eq!(result.average().as_decimal(), Decimal::new(42000, 4));
        assert_eq!(result.last(), rate("4,2000"));
        assert_eq!(result.sample_count(), 3);
    }

    #[test]
    fn average_rounds_to_four_places_only() {
        let rates = [rate("4,1001"), rate("4,1002"), rate("4,1002")];
        let result = aggregate(&rates, Currency::Usd).unwrap();

        // 12.3005 / 3 = 4.10016...
        assert_eq!(result.average().as_decimal(), Decimal::new(41002, 4));
        assert_eq!(result.last().as_decimal(), Decimal::new(41002, 4));
    }

    #[test]
    fn last_is_not_rounded() {
        let rates = [rate("4,1"), rate("4,123456")];
        let result = aggregate(&rates, Currency::Eur).unwrap();

        assert_eq!(result.last().as_decimal(), Decimal::new(4123456, 6));
    }

    #[test]
    fn equal_average_and_last_is_favorable() {
        let rates = [rate("4,3000"), rate("4,3000")];
        assert!(aggregate(&rates, Currency::Eur).unwrap().favorable());
    }

    #[test]
    fn rising_rate_is_not_favorable() {
        let rates = [rate("4,1000"), rate("4,5000")];
        assert!(!aggregate(&rates, Currency::Eur).unwrap().favorable());
    }

    #[test]
    fn empty_window_is_reported() {
        let err = aggregate(&[], Currency::Usd).unwrap_err();
        assert!(matches!(err, RateError::EmptyWindow { ref currency } if currency == "USD"));
    }
}
