use chrono::NaiveDate;
use log::{debug, info};

use crate::{
    aggregate::{AggregateResult, aggregate},
    currency::Currency,
    error::{RateError, Result},
    exact_rate::ExactRate,
    source::RateTableSource,
    store::FileTableStore,
    window::{DateWindow, RateWindowExtractor},
};

pub const TRAILING_MONTHS: u32 = 6;

/// Entry point shared by every output format: refreshes the cache and
/// reduces the trailing window of a currency to an [`AggregateResult`].
pub struct RateFetcher<S> {
    extractor: RateWindowExtractor<S>,
    window: DateWindow,
}

impl<S: RateTableSource> RateFetcher<S> {
    pub fn new(store: FileTableStore, source: S, today: NaiveDate) -> Result<Self> {
        Ok(Self {
            extractor: RateWindowExtractor::new(store, source, today),
            window: DateWindow::trailing_months(today, TRAILING_MONTHS)?,
        })
    }

    /// Fetches the years of the window that are missing or lack today's row.
    pub async fn refresh(&mut self) -> Result<()> {
        let window = self.window;
        self.extractor.refresh(&window).await
    }

    pub async fn get_result(&mut self, currency: Currency) -> Result<AggregateResult> {
        let window = self.window;
        let rates = self.extractor.rates(&window, currency).await?;
        if let (Some((first, _)), Some((last, _))) = (rates.first(), rates.last()) {
            debug!("{} {currency} rates from {first} to {last}", rates.len());
        }

        let values: Vec<ExactRate> = rates.into_iter().map(|(_, rate)| rate).collect();
        let result = aggregate(&values, currency)?;
        info!(
            "{currency}: average {} over {} days, last {}",
            result.average(),
            result.sample_count(),
            result.last()
        );

        Ok(result)
    }

    /// Like [`Self::get_result`] but takes a raw currency code, rejecting
    /// unsupported codes before touching the cache or the network.
    pub async fn get_result_for_code(&mut self, code: &str) -> Result<AggregateResult> {
        let currency: Currency = code.parse()?;
        self.get_result(currency).await
    }

    /// Most recent published rate in the window, without averaging.
    pub async fn latest_rate(&mut self, currency: Currency) -> Result<ExactRate> {
        let window = self.window;
        self.extractor
            .rates(&window, currency)
            .await?
            .last()
            .map(|(_, rate)| *rate)
            .ok_or_else(|| RateError::EmptyWindow {
                currency: currency.to_string(),
            })
    }
}
