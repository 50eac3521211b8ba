use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Months, NaiveDate};
use log::{debug, info, warn};

use crate::{
    currency::Currency,
    error::{RateError, Result},
    exact_rate::ExactRate,
    source::RateTableSource,
    store::FileTableStore,
    year_table::YearTable,
};

/// Calendar span `start..=end` over which rates are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(RateError::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self { start, end })
    }

    /// Window ending on `today` and starting the same day `months` earlier,
    /// both ends included.
    pub fn trailing_months(today: NaiveDate, months: u32) -> Result<Self> {
        let start = today
            .checked_sub_months(Months::new(months))
            .ok_or_else(|| RateError::InvalidWindow {
                start: format!("{months} months before {today}"),
                end: today.to_string(),
            })?;

        Self::new(start, today)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Calendar years touched by the window, oldest first.
    pub fn years(&self) -> Vec<i32> {
        (self.start.year()..=self.end.year()).collect()
    }
}

/// Collects per-day rates for a window, pulling yearly tables from the
/// remote source whenever the cache is missing or behind `today`. Each
/// table is read from disk or fetched at most once per extractor.
pub struct RateWindowExtractor<S> {
    store: FileTableStore,
    source: S,
    today: NaiveDate,
    tables: BTreeMap<i32, YearTable>,
    fetched: HashSet<i32>,
}

impl<S: RateTableSource> RateWindowExtractor<S> {
    pub fn new(store: FileTableStore, source: S, today: NaiveDate) -> Self {
        Self {
            store,
            source,
            today,
            tables: BTreeMap::new(),
            fetched: HashSet::new(),
        }
    }

    /// Makes sure every year the window touches is cached and current.
    /// When the current year's table lacks a row for `today`, every touched
    /// year is refetched, so a previous year cached before it ended gets
    /// its closing months.
    pub async fn refresh(&mut self, window: &DateWindow) -> Result<()> {
        let years = window.years();
        for &year in &years {
            self.load_cached(year)?;
        }

        let latest_available = self.latest_available(&years);
        if !latest_available {
            info!("No rate for {} cached yet, refreshing {years:?}", self.today);
        }

        for year in years {
            let stale = !latest_available || !self.tables.contains_key(&year);
            if !stale || self.fetched.contains(&year) {
                debug!("Table for {year} is current for this run");
                continue;
            }

            let table = self.fetch_year(year).await?;
            self.tables.insert(year, table);
        }

        Ok(())
    }

    /// Rates of `currency` for each published day in the window, in date
    /// order across the year boundary.
    pub async fn rates(
        &mut self,
        window: &DateWindow,
        currency: Currency,
    ) -> Result<Vec<(NaiveDate, ExactRate)>> {
        self.refresh(window).await?;

        let mut rates = Vec::new();
        for year in window.years() {
            let table = self
                .tables
                .get(&year)
                .ok_or(RateError::MissingData { year })?;
            debug!("Reading {currency} rates of {year}");

            for row in table.rows_between(window.start(), window.end()) {
                rates.push((row.date, row.rate(currency)?));
            }
        }

        Ok(rates)
    }

    fn load_cached(&mut self, year: i32) -> Result<()> {
        if self.tables.contains_key(&year) {
            return Ok(());
        }

        match self.store.load(year) {
            Ok(table) => {
                self.tables.insert(year, table);
                Ok(())
            }
            Err(RateError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Whether the cache already holds today's row. Windows that do not
    /// reach the current year never need it.
    fn latest_available(&self, years: &[i32]) -> bool {
        let current = self.today.year();
        if !years.contains(&current) {
            return true;
        }

        self.tables
            .get(&current)
            .is_some_and(|table| table.contains(self.today))
    }

    async fn fetch_year(&mut self, year: i32) -> Result<YearTable> {
        info!("Fetching table for year {year}");
        let bytes = self.source.fetch_year(year).await?;
        self.fetched.insert(year);

        let table = match YearTable::parse(year, &bytes) {
            Ok(table) if !table.is_empty() => table,
            Ok(_) => {
                warn!("Table fetched for {year} has no rows");
                return Err(RateError::MissingData { year });
            }
            Err(e) => {
                warn!("Table fetched for {year} does not parse: {e}");
                return Err(RateError::MissingData { year });
            }
        };

        self.store.save(year, &bytes)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn trailing_window_spans_six_months_inclusive() {
        let window = DateWindow::trailing_months(date(2024, 2, 15), 6).unwrap();

        assert_eq!(window.start(), date(2023, 8, 15));
        assert_eq!(window.end(), date(2024, 2, 15));
        assert_eq!(window.years(), vec![2023, 2024]);
    }

    #[test]
    fn trailing_window_clamps_to_month_end() {
        let window = DateWindow::trailing_months(date(2024, 8, 31), 6).unwrap();
        assert_eq!(window.start(), date(2024, 2, 29));
        assert_eq!(window.years(), vec![2024]);
    }

    #[test]
    fn rejects_inverted_window() {
        assert!(matches!(
            DateWindow::new(date(2024, 2, 1), date(2024, 1, 1)),
            Err(RateError::InvalidWindow { .. })
        ));
    }
}
