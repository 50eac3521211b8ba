use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{
    currency::Currency,
    error::{RateError, Result},
    exact_rate::ExactRate,
};

const DATE_COLUMN: &[u8] = b"data";
const DATE_FORMAT: &str = "%Y%m%d";

/// One published day of the bank's table.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRateRow {
    pub date: NaiveDate,
    rates: HashMap<Currency, ExactRate>,
}

impl DailyRateRow {
    pub fn new(date: NaiveDate, rates: HashMap<Currency, ExactRate>) -> Self {
        Self { date, rates }
    }

    pub fn rate(&self, currency: Currency) -> Result<ExactRate> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or_else(|| RateError::BadRate {
                value: String::new(),
                reason: format!("no {} value on {}", currency.column(), self.date),
            })
    }
}

/// Rows of one calendar year, sorted by date with at most one row per date.
#[derive(Debug, Clone, PartialEq)]
pub struct YearTable {
    pub year: i32,
    rows: Vec<DailyRateRow>,
}

impl YearTable {
    /// Reads the semicolon separated yearly archive. The bank appends legend
    /// rows (codes, names, units) after the data; any row whose date cell is
    /// not `YYYYMMDD` is skipped. Only ASCII columns are decoded, so the
    /// Windows-1252 currency names never need transcoding.
    pub fn parse(year: i32, bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.byte_headers()?.clone();
        let date_idx = headers
            .iter()
            .position(|h| h.trim_ascii() == DATE_COLUMN)
            .ok_or_else(|| RateError::Format("no \"data\" column in header".to_string()))?;
        let currency_idx: Vec<(Currency, usize)> = Currency::ALL
            .iter()
            .filter_map(|currency| {
                headers
                    .iter()
                    .position(|h| h.trim_ascii() == currency.column().as_bytes())
                    .map(|idx| (*currency, idx))
            })
            .collect();

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            let Some(date) = record.get(date_idx).and_then(parse_date) else {
                continue;
            };

            let mut rates = HashMap::new();
            for (currency, idx) in &currency_idx {
                let cell = record.get(*idx).unwrap_or_default().trim_ascii();
                if cell.is_empty() {
                    continue;
                }
                let text = String::from_utf8_lossy(cell);
                rates.insert(*currency, ExactRate::parse_comma_decimal(&text)?);
            }
            rows.push(DailyRateRow::new(date, rates));
        }

        Self::from_rows(year, rows)
    }

    pub fn from_rows(year: i32, mut rows: Vec<DailyRateRow>) -> Result<Self> {
        rows.sort_by_key(|row| row.date);
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(RateError::Format(format!(
                "date {} appears more than once",
                pair[0].date
            )));
        }

        Ok(Self { year, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.rows.binary_search_by_key(&date, |row| row.date).is_ok()
    }

    /// Rows dated within `start..=end`, oldest first.
    pub fn rows_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &DailyRateRow> {
        self.rows
            .iter()
            .filter(move |row| row.date >= start && row.date <= end)
    }
}

fn parse_date(cell: &[u8]) -> Option<NaiveDate> {
    let cell = cell.trim_ascii();
    if cell.len() != 8 || !cell.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let text = std::str::from_utf8(cell).ok()?;
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}
