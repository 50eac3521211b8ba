//! Converts a PLN salary into EUR or USD using the trailing six-month average
//! of the National Bank of Poland's table A rates, cached per year on disk.

pub mod aggregate;
pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod exact_rate;
pub mod fetcher;
pub mod report;
pub mod source;
pub mod store;
pub mod window;
pub mod year_table;

pub use aggregate::{AggregateResult, aggregate};
pub use config::Config;
pub use convert::{ConversionResult, Divisor, convert};
pub use currency::Currency;
pub use error::{RateError, Result};
pub use exact_rate::ExactRate;
pub use fetcher::RateFetcher;
pub use report::{CurrencyReport, OutputFormat, render};
pub use source::{NbpSource, RateTableSource};
pub use store::FileTableStore;
pub use window::{DateWindow, RateWindowExtractor};
pub use year_table::{DailyRateRow, YearTable};
