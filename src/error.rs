use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Unsupported currency {0}, only EUR or USD are accepted")]
    UnknownCurrency(String),

    #[error("Can't download the table for {year}: {reason}")]
    Fetch { year: i32, reason: String },

    #[error("No cached table for {year}")]
    NotFound { year: i32 },

    #[error("Cached table {path} is unreadable: {reason}")]
    CorruptCache { path: PathBuf, reason: String },

    #[error("Unexpected table layout: {0}")]
    Format(String),

    #[error("Table for {year} has no rows after fetching it")]
    MissingData { year: i32 },

    #[error("No {currency} rates recorded in the requested window")]
    EmptyWindow { currency: String },

    #[error("Can't parse rate {value:?}: {reason}")]
    BadRate { value: String, reason: String },

    #[error("Window start {start} is after its end {end}")]
    InvalidWindow { start: String, end: String },

    #[error("Salary must be a positive amount of PLN")]
    InvalidSalary,

    #[error("Rate must be greater than zero, got {0}")]
    InvalidRate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, RateError>;
