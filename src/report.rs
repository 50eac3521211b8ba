use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    aggregate::AggregateResult,
    convert::ConversionResult,
    currency::Currency,
    error::{RateError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Multi-line markdown report
    #[default]
    Report,
    /// One compact line per currency
    Line,
    /// Aligned plain-text table
    Table,
    /// JSON object, or array with --all
    Json,
}

/// Everything printed for one currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyReport {
    pub currency: Currency,
    /// Absent when the salary was converted at an override rate.
    pub aggregate: Option<AggregateResult>,
    pub conversion: ConversionResult,
}

impl CurrencyReport {
    pub fn from_aggregate(aggregate: AggregateResult, conversion: ConversionResult) -> Self {
        Self {
            currency: aggregate.currency(),
            aggregate: Some(aggregate),
            conversion,
        }
    }

    pub fn from_override(currency: Currency, conversion: ConversionResult) -> Self {
        Self {
            currency,
            aggregate: None,
            conversion,
        }
    }

    fn favorable(&self) -> Option<bool> {
        self.aggregate.as_ref().map(AggregateResult::favorable)
    }
}

#[derive(Serialize)]
struct JsonEntry {
    currency: Currency,
    average: Option<Decimal>,
    last: Decimal,
    favorable: Option<bool>,
    salary: u64,
    rate_used: Decimal,
    rate_override: bool,
    exchanged: Decimal,
    round_trip: Decimal,
}

impl From<&CurrencyReport> for JsonEntry {
    fn from(report: &CurrencyReport) -> Self {
        let conversion = &report.conversion;
        Self {
            currency: report.currency,
            average: report.aggregate.as_ref().map(|a| a.average().as_decimal()),
            last: conversion.last_rate.as_decimal(),
            favorable: report.favorable(),
            salary: conversion.salary,
            rate_used: conversion.divisor.rate().as_decimal(),
            rate_override: conversion.divisor.is_override(),
            exchanged: conversion.exchanged,
            round_trip: conversion.round_trip,
        }
    }
}

pub fn render(format: OutputFormat, reports: &[CurrencyReport]) -> Result<String> {
    match format {
        OutputFormat::Report => Ok(render_report(reports)),
        OutputFormat::Line => Ok(reports.iter().map(render_line).collect::<Vec<_>>().join("\n")),
        OutputFormat::Table => Ok(render_table(reports)),
        OutputFormat::Json => render_json(reports),
    }
}

fn favorable_word(favorable: Option<bool>) -> &'static str {
    match favorable {
        Some(true) => "yes",
        Some(false) => "no",
        None => "n/a",
    }
}

fn render_report(reports: &[CurrencyReport]) -> String {
    let mut lines = Vec::new();
    if let Some(first) = reports.first() {
        lines.push(format!("Salary given: {} PLN", first.conversion.salary));
    }

    for report in reports {
        let conversion = &report.conversion;
        let currency = report.currency;
        lines.push(String::new());
        lines.push(match &report.aggregate {
            Some(aggregate) => format!(
                "Average rate of {currency} in last 6 months: {}",
                aggregate.average()
            ),
            None => format!(
                "Rate of {currency} given by you (override):  {}",
                conversion.divisor.rate()
            ),
        });
        lines.push(format!(
            "Exchange rate known as of today:      {}",
            conversion.last_rate
        ));
        if let Some(favorable) = report.favorable() {
            let verdict = if favorable { "is" } else { "is not" };
            lines.push(format!("Today's rate {verdict} favorable compared to the average"));
        }
        lines.push(String::new());
        lines.push("If you wanted to exchange your contract today:".to_string());
        lines.push(format!(
            "* You would be given {:.2} {currency} on the contract",
            conversion.exchanged
        ));
        lines.push(format!(
            "* And you would earn {:.2} PLN with today's exchange rate",
            conversion.round_trip
        ));
    }

    lines.join("\n")
}

fn render_line(report: &CurrencyReport) -> String {
    let conversion = &report.conversion;
    let rate = match &report.aggregate {
        Some(aggregate) => format!("avg={}", aggregate.average()),
        None => format!("override={}", conversion.divisor.rate()),
    };

    format!(
        "{} {rate} last={} favorable={} {} PLN -> {:.2} {} -> {:.2} PLN",
        report.currency,
        conversion.last_rate,
        favorable_word(report.favorable()),
        conversion.salary,
        conversion.exchanged,
        report.currency,
        conversion.round_trip,
    )
}

fn render_table(reports: &[CurrencyReport]) -> String {
    let mut lines = vec![format!(
        "{:<8} {:>10} {:>10} {:>9} {:>12} {:>12}",
        "CURRENCY", "RATE", "LAST", "FAVORABLE", "EXCHANGED", "PLN BACK"
    )];

    for report in reports {
        let conversion = &report.conversion;
        let rate = match &report.aggregate {
            Some(aggregate) => aggregate.average().to_string(),
            None => format!("{}*", conversion.divisor.rate()),
        };
        lines.push(format!(
            "{:<8} {:>10} {:>10} {:>9} {:>12} {:>12}",
            report.currency.code(),
            rate,
            conversion.last_rate.to_string(),
            favorable_word(report.favorable()),
            format!("{:.2}", conversion.exchanged),
            format!("{:.2}", conversion.round_trip),
        ));
    }
    if reports.iter().any(|r| r.conversion.divisor.is_override()) {
        lines.push("* override rate".to_string());
    }

    lines.join("\n")
}

fn render_json(reports: &[CurrencyReport]) -> Result<String> {
    let entries: Vec<JsonEntry> = reports.iter().map(JsonEntry::from).collect();
    let json = match entries.as_slice() {
        [single] => serde_json::to_string_pretty(single),
        _ => serde_json::to_string_pretty(&entries),
    };

    json.map_err(|e| RateError::Format(e.to_string()))
}
