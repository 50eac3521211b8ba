use anyhow::Result;
use chrono::Local;
use clap::Parser;
use log::debug;
use nbp_salary::{
    Config, Currency, CurrencyReport, Divisor, ExactRate, FileTableStore, NbpSource,
    OutputFormat, RateFetcher, convert, render,
};

/// Converts a monthly PLN salary to EUR or USD at the six-month average NBP rate.
#[derive(Debug, Parser)]
#[command(name = "nbp-salary", version, long_about = None)]
struct Cli {
    /// Currency to track, EUR or USD
    #[arg(short, long, default_value = "EUR")]
    currency: String,

    /// Monthly salary in PLN to convert (full amounts only)
    #[arg(short, long)]
    salary: Option<u64>,

    /// Convert at this rate instead of the six-month average
    #[arg(short, long, conflicts_with = "all")]
    rate: Option<String>,

    /// Report every supported currency
    #[arg(short, long)]
    all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Report)]
    format: OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    debug!("{cli:?}");

    let currencies = if cli.all {
        Currency::ALL.to_vec()
    } else {
        vec![cli.currency.parse::<Currency>()?]
    };
    let override_rate = cli.rate.as_deref().map(ExactRate::parse_user).transpose()?;

    let config = Config::from_env()?;
    let salary = cli.salary.unwrap_or(config.default_salary);
    let today = Local::now().date_naive();

    let store = FileTableStore::new(&config.cache_dir);
    let source = NbpSource::new(&config.url_template)?;
    let mut fetcher = RateFetcher::new(store, source, today)?;
    fetcher.refresh().await?;

    let mut reports = Vec::with_capacity(currencies.len());
    for currency in currencies {
        let report = match override_rate {
            Some(rate) => {
                let last = fetcher.latest_rate(currency).await?;
                CurrencyReport::from_override(
                    currency,
                    convert(salary, Divisor::Override(rate), last)?,
                )
            }
            None => {
                let result = fetcher.get_result(currency).await?;
                let conversion = convert(salary, Divisor::Average(result.average()), result.last())?;
                CurrencyReport::from_aggregate(result, conversion)
            }
        };
        reports.push(report);
    }

    println!("{}", render(cli.format, &reports)?);

    Ok(())
}
