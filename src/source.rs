use std::{future::Future, time::Duration};

use log::info;
use reqwest::Client;

use crate::error::{RateError, Result};

pub const YEAR_PLACEHOLDER: &str = "{YEAR}";

/// Remote origin of the yearly archive tables.
pub trait RateTableSource {
    /// Returns the raw bytes of the full table published for `year`.
    fn fetch_year(&self, year: i32) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Downloads the yearly table A archive from the National Bank of Poland.
#[derive(Debug, Clone)]
pub struct NbpSource {
    client: Client,
    url_template: String,
}

impl NbpSource {
    pub fn new(url_template: impl Into<String>) -> Result<Self> {
        let url_template = url_template.into();
        if !url_template.contains(YEAR_PLACEHOLDER) {
            return Err(RateError::Config(format!(
                "URL template {url_template:?} lacks {YEAR_PLACEHOLDER}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RateError::Config(format!("Can't build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url_template,
        })
    }

    pub fn url(&self, year: i32) -> String {
        self.url_template
            .replace(YEAR_PLACEHOLDER, &year.to_string())
    }
}

impl RateTableSource for NbpSource {
    async fn fetch_year(&self, year: i32) -> Result<Vec<u8>> {
        let url = self.url(year);
        info!("Fetching table for {year} from {url}");

        let fetch_err = |reason: String| RateError::Fetch { year, reason };
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(fetch_err(format!("Can't download the file: {}", resp.status())));
        }

        let bytes = resp.bytes().await.map_err(|e| fetch_err(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_year_in_template() {
        let source =
            NbpSource::new("https://www.nbp.pl/kursy/Archiwum/archiwum_tab_a_{YEAR}.csv").unwrap();

        assert_eq!(
            source.url(2024),
            "https://www.nbp.pl/kursy/Archiwum/archiwum_tab_a_2024.csv"
        );
    }

    #[test]
    fn template_without_placeholder_is_a_config_error() {
        assert!(matches!(
            NbpSource::new("https://example.com/table.csv"),
            Err(RateError::Config(_))
        ));
    }
}
