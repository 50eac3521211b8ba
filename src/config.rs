use std::{env, path::PathBuf};

use crate::error::{RateError, Result};

pub const DEFAULT_URL_TEMPLATE: &str =
    "https://www.nbp.pl/kursy/Archiwum/archiwum_tab_a_{YEAR}.csv";
pub const DEFAULT_CACHE_DIR: &str = "tables";
pub const DEFAULT_SALARY: u64 = 15000;

pub const URL_TEMPLATE_VAR: &str = "NBP_URL_TEMPLATE";
pub const CACHE_DIR_VAR: &str = "NBP_CACHE_DIR";
pub const SALARY_VAR: &str = "NBP_DEFAULT_SALARY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url_template: String,
    pub cache_dir: PathBuf,
    pub default_salary: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            default_salary: DEFAULT_SALARY,
        }
    }
}

impl Config {
    /// Reads settings from the process environment, after loading a `.env`
    /// file when one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let url_template = lookup(URL_TEMPLATE_VAR).unwrap_or(defaults.url_template);
        let cache_dir = lookup(CACHE_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_dir);
        let default_salary = match lookup(SALARY_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|salary| *salary > 0)
                .ok_or_else(|| {
                    RateError::Config(format!("{SALARY_VAR} must be a positive integer, got {raw:?}"))
                })?,
            None => defaults.default_salary,
        };

        Ok(Self {
            url_template,
            cache_dir,
            default_salary,
        })
    }
}
