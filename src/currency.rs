use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::RateError;

/// Foreign currencies quoted against PLN that the salary report supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Eur, Currency::Usd];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    /// Header of the yearly table column holding the PLN value of one unit.
    pub fn column(self) -> &'static str {
        match self {
            Currency::Eur => "1EUR",
            Currency::Usd => "1USD",
        }
    }
}

impl FromStr for Currency {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            _ => Err(RateError::UnknownCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_codes_case_insensitively() {
        assert_eq!("EUR".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
    }

    #[test]
    fn rejects_other_codes() {
        let err = "GBP".parse::<Currency>().unwrap_err();
        assert!(matches!(err, RateError::UnknownCurrency(ref code) if code == "GBP"));
    }

    #[test]
    fn maps_to_unit_columns() {
        assert_eq!(Currency::Eur.column(), "1EUR");
        assert_eq!(Currency::Usd.column(), "1USD");
    }
}
