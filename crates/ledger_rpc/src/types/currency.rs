//! ISO 4217 currency codes.
//!
//! # Examples
//!
//! ```
//! use ledger_rpc::types::Currency;
//!
//! let usd: Currency = "usd".parse().unwrap();
//! assert_eq!(usd, Currency::USD);
//! assert_eq!(usd.decimal_places(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currencies a demo node can issue, with their minor-unit precision.
///
/// Deserialises from its code in any case, so config files may write `usd`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Currency {
    /// United States Dollar (2 decimal places)
    USD,
    /// Euro (2 decimal places)
    EUR,
    /// British Pound Sterling (2 decimal places)
    GBP,
    /// Japanese Yen (no minor units)
    JPY,
    /// Swiss Franc (2 decimal places)
    CHF,
}

/// Returned when parsing a code that is not one of [`Currency`]'s variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

impl Currency {
    /// ISO 4217 three-letter code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
        }
    }

    /// Number of minor-unit digits.
    pub const fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    /// Parses a code case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = UnknownCurrency;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_str_case_insensitive() {
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!("Eur".parse::<Currency>().unwrap(), Currency::EUR);
        assert_eq!("jpy".parse::<Currency>().unwrap(), Currency::JPY);
    }

    #[test]
    fn test_currency_from_str_unknown() {
        match "XYZ".parse::<Currency>() {
            Err(UnknownCurrency(code)) => assert_eq!(code, "XYZ"),
            other => panic!("Expected UnknownCurrency, got {:?}", other),
        }
    }

    #[test]
    fn test_currency_decimal_places() {
        assert_eq!(Currency::USD.decimal_places(), 2);
        assert_eq!(Currency::JPY.decimal_places(), 0);
    }

    #[test]
    fn test_currency_serialises_as_code() {
        assert_eq!(serde_json::to_string(&Currency::GBP).unwrap(), "\"GBP\"");
    }

    #[test]
    fn test_currency_deserialises_any_case() {
        let chf: Currency = serde_json::from_str("\"chf\"").unwrap();
        assert_eq!(chf, Currency::CHF);
        let usd: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(usd, Currency::USD);
    }

    #[test]
    fn test_currency_deserialise_rejects_unknown_code() {
        let err = serde_json::from_str::<Currency>("\"XAU\"").unwrap_err();
        assert!(err.to_string().contains("Unknown currency: XAU"), "got: {}", err);
    }
}
