//! Monetary amounts held in integer minor units.

use super::currency::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable quantity of a currency, in minor units (cents for USD).
///
/// The orchestration layer never performs arithmetic on amounts; they are
/// built once from configuration and passed to flows unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Quantity in minor units
    pub quantity: u64,
    /// Currency of the quantity
    pub currency: Currency,
}

impl Amount {
    /// Create an amount from minor units.
    pub const fn from_minor(quantity: u64, currency: Currency) -> Self {
        Self { quantity, currency }
    }

    /// Create an amount from whole units, or `None` on overflow.
    ///
    /// ```
    /// use ledger_rpc::types::{Amount, Currency};
    ///
    /// let one_dollar = Amount::from_major(1, Currency::USD).unwrap();
    /// assert_eq!(one_dollar.quantity, 100);
    /// assert_eq!(one_dollar.to_string(), "1.00 USD");
    /// ```
    pub fn from_major(units: u64, currency: Currency) -> Option<Self> {
        10u64
            .checked_pow(currency.decimal_places())
            .and_then(|scale| units.checked_mul(scale))
            .map(|quantity| Self { quantity, currency })
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.quantity == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.currency.decimal_places();
        if places == 0 {
            return write!(f, "{} {}", self.quantity, self.currency);
        }
        let scale = 10u64.pow(places);
        write!(
            f,
            "{}.{:0width$} {}",
            self.quantity / scale,
            self.quantity % scale,
            self.currency,
            width = places as usize
        )
    }
}
