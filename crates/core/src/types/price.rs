//! Package prices using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A package price in a given ISO 4217 currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code, e.g. `BRL`.
    pub currency: String,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Amount with exactly two decimal places, as used in offers (`"1999.90"`).
    #[must_use]
    pub fn amount_string(&self) -> String {
        format!("{:.2}", self.amount.round_dp(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_string_pads_to_two_places() {
        let price = Price::new(Decimal::new(1999, 0), "BRL");
        assert_eq!(price.amount_string(), "1999.00");
    }

    #[test]
    fn amount_string_rounds_extra_places() {
        let price = Price::new(Decimal::new(123_456, 3), "USD");
        assert_eq!(price.amount_string(), "123.46");
    }
}
