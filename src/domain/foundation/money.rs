//! Money value object.
//!
//! Monetary amounts are stored as i64 minor units (cents) with an explicit
//! currency code. Floats never touch money.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// ISO-4217 currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Returns the lowercase currency code (e.g. "usd").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Gbp => "gbp",
        }
    }

    /// Parses a currency code, case-insensitively.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        match code.to_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            "eur" => Ok(Currency::Eur),
            "gbp" => Ok(Currency::Gbp),
            other => Err(ValidationError::invalid_format(
                "currency",
                format!("unsupported currency code '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount in minor units of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the smallest currency unit (cents for usd).
    pub cents: i64,
    pub currency: Currency,
}

impl Money {
    /// Creates a money value from minor units.
    pub fn from_cents(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    /// Creates a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::from_cents(0, currency)
    }

    /// Returns true for strictly positive amounts.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Multiplies the amount by an integer quantity.
    pub fn times(&self, quantity: u32) -> Self {
        Self::from_cents(self.cents * i64::from(quantity), self.currency)
    }

    /// Adds another amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the currencies differ.
    pub fn checked_add(&self, other: Money) -> Result<Self, ValidationError> {
        if self.currency != other.currency {
            return Err(ValidationError::invalid_format(
                "currency",
                format!("cannot add {} to {}", other.currency, self.currency),
            ));
        }
        Ok(Self::from_cents(self.cents + other.cents, self.currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02} {}",
            self.cents / 100,
            (self.cents % 100).abs(),
            self.currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cents_preserves_amount() {
        let price = Money::from_cents(999, Currency::Usd);
        assert_eq!(price.cents, 999);
        assert_eq!(price.currency, Currency::Usd);
    }

    #[test]
    fn is_positive_rejects_zero_and_negative() {
        assert!(Money::from_cents(1, Currency::Usd).is_positive());
        assert!(!Money::from_cents(0, Currency::Usd).is_positive());
        assert!(!Money::from_cents(-5, Currency::Usd).is_positive());
    }

    #[test]
    fn times_multiplies_by_quantity() {
        let price = Money::from_cents(250, Currency::Usd);
        assert_eq!(price.times(4).cents, 1000);
    }

    #[test]
    fn checked_add_sums_same_currency() {
        let a = Money::from_cents(100, Currency::Usd);
        let b = Money::from_cents(250, Currency::Usd);
        assert_eq!(a.checked_add(b).unwrap().cents, 350);
    }

    #[test]
    fn checked_add_rejects_currency_mismatch() {
        let a = Money::from_cents(100, Currency::Usd);
        let b = Money::from_cents(100, Currency::Eur);
        assert!(a.checked_add(b).is_err());
    }

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!(Currency::parse("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::parse("eur").unwrap(), Currency::Eur);
        assert!(Currency::parse("doubloons").is_err());
    }

    #[test]
    fn display_formats_cents_as_decimal() {
        let price = Money::from_cents(999, Currency::Usd);
        assert_eq!(format!("{}", price), "9.99 usd");
    }

    #[test]
    fn serializes_currency_lowercase() {
        let price = Money::from_cents(500, Currency::Usd);
        let json = serde_json::to_string(&price).unwrap();
        assert!(json.contains("\"usd\""));
    }
}
