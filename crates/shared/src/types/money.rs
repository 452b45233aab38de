//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major currency units (e.g., dollars).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "CAD").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Canadian Dollar
    Cad,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Australian Dollar
    Aud,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative()
    }

    /// Formats the amount for display with symbol and thousands
    /// grouping, e.g. `$1,234.56` or `-€300.00`.
    #[must_use]
    pub fn format(&self) -> String {
        let rounded = self.amount.round_dp(2);
        let negative = rounded.is_sign_negative();
        let abs = rounded.abs();
        let text = format!("{abs:.2}");

        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let grouped = group_thousands(int_part);

        let sign = if negative { "-" } else { "" };
        format!("{sign}{}{grouped}.{frac_part}", self.currency.symbol())
    }
}

/// Inserts a comma every three digits, right to left.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}

impl Currency {
    /// Returns the display symbol for this currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd | Self::Cad | Self::Aud => "$",
            Self::Eur => "\u{20ac}",
            Self::Gbp => "\u{a3}",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Cad => write!(f, "CAD"),
            Self::Eur => write!(f, "EUR"),
            Self::Gbp => write!(f, "GBP"),
            Self::Aud => write!(f, "AUD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "CAD" => Ok(Self::Cad),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "AUD" => Ok(Self::Aud),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_money_new() {
        let amount = dec!(100.00);
        let money = Money::new(amount, Currency::Usd);
        assert_eq!(money.amount, amount);
        assert_eq!(money.currency, Currency::Usd);
    }

    #[test]
    fn test_money_zero() {
        let money = Money::zero(Currency::Cad);
        assert!(money.is_zero());
        assert_eq!(money.amount, Decimal::ZERO);
        assert_eq!(money.currency, Currency::Cad);
    }

    #[test]
    fn test_money_is_negative() {
        let positive = Money::new(dec!(10), Currency::Usd);
        assert!(!positive.is_negative());

        let negative = Money::new(dec!(-10), Currency::Usd);
        assert!(negative.is_negative());

        let zero = Money::new(dec!(0), Currency::Usd);
        assert!(!zero.is_negative());
    }

    #[test]
    fn test_money_format_grouping() {
        assert_eq!(Money::new(dec!(1234.5), Currency::Usd).format(), "$1,234.50");
        assert_eq!(
            Money::new(dec!(1234567.891), Currency::Usd).format(),
            "$1,234,567.89"
        );
        assert_eq!(Money::new(dec!(0), Currency::Usd).format(), "$0.00");
        assert_eq!(Money::new(dec!(999), Currency::Usd).format(), "$999.00");
    }

    #[test]
    fn test_money_format_negative_and_symbols() {
        assert_eq!(Money::new(dec!(-300), Currency::Eur).format(), "-\u{20ac}300.00");
        assert_eq!(Money::new(dec!(42.1), Currency::Gbp).format(), "\u{a3}42.10");
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Cad.to_string(), "CAD");
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(Currency::Gbp.to_string(), "GBP");
        assert_eq!(Currency::Aud.to_string(), "AUD");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("CAD").unwrap(), Currency::Cad);
        assert_eq!(Currency::from_str("EUR").unwrap(), Currency::Eur);

        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }
}
