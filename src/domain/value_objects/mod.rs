//! Value objects for storefront display logic

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Monetary amounts are shown with two fractional digits (minor units for
/// USD-like currencies), rounded half-up.
pub const DISPLAY_SCALE: u32 = 2;

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self { amount, currency: currency.to_string() }
    }
    pub fn usd(amount: Decimal) -> Self { Self::new(amount, "USD") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }

    /// Boundary constructor for raw backend numbers. Non-finite or
    /// unrepresentable values become zero so a bad payload never reaches
    /// the rendered page as anything but a formatted zero.
    pub fn from_f64_or_zero(value: f64, currency: &str) -> Self {
        let amount = if value.is_finite() {
            Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };
        Self::new(amount, currency)
    }

    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }

    pub fn multiply(&self, qty: u32) -> Money {
        Money::new(self.amount * Decimal::from(qty), &self.currency)
    }

    /// Rounded to display precision, half-up.
    pub fn rounded(&self) -> Money {
        Money::new(round_display(self.amount), &self.currency)
    }

    fn symbol(&self) -> Option<&'static str> {
        match self.currency.as_str() {
            "USD" => Some("$"),
            "EUR" => Some("\u{20ac}"),
            "GBP" => Some("\u{a3}"),
            "NGN" => Some("\u{20a6}"),
            _ => None,
        }
    }
}

impl Default for Money {
    fn default() -> Self { Self::zero("USD") }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = round_display(self.amount);
        let text = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        match self.symbol() {
            Some(sym) => write!(f, "{}{}{}.{}", sign, sym, group_thousands(int_part), frac_part),
            None => write!(f, "{}{} {}.{}", sign, self.currency, group_thousands(int_part), frac_part),
        }
    }
}

/// Round to display precision with round-half-up semantics.
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Error)]
pub enum MoneyError {
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },
}

/// Quantity value object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Self { Self(value) }

    /// Clamp a requested quantity to `[1, stock_available]`. Quantity
    /// controls never go below one; removal is an explicit action. A zero
    /// stock figure still clamps to one (the control is disabled for
    /// out-of-stock items upstream, so only the lower bound matters here).
    pub fn clamped(requested: u32, stock_available: u32) -> Self {
        Self(requested.clamp(1, stock_available.max(1)))
    }

    pub fn value(&self) -> u32 { self.0 }
    pub fn add(&self, other: u32) -> Self { Self(self.0.saturating_add(other)) }
    pub fn subtract(&self, other: u32) -> Option<Self> {
        if other > self.0 { None } else { Some(Self(self.0 - other)) }
    }
    pub fn is_zero(&self) -> bool { self.0 == 0 }
}

impl Default for Quantity {
    fn default() -> Self { Self(0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_add() {
        let a = Money::usd(Decimal::new(100, 0));
        let b = Money::usd(Decimal::new(50, 0));
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(150, 0));
    }

    #[test]
    fn test_money_add_currency_mismatch() {
        let a = Money::usd(Decimal::ONE);
        let b = Money::new(Decimal::ONE, "EUR");
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn test_display_groups_thousands() {
        let m = Money::usd(Decimal::new(123450, 2));
        assert_eq!(m.to_string(), "$1,234.50");
    }

    #[test]
    fn test_display_rounds_half_up() {
        let m = Money::usd(Decimal::new(2005, 3)); // 2.005
        assert_eq!(m.to_string(), "$2.01");
    }

    #[test]
    fn test_display_unknown_currency_uses_code() {
        let m = Money::new(Decimal::new(999, 2), "CAD");
        assert_eq!(m.to_string(), "CAD 9.99");
    }

    #[test]
    fn test_from_f64_invalid_becomes_zero() {
        assert_eq!(Money::from_f64_or_zero(f64::NAN, "USD").to_string(), "$0.00");
        assert_eq!(Money::from_f64_or_zero(f64::INFINITY, "USD").to_string(), "$0.00");
        assert_eq!(Money::from_f64_or_zero(19.99, "USD").to_string(), "$19.99");
    }

    #[test]
    fn test_quantity_clamped() {
        assert_eq!(Quantity::clamped(0, 10).value(), 1);
        assert_eq!(Quantity::clamped(5, 10).value(), 5);
        assert_eq!(Quantity::clamped(25, 10).value(), 10);
        assert_eq!(Quantity::clamped(3, 0).value(), 1);
    }
}
