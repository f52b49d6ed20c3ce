//! Money type for representing monetary values.
//!
//! Uses integer minor-unit representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
///
/// Catalog prices are quoted in whole rubles, so `Rub` carries no minor
/// unit here. Orders never mix currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    Rub,
    Usd,
    Eur,
}

impl Currency {
    /// Get the currency code (e.g., "RUB").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Rub => "\u{20bd}",
            Currency::Usd => "$",
            Currency::Eur => "\u{20ac}",
        }
    }

    /// Number of decimal places shown for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::Rub => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "RUB" => Some(Currency::Rub),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency. All arithmetic
/// is checked: combining different currencies or overflowing i64 yields
/// `None` rather than a wrong amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if currencies differ or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let sum = self.amount_minor.checked_add(other.amount_minor)?;
        Some(Money::new(sum, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let diff = self.amount_minor.checked_sub(other.amount_minor)?;
        Some(Money::new(diff, self.currency))
    }

    /// Try to multiply by a scalar.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let product = self.amount_minor.checked_mul(factor)?;
        Some(Money::new(product, self.currency))
    }

    /// Calculate a whole-number percentage of this amount, rounding down.
    pub fn percentage(&self, percent: u32) -> Money {
        let amount = self.amount_minor * i64::from(percent) / 100;
        Money::new(amount, self.currency)
    }

    /// Clamp negative amounts to zero.
    pub fn clamp_non_negative(&self) -> Money {
        Money::new(self.amount_minor.max(0), self.currency)
    }

    /// Sum an iterator of Money values, failing on mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Format as a display string (e.g., "₽39990" or "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format the amount without symbol.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        if places == 0 {
            return format!("{}", self.amount_minor);
        }
        let divisor = 10_i64.pow(places);
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        let units = abs / divisor as u64;
        let frac = abs % divisor as u64;
        format!("{sign}{units}.{frac:0width$}", width = places as usize)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_minor_units() {
        let m = Money::new(39990, Currency::Rub);
        assert_eq!(m.amount_minor, 39990);
        assert_eq!(m.currency, Currency::Rub);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(39990, Currency::Rub);
        assert_eq!(m.display(), "\u{20bd}39990");

        let m = Money::new(4999, Currency::Usd);
        assert_eq!(m.display(), "$49.99");

        let m = Money::new(-105, Currency::Usd);
        assert_eq!(m.display_amount(), "-1.05");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::Rub);
        let b = Money::new(500, Currency::Rub);
        assert_eq!(a.try_add(&b).unwrap().amount_minor, 1500);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let rub = Money::new(1000, Currency::Rub);
        let usd = Money::new(1000, Currency::Usd);
        assert!(rub.try_add(&usd).is_none());
        assert!(rub.try_subtract(&usd).is_none());
    }

    #[test]
    fn test_money_multiply_overflow() {
        let m = Money::new(i64::MAX / 2, Currency::Rub);
        assert!(m.try_multiply(3).is_none());
    }

    #[test]
    fn test_percentage_rounds_down() {
        let m = Money::new(79980, Currency::Rub);
        assert_eq!(m.percentage(10).amount_minor, 7998);

        // 999 * 15% = 149.85, floor to 149
        let m = Money::new(999, Currency::Rub);
        assert_eq!(m.percentage(15).amount_minor, 149);
    }

    #[test]
    fn test_try_sum() {
        let values = [
            Money::new(100, Currency::Rub),
            Money::new(250, Currency::Rub),
        ];
        let sum = Money::try_sum(values.iter(), Currency::Rub).unwrap();
        assert_eq!(sum.amount_minor, 350);

        let mixed = [
            Money::new(100, Currency::Rub),
            Money::new(250, Currency::Usd),
        ];
        assert!(Money::try_sum(mixed.iter(), Currency::Rub).is_none());
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(
            Money::new(-20, Currency::Rub).clamp_non_negative().amount_minor,
            0
        );
        assert_eq!(
            Money::new(20, Currency::Rub).clamp_non_negative().amount_minor,
            20
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("RUB"), Some(Currency::Rub));
        assert_eq!(Currency::from_code("usd"), Some(Currency::Usd));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
