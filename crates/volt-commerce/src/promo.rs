//! Promo codes and discount computation.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a promo code was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromoRejection {
    /// No code with that exact spelling exists.
    NotFound,
    /// The code exists but is inactive, outside its validity window, or
    /// has hit its usage ceiling.
    ExpiredOrExhausted,
}

impl PromoRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromoRejection::NotFound => "not_found",
            PromoRejection::ExpiredOrExhausted => "expired_or_exhausted",
        }
    }
}

impl fmt::Display for PromoRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A redeemable discount token.
///
/// The discount is either a percentage of the cart total or a flat amount;
/// a non-zero percentage takes precedence. Codes are matched
/// case-sensitively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoCode {
    /// The code customers type in (unique).
    pub code: String,
    /// Percentage off, 0-100. Wins over the flat amount when non-zero.
    pub discount_percent: u32,
    /// Flat amount off, used when `discount_percent` is zero.
    pub discount_amount: Money,
    /// Unix timestamp the code becomes valid.
    pub valid_from: i64,
    /// Unix timestamp the code stops being valid.
    pub valid_to: i64,
    /// Whether the code is switched on at all.
    pub is_active: bool,
    /// Maximum number of redemptions (None = unlimited).
    pub max_uses: Option<u32>,
    /// Redemptions so far. Incremented exactly once per committed checkout.
    pub used_count: u32,
}

/// Default validity window for newly created codes: 30 days.
const DEFAULT_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

impl PromoCode {
    /// Create a percentage-off code valid from now for 30 days.
    pub fn percentage(code: impl Into<String>, percent: u32) -> Self {
        let now = current_timestamp();
        Self {
            code: code.into(),
            discount_percent: percent.min(100),
            discount_amount: Money::default(),
            valid_from: now,
            valid_to: now + DEFAULT_WINDOW_SECS,
            is_active: true,
            max_uses: None,
            used_count: 0,
        }
    }

    /// Create a flat-amount code valid from now for 30 days.
    pub fn flat(code: impl Into<String>, amount: Money) -> Self {
        let now = current_timestamp();
        Self {
            code: code.into(),
            discount_percent: 0,
            discount_amount: amount,
            valid_from: now,
            valid_to: now + DEFAULT_WINDOW_SECS,
            is_active: true,
            max_uses: None,
            used_count: 0,
        }
    }

    /// Override the validity window.
    pub fn valid_between(mut self, from: i64, to: i64) -> Self {
        self.valid_from = from;
        self.valid_to = to;
        self
    }

    /// Cap the number of redemptions.
    pub fn with_max_uses(mut self, limit: u32) -> Self {
        self.max_uses = Some(limit);
        self
    }

    /// Check if the code can currently be redeemed.
    pub fn is_valid(&self) -> bool {
        if !self.is_active {
            return false;
        }
        let now = current_timestamp();
        if now < self.valid_from || now > self.valid_to {
            return false;
        }
        if let Some(limit) = self.max_uses {
            if self.used_count >= limit {
                return false;
            }
        }
        true
    }

    /// Check if the usage ceiling has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.max_uses
            .map(|limit| self.used_count >= limit)
            .unwrap_or(false)
    }

    /// Compute the discount this code grants against a cart total.
    ///
    /// Percentage discounts round down. The result never exceeds the total,
    /// so applying a discount can never drive an order negative.
    pub fn discount_for(&self, total: Money) -> Money {
        let raw = if self.discount_percent > 0 {
            total.percentage(self.discount_percent)
        } else {
            self.discount_amount
        };
        Money::new(
            raw.amount_minor.clamp(0, total.amount_minor.max(0)),
            total.currency,
        )
    }

    /// Record one redemption. Only called inside a committed checkout.
    pub fn record_use(&mut self) {
        self.used_count += 1;
    }
}

/// The outcome of successfully validating a code against a cart total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedPromo {
    /// The code that was redeemed.
    pub code: String,
    /// Amount taken off the total.
    pub discount: Money,
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_percentage_discount_floors() {
        let promo = PromoCode::percentage("SALE10", 10);
        let total = Money::new(79980, Currency::Rub);
        assert_eq!(promo.discount_for(total).amount_minor, 7998);

        let total = Money::new(99, Currency::Rub);
        // 99 * 10% = 9.9, floor to 9
        assert_eq!(promo.discount_for(total).amount_minor, 9);
    }

    #[test]
    fn test_flat_discount_capped_at_total() {
        let promo = PromoCode::flat("MINUS100", Money::new(100, Currency::Rub));
        let total = Money::new(80, Currency::Rub);
        assert_eq!(promo.discount_for(total).amount_minor, 80);
    }

    #[test]
    fn test_percentage_wins_over_flat() {
        let mut promo = PromoCode::percentage("BOTH", 10);
        promo.discount_amount = Money::new(5000, Currency::Rub);
        let total = Money::new(1000, Currency::Rub);
        assert_eq!(promo.discount_for(total).amount_minor, 100);
    }

    #[test]
    fn test_percent_clamped_to_100() {
        let promo = PromoCode::percentage("WILD", 250);
        assert_eq!(promo.discount_percent, 100);
        let total = Money::new(500, Currency::Rub);
        assert_eq!(promo.discount_for(total).amount_minor, 500);
    }

    #[test]
    fn test_inactive_code_invalid() {
        let mut promo = PromoCode::percentage("OFF", 10);
        assert!(promo.is_valid());
        promo.is_active = false;
        assert!(!promo.is_valid());
    }

    #[test]
    fn test_window_expiry() {
        let promo = PromoCode::percentage("OLD", 10).valid_between(0, 1);
        assert!(!promo.is_valid());

        let future = current_timestamp() + 1000;
        let promo = PromoCode::percentage("SOON", 10)
            .valid_between(future, future + 1000);
        assert!(!promo.is_valid());
    }

    #[test]
    fn test_usage_ceiling() {
        let mut promo = PromoCode::percentage("ONCE", 10).with_max_uses(2);
        assert!(promo.is_valid());
        promo.record_use();
        assert!(promo.is_valid());
        promo.record_use();
        assert!(!promo.is_valid());
        assert!(promo.is_exhausted());
    }
}
