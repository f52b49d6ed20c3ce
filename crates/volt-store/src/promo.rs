//! Promo-code validation.

use std::sync::Arc;

use volt_commerce::promo::{AppliedPromo, PromoRejection};
use volt_commerce::{CommerceError, Money};

use crate::memory::MemoryStore;

/// Validates promo codes against a cart total.
///
/// Validation is strictly read-only: the usage counter moves only when a
/// checkout actually commits, so a validated-but-abandoned checkout never
/// consumes a use of a limited code.
pub struct PromoValidator {
    store: Arc<MemoryStore>,
}

impl PromoValidator {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Validate a code and compute the discount it grants.
    ///
    /// Lookup is a case-sensitive exact match. The returned discount is
    /// capped at `cart_total`, so an order total can never go negative.
    pub async fn validate(
        &self,
        code: &str,
        cart_total: Money,
    ) -> Result<AppliedPromo, CommerceError> {
        let state = self.store.read().await?;

        let Some(promo) = state.promos.get(code) else {
            tracing::warn!(code, "promo code not found");
            return Err(CommerceError::InvalidPromoCode(PromoRejection::NotFound));
        };
        if !promo.is_valid() {
            tracing::warn!(code, "promo code expired or exhausted");
            return Err(CommerceError::InvalidPromoCode(
                PromoRejection::ExpiredOrExhausted,
            ));
        }

        Ok(AppliedPromo {
            code: promo.code.clone(),
            discount: promo.discount_for(cart_total),
        })
    }
}
