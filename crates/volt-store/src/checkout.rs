//! Checkout: the transactional conversion of a cart into an order.

use std::sync::Arc;

use volt_commerce::checkout::{ContactInfo, Order, OrderLine, OrderStatus};
use volt_commerce::promo::{AppliedPromo, PromoRejection};
use volt_commerce::{CartId, CommerceError, Money, OrderId};

use crate::catalog::Catalog;
use crate::memory::MemoryStore;

/// Everything a checkout needs beyond the cart itself.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Contact and delivery details to snapshot onto the order.
    pub contact: ContactInfo,
    /// Flat delivery fee, supplied by the caller.
    pub delivery_cost: Money,
    /// Promo code to redeem, if the customer entered one.
    pub promo_code: Option<String>,
}

/// Converts carts into orders.
pub struct CheckoutService {
    store: Arc<MemoryStore>,
    catalog: Arc<dyn Catalog>,
}

impl CheckoutService {
    pub fn new(store: Arc<MemoryStore>, catalog: Arc<dyn Catalog>) -> Self {
        Self { store, catalog }
    }

    /// Check out a cart: snapshot prices, redeem the promo code, persist
    /// the order, clear the cart.
    ///
    /// The whole operation runs under one store write guard, and every
    /// fallible step precedes the first mutation: a rejection at any
    /// point (empty cart, stale product, bad promo code) leaves the
    /// cart, the promo counter and the order log exactly as they were.
    /// The promo validity re-check and the counter increment share that
    /// guard with the order write, so a near-exhausted code cannot be
    /// redeemed past its ceiling by concurrent checkouts.
    pub async fn checkout(
        &self,
        cart_id: &CartId,
        request: CheckoutRequest,
    ) -> Result<Order, CommerceError> {
        let mut state = self.store.write().await?;

        let (user_id, currency, cart_lines) = {
            let cart = state.cart(cart_id)?;
            if cart.is_empty() {
                return Err(CommerceError::EmptyCart);
            }
            (cart.owner.user_id().cloned(), cart.currency, cart.lines.clone())
        };

        // Freeze each line's current catalog price. A line added while the
        // product was purchasable may have gone stale since; that aborts
        // the checkout rather than selling something unavailable.
        let mut order_lines = Vec::with_capacity(cart_lines.len());
        let mut subtotal = Money::zero(currency);
        for line in &cart_lines {
            let product = self
                .catalog
                .product(&line.product_id)
                .await?
                .filter(|p| p.is_purchasable)
                .ok_or_else(|| {
                    CommerceError::ProductUnavailable(line.product_id.clone())
                })?;
            let line_total = product
                .unit_price
                .try_multiply(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            subtotal = subtotal.try_add(&line_total).ok_or_else(|| {
                CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: product.unit_price.currency.code().to_string(),
                }
            })?;
            order_lines.push(OrderLine {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                unit_price: product.unit_price,
            });
        }

        // Re-validate the promo code under the same guard that will
        // increment its counter. A rejected code aborts the checkout
        // rather than being silently dropped.
        let applied = match &request.promo_code {
            Some(code) => {
                let Some(promo) = state.promos.get(code) else {
                    tracing::warn!(code, "checkout rejected: promo code not found");
                    return Err(CommerceError::InvalidPromoCode(
                        PromoRejection::NotFound,
                    ));
                };
                if !promo.is_valid() {
                    tracing::warn!(code, "checkout rejected: promo code expired or exhausted");
                    return Err(CommerceError::InvalidPromoCode(
                        PromoRejection::ExpiredOrExhausted,
                    ));
                }
                Some(AppliedPromo {
                    code: promo.code.clone(),
                    discount: promo.discount_for(subtotal),
                })
            }
            None => None,
        };

        if request.delivery_cost.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: request.delivery_cost.currency.code().to_string(),
            });
        }
        let discount = applied
            .as_ref()
            .map(|a| a.discount)
            .unwrap_or_else(|| Money::zero(currency));
        let total = subtotal
            .try_subtract(&discount)
            .and_then(|m| m.try_add(&request.delivery_cost))
            .ok_or(CommerceError::Overflow)?
            .clamp_non_negative();

        let now = current_timestamp();
        let order = Order {
            id: OrderId::generate(),
            order_number: Order::generate_order_number(),
            user_id,
            status: OrderStatus::New,
            contact: request.contact,
            lines: order_lines,
            subtotal,
            discount,
            delivery_cost: request.delivery_cost,
            total,
            promo_code: applied.as_ref().map(|a| a.code.clone()),
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        };

        // Commit. Nothing below can fail, so the mutations are
        // all-or-nothing with the validations above.
        if let Some(applied) = &applied {
            if let Some(promo) = state.promos.get_mut(&applied.code) {
                promo.record_use();
            }
        }
        state.orders.insert(order.id.clone(), order.clone());
        state.cart_mut(cart_id)?.clear();

        tracing::info!(
            order = %order.order_number,
            cart = %cart_id,
            total = %order.total,
            promo = order.promo_code.as_deref().unwrap_or("-"),
            "checkout committed"
        );
        Ok(order)
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
