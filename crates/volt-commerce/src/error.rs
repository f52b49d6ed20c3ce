//! Commerce error types.

use crate::checkout::OrderStatus;
use crate::ids::{CartId, LineId, OrderId, ProductId};
use crate::promo::PromoRejection;
use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product is missing from the catalog or flagged as not purchasable.
    #[error("product unavailable: {0}")]
    ProductUnavailable(ProductId),

    /// Cart not found.
    #[error("cart not found: {0}")]
    CartNotFound(CartId),

    /// Line does not exist in the addressed cart.
    #[error("cart line not found: {0}")]
    LineNotFound(LineId),

    /// Order not found.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// Checkout attempted against a cart with no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Quantity must be at least 1.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-line ceiling.
    #[error("quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Promo code was rejected.
    #[error("invalid promo code: {0}")]
    InvalidPromoCode(PromoRejection),

    /// Order status change not permitted by the state machine.
    #[error("invalid order status transition from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// A cart resolved for one identity is recorded as owned by another.
    #[error("identity conflict: cart {0} belongs to a different identity")]
    IdentityConflict(CartId),

    /// Monetary values in two different currencies were combined.
    #[error("currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow in a money calculation.
    #[error("arithmetic overflow in money calculation")]
    Overflow,

    /// Storage-layer fault. Safe to retry with the same inputs.
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl CommerceError {
    /// Whether the caller may transparently retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CommerceError::StorageFailure(_))
    }
}
