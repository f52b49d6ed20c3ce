//! Order types.
//!
//! An order is the immutable result of a checkout. Apart from its status,
//! nothing on it changes after creation; line items freeze the unit price
//! that was current at order time.

use crate::checkout::ContactInfo;
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    New,
    /// Order confirmed and being prepared.
    Processing,
    /// Order handed to the courier.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Check if the status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if an order in this status can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::Processing)
    }

    /// Check whether moving to `next` is a legal transition.
    ///
    /// The fulfilment path is strictly forward, one step at a time:
    /// new -> processing -> shipped -> delivered. Cancellation is allowed
    /// only before shipping.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::New, OrderStatus::Processing)
                | (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
                | (OrderStatus::New, OrderStatus::Cancelled)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A completed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer-facing order number.
    pub order_number: String,
    /// The user who placed the order (None for guest checkouts).
    pub user_id: Option<UserId>,
    /// Order status.
    pub status: OrderStatus,
    /// Contact and delivery details as entered at checkout.
    pub contact: ContactInfo,
    /// Line items, each a frozen price snapshot.
    pub lines: Vec<OrderLine>,
    /// Sum of line totals before discount and delivery.
    pub subtotal: Money,
    /// Discount granted by the redeemed promo code.
    pub discount: Money,
    /// Flat delivery fee.
    pub delivery_cost: Money,
    /// Amount charged: subtotal - discount + delivery, never negative.
    pub total: Money,
    /// The redeemed promo code, if any.
    pub promo_code: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last status change.
    pub updated_at: i64,
    /// Unix timestamp of cancellation, if cancelled.
    pub cancelled_at: Option<i64>,
}

impl Order {
    /// Generate a customer-facing order number.
    ///
    /// "ORD-" followed by 16 uppercase hex characters from a CSPRNG, so
    /// order numbers cannot be enumerated to probe other customers'
    /// orders.
    pub fn generate_order_number() -> String {
        use rand::Rng;

        let bytes: [u8; 8] = rand::thread_rng().gen();
        let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
        format!("ORD-{hex}")
    }

    /// Total item count across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Move the order to a new status, enforcing the state machine.
    pub fn transition(&mut self, next: OrderStatus) -> Result<(), CommerceError> {
        if !self.status.can_transition_to(next) {
            return Err(CommerceError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = current_timestamp();
        if next == OrderStatus::Cancelled {
            self.cancelled_at = Some(self.updated_at);
        }
        Ok(())
    }

    /// Cancel the order, if it has not shipped yet.
    pub fn cancel(&mut self) -> Result<(), CommerceError> {
        self.transition(OrderStatus::Cancelled)
    }
}

/// A line item in an order: a frozen snapshot of what was bought and at
/// what price. Later catalog price changes never alter it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Product that was purchased.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price at the moment the order was placed.
    pub unit_price: Money,
}

impl OrderLine {
    /// Total for this line (unit price x quantity).
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn order() -> Order {
        Order {
            id: OrderId::generate(),
            order_number: Order::generate_order_number(),
            user_id: Some(UserId::new("u-1")),
            status: OrderStatus::New,
            contact: ContactInfo::default(),
            lines: vec![OrderLine {
                product_id: ProductId::new("p-1"),
                quantity: 2,
                unit_price: Money::new(39990, Currency::Rub),
            }],
            subtotal: Money::new(79980, Currency::Rub),
            discount: Money::zero(Currency::Rub),
            delivery_cost: Money::new(500, Currency::Rub),
            total: Money::new(80480, Currency::Rub),
            promo_code: None,
            created_at: 0,
            updated_at: 0,
            cancelled_at: None,
        }
    }

    #[test]
    fn test_order_number_format() {
        let number = Order::generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), 20);
        assert!(number[4..]
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_order_numbers_unique() {
        let a = Order::generate_order_number();
        let b = Order::generate_order_number();
        assert_ne!(a, b);
    }

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            product_id: ProductId::new("p-1"),
            quantity: 3,
            unit_price: Money::new(1000, Currency::Rub),
        };
        assert_eq!(line.line_total().unwrap().amount_minor, 3000);
    }

    #[test]
    fn test_forward_transitions() {
        let mut order = order();
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        order.transition(OrderStatus::Delivered).unwrap();
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_no_skipping() {
        let mut order = order();
        assert!(matches!(
            order.transition(OrderStatus::Shipped),
            Err(CommerceError::InvalidTransition { .. })
        ));
        assert_eq!(order.status, OrderStatus::New);
    }

    #[test]
    fn test_cancel_before_shipping() {
        let mut order = order();
        order.transition(OrderStatus::Processing).unwrap();
        order.cancel().unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(order.cancelled_at.is_some());
    }

    #[test]
    fn test_no_cancel_after_shipping() {
        let mut order = order();
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        assert!(order.cancel().is_err());
    }

    #[test]
    fn test_terminal_states_frozen() {
        let mut order = order();
        order.cancel().unwrap();
        assert!(order.transition(OrderStatus::Processing).is_err());
    }

    #[test]
    fn test_item_count() {
        assert_eq!(order().item_count(), 2);
    }

    #[test]
    fn test_order_serializes_to_json() {
        let order = order();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["order_number"], order.order_number);
        assert_eq!(json["status"], "New");
        assert_eq!(json["total"]["amount_minor"], 80480);
    }
}
