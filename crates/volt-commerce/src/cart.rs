//! Cart and cart-line types.
//!
//! A cart is a mutable pre-order collection of product/quantity pairs tied
//! to one identity. Lines never store a price: totals are always derived
//! from the live catalog, so the cart tracks current prices right up to
//! checkout.

use crate::error::CommerceError;
use crate::ids::{CartId, LineId, ProductId};
use crate::identity::Identity;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// The identity this cart belongs to.
    pub owner: Identity,
    /// Lines, in insertion order. At most one line per product.
    pub lines: Vec<CartLine>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last mutation.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart for an identity.
    pub fn new(owner: Identity) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            owner,
            lines: Vec::new(),
            currency: Currency::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a product to the cart, consolidating into an existing line.
    ///
    /// If a line for `product_id` exists its quantity is incremented by
    /// `quantity`; otherwise a new line is appended. Returns the ID of the
    /// affected line.
    pub fn add_line(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<LineId, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| &l.product_id == product_id)
        {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_LINE {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_LINE,
                ));
            }
            existing.quantity = new_quantity;
            let id = existing.id.clone();
            self.touch();
            return Ok(id);
        }

        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }

        let line = CartLine::new(product_id.clone(), quantity);
        let id = line.id.clone();
        self.lines.push(line);
        self.touch();
        Ok(id)
    }

    /// Overwrite a line's quantity; a quantity of zero or less removes it.
    pub fn set_quantity(
        &mut self,
        line_id: &LineId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return self.remove_line(line_id);
        }
        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.id == line_id)
            .ok_or_else(|| CommerceError::LineNotFound(line_id.clone()))?;
        line.quantity = quantity;
        self.touch();
        Ok(())
    }

    /// Remove a line unconditionally.
    pub fn remove_line(&mut self, line_id: &LineId) -> Result<(), CommerceError> {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != line_id);
        if self.lines.len() == len_before {
            return Err(CommerceError::LineNotFound(line_id.clone()));
        }
        self.touch();
        Ok(())
    }

    /// Remove all lines. The cart itself survives checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.touch();
    }

    /// Get a line by ID.
    pub fn line(&self, line_id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == line_id)
    }

    /// Get the line holding a product, if any.
    pub fn line_for_product(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

/// One product/quantity entry in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Unique line identifier.
    pub id: LineId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, always >= 1.
    pub quantity: i64,
    /// Unix timestamp when the line was first added.
    pub added_at: i64,
}

impl CartLine {
    fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            id: LineId::generate(),
            product_id,
            quantity,
            added_at: current_timestamp(),
        }
    }
}

/// Derived cart totals, recomputed from live catalog prices on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub item_count: i64,
    /// Sum of quantity x current unit price over all lines.
    pub total_price: Money,
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
    use crate::ids::UserId;

    fn cart() -> Cart {
        Cart::new(Identity::User(UserId::new("u-1")))
    }

    #[test]
    fn test_cart_starts_empty() {
        let cart = cart();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_line() {
        let mut cart = cart();
        cart.add_line(&ProductId::new("p-1"), 2).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn test_add_same_product_consolidates() {
        let mut cart = cart();
        let product = ProductId::new("p-1");
        let first = cart.add_line(&product, 1).unwrap();
        let second = cart.add_line(&product, 2).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = cart();
        assert!(matches!(
            cart.add_line(&ProductId::new("p-1"), 0),
            Err(CommerceError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_quantity_ceiling() {
        let mut cart = cart();
        let product = ProductId::new("p-1");
        cart.add_line(&product, MAX_QUANTITY_PER_LINE).unwrap();
        assert!(matches!(
            cart.add_line(&product, 1),
            Err(CommerceError::QuantityExceedsLimit(..))
        ));
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = cart();
        let line = cart.add_line(&ProductId::new("p-1"), 1).unwrap();
        cart.set_quantity(&line, 5).unwrap();
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = cart();
        let line = cart.add_line(&ProductId::new("p-1"), 3).unwrap();
        cart.set_quantity(&line, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_line() {
        let mut cart = cart();
        let missing = LineId::new("nope");
        assert!(matches!(
            cart.remove_line(&missing),
            Err(CommerceError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_clear() {
        let mut cart = cart();
        cart.add_line(&ProductId::new("p-1"), 1).unwrap();
        cart.add_line(&ProductId::new("p-2"), 4).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = cart();
        cart.add_line(&ProductId::new("p-1"), 1).unwrap();
        cart.add_line(&ProductId::new("p-2"), 1).unwrap();
        cart.add_line(&ProductId::new("p-1"), 1).unwrap();

        let products: Vec<&str> =
            cart.lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(products, vec!["p-1", "p-2"]);
    }
}
