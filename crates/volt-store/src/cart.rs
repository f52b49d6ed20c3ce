//! Cart service: identity resolution and line mutations.

use std::sync::Arc;

use volt_commerce::cart::{Cart, CartTotals};
use volt_commerce::identity::Identity;
use volt_commerce::{CartId, CommerceError, LineId, Money, ProductId};

use crate::catalog::Catalog;
use crate::memory::MemoryStore;

/// Cart operations, each executed atomically against the shared store.
pub struct CartService {
    store: Arc<MemoryStore>,
    catalog: Arc<dyn Catalog>,
}

impl CartService {
    pub fn new(store: Arc<MemoryStore>, catalog: Arc<dyn Catalog>) -> Self {
        Self { store, catalog }
    }

    /// Resolve the single cart for an identity, creating an empty one on
    /// first use.
    ///
    /// Resolution is idempotent: the same identity always maps to the
    /// same cart, and two identities never share one. Lookup and creation
    /// happen under one write guard, so concurrent first requests from
    /// the same identity still end up with a single cart.
    pub async fn resolve(&self, identity: &Identity) -> Result<Cart, CommerceError> {
        let mut state = self.store.write().await?;

        if let Some(cart_id) = state.carts_by_owner.get(identity).cloned() {
            let cart = state.cart(&cart_id)?;
            if &cart.owner != identity {
                return Err(CommerceError::IdentityConflict(cart_id));
            }
            return Ok(cart.clone());
        }

        let cart = Cart::new(identity.clone());
        tracing::debug!(cart = %cart.id, owner = %identity, "created cart");
        state
            .carts_by_owner
            .insert(identity.clone(), cart.id.clone());
        state.carts.insert(cart.id.clone(), cart.clone());
        Ok(cart)
    }

    /// Fetch a cart by ID.
    pub async fn cart(&self, cart_id: &CartId) -> Result<Cart, CommerceError> {
        let state = self.store.read().await?;
        state.cart(cart_id).cloned()
    }

    /// Add a product to a cart, consolidating into an existing line.
    ///
    /// The upsert runs entirely under the store write guard, so two
    /// concurrent adds of the same product cannot lose an increment.
    pub async fn add_item(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<LineId, CommerceError> {
        let product = self.catalog.product(product_id).await?;
        if !product.map(|p| p.is_purchasable).unwrap_or(false) {
            return Err(CommerceError::ProductUnavailable(product_id.clone()));
        }

        let mut state = self.store.write().await?;
        let cart = state.cart_mut(cart_id)?;
        let line_id = cart.add_line(product_id, quantity)?;
        tracing::debug!(cart = %cart_id, product = %product_id, quantity, "line added");
        Ok(line_id)
    }

    /// Overwrite a line's quantity; zero or less removes the line.
    ///
    /// The line must belong to the addressed cart; a guessed line ID from
    /// another cart is `LineNotFound`, not a cross-cart mutation.
    pub async fn set_quantity(
        &self,
        cart_id: &CartId,
        line_id: &LineId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let mut state = self.store.write().await?;
        let cart = state.cart_mut(cart_id)?;
        cart.set_quantity(line_id, quantity)?;
        tracing::debug!(cart = %cart_id, line = %line_id, quantity, "quantity set");
        Ok(())
    }

    /// Remove a line unconditionally.
    pub async fn remove_item(
        &self,
        cart_id: &CartId,
        line_id: &LineId,
    ) -> Result<(), CommerceError> {
        let mut state = self.store.write().await?;
        let cart = state.cart_mut(cart_id)?;
        cart.remove_line(line_id)?;
        tracing::debug!(cart = %cart_id, line = %line_id, "line removed");
        Ok(())
    }

    /// Remove every line from a cart.
    pub async fn clear(&self, cart_id: &CartId) -> Result<(), CommerceError> {
        let mut state = self.store.write().await?;
        let cart = state.cart_mut(cart_id)?;
        cart.clear();
        Ok(())
    }

    /// Compute item count and total price from live catalog prices.
    ///
    /// Derived on every call, never cached: a catalog price change shows
    /// up in the next read. Checkout is the only place prices freeze.
    pub async fn totals(&self, cart_id: &CartId) -> Result<CartTotals, CommerceError> {
        let (lines, currency) = {
            let state = self.store.read().await?;
            let cart = state.cart(cart_id)?;
            (cart.lines.clone(), cart.currency)
        };

        let mut item_count: i64 = 0;
        let mut total = Money::zero(currency);
        for line in &lines {
            let product = self
                .catalog
                .product(&line.product_id)
                .await?
                .ok_or_else(|| {
                    CommerceError::ProductUnavailable(line.product_id.clone())
                })?;
            let line_total = product
                .unit_price
                .try_multiply(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            total = total.try_add(&line_total).ok_or_else(|| {
                CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: product.unit_price.currency.code().to_string(),
                }
            })?;
            item_count += line.quantity;
        }

        Ok(CartTotals {
            item_count,
            total_price: total,
        })
    }
}
