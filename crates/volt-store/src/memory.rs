//! In-memory store.
//!
//! All mutable storefront state lives behind one `RwLock`. That single
//! lock is what gives the services their transactional guarantees: any
//! operation holding the write guard sees and leaves a consistent whole,
//! and checkout can span cart, promo and order state in one critical
//! section. Lock acquisition is bounded so a storage operation surfaces a
//! retryable error instead of hanging.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use volt_commerce::cart::Cart;
use volt_commerce::checkout::Order;
use volt_commerce::identity::Identity;
use volt_commerce::promo::PromoCode;
use volt_commerce::{CartId, CommerceError, OrderId};

/// Store tuning knobs.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Upper bound on waiting for the store lock.
    pub op_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            op_timeout: Duration::from_secs(5),
        }
    }
}

/// Everything the storefront persists, guarded as one unit.
#[derive(Default)]
pub(crate) struct StoreState {
    pub carts: HashMap<CartId, Cart>,
    /// One cart per identity; the index entry is created together with
    /// the cart, under the same write guard.
    pub carts_by_owner: HashMap<Identity, CartId>,
    /// Promo codes keyed by their exact, case-sensitive code.
    pub promos: HashMap<String, PromoCode>,
    /// Orders are append-only; only their status field ever changes.
    pub orders: HashMap<OrderId, Order>,
}

impl StoreState {
    pub fn cart(&self, id: &CartId) -> Result<&Cart, CommerceError> {
        self.carts
            .get(id)
            .ok_or_else(|| CommerceError::CartNotFound(id.clone()))
    }

    pub fn cart_mut(&mut self, id: &CartId) -> Result<&mut Cart, CommerceError> {
        self.carts
            .get_mut(id)
            .ok_or_else(|| CommerceError::CartNotFound(id.clone()))
    }

    pub fn order(&self, id: &OrderId) -> Result<&Order, CommerceError> {
        self.orders
            .get(id)
            .ok_or_else(|| CommerceError::OrderNotFound(id.clone()))
    }

    pub fn order_mut(&mut self, id: &OrderId) -> Result<&mut Order, CommerceError> {
        self.orders
            .get_mut(id)
            .ok_or_else(|| CommerceError::OrderNotFound(id.clone()))
    }
}

/// Shared in-memory persistence for carts, promo codes and orders.
pub struct MemoryStore {
    state: RwLock<StoreState>,
    op_timeout: Duration,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            op_timeout: config.op_timeout,
        }
    }

    /// Acquire the read guard, bounded by the configured timeout.
    pub(crate) async fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, StoreState>, CommerceError> {
        tokio::time::timeout(self.op_timeout, self.state.read())
            .await
            .map_err(|_| {
                CommerceError::StorageFailure("timed out acquiring store read lock".into())
            })
    }

    /// Acquire the write guard, bounded by the configured timeout.
    pub(crate) async fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, StoreState>, CommerceError> {
        tokio::time::timeout(self.op_timeout, self.state.write())
            .await
            .map_err(|_| {
                CommerceError::StorageFailure("timed out acquiring store write lock".into())
            })
    }

    /// Register or replace a promo code.
    pub async fn insert_promo(&self, promo: PromoCode) -> Result<(), CommerceError> {
        let mut state = self.write().await?;
        tracing::debug!(code = %promo.code, "promo code registered");
        state.promos.insert(promo.code.clone(), promo);
        Ok(())
    }

    /// Fetch a promo code by its exact spelling.
    pub async fn promo(&self, code: &str) -> Result<Option<PromoCode>, CommerceError> {
        let state = self.read().await?;
        Ok(state.promos.get(code).cloned())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
