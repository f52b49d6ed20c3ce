//! Order queries and status transitions.

use std::sync::Arc;

use volt_commerce::checkout::{Order, OrderStatus};
use volt_commerce::{CommerceError, OrderId, UserId};

use crate::memory::MemoryStore;

/// Read and fulfilment-status access to persisted orders.
///
/// Orders are append-only: the checkout service creates them, and the
/// only mutation allowed afterwards is a legal status transition.
pub struct OrderRepository {
    store: Arc<MemoryStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Fetch an order by ID.
    pub async fn order(&self, id: &OrderId) -> Result<Order, CommerceError> {
        let state = self.store.read().await?;
        state.order(id).cloned()
    }

    /// All orders placed by a user, newest first.
    pub async fn orders_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Order>, CommerceError> {
        let state = self.store.read().await?;
        let mut orders: Vec<Order> = state
            .orders
            .values()
            .filter(|o| o.user_id.as_ref() == Some(user_id))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Move an order to a new status, enforcing the state machine.
    pub async fn set_status(
        &self,
        id: &OrderId,
        next: OrderStatus,
    ) -> Result<Order, CommerceError> {
        let mut state = self.store.write().await?;
        let order = state.order_mut(id)?;
        let from = order.status;
        order.transition(next)?;
        tracing::info!(order = %order.order_number, %from, to = %next, "order status changed");
        Ok(order.clone())
    }

    /// Cancel an order that has not shipped yet.
    pub async fn cancel(&self, id: &OrderId) -> Result<Order, CommerceError> {
        self.set_status(id, OrderStatus::Cancelled).await
    }
}
