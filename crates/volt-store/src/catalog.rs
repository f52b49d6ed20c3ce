//! Catalog collaborator interface.
//!
//! The checkout core does not own the product catalog; it only needs to
//! resolve a product's current price and purchasability. Anything else
//! about products (names, media, categories, search) stays on the other
//! side of this trait.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use volt_commerce::{CommerceError, Money, ProductId};

/// A catalog entry as seen by the cart and checkout flow.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    /// Product identifier.
    pub id: ProductId,
    /// Current unit price.
    pub unit_price: Money,
    /// Whether the product may currently be purchased.
    pub is_purchasable: bool,
}

/// Read-only product lookup consumed by the cart and checkout services.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Look up a product. `Ok(None)` when the catalog has no such product.
    async fn product(&self, id: &ProductId)
        -> Result<Option<CatalogProduct>, CommerceError>;
}

/// In-memory catalog, used in tests and standalone deployments.
#[derive(Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product.
    pub async fn insert(&self, product: CatalogProduct) {
        let mut products = self.products.write().await;
        products.insert(product.id.clone(), product);
    }

    /// Change a product's price in place.
    pub async fn set_price(&self, id: &ProductId, unit_price: Money) {
        let mut products = self.products.write().await;
        if let Some(product) = products.get_mut(id) {
            product.unit_price = unit_price;
        }
    }

    /// Flip a product's purchasability in place.
    pub async fn set_purchasable(&self, id: &ProductId, is_purchasable: bool) {
        let mut products = self.products.write().await;
        if let Some(product) = products.get_mut(id) {
            product.is_purchasable = is_purchasable;
        }
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn product(
        &self,
        id: &ProductId,
    ) -> Result<Option<CatalogProduct>, CommerceError> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }
}
