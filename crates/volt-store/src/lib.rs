//! Services and persistence for the VoltRide checkout pipeline.
//!
//! Wires the `volt-commerce` domain types to a shared in-memory store:
//!
//! - [`CartService`] resolves one cart per identity and applies line
//!   mutations atomically
//! - [`PromoValidator`] checks discount codes without consuming uses
//! - [`CheckoutService`] converts a cart into an order in one all-or-
//!   nothing critical section
//! - [`OrderRepository`] serves order queries and status transitions
//! - [`Catalog`] is the narrow interface to the external product catalog
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use volt_store::{CartService, CheckoutService, MemoryCatalog, MemoryStore};
//!
//! let store = Arc::new(MemoryStore::new());
//! let catalog = Arc::new(MemoryCatalog::new());
//! let carts = CartService::new(store.clone(), catalog.clone());
//! let checkout = CheckoutService::new(store, catalog);
//! ```

mod cart;
mod catalog;
mod checkout;
mod memory;
mod orders;
mod promo;

pub use cart::CartService;
pub use catalog::{Catalog, CatalogProduct, MemoryCatalog};
pub use checkout::{CheckoutRequest, CheckoutService};
pub use memory::{MemoryStore, StoreConfig};
pub use orders::OrderRepository;
pub use promo::PromoValidator;
