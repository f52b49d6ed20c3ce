//! Storefront domain types and logic for VoltRide.
//!
//! This crate holds the pure, I/O-free half of the checkout pipeline:
//!
//! - **Money**: integer minor-unit amounts with checked arithmetic
//! - **Identity**: signed-in user or guest session, one cart each
//! - **Cart**: consolidating line items, no prices stored
//! - **Promo**: discount codes with validity windows and usage ceilings
//! - **Checkout**: orders with frozen price snapshots and a status
//!   state machine
//!
//! Persistence, catalog lookups and the transactional checkout itself
//! live in `volt-store`.
//!
//! # Example
//!
//! ```rust
//! use volt_commerce::prelude::*;
//!
//! let mut cart = Cart::new(Identity::User(UserId::new("u-1")));
//! let scooter = ProductId::new("volt-s2");
//! cart.add_line(&scooter, 1).unwrap();
//! cart.add_line(&scooter, 1).unwrap();
//!
//! assert_eq!(cart.lines.len(), 1);
//! assert_eq!(cart.item_count(), 2);
//! ```

pub mod cart;
pub mod checkout;
pub mod error;
pub mod identity;
pub mod ids;
pub mod money;
pub mod promo;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{Cart, CartLine, CartTotals, MAX_QUANTITY_PER_LINE};
    pub use crate::checkout::{ContactInfo, Order, OrderLine, OrderStatus};
    pub use crate::identity::Identity;
    pub use crate::promo::{AppliedPromo, PromoCode, PromoRejection};
}
