//! Checkout module.
//!
//! Contains the contact snapshot and the order types a checkout produces.

mod contact;
mod order;

pub use contact::ContactInfo;
pub use order::{Order, OrderLine, OrderStatus};
