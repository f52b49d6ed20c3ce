//! Shared harness for service-level tests.
#![allow(dead_code)]

use std::sync::Arc;

use volt_commerce::checkout::ContactInfo;
use volt_commerce::{Currency, Money, ProductId};
use volt_store::{
    CartService, CatalogProduct, CheckoutRequest, CheckoutService, MemoryCatalog,
    MemoryStore, OrderRepository, PromoValidator,
};

pub struct Shop {
    pub store: Arc<MemoryStore>,
    pub catalog: Arc<MemoryCatalog>,
    pub carts: Arc<CartService>,
    pub promos: PromoValidator,
    pub checkout: Arc<CheckoutService>,
    pub orders: OrderRepository,
}

/// A store seeded with a few scooters.
pub async fn shop() -> Shop {
    let store = Arc::new(MemoryStore::new());
    let catalog = Arc::new(MemoryCatalog::new());

    catalog.insert(product("volt-s2", 39990)).await;
    catalog.insert(product("volt-mini", 19990)).await;
    catalog.insert(product("spare-tube", 80)).await;

    Shop {
        carts: Arc::new(CartService::new(store.clone(), catalog.clone())),
        promos: PromoValidator::new(store.clone()),
        checkout: Arc::new(CheckoutService::new(store.clone(), catalog.clone())),
        orders: OrderRepository::new(store.clone()),
        store,
        catalog,
    }
}

pub fn rub(amount: i64) -> Money {
    Money::new(amount, Currency::Rub)
}

pub fn product(id: &str, price: i64) -> CatalogProduct {
    CatalogProduct {
        id: ProductId::new(id),
        unit_price: rub(price),
        is_purchasable: true,
    }
}

pub fn contact() -> ContactInfo {
    ContactInfo::new(
        "Anna",
        "Petrova",
        "+7 999 123-45-67",
        "anna@example.com",
        "Moscow",
        "Tverskaya 1, apt 5",
        "125009",
    )
}

/// A checkout request with the standard flat delivery fee.
pub fn request(promo_code: Option<&str>) -> CheckoutRequest {
    CheckoutRequest {
        contact: contact(),
        delivery_cost: rub(500),
        promo_code: promo_code.map(String::from),
    }
}
