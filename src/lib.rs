//! Trolley
//!
//! Trolley is a small shopping cart engine: products come from a REST catalog, the cart is kept in
//! a key-value store, and totals are priced with optional discount codes.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod discounts;
pub mod hints;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod recommend;
pub mod session;
pub mod storage;
pub mod storefront;
