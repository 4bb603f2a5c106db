//! Durable key-value storage and the cart persistence bridge.

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::cart::Cart;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key the cart snapshot is stored under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors raised by key-value stores.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing a value
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// The key can't be mapped onto the backing store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backing store is unavailable or refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Text key-value store.
pub trait KeyValueStore {
    /// Read the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the store can't be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the store can't be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Restore the cart snapshot stored under `key`.
///
/// Missing, unreadable or malformed snapshots all restore as an empty cart;
/// the cause is logged.
pub fn restore_cart<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Cart {
    let snapshot = match store.get(key) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            debug!(key, "no stored cart");
            return Cart::new();
        }
        Err(source) => {
            warn!(key, "failed to read stored cart: {source}");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Cart>(&snapshot) {
        Ok(cart) => {
            debug!(key, lines = cart.len(), "restored cart");
            cart
        }
        Err(source) => {
            warn!(key, "discarding malformed stored cart: {source}");
            Cart::new()
        }
    }
}

/// Write the full cart snapshot under `key`.
///
/// # Errors
///
/// Returns a `StorageError` if the store rejects the write.
pub fn persist_cart<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    cart: &Cart,
) -> Result<(), StorageError> {
    let snapshot = serde_json::to_string(cart)
        .map_err(|source| StorageError::Unavailable(source.to_string()))?;

    store.set(key, &snapshot)
}

/// Write the cart snapshot, logging rather than returning failures.
pub fn persist_cart_or_log<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, cart: &Cart) {
    if let Err(source) = persist_cart(store, key, cart) {
        error!(key, "failed to persist cart: {source}");
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::products::{Product, ProductId};

    fn product(id: u32, cents: i64) -> TestResult<Product> {
        Ok(Product {
            id: ProductId::new(id).ok_or("zero id")?,
            title: format!("Product {id}"),
            price: Decimal::new(cents, 2),
            image: format!("https://example.test/{id}.jpg"),
            category: "electronics".to_string(),
        })
    }

    #[derive(Debug)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }
    }

    #[test]
    fn round_trip_preserves_lines_and_order() -> TestResult {
        let cart = Cart::new()
            .with_product(&product(3, 10_99)?, 2)?
            .with_product(&product(1, 109_95)?, 1)?
            .with_product(&product(3, 10_99)?, 1)?;

        let mut store = MemoryStore::default();
        persist_cart(&mut store, CART_STORAGE_KEY, &cart)?;

        let restored = restore_cart(&store, CART_STORAGE_KEY);

        assert_eq!(restored, cart);

        Ok(())
    }

    #[test]
    fn missing_snapshot_restores_empty() {
        let store = MemoryStore::default();

        assert!(restore_cart(&store, CART_STORAGE_KEY).is_empty());
    }

    #[test]
    fn malformed_snapshot_restores_empty() -> TestResult {
        let mut store = MemoryStore::default();
        store.set(CART_STORAGE_KEY, "{not json")?;

        assert!(restore_cart(&store, CART_STORAGE_KEY).is_empty());

        Ok(())
    }

    #[test]
    fn snapshot_with_duplicate_lines_restores_empty() -> TestResult {
        let line = r#"{"id":1,"title":"A","price":1.5,"image":"a","category":"c","quantity":1,"totalPrice":1.5}"#;
        let mut store = MemoryStore::default();
        store.set(CART_STORAGE_KEY, &format!("[{line},{line}]"))?;

        assert!(restore_cart(&store, CART_STORAGE_KEY).is_empty());

        Ok(())
    }

    #[test]
    fn reads_snapshots_written_by_the_browser_page() -> TestResult {
        let snapshot = r#"[{"id":7,"title":"White Gold Plated Princess","price":9.99,"description":"ring","category":"jewelery","image":"https://example.test/7.jpg","rating":{"rate":3,"count":400},"quantity":3,"totalPrice":29.97}]"#;
        let mut store = MemoryStore::default();
        store.set(CART_STORAGE_KEY, snapshot)?;

        let cart = restore_cart(&store, CART_STORAGE_KEY);

        let line = cart.lines().first().ok_or("missing line")?;
        assert_eq!(line.quantity, 3);
        assert_eq!(line.total_price, Decimal::new(29_97, 2));

        Ok(())
    }

    #[test]
    fn unreadable_store_restores_empty() {
        assert!(restore_cart(&BrokenStore, CART_STORAGE_KEY).is_empty());
    }

    #[test]
    fn persist_surfaces_write_errors() -> TestResult {
        let cart = Cart::new().with_product(&product(1, 1_00)?, 1)?;

        let result = persist_cart(&mut BrokenStore, CART_STORAGE_KEY, &cart);

        assert!(
            matches!(result, Err(StorageError::Unavailable(_))),
            "expected Unavailable, got {result:?}"
        );

        persist_cart_or_log(&mut BrokenStore, CART_STORAGE_KEY, &cart);

        Ok(())
    }
}
