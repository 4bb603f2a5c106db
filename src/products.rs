//! Products

use std::{fmt, num::NonZeroU32, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(NonZeroU32);

impl ProductId {
    /// Create a product id, rejecting zero.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Returns the raw identifier.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse digits-only input as a positive number. Signs are rejected.
pub(crate) fn positive_whole_number(input: &str) -> Option<NonZeroU32> {
    if input.is_empty() || !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    input.parse().ok()
}

/// Errors parsing a product id from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductIdError {
    /// Nothing was entered.
    #[error("product id is required")]
    Missing,

    /// The input was not a positive whole number.
    #[error("product id must be a positive whole number, got {0:?}")]
    Invalid(String),
}

impl FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ProductIdError::Missing);
        }

        positive_whole_number(trimmed)
            .map(Self)
            .ok_or_else(|| ProductIdError::Invalid(trimmed.to_string()))
    }
}

/// Product
///
/// A read-only snapshot of a catalog entry. Fields the catalog sends that the
/// storefront has no use for (descriptions, ratings) are dropped on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Image URI
    pub image: String,

    /// Category, used for recommendations
    pub category: String,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_product_ids() -> TestResult {
        assert_eq!(" 7 ".parse::<ProductId>()?.get(), 7);

        Ok(())
    }

    #[test]
    fn rejects_missing_zero_and_garbage_ids() {
        assert_eq!("".parse::<ProductId>(), Err(ProductIdError::Missing));
        assert_eq!("   ".parse::<ProductId>(), Err(ProductIdError::Missing));
        assert_eq!(
            "0".parse::<ProductId>(),
            Err(ProductIdError::Invalid("0".to_string()))
        );
        assert_eq!(
            "-3".parse::<ProductId>(),
            Err(ProductIdError::Invalid("-3".to_string()))
        );
        assert_eq!(
            "+3".parse::<ProductId>(),
            Err(ProductIdError::Invalid("+3".to_string()))
        );
        assert_eq!(
            "1.5".parse::<ProductId>(),
            Err(ProductIdError::Invalid("1.5".to_string()))
        );
    }

    #[test]
    fn decodes_catalog_payload_ignoring_extra_fields() -> TestResult {
        let json = r#"{
            "id": 1,
            "title": "Backpack",
            "price": 109.95,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://example.test/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json)?;

        assert_eq!(product.id.get(), 1);
        assert_eq!(product.title, "Backpack");
        assert_eq!(product.price, Decimal::new(10995, 2));
        assert_eq!(product.category, "men's clothing");

        Ok(())
    }

    #[test]
    fn zero_id_payload_is_rejected() {
        let json = r#"{"id":0,"title":"x","price":1,"category":"c","image":"i"}"#;

        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
