//! In-memory catalog loaded from YAML fixtures.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    products::{Product, ProductId},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two fixtures share an id
    #[error("Duplicate product id in fixture: {0}")]
    DuplicateProduct(ProductId),
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct ProductsFixture {
    products: Vec<Product>,
}

/// Catalog backed by a fixed product list, in fixture order.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    products: Vec<Product>,
}

impl FixtureCatalog {
    /// Create a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::DuplicateProduct` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, FixtureError> {
        for (index, product) in products.iter().enumerate() {
            if products
                .iter()
                .skip(index + 1)
                .any(|other| other.id == product.id)
            {
                return Err(FixtureError::DuplicateProduct(product.id));
            }
        }

        Ok(Self { products })
    }

    /// Parse a products fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or ids repeat.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: ProductsFixture = serde_norway::from_str(yaml)?;

        Self::new(fixture.products)
    }

    /// Load a products fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Get the number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for FixtureCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}
