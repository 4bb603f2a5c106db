//! Product catalog
//!
//! The storefront reads products from a remote catalog with two operations:
//! fetch one product by id, and list everything.

use thiserror::Error;

use crate::products::{Product, ProductId};

mod fixture;
mod http;

pub use fixture::{FixtureCatalog, FixtureError};
pub use http::HttpCatalog;

/// Default public catalog.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no product with this id.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// An HTTP transport or decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog returned a body that isn't a product.
    #[error("failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The catalog returned a non-2xx response.
    #[error("unexpected response from catalog: {0}")]
    UnexpectedResponse(String),
}

/// Read-only product source.
pub trait Catalog {
    /// Fetch a single product.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// List every product.
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;
}

impl<C: Catalog> Catalog for &C {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        (**self).product(id).await
    }

    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        (**self).products().await
    }
}
