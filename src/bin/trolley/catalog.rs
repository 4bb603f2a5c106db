//! Catalog selection

use std::fmt;

use trolley::{
    catalog::{Catalog, CatalogError, FixtureCatalog, FixtureError, HttpCatalog},
    products::{Product, ProductId},
};

use crate::config::ShellConfig;

/// The catalog the shell serves products from.
#[derive(Debug)]
pub enum ShellCatalog {
    /// Remote REST catalog
    Http(HttpCatalog),

    /// Products loaded from a fixture file
    Fixture(FixtureCatalog),
}

impl ShellCatalog {
    /// Pick the catalog `config` asks for.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if a fixture was requested and can't be loaded.
    pub fn from_config(config: &ShellConfig, catalog_url: &str) -> Result<Self, FixtureError> {
        match &config.catalog_fixture {
            Some(path) => Ok(Self::Fixture(FixtureCatalog::from_file(path)?)),
            None => Ok(Self::Http(HttpCatalog::new(catalog_url))),
        }
    }
}

impl fmt::Display for ShellCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(catalog) => write!(f, "{}", catalog.base_url()),
            Self::Fixture(catalog) => write!(f, "fixture ({} products)", catalog.len()),
        }
    }
}

impl Catalog for ShellCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        match self {
            Self::Http(catalog) => catalog.product(id).await,
            Self::Fixture(catalog) => catalog.product(id).await,
        }
    }

    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Http(catalog) => catalog.products().await,
            Self::Fixture(catalog) => catalog.products().await,
        }
    }
}
