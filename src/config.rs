//! Storefront configuration

use std::{fs, path::Path};

use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

use crate::{
    catalog::DEFAULT_CATALOG_URL,
    discounts::{DiscountCodes, DiscountConfigError},
    storage::CART_STORAGE_KEY,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// IO error reading a configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Discount table error
    #[error(transparent)]
    Discounts(#[from] DiscountConfigError),
}

/// Everything a storefront needs besides its catalog and store.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog base URL
    pub catalog_url: String,

    /// Currency prices are quoted in
    pub currency: &'static Currency,

    /// Key the cart snapshot is stored under
    pub storage_key: String,

    /// Accepted discount codes
    pub discount_codes: DiscountCodes,
}

impl StorefrontConfig {
    /// Replace the discount table with one loaded from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file can't be read or parsed.
    pub fn with_discount_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        self.discount_codes = DiscountCodes::from_yaml(&contents)?;

        Ok(self)
    }

    /// Set the currency from an ISO code.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownCurrency` for unsupported codes.
    pub fn with_currency_code(mut self, code: &str) -> Result<Self, ConfigError> {
        self.currency = parse_currency(code)?;

        Ok(self)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            currency: USD,
            storage_key: CART_STORAGE_KEY.to_string(),
            discount_codes: DiscountCodes::default(),
        }
    }
}

/// Parse a supported ISO currency code.
///
/// # Errors
///
/// Returns `ConfigError::UnknownCurrency` for anything but GBP, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    match code.trim().to_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(ConfigError::UnknownCurrency(other.to_string())),
    }
}
