//! Terminal storefront configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use trolley::{
    catalog::DEFAULT_CATALOG_URL,
    config::{ConfigError, StorefrontConfig},
};

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "TROLLEY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Trolley terminal storefront configuration
#[derive(Debug, Parser)]
#[command(name = "trolley", about = "Trolley terminal storefront", long_about = None)]
pub struct ShellConfig {
    /// Catalog base URL
    #[arg(long, env = "TROLLEY_CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Serve products from a YAML fixture instead of the catalog URL
    #[arg(long, env = "TROLLEY_CATALOG_FIXTURE")]
    pub catalog_fixture: Option<PathBuf>,

    /// Directory the cart is saved in
    #[arg(long, env = "TROLLEY_DATA_DIR", default_value = ".trolley")]
    pub data_dir: PathBuf,

    /// YAML file of discount codes, replacing the built-in ones
    #[arg(long, env = "TROLLEY_DISCOUNT_CODES")]
    pub discount_codes: Option<PathBuf>,

    /// Currency prices are quoted in (GBP, USD, EUR)
    #[arg(long, env = "TROLLEY_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl ShellConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Build the storefront configuration these settings describe.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for unknown currencies or unreadable discount files.
    pub fn storefront_config(&self) -> Result<StorefrontConfig, ConfigError> {
        let config = StorefrontConfig {
            catalog_url: self.catalog_url.clone(),
            ..StorefrontConfig::default()
        }
        .with_currency_code(&self.currency)?;

        match &self.discount_codes {
            Some(path) => config.with_discount_file(path),
            None => Ok(config),
        }
    }
}
