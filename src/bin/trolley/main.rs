//! Trolley terminal storefront

use std::process::ExitCode;

use jiff::tz::TimeZone;
use tokio::io::{self, BufReader};
use tracing::{error, info};

use trolley::{storage::FileStore, storefront::Storefront};

use crate::{catalog::ShellCatalog, config::ShellConfig};

mod catalog;
mod config;
mod observability;
mod render;
mod shell;

/// Trolley terminal storefront entry point
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match ShellConfig::load() {
        Ok(config) => config,
        Err(parse_error) => {
            // clap formats help and version output as errors too
            _ = parse_error.print();

            return if parse_error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(init_error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for subscriber errors"
        )]
        {
            eprintln!("Failed to initialise logging: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    let storefront_config = match config.storefront_config() {
        Ok(storefront_config) => storefront_config,
        Err(config_error) => {
            error!("invalid storefront configuration: {config_error}");

            return ExitCode::FAILURE;
        }
    };

    let catalog = match ShellCatalog::from_config(&config, &storefront_config.catalog_url) {
        Ok(catalog) => catalog,
        Err(fixture_error) => {
            error!("failed to load catalog fixture: {fixture_error}");

            return ExitCode::FAILURE;
        }
    };

    let store = match FileStore::open(&config.data_dir) {
        Ok(store) => store,
        Err(storage_error) => {
            error!(
                data_dir = %config.data_dir.display(),
                "failed to open data directory: {storage_error}"
            );

            return ExitCode::FAILURE;
        }
    };

    info!(
        %catalog,
        data_dir = %store.dir().display(),
        "starting storefront"
    );

    let mut storefront = Storefront::open(catalog, store, storefront_config);

    let tz = TimeZone::system();

    match shell::run(&mut storefront, BufReader::new(io::stdin()), io::stdout(), &tz).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(io_error) => {
            error!("storefront shell failed: {io_error}");

            ExitCode::FAILURE
        }
    }
}
