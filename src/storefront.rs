//! Storefront controller
//!
//! Ties a [`Session`] to a catalog and a key-value store: user input is
//! parsed here, catalog calls are made here, and every cart change is written
//! straight back to the store.

use std::num::NonZeroU32;

use rand::{SeedableRng, rngs::StdRng};
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::CartError,
    catalog::{Catalog, CatalogError},
    config::StorefrontConfig,
    discounts::{AppliedDiscount, DiscountCodes, DiscountError},
    hints::{Hint, STARTUP_HINT, TitleClicks},
    pricing::{PricingError, Totals},
    products::{Product, ProductId, ProductIdError, positive_whole_number},
    recommend::fetch_recommendation,
    session::{Notice, NoticeId, NoticeKind, Session, SessionError},
    storage::{KeyValueStore, persist_cart_or_log, restore_cart},
};

/// Banner text when adding to the cart fails.
pub const ADD_FAILED_MESSAGE: &str = "Failed to add product to cart";

/// Banner text for unknown discount codes.
pub const INVALID_CODE_MESSAGE: &str = "Invalid discount code";

/// User-visible storefront errors.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Input was missing or not usable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The catalog has no such product.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The catalog couldn't be reached or answered badly.
    #[error(transparent)]
    Catalog(CatalogError),
}

impl From<CatalogError> for StorefrontError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound(id) => Self::NotFound(id),
            other => Self::Catalog(other),
        }
    }
}

impl From<ProductIdError> for StorefrontError {
    fn from(error: ProductIdError) -> Self {
        Self::InvalidInput(error.to_string())
    }
}

impl From<CartError> for StorefrontError {
    fn from(error: CartError) -> Self {
        Self::InvalidInput(error.to_string())
    }
}

impl From<DiscountError> for StorefrontError {
    fn from(error: DiscountError) -> Self {
        Self::InvalidInput(error.to_string())
    }
}

impl From<SessionError> for StorefrontError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::Cart(error) => error.into(),
            SessionError::Discount(error) => error.into(),
        }
    }
}

/// Parse a quantity typed by the user.
///
/// # Errors
///
/// Returns `StorefrontError::InvalidInput` unless the input is a positive
/// whole number.
pub fn parse_quantity(input: &str) -> Result<u32, StorefrontError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(StorefrontError::InvalidInput(
            "quantity is required".to_string(),
        ));
    }

    positive_whole_number(trimmed)
        .map(NonZeroU32::get)
        .ok_or_else(|| {
            StorefrontError::InvalidInput(format!(
                "quantity must be a positive whole number, got {trimmed:?}"
            ))
        })
}

/// Parse add-to-cart input and fetch the product it names.
///
/// Input is validated before the catalog is called.
///
/// # Errors
///
/// - [`StorefrontError::InvalidInput`]: the id or quantity isn't a positive whole number.
/// - [`StorefrontError::NotFound`]: the catalog has no such product.
/// - [`StorefrontError::Catalog`]: the catalog request failed.
pub async fn fetch_line<C: Catalog + ?Sized>(
    catalog: &C,
    product_id: &str,
    quantity: &str,
) -> Result<(Product, u32), StorefrontError> {
    let id: ProductId = product_id.parse()?;
    let quantity = parse_quantity(quantity)?;

    let product = catalog.product(id).await?;

    Ok((product, quantity))
}

/// A single-user storefront.
#[derive(Debug)]
pub struct Storefront<C, S> {
    catalog: C,
    store: S,
    config: StorefrontConfig,
    session: Session,
    title_clicks: TitleClicks,
    rng: StdRng,
}

impl<C: Catalog, S: KeyValueStore> Storefront<C, S> {
    /// Open a storefront, restoring the cart from `store`.
    pub fn open(catalog: C, store: S, config: StorefrontConfig) -> Self {
        info!("{STARTUP_HINT}");

        let cart = restore_cart(&store, &config.storage_key);

        Self {
            catalog,
            store,
            config,
            session: Session::new(cart),
            title_clicks: TitleClicks::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a seeded RNG for recommendations.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Add `quantity` units of the product with id `product_id`.
    ///
    /// On success the cart is persisted and a recommendation from the same
    /// category is looked up. On failure an error notice is raised and the
    /// cart is left as it was. An error notice from an earlier add is cleared
    /// as soon as this one starts.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidInput`]: the id or quantity isn't a positive whole number.
    /// - [`StorefrontError::NotFound`]: the catalog has no such product.
    /// - [`StorefrontError::Catalog`]: the catalog request failed.
    pub async fn add_item(&mut self, product_id: &str, quantity: &str) -> Result<(), StorefrontError> {
        self.session = self.session.clone().clear_error_notice();

        match self.try_add_item(product_id, quantity).await {
            Ok(product) => {
                self.recommend(&product.category, product.id).await;

                Ok(())
            }
            Err(error) => {
                warn!(product_id, quantity, "failed to add product to cart: {error}");

                self.raise_notice(NoticeKind::Error, ADD_FAILED_MESSAGE);

                Err(error)
            }
        }
    }

    async fn try_add_item(
        &mut self,
        product_id: &str,
        quantity: &str,
    ) -> Result<Product, StorefrontError> {
        let (product, quantity) = fetch_line(&self.catalog, product_id, quantity).await?;

        self.session = self.session.clone().add_product(&product, quantity)?;
        self.persist();

        info!(id = %product.id, quantity, "added product to cart");

        Ok(product)
    }

    /// Add one unit of the current recommendation.
    ///
    /// The product is fetched again by id, as for any other add.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::InvalidInput` if there is no recommendation,
    /// otherwise as [`Storefront::add_item`].
    pub async fn add_recommended(&mut self) -> Result<(), StorefrontError> {
        let Some(id) = self.session.recommendation().map(|product| product.id) else {
            return Err(StorefrontError::InvalidInput(
                "there is no recommendation to add".to_string(),
            ));
        };

        self.add_item(&id.to_string(), "1").await
    }

    /// Remove a product's line. Removing an absent product does nothing.
    pub fn remove_item(&mut self, id: ProductId) {
        if !self.session.cart().contains(id) {
            return;
        }

        self.session = self.session.clone().remove_product(id);
        self.persist();

        info!(%id, "removed product from cart");
    }

    /// Look up a category recommendation, excluding `just_added` and the
    /// cart's current contents.
    ///
    /// Failures are logged and clear the recommendation.
    pub async fn recommend(&mut self, category: &str, just_added: ProductId) {
        let cart = self.session.cart().clone();

        let recommendation =
            fetch_recommendation(&self.catalog, category, &cart, just_added, &mut self.rng).await;

        self.session = self.session.clone().with_recommendation(recommendation);
    }

    /// Apply a discount code, replacing any previous discount.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::InvalidInput` for unknown codes, after
    /// raising an error notice. The previous discount stays applied.
    pub fn apply_discount(&mut self, code: &str) -> Result<AppliedDiscount, StorefrontError> {
        match self
            .session
            .clone()
            .apply_discount(&self.config.discount_codes, code)
        {
            Ok(session) => {
                self.session = session;

                let applied = self
                    .session
                    .discount()
                    .cloned()
                    .ok_or_else(|| StorefrontError::InvalidInput(INVALID_CODE_MESSAGE.to_string()))?;

                info!(code = %applied.code, rate = %applied.rate, "applied discount");

                Ok(applied)
            }
            Err(error) => {
                warn!(code, "rejected discount code: {error}");

                self.raise_notice(NoticeKind::Error, INVALID_CODE_MESSAGE);

                Err(error.into())
            }
        }
    }

    /// Register a click on the storefront title.
    pub fn click_title(&mut self) -> Option<Hint> {
        let hint = self.title_clicks.click();

        match hint {
            Some(Hint::Banner(message)) => {
                self.raise_notice(NoticeKind::Hint, message);
            }
            Some(Hint::Console(message)) => info!("{message}"),
            None => {}
        }

        hint
    }

    /// Current totals, recomputed from the cart.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::Overflow` if the totals can't be represented.
    pub fn totals(&self) -> Result<Totals, PricingError> {
        self.session.totals(self.config.currency)
    }

    /// Clear notice `id` if it is still showing.
    pub fn dismiss_notice(&mut self, id: NoticeId) {
        self.session = self.session.clone().dismiss_notice(id);
    }

    /// The notice currently showing, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.session.notice()
    }

    /// Session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Configured currency.
    pub fn currency(&self) -> &'static Currency {
        self.config.currency
    }

    /// Accepted discount codes.
    pub fn discount_codes(&self) -> &DiscountCodes {
        &self.config.discount_codes
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn raise_notice(&mut self, kind: NoticeKind, message: &str) -> NoticeId {
        let (session, id) = self.session.clone().raise_notice(kind, message);
        self.session = session;
        id
    }

    fn persist(&mut self) {
        persist_cart_or_log(&mut self.store, &self.config.storage_key, self.session.cart());
    }
}
