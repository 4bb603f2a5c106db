//! Storefront actions over the reactive session.
//!
//! Each action reads the session untracked, runs a pure transition and writes
//! the result back with no await in between.

use leptos::{logging, prelude::*};
use trolley::{
    cart::Cart,
    catalog::HttpCatalog,
    config::StorefrontConfig,
    discounts::AppliedDiscount,
    hints::{Hint, TitleClicks},
    products::{Product, ProductId},
    recommend::fetch_recommendation,
    session::{NOTICE_TIMEOUT, NoticeKind, Session},
    storage::{persist_cart_or_log, restore_cart},
    storefront::{ADD_FAILED_MESSAGE, INVALID_CODE_MESSAGE, StorefrontError, fetch_line},
};

use crate::storage::BrowserStore;

/// Shared page state.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    /// Session shown on the page
    pub session: RwSignal<Session>,

    /// Storefront settings
    pub config: StoredValue<StorefrontConfig>,

    /// Catalog client
    pub catalog: StoredValue<HttpCatalog, LocalStorage>,

    /// Title click counter
    pub title_clicks: RwSignal<TitleClicks>,
}

impl AppState {
    /// Build page state, restoring the saved cart.
    pub fn restore(config: StorefrontConfig) -> Self {
        let cart = match BrowserStore::open() {
            Ok(store) => restore_cart(&store, &config.storage_key),
            Err(error) => {
                logging::warn!("cart storage unavailable, starting empty: {error}");
                Cart::new()
            }
        };

        Self {
            session: RwSignal::new(Session::new(cart)),
            catalog: StoredValue::new_local(HttpCatalog::new(config.catalog_url.clone())),
            config: StoredValue::new(config),
            title_clicks: RwSignal::new(TitleClicks::default()),
        }
    }
}

/// Add `quantity` units of product `product_id`, then look for a recommendation.
///
/// Any error notice from an earlier add is cleared first.
///
/// # Errors
///
/// Returns a `StorefrontError` after raising the add-failed notice.
pub async fn add_item(
    state: AppState,
    product_id: String,
    quantity: String,
) -> Result<(), StorefrontError> {
    state
        .session
        .update(|session| *session = session.clone().clear_error_notice());

    let catalog = state.catalog.get_value();

    let added = match fetch_line(&catalog, &product_id, &quantity).await {
        Ok((product, quantity)) => state
            .session
            .get_untracked()
            .add_product(&product, quantity)
            .map(|session| (session, product))
            .map_err(StorefrontError::from),
        Err(error) => Err(error),
    };

    match added {
        Ok((session, product)) => {
            persist(state, &session);
            state.session.set(session);

            recommend(state, &catalog, &product).await;

            Ok(())
        }
        Err(error) => {
            logging::error!("{ADD_FAILED_MESSAGE}: {error}");

            raise_notice(state, NoticeKind::Error, ADD_FAILED_MESSAGE);

            Err(error)
        }
    }
}

async fn recommend(state: AppState, catalog: &HttpCatalog, added: &Product) {
    let cart = state.session.with_untracked(|session| session.cart().clone());

    let recommendation = fetch_recommendation(
        catalog,
        &added.category,
        &cart,
        added.id,
        &mut rand::thread_rng(),
    )
    .await;

    state
        .session
        .update(|session| *session = session.clone().with_recommendation(recommendation));
}

/// Remove a product's line.
pub fn remove_item(state: AppState, id: ProductId) {
    let session = state.session.get_untracked().remove_product(id);

    persist(state, &session);
    state.session.set(session);
}

/// Apply a discount code.
///
/// # Errors
///
/// Returns a `StorefrontError` for unknown codes, after raising the
/// invalid-code notice.
pub fn apply_discount(state: AppState, code: &str) -> Result<AppliedDiscount, StorefrontError> {
    let applied = state.config.with_value(|config| {
        state
            .session
            .get_untracked()
            .apply_discount(&config.discount_codes, code)
    });

    match applied {
        Ok(session) => {
            let discount = session.discount().cloned();
            state.session.set(session);

            discount.ok_or_else(|| StorefrontError::InvalidInput(INVALID_CODE_MESSAGE.to_string()))
        }
        Err(error) => {
            raise_notice(state, NoticeKind::Error, INVALID_CODE_MESSAGE);

            Err(error.into())
        }
    }
}

/// Register a click on the page title.
pub fn click_title(state: AppState) {
    let hint = state.title_clicks.try_update(TitleClicks::click).flatten();

    match hint {
        Some(Hint::Banner(message)) => raise_notice(state, NoticeKind::Hint, message),
        Some(Hint::Console(message)) => logging::log!("{message}"),
        None => {}
    }
}

/// Show a notice and clear it after [`NOTICE_TIMEOUT`].
pub fn raise_notice(state: AppState, kind: NoticeKind, message: &str) {
    let (session, id) = state.session.get_untracked().raise_notice(kind, message);

    state.session.set(session);

    set_timeout(
        move || {
            state
                .session
                .update(|session| *session = session.clone().dismiss_notice(id));
        },
        NOTICE_TIMEOUT,
    );
}

fn persist(state: AppState, session: &Session) {
    let key = state.config.with_value(|config| config.storage_key.clone());

    match BrowserStore::open() {
        Ok(mut store) => persist_cart_or_log(&mut store, &key, session.cart()),
        Err(error) => logging::warn!("failed to save cart: {error}"),
    }
}
