//! Session state
//!
//! Everything a storefront shows lives in one explicitly-owned [`Session`].
//! Transitions take the session by value and return the next one, so they can
//! be exercised without a catalog, a store or a renderer.

use std::time::Duration;

use jiff::{Timestamp, tz::TimeZone};
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    discounts::{AppliedDiscount, DiscountCodes, DiscountError},
    pricing::{PricingError, Totals, totals},
    products::{Product, ProductId},
};

/// How long a notice stays up before it clears itself.
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

/// How session creation times are shown, e.g. `07/03/2024 - 09:05`.
pub const CREATED_AT_FORMAT: &str = "%d/%m/%Y - %H:%M";

/// Format a session creation time in `tz`.
pub fn format_created_at(timestamp: Timestamp, tz: &TimeZone) -> String {
    timestamp
        .to_zoned(tz.clone())
        .strftime(CREATED_AT_FORMAT)
        .to_string()
}

/// Identifies one raised notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(u64);

/// What a notice is telling the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something the user asked for failed.
    Error,

    /// An easter-egg hint.
    Hint,
}

/// A transient banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Notice id, used to dismiss exactly this notice
    pub id: NoticeId,

    /// Notice kind
    pub kind: NoticeKind,

    /// Message text
    pub message: String,
}

/// Errors from session transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Cart mutation error
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Discount lookup error
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Storefront session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    cart: Cart,
    discount: Option<AppliedDiscount>,
    recommendation: Option<Product>,
    notice: Option<Notice>,
    notices_raised: u64,
    created_at: Timestamp,
}

impl Session {
    /// Start a session around a (possibly restored) cart.
    pub fn new(cart: Cart) -> Self {
        Self::started_at(cart, Timestamp::now())
    }

    /// Start a session with an explicit creation time.
    pub fn started_at(cart: Cart, created_at: Timestamp) -> Self {
        Self {
            cart,
            discount: None,
            recommendation: None,
            notice: None,
            notices_raised: 0,
            created_at,
        }
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the cart rejects the quantity.
    pub fn add_product(mut self, product: &Product, quantity: u32) -> Result<Self, SessionError> {
        self.cart = self.cart.with_product(product, quantity)?;

        Ok(self)
    }

    /// Remove a product's line; absent products are ignored.
    pub fn remove_product(mut self, id: ProductId) -> Self {
        self.cart = self.cart.without_product(id);
        self
    }

    /// Apply a discount code from `codes`, replacing any previous discount.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Discount` for unknown codes; the session keeps
    /// its previous discount.
    pub fn apply_discount(mut self, codes: &DiscountCodes, code: &str) -> Result<Self, SessionError> {
        self.discount = Some(codes.lookup(code)?);

        Ok(self)
    }

    /// Replace the current recommendation.
    pub fn with_recommendation(mut self, recommendation: Option<Product>) -> Self {
        self.recommendation = recommendation;
        self
    }

    /// Raise a notice, replacing any notice already up.
    pub fn raise_notice(mut self, kind: NoticeKind, message: impl Into<String>) -> (Self, NoticeId) {
        self.notices_raised = self.notices_raised.saturating_add(1);

        let id = NoticeId(self.notices_raised);

        self.notice = Some(Notice {
            id,
            kind,
            message: message.into(),
        });

        (self, id)
    }

    /// Clear notice `id` if it's still the one showing.
    ///
    /// A newer notice is left alone, so a timer armed for an older notice
    /// can't cut a later one short.
    pub fn dismiss_notice(mut self, id: NoticeId) -> Self {
        if self.notice.as_ref().is_some_and(|notice| notice.id == id) {
            self.notice = None;
        }

        self
    }

    /// Clear the notice if it reports an error. Hints stay up.
    pub fn clear_error_notice(mut self) -> Self {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.kind == NoticeKind::Error)
        {
            self.notice = None;
        }

        self
    }

    /// Compute totals from the current cart and discount.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::Overflow` if the totals can't be represented.
    pub fn totals(&self, currency: &'static Currency) -> Result<Totals, PricingError> {
        totals(&self.cart, self.discount.as_ref(), currency)
    }

    /// The cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The applied discount, if any.
    pub fn discount(&self) -> Option<&AppliedDiscount> {
        self.discount.as_ref()
    }

    /// The current recommendation, if any.
    pub fn recommendation(&self) -> Option<&Product> {
        self.recommendation.as_ref()
    }

    /// The notice currently showing, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// When the session started.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Cart::new())
    }
}
