//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::{Catalog, CatalogError, FixtureCatalog, HttpCatalog},
    config::{ConfigError, StorefrontConfig},
    discounts::{AppliedDiscount, DiscountCodes, DiscountError},
    hints::{Hint, TitleClicks},
    pricing::{PricingError, SummaryLine, Totals, format_amount, format_price, totals},
    products::{Product, ProductId},
    session::{NOTICE_TIMEOUT, Notice, NoticeId, NoticeKind, Session},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
    storefront::{Storefront, StorefrontError},
};
