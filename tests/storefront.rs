//! End-to-end storefront scenarios over a fixture catalog and an in-memory store.

use rust_decimal::Decimal;
use testresult::TestResult;

use trolley::{
    catalog::FixtureCatalog,
    config::StorefrontConfig,
    pricing::format_price,
    products::ProductId,
    session::NoticeKind,
    storage::{KeyValueStore, MemoryStore},
    storefront::{ADD_FAILED_MESSAGE, Storefront, StorefrontError},
};

const CATALOG_YAML: &str = r#"
products:
  - id: 1
    title: "Ten Dollar Thing"
    price: 10.0
    image: "https://example.com/thing.png"
    category: "electronics"
  - id: 2
    title: "Cheaper Thing"
    price: 4.5
    image: "https://example.com/cheaper.png"
    category: "electronics"
"#;

fn storefront() -> TestResult<Storefront<FixtureCatalog, MemoryStore>> {
    let catalog = FixtureCatalog::from_yaml(CATALOG_YAML)?;

    Ok(Storefront::open(catalog, MemoryStore::default(), StorefrontConfig::default()).with_rng_seed(5))
}

#[tokio::test]
async fn add_merge_discount_remove() -> TestResult {
    let mut store = storefront()?;
    let id = ProductId::new(1).ok_or("zero id")?;

    store.add_item("1", "2").await?;
    assert_eq!(format_price(&store.totals()?.subtotal), "$20.00");

    store.add_item("1", "3").await?;
    let cart = store.session().cart();
    assert_eq!(cart.len(), 1);
    let line = cart.line(id).ok_or("missing line")?;
    assert_eq!(line.quantity, 5);
    assert_eq!(line.total_price, Decimal::from(50));

    store.apply_discount("RAZER")?;
    let totals = store.totals()?;
    assert_eq!(format_price(&totals.discount), "$25.00");
    assert_eq!(format_price(&totals.total), "$25.00");

    store.remove_item(id);
    assert!(store.session().cart().is_empty());
    assert_eq!(format_price(&store.totals()?.subtotal), "$0.00");

    Ok(())
}

#[tokio::test]
async fn unknown_product_shows_banner_until_dismissed() -> TestResult {
    let mut store = storefront()?;
    store.add_item("2", "1").await?;
    let before = store.session().cart().clone();
    let saved_before = store.store().get("cart")?;

    let result = store.add_item("999", "1").await;

    assert!(matches!(result, Err(StorefrontError::NotFound(_))));
    assert_eq!(store.session().cart(), &before);
    assert_eq!(store.store().get("cart")?, saved_before);

    let notice = store.notice().cloned().ok_or("expected a banner")?;
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, ADD_FAILED_MESSAGE);

    store.dismiss_notice(notice.id);
    assert_eq!(store.notice(), None);

    Ok(())
}

#[tokio::test]
async fn recommendation_follows_category_and_can_be_taken() -> TestResult {
    let mut store = storefront()?;

    store.add_item("1", "1").await?;
    let recommended = store
        .session()
        .recommendation()
        .map(|product| product.id.get());
    assert_eq!(recommended, Some(2));

    store.add_recommended().await?;
    assert_eq!(store.session().cart().item_count(), 2);
    assert_eq!(store.session().recommendation(), None);

    Ok(())
}

#[tokio::test]
async fn discount_codes_ignore_case_and_replace_each_other() -> TestResult {
    let mut store = storefront()?;
    store.add_item("1", "1").await?;

    store.apply_discount("razer")?;
    let applied = store.apply_discount("goncy10")?;

    assert_eq!(applied.code, "GONCY10");
    assert_eq!(format_price(&store.totals()?.total), "$9.00");

    Ok(())
}
