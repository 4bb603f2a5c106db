//! Recommendations

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, warn};

use crate::{
    cart::Cart,
    catalog::Catalog,
    products::{Product, ProductId},
};

/// Pick a product from `category` that isn't in `cart` and isn't `just_added`.
///
/// Candidates are chosen uniformly at random. Returns `None` when nothing in
/// the category is left to suggest.
pub fn select_recommendation<R: Rng + ?Sized>(
    products: &[Product],
    category: &str,
    cart: &Cart,
    just_added: ProductId,
    rng: &mut R,
) -> Option<Product> {
    let candidates: Vec<&Product> = products
        .iter()
        .filter(|product| {
            product.category == category
                && product.id != just_added
                && !cart.contains(product.id)
        })
        .collect();

    candidates.choose(rng).map(|product| (*product).clone())
}

/// List the catalog and pick a recommendation.
///
/// Lookup failures are logged and treated as having nothing to recommend.
pub async fn fetch_recommendation<C, R>(
    catalog: &C,
    category: &str,
    cart: &Cart,
    just_added: ProductId,
    rng: &mut R,
) -> Option<Product>
where
    C: Catalog + ?Sized,
    R: Rng + ?Sized,
{
    let products = match catalog.products().await {
        Ok(products) => products,
        Err(source) => {
            warn!(category, "failed to fetch similar products: {source}");
            return None;
        }
    };

    let picked = select_recommendation(&products, category, cart, just_added, rng);

    debug!(
        category,
        recommended = ?picked.as_ref().map(|product| product.id),
        "recommendation lookup finished"
    );

    picked
}
