//! Cart

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors related to cart construction or mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantities must be at least one.
    #[error("quantity for product {0} must be at least 1")]
    ZeroQuantity(ProductId),

    /// Merging would overflow the line quantity.
    #[error("quantity for product {0} is too large")]
    QuantityOverflow(ProductId),

    /// The same product appears on more than one line (line index, product).
    #[error("line {0} repeats product {1}")]
    DuplicateProduct(usize, ProductId),

    /// A line total could not be represented.
    #[error("total for product {0} overflowed")]
    TotalOverflow(ProductId),
}

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Image URI
    pub image: String,

    /// Product category
    pub category: String,

    /// Number of units
    pub quantity: u32,

    /// `quantity × price`
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl CartLine {
    fn new(product: &Product, quantity: u32) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity(product.id));
        }

        Ok(Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            quantity,
            total_price: line_total(product.id, product.price, quantity)?,
        })
    }

    /// Returns the product this line was built from.
    pub fn product(&self) -> Product {
        Product {
            id: self.id,
            title: self.title.clone(),
            price: self.price,
            image: self.image.clone(),
            category: self.category.clone(),
        }
    }
}

fn line_total(id: ProductId, price: Decimal, quantity: u32) -> Result<Decimal, CartError> {
    price
        .checked_mul(Decimal::from(quantity))
        .ok_or(CartError::TotalOverflow(id))
}

/// Cart
///
/// Lines are kept in first-add order and each product appears at most once.
/// Mutating operations consume the cart and hand back the new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from previously stored lines.
    ///
    /// Line totals are recomputed from unit prices so a stale total can't
    /// leak into pricing.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a product repeats, a quantity is zero or a
    /// total overflows.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Result<Self, CartError> {
        let mut seen = FxHashSet::default();

        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(index, mut line)| {
                if !seen.insert(line.id) {
                    return Err(CartError::DuplicateProduct(index, line.id));
                }

                if line.quantity == 0 {
                    return Err(CartError::ZeroQuantity(line.id));
                }

                line.total_price = line_total(line.id, line.price, line.quantity)?;

                Ok(line)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { lines })
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the same product has its quantity increased and
    /// its total recomputed from the line's unit price; otherwise a new line
    /// is appended.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if `quantity` is zero or the merged quantity or
    /// total overflows.
    pub fn with_product(mut self, product: &Product, quantity: u32) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity(product.id));
        }

        match self.lines.iter_mut().find(|line| line.id == product.id) {
            Some(line) => {
                let merged = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartError::QuantityOverflow(product.id))?;

                line.total_price = line_total(line.id, line.price, merged)?;
                line.quantity = merged;
            }
            None => self.lines.push(CartLine::new(product, quantity)?),
        }

        Ok(self)
    }

    /// Remove the line for `id`, if there is one.
    pub fn without_product(mut self, id: ProductId) -> Self {
        self.lines.retain(|line| line.id != id);
        self
    }

    /// Get the line for `id`.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Check whether `id` is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<CartLine>::deserialize(deserializer)?;

        Cart::from_lines(lines).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(id: u32, cents: i64) -> TestResult<Product> {
        Ok(Product {
            id: ProductId::new(id).ok_or("zero id")?,
            title: format!("Product {id}"),
            price: Decimal::new(cents, 2),
            image: format!("https://example.test/{id}.jpg"),
            category: "electronics".to_string(),
        })
    }

    #[test]
    fn adding_new_product_appends_line() -> TestResult {
        let item = product(1, 10_00)?;

        let cart = Cart::new().with_product(&item, 2)?;

        assert_eq!(cart.len(), 1);
        let line = cart.line(item.id).ok_or("missing line")?;
        assert_eq!(line.quantity, 2);
        assert_eq!(line.total_price, Decimal::new(20_00, 2));

        Ok(())
    }

    #[test]
    fn adding_same_product_merges_into_one_line() -> TestResult {
        let item = product(1, 10_99)?;

        let cart = Cart::new()
            .with_product(&item, 2)?
            .with_product(&item, 3)?
            .with_product(&item, 1)?;

        assert_eq!(cart.len(), 1);
        let line = cart.line(item.id).ok_or("missing line")?;
        assert_eq!(line.quantity, 6);
        assert_eq!(line.total_price, Decimal::new(65_94, 2));

        Ok(())
    }

    #[test]
    fn lines_keep_first_add_order() -> TestResult {
        let first = product(3, 1_00)?;
        let second = product(1, 2_00)?;

        let cart = Cart::new()
            .with_product(&first, 1)?
            .with_product(&second, 1)?
            .with_product(&first, 4)?;

        let ids: Vec<u32> = cart.lines().iter().map(|line| line.id.get()).collect();

        assert_eq!(ids, vec![3, 1]);

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() -> TestResult {
        let item = product(1, 1_00)?;

        let result = Cart::new().with_product(&item, 0);

        assert_eq!(result, Err(CartError::ZeroQuantity(item.id)));

        Ok(())
    }

    #[test]
    fn merged_quantity_overflow_is_rejected() -> TestResult {
        let item = product(1, 0)?;

        let cart = Cart::new().with_product(&item, u32::MAX)?;

        assert_eq!(
            cart.with_product(&item, 1),
            Err(CartError::QuantityOverflow(item.id))
        );

        Ok(())
    }

    #[test]
    fn removing_absent_product_leaves_cart_unchanged() -> TestResult {
        let item = product(1, 5_00)?;
        let cart = Cart::new().with_product(&item, 1)?;
        let absent = ProductId::new(99).ok_or("zero id")?;

        let after = cart.clone().without_product(absent);

        assert_eq!(after, cart);

        Ok(())
    }

    #[test]
    fn removing_present_product_drops_line() -> TestResult {
        let item = product(1, 5_00)?;
        let other = product(2, 1_00)?;

        let cart = Cart::new()
            .with_product(&item, 1)?
            .with_product(&other, 2)?
            .without_product(item.id);

        assert!(!cart.contains(item.id));
        assert_eq!(cart.item_count(), 2);

        Ok(())
    }

    #[test]
    fn from_lines_rejects_duplicates_and_zero_quantities() -> TestResult {
        let line = CartLine::new(&product(1, 1_00)?, 1)?;

        let duplicate = Cart::from_lines([line.clone(), line.clone()]);
        assert_eq!(duplicate, Err(CartError::DuplicateProduct(1, line.id)));

        let zero = Cart::from_lines([CartLine {
            quantity: 0,
            ..line.clone()
        }]);
        assert_eq!(zero, Err(CartError::ZeroQuantity(line.id)));

        Ok(())
    }

    #[test]
    fn from_lines_recomputes_stale_totals() -> TestResult {
        let line = CartLine {
            total_price: Decimal::new(1, 0),
            ..CartLine::new(&product(1, 2_50)?, 4)?
        };

        let cart = Cart::from_lines([line])?;

        let restored = cart.lines().first().ok_or("missing line")?;
        assert_eq!(restored.total_price, Decimal::new(10_00, 2));

        Ok(())
    }

    #[test]
    fn serializes_as_camel_case_array() -> TestResult {
        let cart = Cart::new().with_product(&product(1, 10_00)?, 2)?;

        let json: serde_json::Value = serde_json::to_value(&cart)?;

        let first = json.get(0).ok_or("expected an array")?;
        assert_eq!(first.get("quantity"), Some(&serde_json::json!(2)));
        assert_eq!(first.get("totalPrice"), Some(&serde_json::json!(20.0)));
        assert_eq!(first.get("price"), Some(&serde_json::json!(10.0)));

        Ok(())
    }
}
