//! HTTP catalog client.

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    products::{Product, ProductId},
};

/// HTTP client for a fakestore-compatible REST catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    http: Client,
}

impl HttpCatalog {
    /// Create a new client for the catalog at `base_url`, e.g. `"https://fakestoreapi.com"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { base_url, http }
    }

    /// Catalog base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}/products/{id}", self.base_url)
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }
}

impl Catalog for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.product_url(id);

        debug!(%url, "fetching product");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "product request failed with status {status}: {text}"
            )));
        }

        let body = response.text().await?;

        decode_product(id, &body)
    }

    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.products_url();

        debug!(%url, "listing products");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "products request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

/// Decode a single-product body.
///
/// The public catalog answers unknown ids with `200` and an empty body, so an
/// empty or `null` body is treated as not found.
fn decode_product(id: ProductId, body: &str) -> Result<Product, CatalogError> {
    let trimmed = body.trim();

    if trimmed.is_empty() || trimmed == "null" {
        return Err(CatalogError::NotFound(id));
    }

    Ok(serde_json::from_str(trimmed)?)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn id(raw: u32) -> TestResult<ProductId> {
        Ok(ProductId::new(raw).ok_or("zero id")?)
    }

    #[test]
    fn urls_ignore_trailing_slash() -> TestResult {
        let catalog = HttpCatalog::new("https://catalog.test/");

        assert_eq!(catalog.base_url(), "https://catalog.test");
        assert_eq!(catalog.product_url(id(4)?), "https://catalog.test/products/4");
        assert_eq!(catalog.products_url(), "https://catalog.test/products");

        Ok(())
    }

    #[test]
    fn empty_and_null_bodies_are_not_found() -> TestResult {
        let missing = id(999)?;

        assert!(matches!(
            decode_product(missing, ""),
            Err(CatalogError::NotFound(found)) if found == missing
        ));
        assert!(matches!(
            decode_product(missing, " null\n"),
            Err(CatalogError::NotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn garbage_body_is_a_decode_error() -> TestResult {
        let result = decode_product(id(1)?, "<html>oops</html>");

        assert!(
            matches!(result, Err(CatalogError::Decode(_))),
            "expected Decode, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn decodes_product_body() -> TestResult {
        let body = r#"{"id":2,"title":"Shirt","price":22.3,"category":"men's clothing","image":"https://catalog.test/2.jpg"}"#;

        let product = decode_product(id(2)?, body)?;

        assert_eq!(product.price, Decimal::new(223, 1));

        Ok(())
    }
}
