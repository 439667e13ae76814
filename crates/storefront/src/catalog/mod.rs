//! Catalog feed client.
//!
//! The catalog is a remote JSON feed returning the full product list in one
//! request - no pagination, no auth, no retry. Responses are cached with
//! `moka` (5-minute TTL) so the grid and lookups don't refetch per request.

mod conversions;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use lumora_core::types::Product;

use conversions::{ProductRecord, convert_products};

/// How long a fetched catalog stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Single cache entry key; the feed has no sub-resources.
const CACHE_KEY_PRODUCTS: &str = "products";

/// Errors that can occur when loading the catalog feed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed body was not the expected JSON array.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No product with the requested name.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Client for the remote catalog feed.
///
/// Cheaply cloneable; the HTTP client and cache are shared.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<String, Vec<Product>>,
}

impl CatalogClient {
    /// Create a new catalog client for `endpoint`.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint,
                cache,
            }),
        }
    }

    /// Fetch the full product list, in feed order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a JSON
    /// array of product records.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(products) = self.inner.cache.get(CACHE_KEY_PRODUCTS).await {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;

        // Read as text first for better error diagnostics
        let body = response.text().await?;
        let records: Vec<ProductRecord> = serde_json::from_str(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog feed"
            );
        })?;

        let products = convert_products(records);
        self.inner
            .cache
            .insert(CACHE_KEY_PRODUCTS.to_string(), products.clone())
            .await;

        Ok(products)
    }

    /// Get a product by its name key.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product carries the name, or an error if
    /// the feed request fails.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn get_product_by_name(&self, name: &str) -> Result<Product, CatalogError> {
        let products = self.list_products().await?;
        products
            .into_iter()
            .find(|product| product.name == name)
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("Shirt".to_string());
        assert_eq!(err.to_string(), "Not found: Shirt");
    }
}
