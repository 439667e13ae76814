//! Integration tests for Lumora.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront against a reachable catalog feed
//! STOREFRONT_CATALOG_URL=... cargo run -p lumora-storefront
//!
//! # Run integration tests (ignored by default)
//! cargo test -p lumora-integration-tests -- --ignored
//! ```
//!
//! The tests drive a running server over HTTP with a cookie-holding client,
//! so each test gets its own visitor session and cart.

use reqwest::Client;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create a client that keeps its session cookie between requests.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized.
#[must_use]
pub fn visitor_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Extract the first product name from rendered grid HTML.
///
/// Every card carries a `<input type="hidden" name="name" value="...">`;
/// the tests use whatever product the live feed serves first.
#[must_use]
pub fn extract_first_product_name(html: &str) -> Option<String> {
    let marker = "name=\"name\" value=\"";
    let start = html.find(marker)? + marker.len();
    let rest = html.get(start..)?;
    let end = rest.find('"')?;
    rest.get(..end).map(String::from)
}

/// Extract the transition generation from rendered quick-view HTML.
///
/// The modal fragment schedules its completion with
/// `hx-vals='{"generation": N}'`.
#[must_use]
pub fn extract_generation(html: &str) -> Option<u64> {
    let marker = "{\"generation\": ";
    let start = html.find(marker)? + marker.len();
    let rest = html.get(start..)?;
    let end = rest.find('}')?;
    rest.get(..end)?.trim().parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_product_name() {
        let html = r#"<form><input type="hidden" name="name" value="Linen Shirt"></form>"#;
        assert_eq!(
            extract_first_product_name(html).unwrap(),
            "Linen Shirt"
        );
        assert!(extract_first_product_name("<div></div>").is_none());
    }

    #[test]
    fn test_extract_generation() {
        let html = r#"<div hx-vals='{"generation": 42}' hx-trigger="load delay:400ms"></div>"#;
        assert_eq!(extract_generation(html).unwrap(), 42);
        assert!(extract_generation("<div></div>").is_none());
    }
}
