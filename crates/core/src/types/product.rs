//! Catalog product type.

use serde::{Deserialize, Serialize};

use super::price::Price;

/// Shown whenever a product has no photos of its own.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

/// A catalog product, immutable once parsed from the feed.
///
/// The product name doubles as its key: the feed carries no stable id, so
/// carts and lookups match on `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name and uniqueness key.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Photo URLs in display order.
    #[serde(default)]
    pub photos: Vec<String>,
    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Create a product with no photos and no description.
    #[must_use]
    pub const fn new(name: String, price: Price) -> Self {
        Self {
            name,
            price,
            photos: Vec::new(),
            description: None,
        }
    }

    /// Parse the feed's pipe-delimited photo list.
    ///
    /// Entries are trimmed and empties dropped, so `"a.jpg| b.jpg||"` yields
    /// two URLs.
    #[must_use]
    pub fn parse_photo_list(raw: &str) -> Vec<String> {
        raw.split('|')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from)
            .collect()
    }

    /// The first photo, or the placeholder when the product has none.
    #[must_use]
    pub fn primary_photo(&self) -> &str {
        self.photos.first().map_or(PLACEHOLDER_IMAGE, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_photo_list_trims_and_drops_empties() {
        let photos = Product::parse_photo_list("a.jpg| b.jpg ||c.jpg");
        assert_eq!(photos, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_parse_photo_list_all_empty() {
        assert!(Product::parse_photo_list(" | | ").is_empty());
    }

    #[test]
    fn test_primary_photo_falls_back_to_placeholder() {
        let product = Product::new("Shirt".to_string(), Price::from_major_units(500.0));
        assert_eq!(product.primary_photo(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_primary_photo_uses_first() {
        let mut product = Product::new("Shirt".to_string(), Price::from_major_units(500.0));
        product.photos = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        assert_eq!(product.primary_photo(), "a.jpg");
    }
}
