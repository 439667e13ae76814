//! Conversions from raw feed records to domain types.

use serde::Deserialize;

use lumora_core::types::{Price, Product};

/// A product record as the feed serves it.
///
/// The photo list is a single pipe-delimited string; prices are plain JSON
/// numbers. Both are normalized into [`Product`] here so nothing downstream
/// sees feed quirks.
#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub photos: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

/// Convert one feed record into a domain product.
pub fn convert_product(record: ProductRecord) -> Product {
    Product {
        name: record.name,
        price: Price::from_major_units(record.price),
        photos: record
            .photos
            .as_deref()
            .map(Product::parse_photo_list)
            .unwrap_or_default(),
        description: record.desc.filter(|desc| !desc.trim().is_empty()),
    }
}

/// Convert the full feed, preserving order.
pub fn convert_products(records: Vec<ProductRecord>) -> Vec<Product> {
    records.into_iter().map(convert_product).collect()
}
