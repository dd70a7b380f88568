//! Catalog product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

/// A single catalog item with display fields.
///
/// Matches the static catalog documents: field names are `camelCase`, prices
/// arrive as numeric strings, and descriptions arrive HTML-escaped (decode
/// with [`crate::html::decode_entities`] before display). Immutable once
/// fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Product title.
    pub title: String,
    /// Price in USD, serialized as a numeric string (e.g. `"123.45"`).
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// URL of the large product image.
    pub large_image: Url,
    /// HTML-escaped description markup.
    pub description: String,
}

impl ProductRecord {
    /// Price formatted for display, e.g. `$19.99`.
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE_DOCUMENT: &str = r#"[
        {
            "title": "Classic Crew",
            "price": "19.9",
            "largeImage": "https://shop.example/images/classic-crew.jpg",
            "description": "T-Shirt &amp; Co&#x27;s finest"
        },
        {
            "title": "V-Neck",
            "price": "24.00",
            "largeImage": "https://shop.example/images/v-neck.jpg",
            "description": "Soft cotton"
        }
    ]"#;

    #[test]
    fn test_parses_catalog_document() {
        let list: Vec<ProductRecord> = serde_json::from_str(SAMPLE_DOCUMENT).unwrap();
        assert_eq!(list.len(), 2);

        let first = list.first().unwrap();
        assert_eq!(first.title, "Classic Crew");
        assert_eq!(first.price.to_string(), "19.9");
        assert_eq!(first.large_image.host_str(), Some("shop.example"));
        assert!(first.description.contains("&amp;"));
    }

    #[test]
    fn test_rejects_non_numeric_price() {
        let doc = r#"[{
            "title": "Bad",
            "price": "free",
            "largeImage": "https://shop.example/x.jpg",
            "description": ""
        }]"#;
        assert!(serde_json::from_str::<Vec<ProductRecord>>(doc).is_err());
    }

    #[test]
    fn test_display_price_pads_to_two_decimals() {
        let list: Vec<ProductRecord> = serde_json::from_str(SAMPLE_DOCUMENT).unwrap();
        assert_eq!(list.first().unwrap().display_price(), "$19.90");
        assert_eq!(list.get(1).unwrap().display_price(), "$24.00");
    }

    #[test]
    fn test_serializes_price_as_string() {
        let list: Vec<ProductRecord> = serde_json::from_str(SAMPLE_DOCUMENT).unwrap();
        let json = serde_json::to_value(list.first().unwrap()).unwrap();
        assert_eq!(json["price"], "19.9");
        assert!(json["largeImage"].is_string());
    }
}
