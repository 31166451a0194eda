//! Catalog products.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::category::Category;
use super::coerce::{lenient_bool, lenient_count, lenient_id, lenient_tags, lenient_text};
use super::id::ProductId;
use super::price::Price;

/// A catalog entry.
///
/// The JSON field names match what the shop has always stored (`desc` for the
/// description). Every field defaults when missing or `null`, so an old or
/// hand-written catalog deserializes into something displayable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub price: Price,
    /// Advisory only. Sales never decrement it.
    #[serde(default, deserialize_with = "lenient_count")]
    pub stock: u32,
    #[serde(rename = "desc", default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Empty, or a `data:` URL with the encoded image.
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: String,
    /// Tags in the order they were entered.
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: bool,
}

/// Deserialize a JSON array of products, keeping every entry.
///
/// Entries that are not product objects (numbers, strings, `null`) become
/// [`Product::default()`] instead of failing the whole list. Only a value
/// that is not an array is an error.
///
/// # Errors
///
/// Returns the deserializer's error if the input is not an array.
pub fn lenient_products<'de, D>(deserializer: D) -> Result<Vec<Product>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| Product::deserialize(entry).unwrap_or_default())
        .collect())
}

impl Product {
    /// Create a product with the given name and price; other fields default.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category, price: Price) -> Self {
        Self {
            name: name.into(),
            category,
            price,
            ..Self::default()
        }
    }

    /// Builder-style stock setter.
    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Builder-style ID setter.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns true if an image has been attached.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// Lowercased text that free-text search matches against: name,
    /// description and tags, separated by spaces.
    #[must_use]
    pub fn search_text(&self) -> String {
        [
            self.name.as_str(),
            self.description.as_str(),
            self.tags.join(" ").as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}
