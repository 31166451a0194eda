//! Cart lines.

use serde::{Deserialize, Serialize};

use super::coerce::{lenient_id, lenient_quantity, lenient_text};
use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// One product in the cart.
///
/// Name and unit price are snapshots taken when the product was first added;
/// later catalog edits do not reach them. The product reference may dangle
/// after the product is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id", default, deserialize_with = "lenient_id")]
    pub product_id: ProductId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(rename = "price", default)]
    pub unit_price: Price,
    /// Always at least 1.
    #[serde(rename = "qty", default = "one", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
}

const fn one() -> u32 {
    1
}

impl CartLine {
    /// A new line for `product` with quantity 1.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}
