//! Domain types shared by the text and ranking crates.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// Separator between levels of `product_category_tree`, e.g. `"Footwear>Sports"`.
pub const CATEGORY_DELIMITER: char = '>';

/// One catalog entry, as the host sends it.
///
/// - `product_name`: display name; items without one are never recommended
/// - `product_category_tree`: hierarchical path, only the first level is a category
/// - `price`: kept exactly as received and echoed back; see [`Item::price_value`]
/// - `reason`: filled in on items returned by the engine
/// - `extra`: any other attributes the host attached, echoed back untouched
///
/// Deserialization never fails on an object: see [`Item::from_map`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Item {
    pub product_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product_category_tree: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub brand: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub price: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        })
    }
}

/// Text under `key`, or under `alias` when `key` is missing or empty.
/// The key that was read is removed; an unused alias stays in `map`.
fn take_text(map: &mut Map<String, Value>, key: &str, alias: &str) -> String {
    let primary = map.remove(key).map(|v| lenient::text_of(&v)).unwrap_or_default();
    if !primary.is_empty() {
        return primary;
    }
    map.remove(alias).map(|v| lenient::text_of(&v)).unwrap_or_default()
}

impl Item {
    /// Field by field from a JSON object. Unusable values become empty
    /// instead of failing the whole item; unknown keys go to `extra`.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let product_name = take_text(&mut map, "product_name", "name");
        let product_category_tree = take_text(&mut map, "product_category_tree", "category");
        let brand = map.remove("brand").map(|v| lenient::text_of(&v)).unwrap_or_default();
        let description = map.remove("description").map(|v| lenient::text_of(&v)).unwrap_or_default();
        let price = map.remove("price").unwrap_or(Value::Null);
        let reason = map.remove("reason").map(|v| lenient::text_of(&v)).filter(|r| !r.is_empty());
        Self { product_name, product_category_tree, brand, description, price, reason, extra: map }
    }

    pub fn new(name: &str, category_tree: &str, brand: &str, price: f64) -> Self {
        Self {
            product_name: name.to_string(),
            product_category_tree: category_tree.to_string(),
            brand: brand.to_string(),
            price: Value::from(price),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn has_name(&self) -> bool {
        !self.product_name.is_empty()
    }

    /// Leniently parsed price; 0 when missing or not a number.
    pub fn price_value(&self) -> f64 {
        lenient::price_of(&self.price)
    }

    /// Whether the host supplied a price worth showing (non-empty text or a non-zero number).
    pub fn has_price(&self) -> bool {
        match &self.price {
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            _ => false,
        }
    }

    /// First level of the category tree, untrimmed.
    pub fn category_head(&self) -> &str {
        self.product_category_tree.split(CATEGORY_DELIMITER).next().unwrap_or("")
    }

    pub fn normalized_category(&self) -> String {
        normalize(self.category_head())
    }

    pub fn normalized_brand(&self) -> String {
        normalize(&self.brand)
    }
}

/// Hard constraints for one request. `0` means "unset" for the price bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(default, deserialize_with = "lenient::texts")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub brands: Vec<String>,
    #[serde(default, deserialize_with = "lenient::price")]
    pub min_price: f64,
    #[serde(default, deserialize_with = "lenient::price")]
    pub max_price: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub brand_boost: f64,
}

/// Case and surrounding-whitespace insensitive key for category/brand matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
