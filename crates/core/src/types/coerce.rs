//! Lenient coercion for stored and imported JSON.
//!
//! Catalog files are hand-edited and imported without validation, so numeric
//! fields may arrive as numbers, numeric strings or garbage, and any field may
//! be `null` or missing. These helpers turn all of that into usable values
//! instead of rejecting the document.

use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::id::ProductId;

/// Parse a decimal from free-form text.
///
/// Accepts plain and scientific notation. Returns `None` for anything else.
#[must_use]
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Read a decimal out of an arbitrary JSON value.
#[must_use]
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Convert a decimal into a non-negative count, truncating fractions.
///
/// Negative values become 0 and values beyond `u32::MAX` saturate.
#[must_use]
pub fn decimal_to_count(value: Decimal) -> u32 {
    if value.is_sign_negative() {
        return 0;
    }
    value.trunc().to_u32().unwrap_or(u32::MAX)
}

/// Parse a stock-like count from free-form text, defaulting to 0.
#[must_use]
pub fn parse_count(input: &str) -> u32 {
    parse_decimal(input).map_or(0, decimal_to_count)
}

/// Deserialize a value treating `null` as the type's default.
///
/// Combine with `#[serde(default)]` so a missing field defaults too.
///
/// # Errors
///
/// Returns the deserializer's error if the value is neither `null` nor a `T`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize text from any JSON value: `null` becomes empty and other
/// scalars keep their JSON rendering.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from_value(Value::deserialize(deserializer)?))
}

/// Deserialize a product ID from any JSON value, so numeric IDs from
/// hand-edited files are kept as their text.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(ProductId::from)
}

/// Deserialize a tag list. A bare string becomes a single tag.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(text_from_value).collect(),
        Value::String(tag) if !tag.is_empty() => vec![tag],
        _ => Vec::new(),
    })
}

fn text_from_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Deserialize a count from any JSON value, defaulting to 0.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value).map_or(0, decimal_to_count))
}

/// Deserialize a cart quantity: like [`lenient_count`] but never below 1.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_count(deserializer).map(|qty| qty.max(1))
}

/// Deserialize a flag from any JSON value using truthiness.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!(parse_decimal("54999"), Some(Decimal::from(54_999)));
        assert_eq!(parse_decimal(" 12.5 "), Some(Decimal::new(125, 1)));
        assert_eq!(parse_decimal("1e3"), Some(Decimal::from(1000)));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn test_decimal_from_value() {
        assert_eq!(decimal_from_value(&json!(100)), Some(Decimal::from(100)));
        assert_eq!(decimal_from_value(&json!("100")), Some(Decimal::from(100)));
        assert_eq!(decimal_from_value(&json!(null)), None);
        assert_eq!(decimal_from_value(&json!([1])), None);
    }

    #[test]
    fn test_decimal_to_count() {
        assert_eq!(decimal_to_count(Decimal::new(35, 1)), 3);
        assert_eq!(decimal_to_count(Decimal::from(-4)), 0);
        assert_eq!(decimal_to_count(Decimal::from(u64::MAX)), u32::MAX);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("7"), 7);
        assert_eq!(parse_count("seven"), 0);
        assert_eq!(parse_count("-2"), 0);
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "nullable")]
        name: String,
        #[serde(default, deserialize_with = "lenient_text")]
        label: String,
        #[serde(default, deserialize_with = "lenient_tags")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "lenient_count")]
        stock: u32,
        #[serde(default = "one", deserialize_with = "lenient_quantity")]
        qty: u32,
        #[serde(default, deserialize_with = "lenient_bool")]
        flag: bool,
    }

    const fn one() -> u32 {
        1
    }

    #[test]
    fn test_probe_missing_fields() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.name, "");
        assert_eq!(probe.label, "");
        assert!(probe.tags.is_empty());
        assert_eq!(probe.stock, 0);
        assert_eq!(probe.qty, 1);
        assert!(!probe.flag);
    }

    #[test]
    fn test_probe_messy_fields() {
        let probe: Probe =
            serde_json::from_str(r#"{"name":null,"label":42,"tags":["a",7],"stock":"12","qty":0,"flag":1}"#).unwrap();
        assert_eq!(probe.name, "");
        assert_eq!(probe.label, "42");
        assert_eq!(probe.tags, vec!["a".to_owned(), "7".to_owned()]);
        assert_eq!(probe.stock, 12);
        assert_eq!(probe.qty, 1);
        assert!(probe.flag);
    }
}
