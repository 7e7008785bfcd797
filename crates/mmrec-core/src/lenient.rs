//! Forgiving conversions for host-supplied JSON.
//!
//! Catalog rows come from spreadsheets and scrapers, so a price can be `49.5`,
//! `"49.50"` or `"₹1,299"`, and a brand can be a number. Nothing here fails:
//! anything unusable collapses to an empty string, zero or `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::{Filters, Item};

/// Keep only ASCII digits and `.` and parse the longest leading decimal.
///
/// `"₹1,299.00"` → 1299, `"1.2.3"` → 1.2, `"n/a"` → 0.
pub fn parse_lenient(text: &str) -> f64 {
    let kept: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in kept.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + 1;
    }
    kept[..end].parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Price-style number: sign is discarded, non-numeric input is 0.
pub fn price_of(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).map_or(0.0, f64::abs),
        Value::String(s) => parse_lenient(s),
        _ => 0.0,
    }
}

/// Longest leading decimal of `text` after leading whitespace, with optional
/// sign, fraction and exponent: `"12.5kg"` → 12.5, `"1,299"` → 1, `"about 7"` → `None`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() { i += 1; }
        i
    };
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign { end = exp_end; }
    }
    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Request-style number: keeps the sign, reads the leading decimal of a
/// string, `None` when absent or unusable.
pub fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Text-style field: strings pass through, numbers are printed, everything else is empty.
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

pub fn texts<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(values) => values.iter().map(text_of).collect(),
        _ => Vec::new(),
    })
}

pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(number_of(&Value::deserialize(d)?).unwrap_or(0.0))
}

/// Price bound: read like a catalog price, see [`price_of`].
pub fn price<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(price_of(&Value::deserialize(d)?))
}

pub fn optional_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(number_of(&Value::deserialize(d)?))
}

/// Non-array ⇒ no products. Non-object entries stay as `None` so indices line up.
pub fn products<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Option<Item>>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(values) => values
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => Some(Item::from_map(map)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Integral numbers and integer strings; anything else is dropped.
pub fn indices<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<i64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(values) => values
            .iter()
            .filter_map(|v| match v {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.is_finite()).map(|f| f as i64)),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

pub fn filters<'de, D: Deserializer<'de>>(d: D) -> Result<Filters, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(if value.is_object() { serde_json::from_value(value).unwrap_or_default() } else { Filters::default() })
}
