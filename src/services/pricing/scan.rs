//! Scanning helpers for product/term/dimension documents
//!
//! Both pricing sources emit the same class of nested JSON (products with
//! attributes, terms keyed by type, price dimensions with per-currency
//! prices), but with inconsistent field naming. These helpers do the
//! tolerant extraction; a record any of them cannot make sense of is
//! skipped by the caller, never fatal.

use serde_json::Value;
use std::collections::HashMap;

/// Parse a JSON number or numeric string into an `f64`
///
/// The public list writes prices and ranges as strings (`"0.0230000000"`,
/// `"Inf"`); the paginated API sometimes uses plain numbers.
pub(super) fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// String attribute lookup, empty string when absent or non-string
pub(super) fn attr<'a>(attrs: &'a Value, key: &str) -> &'a str {
    attrs.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Copy a product's attribute object into an owned map for diagnostics
pub(super) fn attrs_to_map(attrs: &Value) -> HashMap<String, String> {
    attrs
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// Normalize a priced unit to GB-month; `None` rejects the dimension
pub(super) fn normalize_to_gb_month(price_per_unit: f64, unit: &str) -> Option<f64> {
    let u = unit.trim().to_lowercase();
    if u.contains("gb-mo") || u.contains("gb-month") || u == "gb" {
        return Some(price_per_unit);
    }
    None
}

/// Extract `(price, unit)` from a price dimension in the requested currency
///
/// Returns `None` when the currency key is missing or the price is not
/// numeric.
pub(super) fn parse_price_dimension(dim: &Value, currency: &str) -> Option<(f64, String)> {
    let unit = attr(dim, "unit").to_string();
    let price = dim
        .get("pricePerUnit")
        .and_then(|pu| pu.get(currency))
        .and_then(value_to_f64)?;
    Some((price, unit))
}

/// A non-negative GB-month rate from a price dimension, or `None` to skip it
pub(super) fn usable_rate(dim: &Value, currency: &str) -> Option<f64> {
    let (price, unit) = parse_price_dimension(dim, currency)?;
    let rate = normalize_to_gb_month(price, &unit)?;
    if rate < 0.0 {
        return None;
    }
    Some(rate)
}

/// Usage-range bounds from a price dimension, in GB
///
/// Supports both `beginRange`/`endRange` and `startingRange`/`endingRange`
/// naming. Missing or malformed bounds default to `[0, unbounded)`; an
/// infinite end value is treated as unbounded.
pub(super) fn range_from_dim(dim: &Value) -> (f64, Option<f64>) {
    let start = dim
        .get("beginRange")
        .or_else(|| dim.get("startingRange"))
        .and_then(value_to_f64)
        .unwrap_or(0.0);
    let end = dim
        .get("endRange")
        .or_else(|| dim.get("endingRange"))
        .and_then(value_to_f64)
        .filter(|e| e.is_finite());
    (start, end)
}

/// True if a product's attributes look like Backup storage at the location
pub(super) fn backup_storage_match(attrs: &Value, location: &str) -> bool {
    if attr(attrs, "location").trim() != location {
        return false;
    }
    let family = attr(attrs, "productFamily").trim().to_lowercase();
    if matches!(family.as_str(), "storage" | "backup storage" | "backup") {
        return true;
    }
    let usage_type = {
        let ut = attr(attrs, "usagetype");
        if ut.is_empty() {
            attr(attrs, "usageType")
        } else {
            ut
        }
    }
    .to_lowercase();
    if usage_type.contains("backup") && usage_type.contains("storage") {
        return true;
    }
    !family.is_empty() && family.contains("storage")
}

/// Relaxed storage-class comparison for the public list
///
/// The public list names classes inconsistently ("General Purpose" for
/// Standard, "Standard-IA", ...). Accepts an exact match, either side as a
/// case-insensitive substring of the other, or — when Standard is requested —
/// any class mentioning "general". A product without a class attribute
/// passes.
pub(super) fn s3_storage_class_match(attrs: &Value, storage_class: &str) -> bool {
    let sc = {
        let sc = attr(attrs, "storageClass");
        if sc.is_empty() {
            attr(attrs, "storage class")
        } else {
            sc
        }
    }
    .trim()
    .to_lowercase();
    if sc.is_empty() {
        return true;
    }
    let want = storage_class.trim().to_lowercase();
    if want == "standard" && (sc.contains("general") || sc == "standard") {
        return true;
    }
    want == sc || sc.contains(&want) || want.contains(&sc)
}
