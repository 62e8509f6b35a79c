//! Region code to canonical location mapping
//!
//! Pricing data sources key products by a display-style "location" string,
//! not by region code. This table is the filter key for both clients.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Region code -> canonical location string, as used by the pricing sources
static REGION_TO_LOCATION: &[(&str, &str)] = &[
    ("us-east-1", "US East (N. Virginia)"),
    ("us-east-2", "US East (Ohio)"),
    ("us-west-1", "US West (N. California)"),
    ("us-west-2", "US West (Oregon)"),
    ("af-south-1", "Africa (Cape Town)"),
    ("ap-east-1", "Asia Pacific (Hong Kong)"),
    ("ap-south-1", "Asia Pacific (Mumbai)"),
    ("ap-south-2", "Asia Pacific (Hyderabad)"),
    ("ap-southeast-1", "Asia Pacific (Singapore)"),
    ("ap-southeast-2", "Asia Pacific (Sydney)"),
    ("ap-southeast-3", "Asia Pacific (Jakarta)"),
    ("ap-southeast-4", "Asia Pacific (Melbourne)"),
    ("ap-northeast-1", "Asia Pacific (Tokyo)"),
    ("ap-northeast-2", "Asia Pacific (Seoul)"),
    ("ap-northeast-3", "Asia Pacific (Osaka)"),
    ("ca-central-1", "Canada (Central)"),
    ("ca-west-1", "Canada West (Calgary)"),
    ("eu-central-1", "EU (Frankfurt)"),
    ("eu-central-2", "EU (Zurich)"),
    ("eu-west-1", "EU (Ireland)"),
    ("eu-west-2", "EU (London)"),
    ("eu-west-3", "EU (Paris)"),
    ("eu-north-1", "EU (Stockholm)"),
    ("eu-south-1", "EU (Milan)"),
    ("eu-south-2", "EU (Spain)"),
    ("me-south-1", "Middle East (Bahrain)"),
    ("me-central-1", "Middle East (UAE)"),
    ("sa-east-1", "South America (São Paulo)"),
];

static LOCATION_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| REGION_TO_LOCATION.iter().map(|(k, v)| (*k, *v)).collect());

/// Reverse index: location string -> primary region code
static REGION_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| REGION_TO_LOCATION.iter().map(|(k, v)| (*v, *k)).collect());

/// Canonical location string for a region code, or `None` if unknown
///
/// Region codes are matched case-insensitively with surrounding whitespace
/// ignored.
pub fn location_for_region(region_code: &str) -> Option<&'static str> {
    let normalized = region_code.trim().to_lowercase();
    LOCATION_INDEX.get(normalized.as_str()).copied()
}

/// Region code for a canonical location string, or `None` if unknown
pub fn region_for_location(location: &str) -> Option<&'static str> {
    REGION_INDEX.get(location).copied()
}

/// All supported `(region_code, location)` pairs, in table order
pub fn supported_regions() -> &'static [(&'static str, &'static str)] {
    REGION_TO_LOCATION
}
