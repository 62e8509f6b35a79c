//! Type definitions for pricing resolution

use crate::utils::error::PricingError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Unit label every resolved rate is normalized to
pub const GB_MONTH_UNIT: &str = "GB-Mo";

/// One usage tier: `[from_gb, to_gb)` billed at a fixed per-GB-month rate
///
/// `to_gb` of `None` marks an open-ended final band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    /// Inclusive lower bound in GB
    pub from_gb: f64,
    /// Exclusive upper bound in GB; `None` means unbounded
    pub to_gb: Option<f64>,
    /// Rate per GB-month in the result's currency
    pub rate_per_gb_month: f64,
}

impl TierBand {
    /// Create a tier band
    pub fn new(from_gb: f64, to_gb: Option<f64>, rate_per_gb_month: f64) -> Self {
        Self {
            from_gb,
            to_gb,
            rate_per_gb_month,
        }
    }

    /// Band width in GB, `None` for an open-ended band
    pub fn width(&self) -> Option<f64> {
        self.to_gb.map(|to| to - self.from_gb)
    }
}

/// Normalized rate shape: a single flat rate or an ordered tier sequence
///
/// The two representations are mutually exclusive by construction; use
/// [`RateQuote::from_bands`] to apply the collapse rule uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateQuote {
    /// One rate applicable to all volume
    Flat {
        /// Rate per GB-month
        rate_per_gb_month: f64,
    },
    /// Ascending, contiguous tier bands; the last band may be open-ended
    Tiered {
        /// Bands sorted ascending by `from_gb`
        tiers: Vec<TierBand>,
    },
}

impl RateQuote {
    /// Build a quote from collected bands, sorting ascending by `from_gb`
    ///
    /// Returns `None` for an empty collection. Exactly one open-ended band
    /// collapses to a flat rate; anything else stays tiered.
    pub fn from_bands(mut bands: Vec<TierBand>) -> Option<Self> {
        if bands.is_empty() {
            return None;
        }
        bands.sort_by(|a, b| a.from_gb.total_cmp(&b.from_gb));
        if bands.len() == 1 && bands[0].to_gb.is_none() {
            return Some(Self::Flat {
                rate_per_gb_month: bands[0].rate_per_gb_month,
            });
        }
        Some(Self::Tiered { tiers: bands })
    }

    /// The flat rate, if this quote is flat
    pub fn flat_rate(&self) -> Option<f64> {
        match self {
            Self::Flat { rate_per_gb_month } => Some(*rate_per_gb_month),
            Self::Tiered { .. } => None,
        }
    }

    /// The tier bands, if this quote is tiered
    pub fn tiers(&self) -> Option<&[TierBand]> {
        match self {
            Self::Flat { .. } => None,
            Self::Tiered { tiers } => Some(tiers),
        }
    }
}

/// Normalized, source-agnostic pricing result
///
/// Constructed fresh per resolution call and never mutated afterwards.
/// `error` and `quote` are mutually exclusive: the constructors do not allow
/// a result that reports both a usable rate and a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingResult {
    /// Flat rate or tier bands; `None` when resolution failed
    pub quote: Option<RateQuote>,
    /// Unit label after normalization (always GB-month)
    pub unit: String,
    /// Currency code the rate is expressed in
    pub currency: String,
    /// Source product identifier
    pub sku: Option<String>,
    /// Source product attributes, kept for diagnostics
    pub product_attributes: HashMap<String, String>,
    /// Pricing term the rate came from (e.g. OnDemand, Reserved)
    pub term_code: Option<String>,
    /// Raw price dimension the rate was extracted from
    pub price_dimension: Option<Value>,
    /// The filter/query that produced this result, for diagnostics
    pub raw_filter: Value,
    /// When this result was resolved
    pub resolved_at: DateTime<Utc>,
    /// Why resolution failed, if it did
    pub error: Option<PricingError>,
}

impl PricingResult {
    /// Build a successful result carrying a usable quote
    pub fn found(quote: RateQuote, currency: &str, raw_filter: Value) -> Self {
        Self {
            quote: Some(quote),
            unit: GB_MONTH_UNIT.to_string(),
            currency: currency.to_string(),
            sku: None,
            product_attributes: HashMap::new(),
            term_code: None,
            price_dimension: None,
            raw_filter,
            resolved_at: Utc::now(),
            error: None,
        }
    }

    /// Build a failed result; no rate and no tiers, error populated
    pub fn failure(error: PricingError, raw_filter: Value) -> Self {
        Self {
            quote: None,
            unit: GB_MONTH_UNIT.to_string(),
            currency: "USD".to_string(),
            sku: None,
            product_attributes: HashMap::new(),
            term_code: None,
            price_dimension: None,
            raw_filter,
            resolved_at: Utc::now(),
            error: Some(error),
        }
    }

    /// Attach source-product diagnostics to a successful result
    pub fn with_product(
        mut self,
        sku: Option<String>,
        attributes: HashMap<String, String>,
        term_code: &str,
        price_dimension: Option<Value>,
    ) -> Self {
        self.sku = sku;
        self.product_attributes = attributes;
        self.term_code = Some(term_code.to_string());
        self.price_dimension = price_dimension;
        self
    }

    /// True when this result carries a rate or tiers and no error
    pub fn is_usable(&self) -> bool {
        self.error.is_none() && self.quote.is_some()
    }

    /// The flat rate, when present
    pub fn rate_per_gb_month(&self) -> Option<f64> {
        self.quote.as_ref().and_then(RateQuote::flat_rate)
    }

    /// The tier bands, when present
    pub fn tiers(&self) -> Option<&[TierBand]> {
        self.quote.as_ref().and_then(RateQuote::tiers)
    }
}
