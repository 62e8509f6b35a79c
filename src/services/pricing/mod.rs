//! Storage pricing resolution
//!
//! Resolves AWS Backup and S3 storage pricing for a region (and storage
//! class) from two structurally different sources — the public bulk price
//! list and the authenticated Pricing API — and normalizes both into one
//! flat-or-tiered GB-month result.

mod api;
mod public;
pub mod regions;
mod resolver;
mod scan;
mod types;


// Re-export public types
pub use api::PricingApiClient;
pub use public::PublicPriceListClient;
pub use resolver::{PriceSource, PricingApiSource, PricingResolver};
pub use types::{GB_MONTH_UNIT, PricingResult, RateQuote, TierBand};
