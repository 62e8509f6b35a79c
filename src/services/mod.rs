//! Services module
//!
//! Pricing resolution and the cost arithmetic layered on top of it.

pub mod cost;
pub mod pricing;

pub use cost::{
    ComparisonInputs, CostComparison, StrategyCost, TbConversion, compare_backup_vs_versioning,
};
pub use pricing::{
    PriceSource, PricingApiClient, PricingApiSource, PricingResolver, PricingResult,
    PublicPriceListClient, RateQuote, TierBand,
};
