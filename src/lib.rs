//! # awspricing-rs
//!
//! Live AWS Backup vs S3 versioning storage cost calculator.
//!
//! Resolves storage pricing for a region (and S3 storage class) from two
//! structurally different sources, normalizes both into a single flat-or-
//! tiered GB-month representation, and computes monthly cost comparisons
//! on top of it.
//!
//! ## Features
//!
//! - **Public-first resolution**: the bulk public price list needs no
//!   credentials and is always tried first
//! - **Authenticated fallback**: the paginated Pricing API fills the gaps
//!   the public list leaves (observed for Backup)
//! - **One normalized shape**: heterogeneous tier/flat rate structures
//!   collapse into a single [`services::pricing::RateQuote`]
//! - **Never throws**: every failure degrades to a result with a typed
//!   error; callers get "no price available, here is why", not a crash
//! - **Pure cost engine**: TB/GB conversion, versioning overhead, copy
//!   multipliers, tier walking, and strategy deltas with no hidden state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use awspricing_rs::config::Config;
//! use awspricing_rs::services::pricing::PricingResolver;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let resolver = PricingResolver::new(&config.resolver);
//!
//!     let result = resolver.s3_storage("us-east-1", Some("Standard"), None).await;
//!     match &result.quote {
//!         Some(quote) => println!("S3 Standard: {quote:?}"),
//!         None => println!("No price: {:?}", result.error),
//!     }
//! }
//! ```
//!
//! ## Cost math
//!
//! ```rust
//! use awspricing_rs::services::cost::{self, TbConversion};
//!
//! let gb = cost::tb_to_gb(10.0, TbConversion::Binary);
//! assert_eq!(gb, 10240.0);
//! assert_eq!(cost::copy_multiplier(2), 3.0);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::{Config, ResolverConfig};
pub use utils::error::{PricingError, Result};

// Export the pricing pipeline
pub use services::pricing::{
    PriceSource, PricingApiClient, PricingApiSource, PricingResolver, PricingResult,
    PublicPriceListClient, RateQuote, TierBand, regions,
};

// Export the cost engine
pub use services::cost::{
    ComparisonInputs, CostComparison, StrategyCost, TbConversion, compare_backup_vs_versioning,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
