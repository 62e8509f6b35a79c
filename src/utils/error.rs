//! Error handling for the pricing pipeline
//!
//! This module defines the error taxonomy used throughout the crate.
//! None of these errors escape the resolver boundary as `Err` — the resolver
//! converts every failure into a `PricingResult` with `error` populated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for the pricing pipeline
pub type Result<T> = std::result::Result<T, PricingError>;

/// Main error type for pricing resolution
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PricingError {
    /// Region code absent from the rate table; fails before any network access
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// A pricing source could not be fetched, parsed, or paginated
    #[error("Pricing source unavailable: {0}")]
    SourceUnavailable(String),

    /// A source was reached but no qualifying product or dimension matched
    #[error("No price found: {0}")]
    NoPriceFound(String),

    /// The authenticated path could not load AWS credentials
    #[error("AWS credentials unavailable: {0}")]
    CredentialsUnavailable(String),
}

impl PricingError {
    /// Create an unknown-region error
    pub fn unknown_region<S: Into<String>>(region: S) -> Self {
        Self::UnknownRegion(region.into())
    }

    /// Create a source-unavailable error
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::SourceUnavailable(message.into())
    }

    /// Create a no-price-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NoPriceFound(message.into())
    }

    /// Create a credentials-unavailable error
    pub fn no_credentials<S: Into<String>>(message: S) -> Self {
        Self::CredentialsUnavailable(message.into())
    }

    /// True for credential failures, which callers message differently
    pub fn is_credentials(&self) -> bool {
        matches!(self, Self::CredentialsUnavailable(_))
    }

    /// The bare message without the variant prefix, for composing diagnostics
    pub fn detail(&self) -> &str {
        match self {
            Self::UnknownRegion(s)
            | Self::SourceUnavailable(s)
            | Self::NoPriceFound(s)
            | Self::CredentialsUnavailable(s) => s,
        }
    }
}
