//! Configuration management for the pricing resolver
//!
//! This module handles defaults, environment loading, and validation of all
//! resolver configuration.

use crate::utils::error::{PricingError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Resolver configuration
    pub resolver: ResolverConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self {
            resolver: ResolverConfig::from_env(),
        };
        config.validate()?;
        debug!("Configuration loaded from environment");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.resolver.validate()
    }
}

/// Resolver configuration: data-source endpoints and defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base URL of the public price list distribution
    #[serde(default = "default_price_list_base_url")]
    pub price_list_base_url: String,
    /// Per-request network read timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Region the Pricing API endpoint lives in (not the region being priced)
    #[serde(default = "default_pricing_api_region")]
    pub pricing_api_region: String,
    /// Currency used when the caller does not pass one
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            price_list_base_url: default_price_list_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            pricing_api_region: default_pricing_api_region(),
            default_currency: default_currency(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from `AWSPRICING_*` environment variables,
    /// falling back to defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            price_list_base_url: std::env::var("AWSPRICING_PRICE_LIST_BASE_URL")
                .unwrap_or(defaults.price_list_base_url),
            request_timeout_secs: std::env::var("AWSPRICING_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            pricing_api_region: std::env::var("AWSPRICING_API_REGION")
                .unwrap_or(defaults.pricing_api_region),
            default_currency: std::env::var("AWSPRICING_CURRENCY")
                .unwrap_or(defaults.default_currency),
        }
    }

    /// Validate field values
    pub fn validate(&self) -> Result<()> {
        if !self.price_list_base_url.starts_with("http") {
            return Err(PricingError::unavailable(format!(
                "Invalid price list base URL: {}",
                self.price_list_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(PricingError::unavailable(
                "Request timeout must be at least 1 second",
            ));
        }
        if self.default_currency.trim().is_empty() {
            return Err(PricingError::unavailable("Default currency must be set"));
        }
        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_price_list_base_url() -> String {
    "https://pricing.us-east-1.amazonaws.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    90
}

fn default_pricing_api_region() -> String {
    // The Pricing API is only served from us-east-1 (and ap-south-1)
    "us-east-1".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}
