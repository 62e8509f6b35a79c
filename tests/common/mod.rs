//! Common test utilities for awspricing-rs
//!
//! Shared infrastructure for integration and e2e tests:
//! - Price-list document factories mirroring the public distribution's shape
//! - A resolver-config helper pointing at a mock server

pub mod fixtures;

pub use fixtures::OfferDocumentFactory;

use awspricing_rs::config::ResolverConfig;

/// Resolver configuration pointing the public client at a mock server
pub fn mock_config(base_url: &str) -> ResolverConfig {
    ResolverConfig {
        price_list_base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..ResolverConfig::default()
    }
}
