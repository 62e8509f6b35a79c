//! Pricing resolver
//!
//! Orchestrates an ordered list of pricing sources per category. The public
//! price list is always consulted first; a usable result from it is final,
//! even when partially populated — the authenticated source is never asked
//! to second-guess it.

use super::api::PricingApiClient;
use super::public::PublicPriceListClient;
use super::regions;
use super::types::PricingResult;
use crate::config::ResolverConfig;
use crate::utils::error::PricingError;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Storage class used when the caller does not pass one
const DEFAULT_STORAGE_CLASS: &str = "Standard";

/// One pricing data source in the resolver's strategy list
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Short source name for logs
    fn name(&self) -> &'static str;

    /// Resolve AWS Backup storage pricing
    async fn backup_storage(&self, region_code: &str, currency: &str) -> PricingResult;

    /// Resolve S3 storage pricing for a storage class
    async fn s3_storage(
        &self,
        region_code: &str,
        storage_class: &str,
        currency: &str,
    ) -> PricingResult;
}

#[async_trait]
impl PriceSource for PublicPriceListClient {
    fn name(&self) -> &'static str {
        "public-price-list"
    }

    async fn backup_storage(&self, region_code: &str, currency: &str) -> PricingResult {
        self.resolve_backup_storage(region_code, currency).await
    }

    async fn s3_storage(
        &self,
        region_code: &str,
        storage_class: &str,
        currency: &str,
    ) -> PricingResult {
        self.resolve_s3_storage(region_code, storage_class, currency)
            .await
    }
}

/// Authenticated Pricing API as a resolver source
///
/// The SDK client is constructed per call, so credentials are only required
/// once the public list has already come up empty.
#[derive(Debug, Clone)]
pub struct PricingApiSource {
    endpoint_region: String,
}

impl PricingApiSource {
    /// Create a source targeting the configured Pricing API endpoint region
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            endpoint_region: config.pricing_api_region.clone(),
        }
    }
}

#[async_trait]
impl PriceSource for PricingApiSource {
    fn name(&self) -> &'static str {
        "pricing-api"
    }

    async fn backup_storage(&self, region_code: &str, currency: &str) -> PricingResult {
        match PricingApiClient::connect(&self.endpoint_region).await {
            Ok(client) => client.resolve_backup_storage(region_code, currency).await,
            Err(e) => PricingResult::failure(e, json!({"region": region_code})),
        }
    }

    async fn s3_storage(
        &self,
        region_code: &str,
        storage_class: &str,
        currency: &str,
    ) -> PricingResult {
        match PricingApiClient::connect(&self.endpoint_region).await {
            Ok(client) => {
                client
                    .resolve_s3_storage(region_code, storage_class, currency)
                    .await
            }
            Err(e) => PricingResult::failure(
                e,
                json!({"region": region_code, "storageClass": storage_class}),
            ),
        }
    }
}

/// Resolves pricing through an ordered list of sources
pub struct PricingResolver {
    sources: Vec<Arc<dyn PriceSource>>,
    default_currency: String,
}

impl PricingResolver {
    /// Create a resolver with the standard source order:
    /// public price list, then the authenticated Pricing API
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            sources: vec![
                Arc::new(PublicPriceListClient::new(config)),
                Arc::new(PricingApiSource::new(config)),
            ],
            default_currency: config.default_currency.clone(),
        }
    }

    /// Create a resolver over explicit sources, in resolution order
    pub fn with_sources(sources: Vec<Arc<dyn PriceSource>>, default_currency: &str) -> Self {
        Self {
            sources,
            default_currency: default_currency.to_string(),
        }
    }

    /// Resolve AWS Backup storage pricing for a region
    pub async fn backup_storage(
        &self,
        region_code: &str,
        currency: Option<&str>,
    ) -> PricingResult {
        let currency = currency.unwrap_or(&self.default_currency);
        if regions::location_for_region(region_code).is_none() {
            return PricingResult::failure(
                PricingError::unknown_region(region_code),
                json!({"region": region_code}),
            );
        }

        let mut last: Option<PricingResult> = None;
        for source in &self.sources {
            let result = source.backup_storage(region_code, currency).await;
            if result.is_usable() {
                debug!("Resolved Backup storage pricing via {}", source.name());
                return result;
            }
            debug!("Source {} returned no usable Backup pricing", source.name());
            last = Some(merge_failures(last, result));
        }
        last.unwrap_or_else(|| no_sources_result(region_code))
    }

    /// Resolve S3 storage pricing for a region and storage class
    pub async fn s3_storage(
        &self,
        region_code: &str,
        storage_class: Option<&str>,
        currency: Option<&str>,
    ) -> PricingResult {
        let currency = currency.unwrap_or(&self.default_currency);
        let storage_class = storage_class.unwrap_or(DEFAULT_STORAGE_CLASS);
        if regions::location_for_region(region_code).is_none() {
            return PricingResult::failure(
                PricingError::unknown_region(region_code),
                json!({"region": region_code}),
            );
        }

        let mut last: Option<PricingResult> = None;
        for source in &self.sources {
            let result = source
                .s3_storage(region_code, storage_class, currency)
                .await;
            if result.is_usable() {
                debug!("Resolved S3 storage pricing via {}", source.name());
                return result;
            }
            debug!("Source {} returned no usable S3 pricing", source.name());
            last = Some(merge_failures(last, result));
        }
        last.unwrap_or_else(|| no_sources_result(region_code))
    }
}

/// Pick which failed result to carry forward
///
/// A later credentials failure is less actionable than whatever an earlier
/// source already reported, so the earlier failure wins in that case; any
/// other failure from a later source replaces the earlier one.
fn merge_failures(previous: Option<PricingResult>, next: PricingResult) -> PricingResult {
    match previous {
        Some(prev)
            if prev.error.is_some()
                && next
                    .error
                    .as_ref()
                    .is_some_and(|e| e.is_credentials()) =>
        {
            prev
        }
        _ => next,
    }
}

fn no_sources_result(region_code: &str) -> PricingResult {
    PricingResult::failure(
        PricingError::not_found("No pricing sources are configured"),
        json!({"region": region_code}),
    )
}
