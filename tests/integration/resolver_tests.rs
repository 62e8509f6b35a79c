//! Resolver precedence and failure-merging tests over stub sources

use async_trait::async_trait;
use awspricing_rs::services::pricing::{
    PriceSource, PricingResolver, PricingResult, RateQuote, TierBand,
};
use awspricing_rs::utils::error::PricingError;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source stub returning a canned result and counting invocations
struct StubSource {
    name: &'static str,
    result: PricingResult,
    calls: AtomicUsize,
}

impl StubSource {
    fn new(name: &'static str, result: PricingResult) -> Arc<Self> {
        Arc::new(Self {
            name,
            result,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for StubSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn backup_storage(&self, _region_code: &str, _currency: &str) -> PricingResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    async fn s3_storage(
        &self,
        _region_code: &str,
        _storage_class: &str,
        _currency: &str,
    ) -> PricingResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

fn resolver_over(
    primary: &Arc<StubSource>,
    fallback: &Arc<StubSource>,
) -> PricingResolver {
    PricingResolver::with_sources(
        vec![
            primary.clone() as Arc<dyn PriceSource>,
            fallback.clone() as Arc<dyn PriceSource>,
        ],
        "USD",
    )
}

fn usable_flat(rate: f64) -> PricingResult {
    PricingResult::found(
        RateQuote::Flat {
            rate_per_gb_month: rate,
        },
        "USD",
        json!({"stub": true}),
    )
}

fn usable_partial_tiers() -> PricingResult {
    // A single bounded band: usable but incomplete tier coverage
    let quote = RateQuote::from_bands(vec![TierBand::new(0.0, Some(51200.0), 0.023)])
        .expect("bands collapse");
    PricingResult::found(quote, "USD", json!({"stub": true}))
}

#[tokio::test]
async fn test_usable_public_result_is_final_even_when_partial() {
    let primary = StubSource::new("public-stub", usable_partial_tiers());
    let fallback = StubSource::new("api-stub", usable_flat(0.022));
    let resolver = resolver_over(&primary, &fallback);

    let result = resolver.s3_storage("us-east-1", Some("Standard"), None).await;

    assert!(result.is_usable());
    assert_eq!(result.quote, usable_partial_tiers().quote);
    assert_eq!(primary.calls(), 1);
    // The fallback source must not be consulted at all
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn test_fallback_consulted_when_primary_has_no_data() {
    let primary = StubSource::new(
        "public-stub",
        PricingResult::failure(
            PricingError::not_found("nothing in the public list"),
            json!({}),
        ),
    );
    let fallback = StubSource::new("api-stub", usable_flat(0.05));
    let resolver = resolver_over(&primary, &fallback);

    let result = resolver.backup_storage("us-east-1", None).await;

    assert!(result.is_usable());
    assert_eq!(result.rate_per_gb_month(), Some(0.05));
    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 1);
}

#[tokio::test]
async fn test_credentials_failure_defers_to_primary_error() {
    let primary_error = PricingError::not_found("nothing in the public list");
    let primary = StubSource::new(
        "public-stub",
        PricingResult::failure(primary_error.clone(), json!({})),
    );
    let fallback = StubSource::new(
        "api-stub",
        PricingResult::failure(
            PricingError::no_credentials("no credentials configured"),
            json!({}),
        ),
    );
    let resolver = resolver_over(&primary, &fallback);

    let result = resolver.backup_storage("us-east-1", None).await;

    // The primary's message is the actionable one
    assert!(!result.is_usable());
    assert_eq!(result.error, Some(primary_error));
}

#[tokio::test]
async fn test_non_credential_fallback_failure_wins() {
    let primary = StubSource::new(
        "public-stub",
        PricingResult::failure(
            PricingError::not_found("nothing in the public list"),
            json!({}),
        ),
    );
    let fallback_error = PricingError::unavailable("GetProducts failed: timeout");
    let fallback = StubSource::new(
        "api-stub",
        PricingResult::failure(fallback_error.clone(), json!({})),
    );
    let resolver = resolver_over(&primary, &fallback);

    let result = resolver.backup_storage("us-east-1", None).await;

    assert!(!result.is_usable());
    assert_eq!(result.error, Some(fallback_error));
}

#[tokio::test]
async fn test_unknown_region_fails_before_any_source() {
    let primary = StubSource::new("public-stub", usable_flat(0.023));
    let fallback = StubSource::new("api-stub", usable_flat(0.022));
    let resolver = resolver_over(&primary, &fallback);

    let result = resolver.s3_storage("xx-unknown-1", None, None).await;

    assert_eq!(
        result.error,
        Some(PricingError::UnknownRegion("xx-unknown-1".to_string()))
    );
    assert_eq!(primary.calls(), 0);
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn test_backup_precedence_matches_s3_precedence() {
    let primary = StubSource::new("public-stub", usable_flat(0.05));
    let fallback = StubSource::new("api-stub", usable_flat(0.01));
    let resolver = resolver_over(&primary, &fallback);

    let result = resolver.backup_storage("eu-west-1", Some("USD")).await;

    assert_eq!(result.rate_per_gb_month(), Some(0.05));
    assert_eq!(fallback.calls(), 0);
}
