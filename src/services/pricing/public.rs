//! Public price list client
//!
//! Resolves storage pricing from the bulk, versioned price-list distribution
//! that needs no credentials. The distribution is a tree of JSON documents:
//! a top-level index of service offers, then one offer document per service
//! (global or per region) holding products, terms, and price dimensions.

use super::regions;
use super::scan;
use super::types::{PricingResult, RateQuote, TierBand};
use crate::config::ResolverConfig;
use crate::utils::error::{PricingError, Result};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

/// Service code for S3 in the public offers index
const SERVICE_CODE_S3: &str = "AmazonS3";
/// Known offer code for Backup; price-list snapshots have used others
const SERVICE_CODE_BACKUP: &str = "AWSBackup";
/// The public distribution rejects requests without a User-Agent
const CLIENT_USER_AGENT: &str = "awspricing-rs/0.1 (public price list client)";

/// Outcome of walking the offer-document URL fallbacks
#[derive(Default)]
struct OfferFetch {
    document: Option<Value>,
    url: Option<String>,
    error: String,
}

/// Client for the public, unauthenticated price list
#[derive(Debug, Clone)]
pub struct PublicPriceListClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl PublicPriceListClient {
    /// Create a client from resolver configuration
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.price_list_base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
        }
    }

    /// Resolve AWS Backup storage pricing for a region
    ///
    /// Tries the offer code discovered from the index first, then the known
    /// code. Uses a relaxed product filter because Backup storage products
    /// are labeled inconsistently across snapshots.
    pub async fn resolve_backup_storage(&self, region_code: &str, currency: &str) -> PricingResult {
        let Some(location) = regions::location_for_region(region_code) else {
            return PricingResult::failure(
                PricingError::unknown_region(region_code),
                json!({"region": region_code}),
            );
        };

        let mut candidates: Vec<String> = Vec::new();
        if let Some(code) = self.discover_backup_offer_code().await {
            candidates.push(code);
        }
        if !candidates.iter().any(|c| c == SERVICE_CODE_BACKUP) {
            candidates.push(SERVICE_CODE_BACKUP.to_string());
        }

        let mut fetch = OfferFetch::default();
        for code in &candidates {
            fetch = self.fetch_offer_document(code, region_code).await;
            if fetch.document.is_some() {
                break;
            }
        }

        let Some(document) = fetch.document else {
            let hint = if fetch.error.is_empty() {
                "Try the Pricing API with credentials for Backup.".to_string()
            } else {
                fetch.error
            };
            return PricingResult::failure(
                PricingError::unavailable(format!(
                    "AWS Backup is not in the public price list. {hint}"
                )),
                json!({"service": "AWS Backup", "region": region_code, "url": fetch.url}),
            );
        };

        let raw_filter = json!({
            "service": "AWS Backup (public)",
            "location": location,
            "url": fetch.url,
        });
        match scan_offer_document(&document, currency, raw_filter.clone(), |attrs| {
            scan::backup_storage_match(attrs, location)
        }) {
            Some(result) => result,
            None => PricingResult::failure(
                PricingError::not_found(
                    "AWS Backup storage is not in the public price list for this region. \
                     The S3 comparison can still use public pricing.",
                ),
                raw_filter,
            ),
        }
    }

    /// Resolve S3 storage pricing for a region and storage class
    ///
    /// Filters on the Storage product family, the canonical location, and a
    /// relaxed storage-class comparison; reports a flat rate or tier bands.
    pub async fn resolve_s3_storage(
        &self,
        region_code: &str,
        storage_class: &str,
        currency: &str,
    ) -> PricingResult {
        let Some(location) = regions::location_for_region(region_code) else {
            return PricingResult::failure(
                PricingError::unknown_region(region_code),
                json!({"region": region_code}),
            );
        };

        let fetch = self.fetch_offer_document(SERVICE_CODE_S3, region_code).await;
        let Some(document) = fetch.document else {
            let hint = if fetch.error.is_empty() {
                "Check network.".to_string()
            } else {
                fetch.error
            };
            return PricingResult::failure(
                PricingError::unavailable(format!(
                    "The public price list (S3) is unavailable. {hint}"
                )),
                json!({"service": SERVICE_CODE_S3, "region": region_code, "url": fetch.url}),
            );
        };

        let raw_filter = json!({
            "service": "Amazon S3 (public)",
            "storageClass": storage_class,
            "location": location,
            "url": fetch.url,
        });
        match scan_offer_document(&document, currency, raw_filter.clone(), |attrs| {
            scan::attr(attrs, "productFamily") == "Storage"
                && scan::attr(attrs, "location") == location
                && scan::s3_storage_class_match(attrs, storage_class)
        }) {
            Some(result) => result,
            None => PricingResult::failure(
                PricingError::not_found(
                    "No S3 storage price found for the storage class and location \
                     in the public price list",
                ),
                raw_filter,
            ),
        }
    }

    fn offers_base(&self) -> String {
        format!("{}/offers/v1.0/aws", self.base_url)
    }

    /// Single global offer file covering all regions
    fn offer_url_global(&self, service_code: &str) -> String {
        format!("{}/{}/current/index.json", self.offers_base(), service_code)
    }

    /// Regional offer file: `.../serviceCode/current/regionCode/index.json`
    fn offer_url_regional(&self, service_code: &str, region_code: &str) -> String {
        format!(
            "{}/{}/current/{}/index.json",
            self.offers_base(),
            service_code,
            region_code
        )
    }

    /// GET a URL and parse it as JSON
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to fetch {}: {}", url, e);
                PricingError::unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let msg = format!("HTTP {}", response.status());
            warn!("Failed to fetch {}: {}", url, msg);
            return Err(PricingError::unavailable(msg));
        }

        response.json::<Value>().await.map_err(|e| {
            warn!("Failed to parse {}: {}", url, e);
            PricingError::unavailable(e.to_string())
        })
    }

    /// Exact offer URL from the top-level index, if the service is listed
    async fn resolve_offer_url(&self, service_code: &str) -> Option<String> {
        let index_url = format!("{}/index.json", self.offers_base());
        let data = self.fetch_json(&index_url).await.ok()?;
        let offer = data.get("offers")?.get(service_code)?;
        let rel = offer
            .get("currentVersionUrl")
            .or_else(|| offer.get("currentRegionIndexUrl"))
            .and_then(Value::as_str)?;
        if rel.starts_with('/') {
            return Some(format!("{}{}", self.base_url, rel));
        }
        if rel.starts_with("http") {
            return Some(rel.to_string());
        }
        Some(format!("{}/{}", self.offers_base(), rel))
    }

    /// Scan the top-level index for the Backup offer code
    ///
    /// The code has varied across price-list snapshots, so the first index
    /// key containing "backup" wins.
    async fn discover_backup_offer_code(&self) -> Option<String> {
        let index_url = format!("{}/index.json", self.offers_base());
        let data = self.fetch_json(&index_url).await.ok()?;
        let offers = data.get("offers")?.as_object()?;
        offers
            .keys()
            .find(|code| code.to_lowercase().contains("backup"))
            .cloned()
    }

    /// Fetch an offer document, trying the index URL, then the global file,
    /// then the regional file; the last fetch error is kept for diagnostics
    async fn fetch_offer_document(&self, service_code: &str, region_code: &str) -> OfferFetch {
        let mut last_error = String::new();

        if let Some(url) = self.resolve_offer_url(service_code).await {
            match self.fetch_json(&url).await {
                Ok(document) => {
                    return OfferFetch {
                        document: Some(document),
                        url: Some(url),
                        error: last_error,
                    };
                }
                Err(e) => last_error = e.detail().to_string(),
            }
        }

        let url = self.offer_url_global(service_code);
        match self.fetch_json(&url).await {
            Ok(document) => {
                return OfferFetch {
                    document: Some(document),
                    url: Some(url),
                    error: last_error,
                };
            }
            Err(e) => last_error = e.detail().to_string(),
        }

        let url = self.offer_url_regional(service_code, region_code);
        match self.fetch_json(&url).await {
            Ok(document) => OfferFetch {
                document: Some(document),
                url: Some(url),
                error: last_error,
            },
            Err(e) => OfferFetch {
                document: None,
                url: Some(url),
                error: e.detail().to_string(),
            },
        }
    }
}

/// Walk a public offer document and collect every qualifying on-demand
/// GB-month dimension into tier bands
///
/// Only on-demand terms are considered; reserved and other terms are ignored
/// in the public path. Dimensions without a usable rate in the requested
/// currency are skipped. Returns `None` when nothing qualified.
fn scan_offer_document<F>(
    document: &Value,
    currency: &str,
    raw_filter: Value,
    qualifies: F,
) -> Option<PricingResult>
where
    F: Fn(&Value) -> bool,
{
    let null = Value::Null;
    let products = document.get("products")?.as_object()?;
    let on_demand = document
        .get("terms")
        .and_then(|t| t.get("OnDemand"))
        .and_then(Value::as_object);

    let mut bands: Vec<TierBand> = Vec::new();
    let mut first_product: Option<(String, Value, Value)> = None;
    let mut skipped = 0usize;

    for (sku, product) in products {
        let attrs = product.get("attributes").unwrap_or(&null);
        if !qualifies(attrs) {
            continue;
        }
        let Some(term_entries) = on_demand
            .and_then(|od| od.get(sku.as_str()))
            .and_then(Value::as_object)
        else {
            continue;
        };
        for term_detail in term_entries.values() {
            let Some(dims) = term_detail.get("priceDimensions").and_then(Value::as_object)
            else {
                continue;
            };
            for dim in dims.values() {
                let Some(rate) = scan::usable_rate(dim, currency) else {
                    skipped += 1;
                    continue;
                };
                let (start, end) = scan::range_from_dim(dim);
                bands.push(TierBand::new(start, end, rate));
                if first_product.is_none() {
                    first_product = Some((sku.clone(), attrs.clone(), dim.clone()));
                }
            }
        }
    }

    if skipped > 0 {
        debug!(
            "Skipped {} price dimensions without a usable {} GB-month rate",
            skipped, currency
        );
    }

    let quote = RateQuote::from_bands(bands)?;
    let (sku, attrs, dim) = first_product?;
    Some(
        PricingResult::found(quote, currency, raw_filter).with_product(
            Some(sku),
            scan::attrs_to_map(&attrs),
            "OnDemand",
            Some(dim),
        ),
    )
}
