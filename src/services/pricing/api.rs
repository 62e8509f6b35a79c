//! Authenticated Pricing API client
//!
//! Fallback source backed by the credentialed, paginated `GetProducts`
//! query. Filtering happens server-side, so matching is exact here — the
//! relaxed comparisons of the public path do not apply.

use super::regions;
use super::scan;
use super::types::{PricingResult, RateQuote, TierBand};
use crate::utils::error::{PricingError, Result};
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_pricing::config::Region;
use aws_sdk_pricing::types::{Filter, FilterType};
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Service code the Pricing API uses for Backup
const API_SERVICE_BACKUP: &str = "AWS Backup";
/// Service code the Pricing API uses for S3
const API_SERVICE_S3: &str = "Amazon S3";

/// Client for the authenticated Pricing API
#[derive(Debug, Clone)]
pub struct PricingApiClient {
    client: aws_sdk_pricing::Client,
}

impl PricingApiClient {
    /// Load shared AWS configuration and verify credentials are present
    ///
    /// The Pricing API is regional but only served from a couple of
    /// endpoints; `region` names the endpoint region, not the region being
    /// priced. Credential absence is reported as its own error kind so the
    /// resolver can message it differently.
    pub async fn connect(region: &str) -> Result<Self> {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let provider = shared.credentials_provider().ok_or_else(|| {
            PricingError::no_credentials("No AWS credentials provider is configured")
        })?;
        provider.provide_credentials().await.map_err(|e| {
            PricingError::no_credentials(format!("Failed to load AWS credentials: {e}"))
        })?;

        debug!("Pricing API client ready ({})", region);
        Ok(Self {
            client: aws_sdk_pricing::Client::new(&shared),
        })
    }

    /// Wrap an existing SDK client
    pub fn from_client(client: aws_sdk_pricing::Client) -> Self {
        Self { client }
    }

    /// Resolve AWS Backup storage pricing for a region
    ///
    /// Prefers the first usable on-demand dimension; when none exists,
    /// rescans on-demand then reserved terms and takes the first usable
    /// dimension in document order.
    pub async fn resolve_backup_storage(&self, region_code: &str, currency: &str) -> PricingResult {
        let Some(location) = regions::location_for_region(region_code) else {
            return PricingResult::failure(
                PricingError::unknown_region(region_code),
                json!({"region": region_code}),
            );
        };

        let fields = [
            ("productFamily", "Storage"),
            ("location", location),
            ("serviceCode", API_SERVICE_BACKUP),
        ];
        let filters_json = filters_to_json(&fields);
        let filters = match build_filters(&fields) {
            Ok(filters) => filters,
            Err(e) => return PricingResult::failure(e, json!({"filters": filters_json})),
        };

        let products = match self.get_products(API_SERVICE_BACKUP, filters).await {
            Ok(products) => products,
            Err(e) => return PricingResult::failure(e, json!({"filters": filters_json})),
        };

        let raw_filter = json!({
            "service": API_SERVICE_BACKUP,
            "location": location,
            "filters": filters_json,
        });
        let null = Value::Null;

        // First pass: on-demand only
        for product in &products {
            let attrs = product_attrs(product, &null);
            if scan::attr(attrs, "productFamily") != "Storage" {
                continue;
            }
            if let Some((rate, dim)) = first_usable_dimension(product, "OnDemand", currency) {
                return PricingResult::found(
                    RateQuote::Flat {
                        rate_per_gb_month: rate,
                    },
                    currency,
                    raw_filter,
                )
                .with_product(
                    product_sku(product),
                    scan::attrs_to_map(attrs),
                    "OnDemand",
                    Some(dim),
                );
            }
        }

        // Second pass: any storage product, on-demand then reserved
        for product in &products {
            let attrs = product_attrs(product, &null);
            if scan::attr(attrs, "productFamily") != "Storage" {
                continue;
            }
            for term_type in ["OnDemand", "Reserved"] {
                if let Some((rate, dim)) = first_usable_dimension(product, term_type, currency) {
                    return PricingResult::found(
                        RateQuote::Flat {
                            rate_per_gb_month: rate,
                        },
                        currency,
                        raw_filter,
                    )
                    .with_product(
                        product_sku(product),
                        scan::attrs_to_map(attrs),
                        term_type,
                        Some(dim),
                    );
                }
            }
        }

        PricingResult::failure(
            PricingError::not_found("No AWS Backup storage price found for location"),
            raw_filter,
        )
    }

    /// Resolve S3 storage pricing for a region and storage class
    ///
    /// Collects every on-demand GB-month dimension across all returned
    /// products, then applies the flat-vs-tiers collapse.
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

        let fields = [
            ("productFamily", "Storage"),
            ("location", location),
            ("serviceCode", API_SERVICE_S3),
            ("storageClass", storage_class),
        ];
        let filters_json = filters_to_json(&fields);
        let filters = match build_filters(&fields) {
            Ok(filters) => filters,
            Err(e) => return PricingResult::failure(e, json!({"filters": filters_json})),
        };

        let products = match self.get_products(API_SERVICE_S3, filters).await {
            Ok(products) => products,
            Err(e) => return PricingResult::failure(e, json!({"filters": filters_json})),
        };

        let raw_filter = json!({
            "service": API_SERVICE_S3,
            "storageClass": storage_class,
            "location": location,
            "filters": filters_json,
        });
        let null = Value::Null;

        let mut bands: Vec<TierBand> = Vec::new();
        let mut first_product: Option<(Option<String>, Value, Value)> = None;
        let mut skipped = 0usize;

        for product in &products {
            let attrs = product_attrs(product, &null);
            if scan::attr(attrs, "productFamily") != "Storage" {
                continue;
            }
            let Some(on_demand) = product
                .get("terms")
                .and_then(|t| t.get("OnDemand"))
                .and_then(Value::as_object)
            else {
                continue;
            };
            for term_detail in on_demand.values() {
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
                        first_product =
                            Some((product_sku(product), attrs.clone(), dim.clone()));
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

        match (RateQuote::from_bands(bands), first_product) {
            (Some(quote), Some((sku, attrs, dim))) => {
                PricingResult::found(quote, currency, raw_filter).with_product(
                    sku,
                    scan::attrs_to_map(&attrs),
                    "OnDemand",
                    Some(dim),
                )
            }
            _ => PricingResult::failure(
                PricingError::not_found("No S3 storage price found for storage class and location"),
                raw_filter,
            ),
        }
    }

    /// Consume every page of a `GetProducts` query
    ///
    /// Each page entry is a JSON string; entries that fail to decode are
    /// skipped, not fatal.
    async fn get_products(&self, service_code: &str, filters: Vec<Filter>) -> Result<Vec<Value>> {
        let mut paginator = self
            .client
            .get_products()
            .service_code(service_code)
            .set_filters(Some(filters))
            .into_paginator()
            .send();

        let mut products = Vec::new();
        let mut skipped = 0usize;
        while let Some(page) = paginator.next().await {
            let page = page.map_err(|e| {
                warn!("GetProducts failed for {}: {}", service_code, e);
                PricingError::unavailable(format!("GetProducts failed: {e}"))
            })?;
            for entry in page.price_list() {
                match serde_json::from_str::<Value>(entry) {
                    Ok(document) => products.push(document),
                    Err(_) => skipped += 1,
                }
            }
        }
        if skipped > 0 {
            debug!("Skipped {} price-list entries that failed to decode", skipped);
        }
        debug!(
            "GetProducts returned {} products for {}",
            products.len(),
            service_code
        );
        Ok(products)
    }
}

/// TERM_MATCH filters from `(field, value)` pairs
fn build_filters(fields: &[(&str, &str)]) -> Result<Vec<Filter>> {
    fields.iter()
        .map(|(field, value)| {
            Filter::builder()
                .r#type(FilterType::TermMatch)
                .field(*field)
                .value(*value)
                .build()
                .map_err(|e| PricingError::unavailable(format!("Invalid product filter: {e}")))
        })
        .collect()
}

/// Diagnostic JSON mirror of the filters sent to the API
fn filters_to_json(fields: &[(&str, &str)]) -> Value {
    Value::Array(
        fields.iter()
            .map(|(field, value)| {
                json!({"Type": "TERM_MATCH", "Field": field, "Value": value})
            })
            .collect(),
    )
}

/// A product document's attribute object
fn product_attrs<'a>(product: &'a Value, null: &'a Value) -> &'a Value {
    product
        .get("product")
        .and_then(|p| p.get("attributes"))
        .unwrap_or(null)
}

/// A product document's SKU
fn product_sku(product: &Value) -> Option<String> {
    product
        .get("product")
        .and_then(|p| p.get("sku"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// First dimension under the given term type with a usable GB-month rate
fn first_usable_dimension(product: &Value, term_type: &str, currency: &str) -> Option<(f64, Value)> {
    let terms = product.get("terms")?.get(term_type)?.as_object()?;
    for term_detail in terms.values() {
        let Some(dims) = term_detail.get("priceDimensions").and_then(Value::as_object) else {
            continue;
        };
        for dim in dims.values() {
            if let Some(rate) = scan::usable_rate(dim, currency) {
                return Some((rate, dim.clone()));
            }
        }
    }
    None
}
