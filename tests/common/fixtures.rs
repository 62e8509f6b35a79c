//! Test fixtures and document factories
//!
//! Build price-list JSON in the exact nested shape the public distribution
//! serves: a top-level offers index, and per-service offer documents with
//! `products` keyed by SKU and `terms.OnDemand` keyed by SKU and term code.

use serde_json::{Value, json};

/// Top-level index advertising one offer per `(code, currentVersionUrl)` pair
pub fn offers_index(entries: &[(&str, &str)]) -> Value {
    let mut offers = serde_json::Map::new();
    for (code, version_url) in entries {
        offers.insert(
            code.to_string(),
            json!({"offerCode": code, "currentVersionUrl": version_url}),
        );
    }
    json!({"formatVersion": "v1.0", "offers": offers})
}

/// Factory for public offer documents
pub struct OfferDocumentFactory {
    products: serde_json::Map<String, Value>,
    on_demand: serde_json::Map<String, Value>,
}

impl OfferDocumentFactory {
    /// Start an empty offer document
    pub fn new() -> Self {
        Self {
            products: serde_json::Map::new(),
            on_demand: serde_json::Map::new(),
        }
    }

    /// Add a product with on-demand price dimensions
    pub fn with_product(mut self, sku: &str, attributes: Value, dimensions: Vec<Value>) -> Self {
        self.products.insert(
            sku.to_string(),
            json!({"sku": sku, "productFamily": attributes["productFamily"], "attributes": attributes}),
        );

        let mut dims = serde_json::Map::new();
        for (i, dim) in dimensions.into_iter().enumerate() {
            dims.insert(format!("{sku}.JRTCKXETXF.{i}"), dim);
        }
        let mut term_entries = serde_json::Map::new();
        term_entries.insert(
            format!("{sku}.JRTCKXETXF"),
            json!({
                "sku": sku,
                "offerTermCode": "JRTCKXETXF",
                "priceDimensions": dims,
            }),
        );
        self.on_demand
            .insert(sku.to_string(), Value::Object(term_entries));
        self
    }

    /// Finish the document
    pub fn build(self) -> Value {
        json!({
            "formatVersion": "v1.0",
            "products": self.products,
            "terms": {"OnDemand": self.on_demand},
        })
    }
}

impl Default for OfferDocumentFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Attributes for an S3 storage product
pub fn s3_attributes(location: &str, storage_class: &str) -> Value {
    json!({
        "productFamily": "Storage",
        "location": location,
        "locationType": "AWS Region",
        "storageClass": storage_class,
        "servicecode": "AmazonS3",
        "usagetype": "TimedStorage-ByteHrs",
    })
}

/// Attributes for a Backup storage product
pub fn backup_attributes(location: &str) -> Value {
    json!({
        "productFamily": "Backup Storage",
        "location": location,
        "locationType": "AWS Region",
        "servicecode": "AWSBackup",
        "usagetype": "WarmBackupStorage-ByteHrs",
    })
}

/// A flat price dimension without range bounds
pub fn dimension(price: &str, unit: &str) -> Value {
    json!({
        "unit": unit,
        "pricePerUnit": {"USD": price},
        "description": format!("${price} per {unit}"),
    })
}

/// A price dimension bounded to `[begin, end)` GB; pass `"Inf"` for open end
pub fn ranged_dimension(price: &str, unit: &str, begin: &str, end: &str) -> Value {
    json!({
        "unit": unit,
        "pricePerUnit": {"USD": price},
        "beginRange": begin,
        "endRange": end,
        "description": format!("${price} per {unit} from {begin} to {end}"),
    })
}
