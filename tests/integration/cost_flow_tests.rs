//! Resolved pricing flowing into the cost engine

use crate::common::{fixtures, mock_config};
use awspricing_rs::services::cost::{
    self, ComparisonInputs, TbConversion, compare_backup_vs_versioning,
};
use awspricing_rs::services::pricing::PublicPriceListClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOCATION: &str = "US East (N. Virginia)";

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn test_resolved_tiers_price_volume_correctly() {
    let server = MockServer::start().await;
    let version_path = "/offers/v1.0/aws/AmazonS3/20260101/index.json";
    Mock::given(method("GET"))
        .and(path("/offers/v1.0/aws/index.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::offers_index(&[("AmazonS3", version_path)])),
        )
        .mount(&server)
        .await;

    let document = fixtures::OfferDocumentFactory::new()
        .with_product(
            "SKU-S3-STD",
            fixtures::s3_attributes(LOCATION, "General Purpose"),
            vec![
                fixtures::ranged_dimension("0.0230000000", "GB-Mo", "0", "51200"),
                fixtures::ranged_dimension("0.0220000000", "GB-Mo", "51200", "Inf"),
            ],
        )
        .build();
    Mock::given(method("GET"))
        .and(path(version_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(document))
        .mount(&server)
        .await;

    let client = PublicPriceListClient::new(&mock_config(&server.uri()));
    let result = client.resolve_s3_storage("us-east-1", "Standard", "USD").await;
    let quote = result.quote.expect("expected a usable quote");

    // 40 TB stays inside the first band
    let gb_40tb = cost::tb_to_gb(40.0, TbConversion::Binary);
    assert_close(cost::cost_for_quote(gb_40tb, &quote), gb_40tb * 0.023);

    // 60 TB spills into the open-ended band
    let gb_60tb = cost::tb_to_gb(60.0, TbConversion::Binary);
    let expected = 50.0 * 1024.0 * 0.023 + 10.0 * 1024.0 * 0.022;
    assert_close(cost::cost_for_quote(gb_60tb, &quote), expected);

    // And through the full comparison
    let comparison = compare_backup_vs_versioning(&ComparisonInputs {
        data_tb: 60.0,
        conversion: TbConversion::Binary,
        backup_quote: None,
        s3_quote: Some(quote),
        versioning_overhead: 0.0,
        num_copy_addons: 0,
        flat_addon_usd: 0.0,
    });
    assert_close(comparison.s3_versioning.total_usd.expect("s3 total"), expected);
}
