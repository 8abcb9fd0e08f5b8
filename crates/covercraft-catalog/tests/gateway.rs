//! Integration tests for `ProductGateway` using wiremock HTTP mocks.

use covercraft_catalog::gateway::load_fallback;
use covercraft_catalog::{CatalogError, FetchPolicy, ProductGateway, VendorClient};
use covercraft_core::ProductDocument;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn vendor_body() -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "good": {
            "goods_id": 2,
            "goods_name": "CoverCraft Mask Cover",
            "description": "Breathable mask cover.",
            "max_per_user": 5,
            "goods_images": [{"url": "https://cdn.example.com/main.png"}],
            "options": [
                {
                    "option_id": 1,
                    "option_name": "Character",
                    "option_values": [
                        {"option_value_id": 101, "option_value_name": "Pikachu"},
                        {"option_value_id": 102, "option_value_name": "Eevee"}
                    ]
                },
                {
                    "option_id": 2,
                    "option_name": "Size",
                    "option_values": [
                        {"option_value_id": 201, "option_value_name": "Adult"},
                        {"option_value_id": 202, "option_value_name": "Child"}
                    ]
                }
            ],
            "goods_sku": [
                {
                    "sku_id": 1001,
                    "sku": "CC-PIKA-ADULT",
                    "price": 19.99,
                    "inventory": 100,
                    "remaining_inventory": 10,
                    "is_enabled": true,
                    "images": [],
                    "sku_images": [],
                    "sku_option_mappings": [
                        {"option_id": 1, "option_value_id": 101},
                        {"option_id": 2, "option_value_id": 201}
                    ]
                },
                {
                    "sku_id": 1002,
                    "sku": "CC-PIKA-CHILD",
                    "price": 17.99,
                    "inventory": 100,
                    "remaining_inventory": 5,
                    "is_enabled": 0,
                    "sku_option_mappings": [
                        {"option_id": 1, "option_value_id": 101},
                        {"option_id": 2, "option_value_id": 202}
                    ]
                }
            ]
        }
    })
}

fn fallback_document() -> ProductDocument {
    serde_json::from_value(serde_json::json!({
        "id": 2,
        "name": "CoverCraft Mask Cover (cached)",
        "images": [],
        "option_groups": [],
        "variants": [],
        "max_quantity_per_order": 5,
        "min_quantity_per_order": 1
    }))
    .expect("fallback fixture should parse")
}

fn test_client() -> VendorClient {
    VendorClient::new(30, "covercraft-test/0.1").expect("client construction should not fail")
}

fn policy(urls: Vec<String>, fallback: Option<ProductDocument>) -> FetchPolicy {
    FetchPolicy {
        upstream_urls: urls,
        max_retries: 3,
        backoff_base_ms: 0,
        fallback,
    }
}

#[tokio::test]
async fn load_normalizes_vendor_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/goods/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vendor_body()))
        .mount(&server)
        .await;

    let gateway = ProductGateway::new(
        test_client(),
        policy(vec![format!("{}/api/v1/goods/2", server.uri())], None),
    );
    let doc = gateway.load().await.expect("should load");

    assert_eq!(doc.id, 2);
    assert_eq!(doc.option_groups.len(), 2);
    // The disabled SKU must not survive normalization.
    assert_eq!(doc.variant_count(), 1);
    assert_eq!(doc.variants[0].sku, "CC-PIKA-ADULT");
    assert_eq!(doc.variants[0].stock, 10);
}

#[tokio::test]
async fn retries_server_errors_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vendor_body()))
        .mount(&server)
        .await;

    let gateway = ProductGateway::new(test_client(), policy(vec![server.uri()], None));
    let doc = gateway.load().await.expect("should recover after retries");
    assert_eq!(doc.id, 2);
}

#[tokio::test]
async fn vendor_fail_status_is_not_retried_and_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "FAIL", "good": null})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = ProductGateway::new(
        test_client(),
        policy(vec![server.uri()], Some(fallback_document())),
    );
    let doc = gateway.load().await.expect("fallback should be served");
    assert_eq!(doc.name, "CoverCraft Mask Cover (cached)");
}

#[tokio::test]
async fn fails_over_to_second_upstream() {
    let dead = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&dead)
        .await;

    let live = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vendor_body()))
        .mount(&live)
        .await;

    let gateway = ProductGateway::new(
        test_client(),
        policy(vec![dead.uri(), live.uri()], None),
    );
    let doc = gateway.load().await.expect("second upstream should serve");
    assert_eq!(doc.id, 2);
}

#[tokio::test]
async fn propagates_last_error_without_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gateway = ProductGateway::new(test_client(), policy(vec![server.uri()], None));
    let err = gateway.load().await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::UnexpectedStatus { status: 404, .. }
    ));
}

#[tokio::test]
async fn malformed_body_moves_to_next_upstream() {
    let garbled = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&garbled)
        .await;

    let live = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vendor_body()))
        .mount(&live)
        .await;

    let gateway = ProductGateway::new(
        test_client(),
        policy(vec![garbled.uri(), live.uri()], None),
    );
    let doc = gateway.load().await.expect("should fail over");
    assert_eq!(doc.id, 2);
}

#[test]
fn load_fallback_missing_file_errors() {
    let err = load_fallback(std::path::Path::new("/nonexistent/fallback.json")).unwrap_err();
    assert!(matches!(err, CatalogError::FallbackUnavailable { .. }));
}
