use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::middleware::RequestId;

use super::{AppState, ProductEnvelope};

/// `GET /api/product` — fetches through the gateway on every call so the
/// storefront always sees current stock (the UI requests with no-store
/// semantics; nothing is cached here).
pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> (StatusCode, Json<ProductEnvelope>) {
    match state.gateway.load().await {
        Ok(document) => (StatusCode::OK, Json(ProductEnvelope::success(document))),
        Err(err) => {
            tracing::error!(request_id = %req_id.0, error = %err, "product fetch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ProductEnvelope::failure(
                    502,
                    format!("failed to fetch product data: {err}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use covercraft_catalog::{FetchPolicy, ProductGateway, VendorClient};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn vendor_body() -> serde_json::Value {
        serde_json::json!({
            "status": "OK",
            "good": {
                "goods_id": 2,
                "goods_name": "CoverCraft Mask Cover",
                "max_per_user": 5,
                "goods_images": [{"url": "https://cdn.example.com/main.png"}],
                "options": [
                    {
                        "option_id": 1,
                        "option_name": "Character",
                        "option_values": [
                            {"option_value_id": 101, "option_value_name": "Pikachu"}
                        ]
                    }
                ],
                "goods_sku": [
                    {
                        "sku_id": 1001,
                        "sku": "CC-PIKA",
                        "price": 19.99,
                        "remaining_inventory": 10,
                        "is_enabled": true,
                        "sku_option_mappings": [
                            {"option_id": 1, "option_value_id": 101}
                        ]
                    }
                ]
            }
        })
    }

    fn make_state(urls: Vec<String>) -> AppState {
        let client =
            VendorClient::new(5, "covercraft-test/0.1").expect("client should construct");
        let policy = FetchPolicy {
            upstream_urls: urls,
            max_retries: 0,
            backoff_base_ms: 0,
            fallback: None,
        };
        AppState {
            gateway: Arc::new(ProductGateway::new(client, policy)),
        }
    }

    fn test_request_id() -> Extension<RequestId> {
        Extension(RequestId("test-request".to_string()))
    }

    #[tokio::test]
    async fn returns_zero_code_and_document_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vendor_body()))
            .mount(&server)
            .await;

        let (status, Json(envelope)) =
            get_product(State(make_state(vec![server.uri()])), test_request_id()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope.code, 0);
        let doc = envelope.data.expect("envelope should carry a document");
        assert_eq!(doc.id, 2);
        assert_eq!(doc.variants.len(), 1);
    }

    #[tokio::test]
    async fn returns_error_envelope_when_all_upstreams_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (status, Json(envelope)) =
            get_product(State(make_state(vec![server.uri()])), test_request_id()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(envelope.code, 502);
        assert!(envelope.data.is_none());
        assert!(envelope.msg.contains("failed to fetch product data"));
    }

    #[tokio::test]
    async fn serves_fallback_payload_as_success() {
        let client =
            VendorClient::new(5, "covercraft-test/0.1").expect("client should construct");
        let fallback = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "CoverCraft Mask Cover (cached)",
            "images": [],
            "option_groups": [],
            "variants": [],
            "max_quantity_per_order": 5,
            "min_quantity_per_order": 1
        }))
        .expect("fallback fixture should parse");
        let state = AppState {
            gateway: Arc::new(ProductGateway::new(
                client,
                FetchPolicy {
                    upstream_urls: vec!["http://127.0.0.1:1".to_string()],
                    max_retries: 0,
                    backoff_base_ms: 0,
                    fallback: Some(fallback),
                },
            )),
        };

        let (status, Json(envelope)) = get_product(State(state), test_request_id()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope.code, 0);
        assert_eq!(
            envelope.data.expect("fallback document expected").name,
            "CoverCraft Mask Cover (cached)"
        );
    }
}
