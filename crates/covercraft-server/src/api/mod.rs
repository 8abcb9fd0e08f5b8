mod product;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use covercraft_catalog::ProductGateway;
use covercraft_core::ProductDocument;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ProductGateway>,
}

/// The wire envelope consumed by the storefront UI: `code` is `0` on
/// success and a nonzero HTTP-like code on failure, with `msg` carrying a
/// human-readable reason and `data` the normalized product document.
#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    pub code: i32,
    pub msg: String,
    pub data: Option<ProductDocument>,
}

impl ProductEnvelope {
    pub(super) fn success(data: ProductDocument) -> Self {
        Self {
            code: 0,
            msg: "success".to_string(),
            data: Some(data),
        }
    }

    pub(super) fn failure(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/product", get(product::get_product))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}
