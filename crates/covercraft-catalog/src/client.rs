//! HTTP client for the upstream vendor goods endpoint.
//!
//! Wraps `reqwest` with typed error handling and response deserialization.
//! The client fetches one raw vendor record per call; status-envelope
//! validation is the Normalizer's job and retry/failover policy is the
//! gateway's.

use std::time::Duration;

use reqwest::Client;

use crate::error::CatalogError;
use crate::types::VendorProductResponse;

/// HTTP client for the vendor goods endpoint.
///
/// Non-2xx responses surface as [`CatalogError::UnexpectedStatus`] so the
/// retry layer can distinguish transient 5xx from permanent 4xx failures.
pub struct VendorClient {
    client: Client,
}

impl VendorClient {
    /// Creates a `VendorClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one raw vendor product record from `url`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] — network or TLS failure.
    /// - [`CatalogError::UnexpectedStatus`] — any non-2xx HTTP status.
    /// - [`CatalogError::Deserialize`] — body is not a vendor record.
    pub async fn fetch_product(&self, url: &str) -> Result<VendorProductResponse, CatalogError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
