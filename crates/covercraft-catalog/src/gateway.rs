//! The fetch gateway: ordered upstream URLs, per-URL retry with back-off,
//! and a single configurable fallback payload.
//!
//! This is the one place that decides where product data comes from. The
//! storefront server calls [`ProductGateway::load`] and receives either a
//! fully normalized [`ProductDocument`] or an error it can translate into
//! the `{code, msg, data}` envelope.

use std::path::Path;

use covercraft_core::{AppConfig, ProductDocument};

use crate::client::VendorClient;
use crate::error::CatalogError;
use crate::normalize::normalize;
use crate::retry::retry_with_backoff;

/// Where and how hard to look for product data.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Upstream URLs tried in order until one yields a valid document.
    pub upstream_urls: Vec<String>,
    /// Retry attempts per URL after the first failure, transient errors only.
    pub max_retries: u32,
    /// Base delay in milliseconds for exponential back-off between retries.
    pub backoff_base_ms: u64,
    /// Document served when every upstream fails. `None` propagates the
    /// last upstream error instead.
    pub fallback: Option<ProductDocument>,
}

impl FetchPolicy {
    /// Builds a policy from application config, loading the fallback
    /// payload from disk when one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::FallbackUnavailable`] if the configured
    /// fallback file cannot be read or parsed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let fallback = config
            .fallback_path
            .as_deref()
            .map(load_fallback)
            .transpose()?;
        Ok(Self {
            upstream_urls: config.upstream_urls.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
            fallback,
        })
    }
}

/// Reads a JSON [`ProductDocument`] to serve when all upstreams fail.
///
/// # Errors
///
/// Returns [`CatalogError::FallbackUnavailable`] on read or parse failure.
pub fn load_fallback(path: &Path) -> Result<ProductDocument, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::FallbackUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| CatalogError::FallbackUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Fetches and normalizes product data according to a [`FetchPolicy`].
pub struct ProductGateway {
    client: VendorClient,
    policy: FetchPolicy,
}

impl ProductGateway {
    #[must_use]
    pub fn new(client: VendorClient, policy: FetchPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetches the product document, trying each upstream in order.
    ///
    /// Each URL gets its own retry budget for transient errors; a vendor
    /// record that fetches but fails normalization moves straight to the
    /// next URL. When every upstream fails the configured fallback payload
    /// is served, if any.
    ///
    /// # Errors
    ///
    /// Returns the last upstream error when all URLs fail and no fallback
    /// is configured.
    pub async fn load(&self) -> Result<ProductDocument, CatalogError> {
        let mut last_err: Option<CatalogError> = None;

        for url in &self.policy.upstream_urls {
            let result = retry_with_backoff(
                self.policy.max_retries,
                self.policy.backoff_base_ms,
                || async move {
                    let raw = self.client.fetch_product(url).await?;
                    normalize(raw)
                },
            )
            .await;

            match result {
                Ok(doc) => {
                    tracing::info!(
                        url,
                        product_id = doc.id,
                        variants = doc.variant_count(),
                        "loaded product document from upstream"
                    );
                    return Ok(doc);
                }
                Err(err) => {
                    tracing::warn!(url, error = %err, "upstream failed, trying next");
                    last_err = Some(err);
                }
            }
        }

        if let Some(doc) = &self.policy.fallback {
            tracing::warn!(
                product_id = doc.id,
                "all upstreams failed, serving fallback payload"
            );
            return Ok(doc.clone());
        }

        Err(last_err.unwrap_or_else(|| {
            CatalogError::InvalidRecord("no upstream URLs configured".to_string())
        }))
    }
}
