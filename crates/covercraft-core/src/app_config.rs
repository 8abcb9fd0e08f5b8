use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Ordered list of upstream catalog URLs. The gateway tries each in
    /// turn until one yields a valid product document.
    pub upstream_urls: Vec<String>,
    pub fetch_timeout_secs: u64,
    pub fetch_user_agent: String,
    /// Maximum retry attempts per upstream URL after the first failure.
    pub max_retries: u32,
    /// Base delay in milliseconds for exponential backoff between retries.
    pub retry_backoff_base_ms: u64,
    /// Optional path to a JSON `ProductDocument` served when every upstream
    /// fails. No fallback is attempted when unset.
    pub fallback_path: Option<PathBuf>,
}
