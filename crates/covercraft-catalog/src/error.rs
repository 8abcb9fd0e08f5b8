use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The vendor answered but the record is unusable: top-level status is
    /// not `"OK"` or the `good` payload is missing. Never retried.
    #[error("invalid catalog record: {0}")]
    InvalidRecord(String),

    #[error("failed to load fallback payload from {path}: {reason}")]
    FallbackUnavailable { path: String, reason: String },
}
