pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::StatusApiClient;

/// Why a status fetch produced no usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch every status change since `from_timestamp` (seconds since epoch).
    ///
    /// The body is returned unvalidated; shape checks belong to the caller.
    async fn fetch(&self, from_timestamp: i64) -> Result<serde_json::Value, FetchError>;
}
