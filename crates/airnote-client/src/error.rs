//! Error types for remote measurement operations.

use thiserror::Error;

/// Result type for remote measurement operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the measurement backend.
///
/// Every store operation resolves to a [`Result`] wrapping either the value
/// or the triggering error; controllers convert these into user-visible
/// message strings. There are no retries.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The backend is not reachable.
    #[error("Backend not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned an error response.
    #[error("Backend error: {message}")]
    Api { status: u16, message: String },

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Update requires a persisted record with an identifier.
    #[error("Measurement has no identifier; it was never persisted")]
    MissingId,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
