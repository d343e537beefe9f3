//! Error types for the actions store.

use thiserror::Error;

/// Errors returned by [`ActionsStore`](crate::ActionsStore) operations.
#[derive(Error, Debug)]
pub enum DataError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured project URL cannot be used
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// PostgREST rejected the request
    #[error("Supabase API error: {status} {code:?} - {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A unique constraint rejected the write (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A single-row read or update matched no row
    #[error("No row in {table} for {key}")]
    NotFound { table: &'static str, key: String },
}

/// Result type alias using DataError.
pub type DataResult<T> = Result<T, DataError>;
