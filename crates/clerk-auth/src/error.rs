//! Error types for the Clerk client.

use thiserror::Error;

/// Errors that can occur while loading Clerk or looking up users.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No publishable key was configured
    #[error("Missing Clerk publishable key")]
    MissingPublishableKey,

    /// The publishable key does not decode to a Frontend API host
    #[error("Invalid Clerk publishable key: {0}")]
    InvalidPublishableKey(String),

    /// `get_user` was called before a successful `initialize`
    #[error("Clerk not initialized")]
    NotInitialized,

    /// The load step did not return a usable environment
    #[error("Clerk load failed: {0}")]
    Load(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The Backend API URL cannot carry a path
    #[error("Clerk API URL cannot be a base: {0}")]
    UnusableApiUrl(String),

    /// API returned an error response
    #[error("Clerk API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;
