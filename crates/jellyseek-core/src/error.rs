//! Error types for Jellyseek
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for Jellyseek operations
#[derive(Error, Debug)]
pub enum JellyseekError {
    /// HTTP request failed or the response body could not be decoded
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status code
    #[error("server returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for Jellyseek operations
pub type Result<T> = std::result::Result<T, JellyseekError>;
