//! Error types for the DNSMasq API provider

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad API address or port combination
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required field was empty or malformed; raised before any request
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The API answered with something other than 200
    #[error("DNSMasq API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// No records where at least one was expected
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Transport failure (connect, TLS, timeout)
    #[error("Failed to perform request: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
