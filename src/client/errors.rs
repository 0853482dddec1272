// 3rd party crates
use reqwest::StatusCode;
use thiserror::Error;

// Project imports
use crate::utility::rate_limiter::RateLimitError;

/// Failure reported by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to '{endpoint}' failed: {source}")]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("Request to '{endpoint}' failed: HTTP {status} - {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },
}

/// Custom error type for document submissions.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Rate limiter error: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("Product #{product} is missing required field '{field}'")]
    MissingRequiredField { product: usize, field: &'static str },

    #[error("Product #{product} sets both '{first}' and '{second}', exactly one is allowed")]
    ConflictingFields {
        product: usize,
        first: &'static str,
        second: &'static str,
    },

    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error)]
pub enum ClientValidationError {
    #[error("Endpoint must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),
    #[error("Request timeout must be greater than 0")]
    InvalidTimeout,
}
