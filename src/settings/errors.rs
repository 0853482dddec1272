// 3rd party crates
use thiserror::Error;

// Project imports
use crate::client::ClientValidationError;
use crate::utility::rate_limiter::RateLimitError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
    #[error("Request limit must be between 1 and {max}, got {value}")]
    InvalidRequestLimit { value: i64, max: u32 },
    #[error("Client configuration error: {0}")]
    ClientConfig(#[from] ClientValidationError),
    #[error("Rate limit configuration error: {0}")]
    RateLimit(#[from] RateLimitError),
}
