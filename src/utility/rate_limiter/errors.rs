// Standard library
use std::time::Duration;

// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Invalid rate limit configuration: {0}")]
    InvalidConfiguration(String),

    #[error("No permit became available within {0:?}")]
    Timeout(Duration),
}
