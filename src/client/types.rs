// Standard library
use std::sync::Arc;

// 3rd party crates
use reqwest::Client;
use serde::Deserialize;

// Project imports
use crate::metrics::MetricsManager;
use crate::utility::rate_limiter::RateLimiter;

// Current module imports
use super::constants::{default_endpoint, default_timeout_secs};
use super::traits::Transport;

/// Configuration of the documents API connection.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Rate limited client for the documents API.
pub struct DocumentClient {
    pub(super) endpoint: String,
    pub(super) limiter: Arc<dyn RateLimiter>,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) metrics: MetricsManager,
}

/// Transport posting JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    pub(super) client: Client,
}
