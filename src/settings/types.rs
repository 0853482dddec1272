// Standard library
use std::path::PathBuf;

// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::client::ClientConfig;
use crate::utility::rate_limiter::constants::DEFAULT_REQUEST_LIMIT;
use crate::utility::rate_limiter::TimeUnit;

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimit {
    #[serde(default = "default_time_unit")]
    pub time_unit: TimeUnit,
    /// Signed so that negative values reach validation instead of failing to parse
    #[serde(default = "default_request_limit")]
    pub request_limit: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub rate_limit: RateLimit,
}

/// Settings that passed [`Settings::validate`].
#[derive(Debug, Clone)]
pub struct ValidatedSettings(pub(super) Settings);

/// Loads the application settings.
#[derive(Debug)]
pub struct ConfigManager {
    pub settings: ValidatedSettings,
    pub config_path: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_time_unit() -> TimeUnit {
    TimeUnit::Seconds
}

fn default_request_limit() -> i64 {
    DEFAULT_REQUEST_LIMIT
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            time_unit: default_time_unit(),
            request_limit: default_request_limit(),
        }
    }
}
