/// Documents API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

/// HTTP client settings
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

pub fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
