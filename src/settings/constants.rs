/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "CRPT_CONFIG_PATH";

/// Prefix of environment overrides, e.g. `CRPT__RATE_LIMIT__REQUEST_LIMIT=5`
pub const ENV_PREFIX: &str = "CRPT";

/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# Documents API connection
[client]
endpoint = "https://ismp.crpt.ru/api/v3/lk/documents/create"
# Request timeout in seconds
timeout_secs = 30

# Submissions allowed per time unit
[rate_limit]
# One of "nanoseconds", "microseconds", "milliseconds", "seconds",
# "minutes", "hours" or "days"
time_unit = "seconds"
request_limit = 10
"#;
