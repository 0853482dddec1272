/// Default settings
pub const DEFAULT_REQUEST_LIMIT: i64 = 10;
