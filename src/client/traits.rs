// 3rd party crates
use async_trait::async_trait;

// Current module imports
use super::errors::TransportError;

/// Sends a serialized document to the remote service.
///
/// Implementations own their connection handling. They return the raw
/// response body and must not retry on their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `payload` (JSON) to `endpoint`
    async fn post(&self, endpoint: &str, payload: String) -> Result<String, TransportError>;
}
