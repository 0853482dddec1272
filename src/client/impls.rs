// Standard library
use std::sync::Arc;

// 3rd party crates
use async_trait::async_trait;
use futures::{stream::FuturesUnordered, StreamExt};
use reqwest::header;
use tracing::{debug, error, info, warn};

// Project imports
use crate::metrics::MetricsManager;
use crate::models::Document;
use crate::utility::rate_limiter::{
    FixedWindowRateLimiter, RateLimitConfig, RateLimiter, TimeUnit,
};

// Current module imports
use super::constants::{default_endpoint, default_timeout_secs, CONTENT_TYPE_JSON};
use super::errors::{ClientError, ClientValidationError, TransportError};
use super::functions::{create_reqwest_client, serialize_document};
use super::traits::Transport;
use super::types::{ClientConfig, DocumentClient, HttpTransport};

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ClientValidationError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ClientValidationError::InvalidEndpoint(self.endpoint.clone()));
        }

        if self.timeout_secs == 0 {
            return Err(ClientValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: create_reqwest_client(config)?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, endpoint: &str, payload: String) -> Result<String, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(payload)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        response.text().await.map_err(|e| TransportError::Request {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}

impl DocumentClient {
    /// Client for the default endpoint allowing `request_limit` submissions
    /// per one `time_unit`.
    pub fn new(time_unit: TimeUnit, request_limit: u32) -> Result<Self, ClientError> {
        let rate_limit = RateLimitConfig::per_unit(time_unit, request_limit)?;
        Self::from_config(&ClientConfig::default(), rate_limit)
    }

    /// Client over HTTP using `config` for the connection.
    pub fn from_config(
        config: &ClientConfig,
        rate_limit: RateLimitConfig,
    ) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(
            config.endpoint.clone(),
            Arc::new(FixedWindowRateLimiter::new(rate_limit)),
            Arc::new(transport),
        ))
    }

    /// Client over arbitrary parts, mostly useful for tests.
    pub fn with_transport(
        endpoint: impl Into<String>,
        limiter: Arc<dyn RateLimiter>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            limiter,
            transport,
            metrics: MetricsManager::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn metrics(&self) -> &MetricsManager {
        &self.metrics
    }

    /// Validates, rate limits and sends one document.
    ///
    /// Consumes exactly one permit when the document is valid and none
    /// otherwise. Returns the raw response body.
    pub async fn submit(&self, document: &Document) -> Result<String, ClientError> {
        let payload = match serialize_document(document) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(doc_id = %document.doc_id, "Document rejected: {}", e);
                self.metrics.record_rejection().await;
                return Err(e);
            }
        };

        self.limiter.acquire().await;

        debug!(
            doc_id = %document.doc_id,
            endpoint = %self.endpoint,
            bytes = payload.len(),
            "Sending document"
        );

        match self.transport.post(&self.endpoint, payload).await {
            Ok(body) => {
                info!(doc_id = %document.doc_id, "Document submitted");
                self.metrics.record_success().await;
                Ok(body)
            }
            Err(e) => {
                error!(doc_id = %document.doc_id, "Failed to submit document: {}", e);
                self.metrics.record_failure().await;
                Err(ClientError::Transport(e))
            }
        }
    }

    /// Submits all documents concurrently through the shared rate limiter.
    ///
    /// Results are returned in the order of `documents`.
    pub async fn submit_all(&self, documents: &[Document]) -> Vec<Result<String, ClientError>> {
        let mut futures = FuturesUnordered::new();
        for (index, document) in documents.iter().enumerate() {
            futures.push(async move { (index, self.submit(document).await) });
        }

        let mut results: Vec<Option<Result<String, ClientError>>> = Vec::new();
        results.resize_with(documents.len(), || None);

        while let Some((index, result)) = futures.next().await {
            results[index] = Some(result);
        }

        results.into_iter().flatten().collect()
    }
}
