// Standard library
use std::sync::Arc;
use std::time::Instant;

// 3rd party crates
use tokio::sync::RwLock;

/// Metrics for document submissions
#[derive(Debug, Default, Clone)]
pub struct SubmissionMetrics {
    /// Total number of submissions attempted
    pub attempts: u64,
    /// Number of documents accepted by the transport
    pub successes: u64,
    /// Number of submissions that failed in the transport
    pub transport_failures: u64,
    /// Number of documents rejected before any network call
    pub validation_rejections: u64,
    /// Last successful submission time
    pub last_success: Option<Instant>,
    /// Last failure time
    pub last_failure: Option<Instant>,
}

/// Thread-safe metrics manager
#[derive(Debug, Default)]
pub struct MetricsManager {
    metrics: Arc<RwLock<SubmissionMetrics>>,
}

impl MetricsManager {
    /// Creates a new MetricsManager
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(SubmissionMetrics::default())),
        }
    }

    /// Records a submission the transport accepted
    pub async fn record_success(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.attempts += 1;
        metrics.successes += 1;
        metrics.last_success = Some(Instant::now());
    }

    /// Records a submission the transport failed
    pub async fn record_failure(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.attempts += 1;
        metrics.transport_failures += 1;
        metrics.last_failure = Some(Instant::now());
    }

    /// Records a document rejected by validation
    pub async fn record_rejection(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.attempts += 1;
        metrics.validation_rejections += 1;
        metrics.last_failure = Some(Instant::now());
    }

    /// Gets a snapshot of the current metrics
    pub async fn get_snapshot(&self) -> SubmissionMetrics {
        (*self.metrics.read().await).clone()
    }
}
