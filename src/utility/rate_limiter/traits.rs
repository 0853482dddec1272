// Standard library
use std::fmt::Debug;

// 3rd party crates
use async_trait::async_trait;
use tokio::time::Instant;

/// Time source used by the rate limiter
#[async_trait]
pub trait Clock: Send + Sync + Debug {
    /// Current instant
    fn now(&self) -> Instant;
    /// Suspend the caller until `deadline` has been reached on this clock
    async fn sleep_until(&self, deadline: Instant);
}

/// Admission control in front of an outbound request
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Wait until a permit is available and consume it.
    ///
    /// Never fails: exhaustion is handled by waiting. Dropping the returned
    /// future before it completes does not consume a permit.
    async fn acquire(&self);
}
