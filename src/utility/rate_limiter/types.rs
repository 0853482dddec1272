// Standard library
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

// Current module imports
use super::traits::Clock;

/// Granularity of the rate limit; one unit is one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

/// Rate limiting configuration for document submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum number of permits per window
    pub(super) limit: u32,
    /// Length of one window
    pub(super) window: Duration,
}

/// Mutable part of the limiter, only touched under its mutex
#[derive(Debug, Clone, Copy)]
pub(super) struct WindowState {
    pub(super) remaining: u32,
    pub(super) window_start: Instant,
}

/// Outcome of one pass through the admission table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Admission {
    Granted { new_window: bool },
    /// `until` is `None` when the window never ends
    Wait {
        until: Option<Instant>,
        wait: Duration,
    },
}

/// A fixed-window rate limiter with lazy window reset
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    pub(super) config: RateLimitConfig,
    pub(super) state: Mutex<WindowState>,
    pub(super) clock: Arc<dyn Clock>,
}

/// Production clock backed by `tokio::time`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

/// Manually advanced clock for deterministic tests.
///
/// Clones share the same time. `sleep_until` jumps the clock forward to the
/// deadline instead of waiting.
#[derive(Debug, Clone)]
pub struct MockClock {
    pub(super) current: Arc<std::sync::Mutex<Instant>>,
}
