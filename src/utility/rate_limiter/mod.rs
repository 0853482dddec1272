//! Fixed-window admission control for outbound requests.
//!
//! A [`FixedWindowRateLimiter`](types::FixedWindowRateLimiter) grants at most
//! `limit` permits per window. Callers that find the window exhausted are
//! suspended until the window ends instead of being rejected.
//!
//! # Boundary behavior
//!
//! Windows are fixed, not sliding, and are reset lazily by the first caller
//! that observes an expired window. A caller arriving exactly at
//! `window_start + window` starts a new window. Because the window restarts
//! at the instant of that caller, up to `2 * limit` permits can be granted
//! inside one window length that straddles a boundary.
//!
//! # Time
//!
//! All time is read through the [`Clock`](traits::Clock) trait so tests can
//! run on tokio's paused clock or on a manually advanced
//! [`MockClock`](types::MockClock).

pub mod constants;
pub mod errors;
pub mod impls;
pub mod traits;
pub mod types;

pub use errors::RateLimitError;
pub use traits::{Clock, RateLimiter};
pub use types::{FixedWindowRateLimiter, MockClock, RateLimitConfig, TimeUnit, TokioClock};
