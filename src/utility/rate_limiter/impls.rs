// Standard library
use std::sync::{Arc, PoisonError};
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

// Current module imports
use super::errors::RateLimitError;
use super::traits::{Clock, RateLimiter};
use super::types::{
    Admission, FixedWindowRateLimiter, MockClock, RateLimitConfig, TimeUnit, TokioClock,
    WindowState,
};

impl TimeUnit {
    /// Length of one unit
    pub fn as_duration(self) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(1),
            TimeUnit::Microseconds => Duration::from_micros(1),
            TimeUnit::Milliseconds => Duration::from_millis(1),
            TimeUnit::Seconds => Duration::from_secs(1),
            TimeUnit::Minutes => Duration::from_secs(60),
            TimeUnit::Hours => Duration::from_secs(60 * 60),
            TimeUnit::Days => Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl RateLimitConfig {
    /// Creates a configuration granting `limit` permits per `window`.
    pub fn new(limit: u32, window: Duration) -> Result<Self, RateLimitError> {
        if limit == 0 {
            return Err(RateLimitError::InvalidConfiguration(
                "limit must be greater than 0".into(),
            ));
        }

        if window.is_zero() {
            return Err(RateLimitError::InvalidConfiguration(
                "window must be greater than 0".into(),
            ));
        }

        Ok(Self { limit, window })
    }

    /// `request_limit` permits per single `time_unit`.
    pub fn per_unit(time_unit: TimeUnit, request_limit: u32) -> Result<Self, RateLimitError> {
        Self::new(request_limit, time_unit.as_duration())
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl WindowState {
    /// End of the current window, `None` when it lies beyond what `Instant` can hold
    pub(super) fn window_end(&self, config: &RateLimitConfig) -> Option<Instant> {
        self.window_start.checked_add(config.window)
    }

    /// The whole admission decision. Must run under the limiter's mutex.
    pub(super) fn admit(&mut self, now: Instant, config: &RateLimitConfig) -> Admission {
        let window_end = self.window_end(config);

        if window_end.is_some_and(|end| now >= end) {
            self.window_start = now;
            self.remaining = config.limit - 1;
            Admission::Granted { new_window: true }
        } else if self.remaining > 0 {
            self.remaining -= 1;
            Admission::Granted { new_window: false }
        } else {
            Admission::Wait {
                until: window_end,
                wait: window_end.map_or(Duration::MAX, |end| end - now),
            }
        }
    }
}

impl FixedWindowRateLimiter {
    /// Create a new fixed-window rate limiter on the tokio clock
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(TokioClock))
    }

    /// Create a new fixed-window rate limiter reading time from `clock`
    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        let window_start = clock.now();
        Self {
            config,
            state: Mutex::new(WindowState {
                remaining: config.limit,
                window_start,
            }),
            clock,
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Runs one pass of the admission table under the lock
    async fn admit(&self) -> Admission {
        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let admission = state.admit(now, &self.config);

        if let Admission::Granted { new_window } = admission {
            if new_window {
                debug!(limit = self.config.limit, "Started a new rate limit window");
            }
            trace!(remaining = state.remaining, "Permit granted");
        }

        admission
    }

    /// Consumes a permit if one is available right now.
    ///
    /// Returns the time left until the current window ends otherwise.
    pub async fn try_acquire(&self) -> Result<(), Duration> {
        match self.admit().await {
            Admission::Granted { .. } => Ok(()),
            Admission::Wait { wait, .. } => Err(wait),
        }
    }

    /// Sleeps until `until`, or forever for a window that never ends
    async fn wait_for_rollover(&self, until: Option<Instant>) {
        match until {
            Some(until) => self.clock.sleep_until(until).await,
            None => std::future::pending::<()>().await,
        }
    }

    /// Like `acquire`, but gives up once `timeout` has passed.
    ///
    /// A timed out call consumes no permit. A timeout too large to
    /// represent as a deadline waits like `acquire`.
    pub async fn acquire_timeout(&self, timeout: Duration) -> Result<(), RateLimitError> {
        let Some(deadline) = self.clock.now().checked_add(timeout) else {
            self.acquire().await;
            return Ok(());
        };

        loop {
            match self.admit().await {
                Admission::Granted { .. } => return Ok(()),
                Admission::Wait { until, .. } if until.map_or(true, |until| until > deadline) => {
                    // Permits only come back at rollover, which is past the deadline.
                    self.clock.sleep_until(deadline).await;
                    debug!(?timeout, "Gave up waiting for a permit");
                    return Err(RateLimitError::Timeout(timeout));
                }
                Admission::Wait { until, wait } => {
                    debug!(?wait, "Rate limit reached, waiting for the next window");
                    self.wait_for_rollover(until).await;
                }
            }
        }
    }

    /// Permits left in the current window, counting an expired window as full
    pub async fn remaining(&self) -> u32 {
        let state = self.state.lock().await;
        let now = self.clock.now();
        if state.window_end(&self.config).is_some_and(|end| now >= end) {
            self.config.limit
        } else {
            state.remaining
        }
    }
}

#[async_trait]
impl RateLimiter for FixedWindowRateLimiter {
    async fn acquire(&self) {
        loop {
            match self.admit().await {
                Admission::Granted { .. } => return,
                Admission::Wait { until, wait } => {
                    // The lock is released here, waiters re-run the table on wake-up.
                    debug!(?wait, "Rate limit reached, waiting for the next window");
                    self.wait_for_rollover(until).await;
                }
            }
        }
    }
}

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}

impl MockClock {
    /// Create a mock clock starting at `start`
    pub fn new(start: Instant) -> Self {
        Self {
            current: Arc::new(std::sync::Mutex::new(start)),
        }
    }

    /// Move the clock forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current += duration;
    }

    /// Move the clock forward to `instant`; never moves it backwards
    pub fn advance_to(&self, instant: Instant) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if instant > *current {
            *current = instant;
        }
    }
}

#[async_trait]
impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn sleep_until(&self, deadline: Instant) {
        self.advance_to(deadline);
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter_on_mock(limit: u32, window: Duration) -> (FixedWindowRateLimiter, MockClock) {
        let clock = MockClock::new(Instant::now());
        let config = RateLimitConfig::new(limit, window).unwrap();
        let limiter = FixedWindowRateLimiter::with_clock(config, Arc::new(clock.clone()));
        (limiter, clock)
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let err = RateLimitConfig::new(0, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, RateLimitError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let err = RateLimitConfig::new(5, Duration::ZERO).unwrap_err();
        assert!(matches!(err, RateLimitError::InvalidConfiguration(_)));
    }

    #[tokio::test]
    async fn test_huge_window_is_accepted_and_never_rolls_over() {
        let config = RateLimitConfig::new(1, Duration::from_secs(400 * 24 * 60 * 60)).unwrap();
        assert_eq!(config.window(), Duration::from_secs(400 * 24 * 60 * 60));

        let (limiter, clock) = limiter_on_mock(1, Duration::MAX);
        assert!(limiter.try_acquire().await.is_ok());
        assert_eq!(limiter.try_acquire().await, Err(Duration::MAX));

        clock.advance(Duration::from_secs(10 * 365 * 24 * 60 * 60));
        assert_eq!(limiter.remaining().await, 0);

        let err = limiter
            .acquire_timeout(Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err, RateLimitError::Timeout(Duration::from_secs(1)));
        assert_eq!(limiter.remaining().await, 0);
    }

    #[tokio::test]
    async fn test_unbounded_timeout_waits_like_acquire() {
        let (limiter, clock) = limiter_on_mock(1, Duration::from_secs(1));
        let start = clock.now();

        limiter.acquire().await;
        limiter.acquire_timeout(Duration::MAX).await.unwrap();

        assert_eq!(clock.now() - start, Duration::from_secs(1));
        assert_eq!(limiter.remaining().await, 0);
    }

    #[test]
    fn test_limit_of_one_is_accepted() {
        for window in [
            Duration::from_nanos(1),
            Duration::from_secs(1),
            Duration::from_secs(3600),
        ] {
            let config = RateLimitConfig::new(1, window).unwrap();
            assert_eq!(config.limit(), 1);
            assert_eq!(config.window(), window);
        }
    }

    #[test]
    fn test_per_unit_uses_one_unit_as_window() {
        let config = RateLimitConfig::per_unit(TimeUnit::Minutes, 30).unwrap();
        assert_eq!(config.limit(), 30);
        assert_eq!(config.window(), Duration::from_secs(60));

        assert!(RateLimitConfig::per_unit(TimeUnit::Seconds, 0).is_err());
    }

    #[tokio::test]
    async fn test_fourth_call_in_window_must_wait() {
        let (limiter, clock) = limiter_on_mock(3, Duration::from_secs(1));

        for _ in 0..3 {
            assert!(limiter.try_acquire().await.is_ok());
        }
        assert_eq!(limiter.remaining().await, 0);
        assert_eq!(limiter.try_acquire().await, Err(Duration::from_secs(1)));

        clock.advance(Duration::from_millis(400));
        assert_eq!(limiter.try_acquire().await, Err(Duration::from_millis(600)));
    }

    #[tokio::test]
    async fn test_call_after_window_starts_new_window() {
        let (limiter, clock) = limiter_on_mock(3, Duration::from_secs(1));

        for _ in 0..3 {
            assert!(limiter.try_acquire().await.is_ok());
        }
        clock.advance(Duration::from_millis(1100));

        assert!(limiter.try_acquire().await.is_ok());
        assert_eq!(limiter.remaining().await, 2);
    }

    #[tokio::test]
    async fn test_exact_boundary_starts_new_window() {
        let (limiter, clock) = limiter_on_mock(2, Duration::from_secs(1));

        assert!(limiter.try_acquire().await.is_ok());
        assert!(limiter.try_acquire().await.is_ok());

        clock.advance(Duration::from_secs(1));
        assert!(limiter.try_acquire().await.is_ok());
        assert_eq!(limiter.remaining().await, 1);
    }

    #[tokio::test]
    async fn test_double_burst_across_boundary() {
        let (limiter, clock) = limiter_on_mock(3, Duration::from_secs(1));

        // Late in the first window.
        clock.advance(Duration::from_millis(900));
        for _ in 0..3 {
            assert!(limiter.try_acquire().await.is_ok());
        }

        // Right after the boundary, 100ms later.
        clock.advance(Duration::from_millis(100));
        for _ in 0..3 {
            assert!(limiter.try_acquire().await.is_ok());
        }

        // Six grants inside a 100ms span, never more than two windows' worth.
        assert!(limiter.try_acquire().await.is_err());
    }

    #[tokio::test]
    async fn test_remaining_stays_within_bounds() {
        let limit = 4;
        let (limiter, clock) = limiter_on_mock(limit, Duration::from_millis(500));

        for step in 0..200u64 {
            let _ = limiter.try_acquire().await;
            let remaining = limiter.remaining().await;
            assert!(remaining <= limit, "remaining {} at step {}", remaining, step);
            clock.advance(Duration::from_millis(step % 7 * 20));
        }
    }

    #[tokio::test]
    async fn test_blocking_acquire_advances_mock_clock_to_window_end() {
        let (limiter, clock) = limiter_on_mock(3, Duration::from_secs(1));
        let start = clock.now();

        for _ in 0..4 {
            limiter.acquire().await;
        }

        assert_eq!(clock.now() - start, Duration::from_secs(1));
        assert_eq!(limiter.remaining().await, 2);
    }

    #[tokio::test]
    async fn test_acquire_timeout_gives_up_without_consuming() {
        let (limiter, clock) = limiter_on_mock(2, Duration::from_secs(1));
        let start = clock.now();

        limiter.acquire().await;
        limiter.acquire().await;

        let err = limiter
            .acquire_timeout(Duration::from_millis(300))
            .await
            .unwrap_err();
        assert_eq!(err, RateLimitError::Timeout(Duration::from_millis(300)));
        assert_eq!(clock.now() - start, Duration::from_millis(300));

        clock.advance(Duration::from_millis(700));
        assert_eq!(limiter.remaining().await, 2);
    }

    #[tokio::test]
    async fn test_acquire_timeout_succeeds_when_rollover_is_in_time() {
        let (limiter, clock) = limiter_on_mock(1, Duration::from_secs(1));
        let start = clock.now();

        limiter.acquire().await;
        limiter
            .acquire_timeout(Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(clock.now() - start, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fourth_call_waits_one_window_on_tokio_clock() {
        let config = RateLimitConfig::new(3, Duration::from_secs(1)).unwrap();
        let limiter = FixedWindowRateLimiter::new(config);
        let start = Instant::now();

        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(1));

        limiter.acquire().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_beyond_limit_wait_for_rollover() {
        let limit = 2;
        let callers = 5;
        let window = Duration::from_secs(1);
        let config = RateLimitConfig::new(limit, window).unwrap();
        let limiter = Arc::new(FixedWindowRateLimiter::new(config));
        let start = Instant::now();

        let handles: Vec<_> = (0..callers)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.acquire().await;
                    start.elapsed()
                })
            })
            .collect();

        let mut elapsed = Vec::new();
        for handle in handles {
            elapsed.push(handle.await.unwrap());
        }
        elapsed.sort();

        let immediate = elapsed.iter().filter(|e| **e < window).count();
        assert_eq!(immediate, limit as usize);
        assert!(elapsed[2..4].iter().all(|e| *e >= window && *e < window * 2));
        assert!(elapsed[4] >= window * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_wait_does_not_consume_permit() {
        let config = RateLimitConfig::new(2, Duration::from_secs(1)).unwrap();
        let limiter = FixedWindowRateLimiter::new(config);

        limiter.acquire().await;
        limiter.acquire().await;

        let waited = tokio::time::timeout(Duration::from_millis(300), limiter.acquire()).await;
        assert!(waited.is_err());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(limiter.remaining().await, 2);
    }

    #[test]
    fn test_mock_clock_never_moves_backwards() {
        let start = Instant::now();
        let clock = MockClock::new(start);

        clock.advance(Duration::from_secs(5));
        clock.advance_to(start + Duration::from_secs(2));
        assert_eq!(clock.now(), start + Duration::from_secs(5));

        let shared = clock.clone();
        shared.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), start + Duration::from_secs(6));
    }
}
