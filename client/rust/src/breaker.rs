//! Circuit breaker protecting remote toggle calls.
//!
//! The breaker is pluggable: `ToggleClient` accepts any `CircuitBreaker`
//! implementation and defaults to [`NoopBreaker`], which never opens.
//! [`ThresholdBreaker`] is the real implementation: consecutive
//! breaker-relevant failures open it, a cooldown moves it to half-open, and
//! probe successes close it again.
//!
//! Only a subset of gRPC status codes is breaker-relevant: resource
//! exhaustion and server-side failure indicate backend health, while
//! not-found or invalid-argument reflect client input and must never trip
//! the breaker. See [`is_breaker_relevant`].

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tonic::{Code, Status};

/// Breaker states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Calls flow through; failures are counted.
    Closed,
    /// Calls are rejected until the cooldown elapses.
    Open,
    /// A limited number of probe calls are allowed through.
    HalfOpen,
}

/// Returns true when a status code should count against the breaker.
///
/// Resource-exhausted, internal and unavailable responses indicate backend
/// health problems. Everything else (not-found, invalid-argument, ...)
/// reflects the request, not the backend, and counts as a success for the
/// breaker even though it is still an error for the caller.
pub fn is_breaker_relevant(status: &Status) -> bool {
    matches!(
        status.code(),
        Code::ResourceExhausted | Code::Internal | Code::Unavailable
    )
}

/// A pluggable circuit breaker.
///
/// The client acquires a permit before each remote call and reports the
/// classified outcome afterwards. Implementations must be cheap and safe to
/// call from concurrent tasks.
pub trait CircuitBreaker: Send + Sync {
    /// Returns true if a call may proceed. May transition open → half-open.
    fn try_acquire(&self) -> bool;

    /// Record a call that completed without a breaker-relevant failure.
    fn record_success(&self);

    /// Record a breaker-relevant failure.
    fn record_failure(&self);

    /// Current breaker state.
    fn state(&self) -> BreakerState;
}

/// Breaker that never opens. The default for `ToggleClient`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBreaker;

impl CircuitBreaker for NoopBreaker {
    fn try_acquire(&self) -> bool {
        true
    }

    fn record_success(&self) {}

    fn record_failure(&self) {}

    fn state(&self) -> BreakerState {
        BreakerState::Closed
    }
}

/// Configuration for [`ThresholdBreaker`].
#[derive(Debug, Clone)]
pub struct BreakerConfig {
    /// Consecutive failures that open the breaker.
    pub failure_threshold: u32,
    /// Consecutive half-open successes that close the breaker.
    pub success_threshold: u32,
    /// How long the breaker stays open before allowing probes.
    pub cooldown: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 2,
            cooldown: Duration::from_secs(60),
        }
    }
}

#[derive(Debug)]
struct BreakerInner {
    state: BreakerState,
    consecutive_failures: u32,
    half_open_successes: u32,
    opened_at: Option<Instant>,
}

/// Consecutive-failure circuit breaker.
///
/// State machine: closed → open once `failure_threshold` consecutive
/// relevant failures accumulate; open → half-open after `cooldown`;
/// half-open → closed after `success_threshold` probe successes, or back to
/// open on any probe failure.
#[derive(Debug)]
pub struct ThresholdBreaker {
    config: BreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl ThresholdBreaker {
    /// Create a breaker with the given configuration.
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(BreakerInner {
                state: BreakerState::Closed,
                consecutive_failures: 0,
                half_open_successes: 0,
                opened_at: None,
            }),
        }
    }
}

impl Default for ThresholdBreaker {
    fn default() -> Self {
        Self::new(BreakerConfig::default())
    }
}

impl CircuitBreaker for ThresholdBreaker {
    fn try_acquire(&self) -> bool {
        let mut inner = self.inner.lock().expect("breaker lock poisoned");
        match inner.state {
            BreakerState::Closed | BreakerState::HalfOpen => true,
            BreakerState::Open => {
                let cooled_down = inner
                    .opened_at
                    .map(|at| at.elapsed() >= self.config.cooldown)
                    .unwrap_or(true);
                if cooled_down {
                    inner.state = BreakerState::HalfOpen;
                    inner.half_open_successes = 0;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn record_success(&self) {
        let mut inner = self.inner.lock().expect("breaker lock poisoned");
        match inner.state {
            BreakerState::Closed => {
                inner.consecutive_failures = 0;
            }
            BreakerState::HalfOpen => {
                inner.half_open_successes += 1;
                if inner.half_open_successes >= self.config.success_threshold {
                    inner.state = BreakerState::Closed;
                    inner.consecutive_failures = 0;
                    inner.opened_at = None;
                }
            }
            BreakerState::Open => {}
        }
    }

    fn record_failure(&self) {
        let mut inner = self.inner.lock().expect("breaker lock poisoned");
        match inner.state {
            BreakerState::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.config.failure_threshold {
                    inner.state = BreakerState::Open;
                    inner.opened_at = Some(Instant::now());
                }
            }
            BreakerState::HalfOpen => {
                inner.state = BreakerState::Open;
                inner.opened_at = Some(Instant::now());
            }
            BreakerState::Open => {}
        }
    }

    fn state(&self) -> BreakerState {
        self.inner.lock().expect("breaker lock poisoned").state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(failure_threshold: u32, cooldown: Duration) -> ThresholdBreaker {
        ThresholdBreaker::new(BreakerConfig {
            failure_threshold,
            success_threshold: 2,
            cooldown,
        })
    }

    #[test]
    fn test_noop_breaker_never_opens() {
        let b = NoopBreaker;
        for _ in 0..100 {
            b.record_failure();
        }
        assert!(b.try_acquire());
        assert_eq!(b.state(), BreakerState::Closed);
    }

    #[test]
    fn test_opens_after_consecutive_failures() {
        let b = breaker(3, Duration::from_secs(60));
        b.record_failure();
        b.record_failure();
        assert_eq!(b.state(), BreakerState::Closed);
        b.record_failure();
        assert_eq!(b.state(), BreakerState::Open);
        assert!(!b.try_acquire());
    }

    #[test]
    fn test_success_resets_failure_count() {
        let b = breaker(3, Duration::from_secs(60));
        b.record_failure();
        b.record_failure();
        b.record_success();
        b.record_failure();
        b.record_failure();
        assert_eq!(b.state(), BreakerState::Closed);
    }

    #[test]
    fn test_half_open_after_cooldown_then_closes() {
        let b = breaker(1, Duration::from_millis(0));
        b.record_failure();
        assert_eq!(b.state(), BreakerState::Open);

        // Zero cooldown: the next acquire moves to half-open.
        assert!(b.try_acquire());
        assert_eq!(b.state(), BreakerState::HalfOpen);

        b.record_success();
        assert_eq!(b.state(), BreakerState::HalfOpen);
        b.record_success();
        assert_eq!(b.state(), BreakerState::Closed);
    }

    #[test]
    fn test_half_open_failure_reopens() {
        let b = breaker(1, Duration::from_millis(0));
        b.record_failure();
        assert!(b.try_acquire());
        assert_eq!(b.state(), BreakerState::HalfOpen);

        b.record_failure();
        assert_eq!(b.state(), BreakerState::Open);
    }

    #[test]
    fn test_open_rejects_within_cooldown() {
        let b = breaker(1, Duration::from_secs(60));
        b.record_failure();
        assert!(!b.try_acquire());
        assert!(!b.try_acquire());
    }

    #[test]
    fn test_classification() {
        assert!(is_breaker_relevant(&Status::internal("")));
        assert!(is_breaker_relevant(&Status::unavailable("")));
        assert!(is_breaker_relevant(&Status::resource_exhausted("")));
        assert!(!is_breaker_relevant(&Status::not_found("")));
        assert!(!is_breaker_relevant(&Status::invalid_argument("")));
        assert!(!is_breaker_relevant(&Status::failed_precondition("")));
        assert!(!is_breaker_relevant(&Status::already_exists("")));
    }
}
