//! # Circuit Breaker
//!
//! Per-destination failure gate for remote calls.
//!
//! ```text
//!            N consecutive failures
//!   Closed ─────────────────────────> Open
//!     ^                                 │ cool-down elapsed since last failure
//!     │ success                         v
//!     └──────────────────────────── HalfOpen ── probe fails ──> Open
//! ```
//!
//! In `HalfOpen` exactly one probe call is admitted. If the probe never
//! reports back (its caller was dropped or cancelled), another probe is
//! admitted once a further cool-down has passed.
//!
//! All state lives behind one `parking_lot::Mutex`, so every
//! admission decision and every outcome update is a single critical section.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Default consecutive failures before opening.
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;

/// Default time the breaker stays open.
pub const DEFAULT_COOL_DOWN: Duration = Duration::from_secs(30);

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Clock backed by `tokio::time`, so paused-time tests control it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Breaker tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the breaker.
    pub failure_threshold: u32,
    /// Time after the last failure before a probe is allowed.
    pub cool_down: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            cool_down: DEFAULT_COOL_DOWN,
        }
    }
}

impl CircuitBreakerConfig {
    /// Sets the failure threshold.
    #[must_use]
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold;
        self
    }

    /// Sets the cool-down.
    #[must_use]
    pub fn with_cool_down(mut self, cool_down: Duration) -> Self {
        self.cool_down = cool_down;
        self
    }
}

/// Breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    /// Calls flow normally.
    Closed,
    /// Calls are rejected.
    Open,
    /// One probe call is in flight.
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half_open",
        };
        f.write_str(s)
    }
}

/// How a call was admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Breaker closed.
    Normal,
    /// Breaker half-open; this call is the probe.
    Probe,
}

/// Rejection returned while the breaker is open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitBreakerError {
    /// The breaker is open.
    #[error("circuit breaker '{name}' is open, retry in {retry_in:?}")]
    Open {
        /// Breaker name.
        name: String,
        /// Time until a probe may be admitted.
        retry_in: Duration,
    },
}

/// Result type for breaker admission.
pub type CircuitBreakerResult<T> = Result<T, CircuitBreakerError>;

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    consecutive_failures: u32,
    last_failure: Option<Instant>,
    probe_started: Option<Instant>,
}

/// Circuit breaker for one destination.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    clock: Arc<dyn Clock>,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    /// Creates a closed breaker using the tokio clock.
    #[must_use]
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self::with_clock(name, config, Arc::new(TokioClock))
    }

    /// Creates a closed breaker with a custom clock.
    #[must_use]
    pub fn with_clock(
        name: impl Into<String>,
        config: CircuitBreakerConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            clock,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                last_failure: None,
                probe_started: None,
            }),
        }
    }

    /// Breaker name (the destination it protects).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Breaker configuration.
    #[must_use]
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    /// Current consecutive failure count.
    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.inner.lock().consecutive_failures
    }

    /// Asks to send a call.
    ///
    /// # Errors
    ///
    /// Returns `CircuitBreakerError::Open` if the breaker is open and the
    /// cool-down has not elapsed, or a probe is already in flight.
    pub fn try_acquire(&self) -> CircuitBreakerResult<Admission> {
        let now = self.clock.now();
        let cool_down = self.config.cool_down;
        let mut inner = self.inner.lock();

        match inner.state {
            CircuitState::Closed => Ok(Admission::Normal),
            CircuitState::Open => {
                let since_failure = inner
                    .last_failure
                    .map_or(cool_down, |t| now.saturating_duration_since(t));
                if since_failure >= cool_down {
                    inner.state = CircuitState::HalfOpen;
                    inner.probe_started = Some(now);
                    info!(breaker = %self.name, "circuit breaker half-open, admitting probe");
                    Ok(Admission::Probe)
                } else {
                    Err(self.open_error(cool_down - since_failure))
                }
            }
            CircuitState::HalfOpen => {
                let since_probe = inner
                    .probe_started
                    .map_or(cool_down, |t| now.saturating_duration_since(t));
                if since_probe >= cool_down {
                    inner.probe_started = Some(now);
                    warn!(
                        breaker = %self.name,
                        "previous probe never completed, admitting new probe"
                    );
                    Ok(Admission::Probe)
                } else {
                    Err(self.open_error(cool_down - since_probe))
                }
            }
        }
    }

    /// Records a successful call: closes the breaker and resets the counter.
    pub fn record_success(&self) {
        let mut inner = self.inner.lock();
        if inner.state != CircuitState::Closed {
            info!(breaker = %self.name, from = %inner.state, "circuit breaker closed");
        }
        inner.state = CircuitState::Closed;
        inner.consecutive_failures = 0;
        inner.probe_started = None;
    }

    /// Records a failed call.
    pub fn record_failure(&self) {
        let now = self.clock.now();
        let mut inner = self.inner.lock();
        inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
        inner.last_failure = Some(now);

        match inner.state {
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Open;
                inner.probe_started = None;
                warn!(breaker = %self.name, "probe failed, circuit breaker re-opened");
            }
            CircuitState::Closed if inner.consecutive_failures >= self.config.failure_threshold => {
                inner.state = CircuitState::Open;
                warn!(
                    breaker = %self.name,
                    failures = inner.consecutive_failures,
                    "circuit breaker opened"
                );
            }
            _ => {}
        }
    }

    /// Gives back a probe slot that was admitted but never used.
    ///
    /// The breaker returns to `Open` with its previous failure time, so the
    /// next caller is admitted as the probe straight away. No effect unless
    /// half-open.
    pub fn release_probe(&self) {
        let mut inner = self.inner.lock();
        if inner.state == CircuitState::HalfOpen {
            inner.state = CircuitState::Open;
            inner.probe_started = None;
            debug!(breaker = %self.name, "probe released unused");
        }
    }

    fn open_error(&self, retry_in: Duration) -> CircuitBreakerError {
        CircuitBreakerError::Open {
            name: self.name.clone(),
            retry_in,
        }
    }
}
