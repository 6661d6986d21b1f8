//! # Backoff Policy
//!
//! Exponential delay between retry attempts.
//!
//! `delay(0) = 0` and `delay(n) = min(initial * multiplier^(n-1), max)` for
//! `n >= 1`. With the defaults that is 0, 100 ms, 200 ms, 400 ms, ... capped
//! at 2 s.
//!
//! # Examples
//!
//! ```
//! use delivery_gateway::infrastructure::delivery::backoff::BackoffPolicy;
//! use std::time::Duration;
//!
//! let policy = BackoffPolicy::default();
//! assert_eq!(policy.delay(0), Duration::ZERO);
//! assert_eq!(policy.delay(1), Duration::from_millis(100));
//! assert_eq!(policy.delay(3), Duration::from_millis(400));
//! assert_eq!(policy.delay(10), Duration::from_secs(2));
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay before the first retry.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(100);

/// Default upper bound for any delay.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(2);

/// Default growth factor.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Exponential backoff configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackoffPolicy {
    /// Delay before attempt 1.
    pub initial: Duration,
    /// Growth factor per attempt.
    pub multiplier: f64,
    /// Upper bound.
    pub max: Duration,
    /// Randomize each delay within `[delay / 2, delay]`.
    pub jitter: bool,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial: DEFAULT_INITIAL_BACKOFF,
            multiplier: DEFAULT_MULTIPLIER,
            max: DEFAULT_MAX_BACKOFF,
            jitter: false,
        }
    }
}

impl BackoffPolicy {
    /// Creates a deterministic policy.
    #[must_use]
    pub fn new(initial: Duration, multiplier: f64, max: Duration) -> Self {
        Self {
            initial,
            multiplier,
            max,
            jitter: false,
        }
    }

    /// Enables or disables jitter.
    #[must_use]
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Deterministic delay before `attempt` (0-based).
    #[must_use]
    pub fn base_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let cap = self.max.as_nanos() as f64;
        let nanos = (self.initial.as_nanos() as f64 * self.multiplier.powi(exponent)).min(cap);
        if nanos.is_nan() || nanos <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(nanos.round() as u64)
    }

    /// Delay before `attempt`, with jitter applied when enabled.
    ///
    /// Never exceeds [`BackoffPolicy::base_delay`] and therefore never
    /// exceeds `max`.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt);
        if !self.jitter || base.is_zero() {
            return base;
        }
        let upper = base.as_nanos() as u64;
        let lower = upper / 2;
        Duration::from_nanos(rand::rng().random_range(lower..=upper))
    }
}
