//! # Configuration
//!
//! Layered settings: built-in defaults, then an optional file named by
//! `DELIVERY_CONFIG_FILE`, then `DELIVERY__<SECTION>__<KEY>` environment
//! variables. A `.env` file is loaded first when present.
//!
//! ```text
//! DELIVERY__DELIVERY_SERVICE__ENDPOINT=http://delivery:50052
//! DELIVERY__CIRCUIT_BREAKER__FAILURE_THRESHOLD=5
//! DELIVERY__LOGGING__JSON=true
//! ```

use crate::application::services::QuoteConfig;
use crate::application::services::ranking_strategy::DEFAULT_DAY_WEIGHT;
use crate::domain::value_objects::dimensions::DEFAULT_VOLUMETRIC_DIVISOR;
use crate::infrastructure::delivery::backoff::{
    DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_BACKOFF, DEFAULT_MULTIPLIER,
};
use crate::infrastructure::delivery::circuit_breaker::{
    DEFAULT_COOL_DOWN, DEFAULT_FAILURE_THRESHOLD,
};
use crate::infrastructure::delivery::gateway::{
    DEFAULT_LIFECYCLE_TIMEOUT, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_MAX_ATTEMPTS,
};
use crate::infrastructure::delivery::{BackoffPolicy, CircuitBreakerConfig, GatewayConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DELIVERY";

/// Environment variable naming an optional configuration file.
pub const CONFIG_FILE_VAR: &str = "DELIVERY_CONFIG_FILE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote delivery microservice.
    pub delivery_service: DeliveryServiceConfig,
    /// Per-destination circuit breaker.
    pub circuit_breaker: CircuitBreakerSettings,
    /// Retry backoff.
    pub backoff: BackoffSettings,
    /// Quote calculation.
    pub quote: QuoteSettings,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Remote delivery microservice settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryServiceConfig {
    /// gRPC endpoint URI.
    pub endpoint: String,
    /// Channel connect timeout.
    pub connect_timeout_ms: u64,
    /// Deadline for create, get, track and cancel.
    pub lifecycle_timeout_ms: u64,
    /// Deadline for rate and reference lookups.
    pub lookup_timeout_ms: u64,
    /// Attempts for lifecycle calls.
    pub lifecycle_max_attempts: u32,
    /// Attempts for lookups.
    pub lookup_max_attempts: u32,
}

impl Default for DeliveryServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:50052".to_string(),
            connect_timeout_ms: 5_000,
            lifecycle_timeout_ms: millis(DEFAULT_LIFECYCLE_TIMEOUT),
            lookup_timeout_ms: millis(DEFAULT_LOOKUP_TIMEOUT),
            lifecycle_max_attempts: DEFAULT_MAX_ATTEMPTS,
            lookup_max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl DeliveryServiceConfig {
    /// Connect timeout for the gRPC channel.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Circuit breaker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerSettings {
    /// Consecutive failures that open the circuit.
    pub failure_threshold: u32,
    /// Time before a probe is let through.
    pub cool_down_ms: u64,
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            cool_down_ms: millis(DEFAULT_COOL_DOWN),
        }
    }
}

/// Backoff settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffSettings {
    /// Delay before the first retry.
    pub initial_ms: u64,
    /// Growth factor per retry.
    pub multiplier: f64,
    /// Delay cap.
    pub max_ms: u64,
    /// Randomize delays.
    pub jitter: bool,
}

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            initial_ms: millis(DEFAULT_INITIAL_BACKOFF),
            multiplier: DEFAULT_MULTIPLIER,
            max_ms: millis(DEFAULT_MAX_BACKOFF),
            jitter: false,
        }
    }
}

/// Quote calculation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    /// Price-equivalent of one delivery day when recommending.
    pub recommendation_day_weight: Decimal,
    /// Used for providers without a positive divisor.
    pub default_volumetric_divisor: Decimal,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            recommendation_day_weight: DEFAULT_DAY_WEIGHT,
            default_volumetric_divisor: Decimal::from(DEFAULT_VOLUMETRIC_DIVISOR),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl AppConfig {
    /// Loads `.env`, the optional config file and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source is unreadable and
    /// `ConfigError::Invalid` if the merged values fail [`validate`](Self::validate).
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine.
        let _ = dotenvy::dotenv();
        let file = std::env::var(CONFIG_FILE_VAR).ok();
        Self::from_sources(
            file.as_deref(),
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Merges defaults, an optional file and an environment source.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_sources(file: Option<&str>, env: config::Environment) -> ConfigResult<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);
        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        let cfg: Self = builder.add_source(env).build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects values the gateway or quote engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad value.
    pub fn validate(&self) -> ConfigResult<()> {
        let svc = &self.delivery_service;
        if svc.endpoint.trim().is_empty() {
            return Err(invalid("delivery_service.endpoint must not be empty"));
        }
        if svc.lifecycle_timeout_ms == 0 || svc.lookup_timeout_ms == 0 {
            return Err(invalid("delivery_service timeouts must be greater than 0"));
        }
        if svc.lifecycle_max_attempts == 0 || svc.lookup_max_attempts == 0 {
            return Err(invalid("delivery_service max attempts must be greater than 0"));
        }
        if self.circuit_breaker.failure_threshold == 0 {
            return Err(invalid("circuit_breaker.failure_threshold must be greater than 0"));
        }
        if self.backoff.multiplier < 1.0 {
            return Err(invalid("backoff.multiplier must be at least 1.0"));
        }
        if self.backoff.max_ms < self.backoff.initial_ms {
            return Err(invalid("backoff.max_ms must not be below backoff.initial_ms"));
        }
        if self.quote.recommendation_day_weight < Decimal::ZERO {
            return Err(invalid("quote.recommendation_day_weight must not be negative"));
        }
        if self.quote.default_volumetric_divisor <= Decimal::ZERO {
            return Err(invalid("quote.default_volumetric_divisor must be positive"));
        }
        Ok(())
    }

    /// Attempt budgets and backoff for the resilient gateway.
    #[must_use]
    pub fn gateway_config(&self) -> GatewayConfig {
        let svc = &self.delivery_service;
        GatewayConfig::default()
            .with_lifecycle(
                Duration::from_millis(svc.lifecycle_timeout_ms),
                svc.lifecycle_max_attempts,
            )
            .with_lookup(
                Duration::from_millis(svc.lookup_timeout_ms),
                svc.lookup_max_attempts,
            )
            .with_backoff(self.backoff_policy())
    }

    /// Breaker settings.
    #[must_use]
    pub fn circuit_breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig::default()
            .with_failure_threshold(self.circuit_breaker.failure_threshold)
            .with_cool_down(Duration::from_millis(self.circuit_breaker.cool_down_ms))
    }

    /// Retry backoff.
    #[must_use]
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::new(
            Duration::from_millis(self.backoff.initial_ms),
            self.backoff.multiplier,
            Duration::from_millis(self.backoff.max_ms),
        )
        .with_jitter(self.backoff.jitter)
    }

    /// Quote calculator settings.
    #[must_use]
    pub fn quote_config(&self) -> QuoteConfig {
        QuoteConfig {
            day_weight: self.quote.recommendation_day_weight,
            default_volumetric_divisor: self.quote.default_volumetric_divisor,
        }
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}
