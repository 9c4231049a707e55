//! Caller-level retry with exponential backoff
//!
//! The analysis and speech pipelines never retry on their own. Callers that
//! want resilience against transient transport failures wrap a call here;
//! only errors reporting `is_retryable()` are attempted again.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::retry::{RetryConfig, retry};
//!
//! let config = RetryConfig::with_max_retries(2);
//! let result = retry(&config, || service.analyze(&source, mode)).await;
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff settings for opt-in retries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Delay before the first retry in milliseconds
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Upper bound on any single delay in milliseconds
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Backoff multiplier applied per attempt
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Number of retries after the first attempt (0 disables retrying)
    #[serde(default)]
    pub max_retries: u32,

    /// Randomize each delay by up to `jitter_factor`
    #[serde(default = "default_true")]
    pub jitter_enabled: bool,

    /// Jitter fraction of the delay, 0.0 to 1.0
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

const fn default_initial_delay() -> u64 {
    500
}

const fn default_max_delay() -> u64 {
    8_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_true() -> bool {
    true
}

const fn default_jitter_factor() -> f64 {
    0.1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            max_retries: 0,
            jitter_enabled: default_true(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl RetryConfig {
    /// Default backoff with the given number of retries
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Disable jitter
    #[must_use]
    pub const fn without_jitter(mut self) -> Self {
        self.jitter_enabled = false;
        self
    }

    /// Whether any retry will be attempted
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.multiplier < 1.0 {
            return Err("Retry multiplier must be at least 1.0".to_string());
        }

        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err("Jitter factor must be between 0.0 and 1.0".to_string());
        }

        if self.max_delay_ms < self.initial_delay_ms {
            return Err("Maximum retry delay must not be below the initial delay".to_string());
        }

        Ok(())
    }

    /// Delay before retry number `attempt` (0-indexed)
    ///
    /// `initial_delay * multiplier^attempt`, capped at `max_delay`, then
    /// jittered when enabled.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay = (self.initial_delay_ms as f64) * self.multiplier.powi(attempt as i32);
        let capped_delay = base_delay.min(self.max_delay_ms as f64);

        let final_delay = if self.jitter_enabled && self.jitter_factor > 0.0 {
            let jitter_range = capped_delay * self.jitter_factor;
            let jitter = rand::rng().random_range(-jitter_range..=jitter_range);
            (capped_delay + jitter).max(0.0)
        } else {
            capped_delay
        };

        Duration::from_millis(final_delay as u64)
    }
}

/// Errors that know whether another attempt could succeed
pub trait Retryable {
    /// Returns true if the failure is transient
    fn is_retryable(&self) -> bool;
}

impl Retryable for application::ApplicationError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

/// Final result plus attempt bookkeeping
#[derive(Debug)]
pub struct RetryResult<T, E> {
    /// The result of the last attempt
    pub result: Result<T, E>,
    /// Number of attempts made (1 = no retries)
    pub attempts: u32,
    /// Total time spent including delays
    pub total_duration: Duration,
}

impl<T, E> RetryResult<T, E> {
    /// Check if the operation succeeded
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Convert to a plain `Result`, discarding metadata
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Run `operation`, retrying retryable failures according to `config`
#[allow(clippy::cast_possible_truncation)]
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let start = std::time::Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(
                        attempts,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Operation succeeded after retries"
                    );
                }
                return RetryResult {
                    result: Ok(value),
                    attempts,
                    total_duration: start.elapsed(),
                };
            },
            Err(err) => {
                let retry_attempt = attempts - 1;

                if !err.is_retryable() || retry_attempt >= config.max_retries {
                    if attempts > 1 {
                        warn!(attempts, error = %err, "Giving up after retries");
                    }
                    return RetryResult {
                        result: Err(err),
                        attempts,
                        total_duration: start.elapsed(),
                    };
                }

                let delay = config.delay_for_attempt(retry_attempt);
                warn!(
                    attempt = attempts,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient failure, retrying"
                );

                tokio::time::sleep(delay).await;
            },
        }
    }
}

/// Run `operation` with retries, returning only the final `Result`
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    with_retry(config, operation).await.into_result()
}
