//! Bounded retry with exponential backoff
//!
//! One logical call moves through a small state machine:
//!
//! ```text
//! Attempting ──ok──────────────> Success
//!     │ ──non-retryable error──> NonRetryableFailure
//!     └──retryable error───────> RetryableFailure ──wait──> Attempting
//!                                        └──limit reached──> Exhausted
//! ```
//!
//! The attempt count and accumulated wait live on the stack of [`RetryPolicy::run`]
//! and disappear when the call resolves. Dropping the returned future cancels the
//! in-flight attempt and any pending wait.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::core::config::SwcConfig;
use crate::error::{Result, SwcError};


/// Keeps `2^n` from overflowing; the per-wait cap is hit long before this anyway.
const MAX_BACKOFF_EXPONENT: u32 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    enabled: bool,
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
    max_time: Duration,
}

enum AttemptState<T> {
    Attempting { attempt: u32 },
    Success(T),
    RetryableFailure { attempt: u32, error: SwcError },
    NonRetryableFailure(SwcError),
    Exhausted { attempts: u32, last: SwcError },
}

impl RetryPolicy {
    pub fn from_config(config: &SwcConfig) -> Self {
        Self {
            enabled: config.backoff_enabled(),
            max_retries: config.max_retries(),
            base_delay: config.backoff_base_delay(),
            max_delay: config.backoff_max_delay(),
            max_time: config.backoff_max_time(),
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            max_time: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Total attempts one call may make, the first included.
    pub fn max_attempts(&self) -> u32 {
        if self.enabled {
            self.max_retries.saturating_add(1)
        } else {
            1
        }
    }

    /// Wait before retry number `retry` (1-based): `base * 2^(retry-1)`, capped.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
        let multiplier = 2_u32.saturating_pow(exponent);
        self.base_delay
            .checked_mul(multiplier)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Whether waiting `delay` more after `waited` stays inside `backoff_max_time`.
    fn within_budget(&self, waited: Duration, delay: Duration) -> bool {
        waited.saturating_add(delay) <= self.max_time
    }

    /// Run `operation` until it succeeds, fails for good, or the retry budget is spent.
    ///
    /// With backoff disabled the first error is returned as-is. With backoff enabled,
    /// running out of attempts (or of `backoff_max_time`) yields
    /// [`SwcError::RetryExhausted`] wrapping the last failure.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts();
        let mut waited = Duration::ZERO;
        let mut state = AttemptState::Attempting { attempt: 1 };

        loop {
            state = match state {
                AttemptState::Attempting { attempt } => match operation().await {
                    Ok(value) => AttemptState::Success(value),
                    Err(error) if error.is_retryable() => {
                        AttemptState::RetryableFailure { attempt, error }
                    }
                    Err(error) => AttemptState::NonRetryableFailure(error),
                },

                AttemptState::RetryableFailure { attempt, error } => {
                    if !self.enabled {
                        return Err(error);
                    }

                    warn!(
                        "{} failed on attempt {}/{}: {}",
                        label, attempt, max_attempts, error
                    );

                    if attempt >= max_attempts {
                        AttemptState::Exhausted {
                            attempts: attempt,
                            last: error,
                        }
                    } else {
                        let delay = self.delay_for(attempt);
                        if !self.within_budget(waited, delay) {
                            debug!(
                                "{}: next wait {:?} would exceed backoff budget {:?}",
                                label, delay, self.max_time
                            );
                            AttemptState::Exhausted {
                                attempts: attempt,
                                last: error,
                            }
                        } else {
                            debug!("{}: retrying after {:?}", label, delay);
                            tokio::time::sleep(delay).await;
                            waited = waited.saturating_add(delay);
                            AttemptState::Attempting {
                                attempt: attempt + 1,
                            }
                        }
                    }
                }

                AttemptState::Success(value) => return Ok(value),
                AttemptState::NonRetryableFailure(error) => return Err(error),
                AttemptState::Exhausted { attempts, last } => {
                    return Err(SwcError::RetryExhausted {
                        attempts,
                        last: Box::new(last),
                    })
                }
            };
        }
    }
}
