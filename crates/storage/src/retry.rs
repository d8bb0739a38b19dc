//! Bounded retry with a fixed pause
//!
//! Every failed attempt is retried until the budget is spent; the caller's
//! closure is expected to start from scratch each time (fresh fetch, fresh
//! version token).

use rollcall_core::{StoreError, StoreResult};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Attempt budget for remote writes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Pause between consecutive attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1500),
        }
    }
}

impl RetryPolicy {
    /// Policy with an explicit budget and pause
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Policy that retries without pausing
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Run `op` until it succeeds or the budget is spent
    ///
    /// `op` receives the 1-based attempt number. A budget of zero is treated
    /// as one attempt. Exhaustion yields [`StoreError::Exhausted`] carrying
    /// the last attempt's error.
    pub fn run<T, F>(&self, label: &str, mut op: F) -> StoreResult<T>
    where
        F: FnMut(u32) -> StoreResult<T>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(label, attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if attempt < attempts => {
                    warn!(label, attempt, error = %e, "attempt failed, retrying");
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                    attempt += 1;
                }
                Err(e) => {
                    warn!(label, attempt, error = %e, "attempt failed, giving up");
                    return Err(StoreError::Exhausted {
                        attempts,
                        last: Box::new(e),
                    });
                }
            }
        }
    }
}
