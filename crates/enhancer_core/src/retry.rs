//! Waiting for elements the host renders at an unknown time.

use crate::dom::Timer;
use crate::error::{Error, Result};
use enhancer_config::RetryConfig;
use std::time::Duration;

/// How often and how long to look for something before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay before the first lookup.
    pub initial_delay: Duration,
    /// Delay between two lookups.
    pub interval: Duration,
    /// `None` keeps looking forever.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Looks exactly once, after `delay`.
    pub fn once_after(delay: Duration) -> Self {
        Self {
            initial_delay: delay,
            interval: Duration::ZERO,
            max_attempts: Some(1),
        }
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            initial_delay: Duration::ZERO,
            interval: config.interval(),
            max_attempts: config.max_attempts,
        }
    }
}

/// Calls `probe` until it yields a value or the policy runs out of attempts.
///
/// `what` names the awaited element in the returned error.
pub async fn wait_for<T>(
    timer: &impl Timer,
    policy: &RetryPolicy,
    what: &str,
    mut probe: impl FnMut() -> Option<T>,
) -> Result<T> {
    if !policy.initial_delay.is_zero() {
        timer.sleep(policy.initial_delay).await;
    }

    let mut attempts = 0u32;
    loop {
        if let Some(found) = probe() {
            if attempts > 0 {
                tracing::debug!(what, attempts, "Host element appeared");
            }
            return Ok(found);
        }

        attempts += 1;
        if policy.exhausted(attempts) {
            tracing::debug!(what, attempts, "Gave up waiting for host element");
            return Err(Error::MissingHostElement(what.to_string()));
        }

        timer.sleep(policy.interval).await;
    }
}
