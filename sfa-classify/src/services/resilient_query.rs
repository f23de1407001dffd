//! Bounded retry around a classification transport
//!
//! The service sporadically answers with codes that succeed on an immediate
//! retry. Each query is repeated until the status is acceptable (single
//! match, multiple matches or no match) or the attempt ceiling is reached.
//! After the ceiling the last response is returned as-is; callers treat it
//! as "nothing resolved".

use crate::services::classify_client::ClassifyTransport;
use crate::types::{ClassificationResponse, QueryKey};
use std::time::Duration;

/// Default attempt ceiling per query
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default delay between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Attempt ceiling and fixed inter-attempt delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// A ceiling of 0 is treated as 1: every query is attempted at least once
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Same ceiling, different delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

/// Transport wrapper that retries transient statuses
pub struct ResilientQuery<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: ClassifyTransport> ResilientQuery<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Query `key`, retrying until an acceptable status or the ceiling
    pub async fn query(&self, key: &QueryKey) -> ClassificationResponse {
        let mut attempt = 1;

        loop {
            let response = self.transport.query(key).await;

            if response.status.is_acceptable() {
                if attempt > 1 {
                    tracing::debug!(
                        key = %key,
                        attempt,
                        status = %response.status,
                        "Classification query succeeded after retry"
                    );
                }
                return response;
            }

            if attempt >= self.policy.max_attempts {
                tracing::warn!(
                    key = %key,
                    attempts = attempt,
                    status = %response.status,
                    "Classification query still transient after max attempts, giving up"
                );
                return response;
            }

            tracing::debug!(
                key = %key,
                attempt,
                status = %response.status,
                delay_ms = self.policy.delay.as_millis() as u64,
                "Transient classification status, will retry after delay"
            );

            if !self.policy.delay.is_zero() {
                tokio::time::sleep(self.policy.delay).await;
            }
            attempt += 1;
        }
    }
}
