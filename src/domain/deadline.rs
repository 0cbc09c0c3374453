//! Caller-supplied time limits for remote calls

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use super::DomainError;

/// Absolute point in time by which a request must finish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now() + timeout,
        }
    }

    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Run `future`, failing with `Timeout` naming `operation` if it is still
    /// pending at the deadline. An expired deadline never starts the future.
    pub async fn run<F, T>(&self, operation: &str, future: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        if self.is_expired() {
            return Err(DomainError::timeout(operation));
        }

        tokio::time::timeout_at(self.at, future)
            .await
            .map_err(|_| DomainError::timeout(operation))?
    }
}
