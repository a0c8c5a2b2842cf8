//! Retry policy value objects.

use super::NegotiationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::time::Duration;

/// Delay growth strategy between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffStrategy {
    /// Every retry waits the initial delay.
    Fixed,
    /// Each retry doubles the previous delay.
    Exponential,
}

impl BackoffStrategy {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Exponential => "exponential",
        }
    }
}

impl fmt::Display for BackoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Retry behaviour agreed for ongoing communication with the remote agent.
///
/// `max_retries` is non-negative by construction and the initial delay is
/// positive by construction; a zero delay is a configuration error caught at
/// the constructor, never a runtime fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff: BackoffStrategy,
    #[serde(rename = "initial_delay")]
    initial_delay_secs: NonZeroU64,
}

impl RetryPolicy {
    /// Creates a retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationDomainError::ZeroInitialDelay`] when
    /// `initial_delay_secs` is zero.
    pub fn new(
        max_retries: u32,
        backoff: BackoffStrategy,
        initial_delay_secs: u64,
    ) -> Result<Self, NegotiationDomainError> {
        let initial_delay = NonZeroU64::new(initial_delay_secs)
            .ok_or(NegotiationDomainError::ZeroInitialDelay)?;
        Ok(Self {
            max_retries,
            backoff,
            initial_delay_secs: initial_delay,
        })
    }

    /// Returns the default policy: three retries with exponential backoff
    /// starting at one second.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            max_retries: 3,
            backoff: BackoffStrategy::Exponential,
            initial_delay_secs: NonZeroU64::MIN,
        }
    }

    /// Returns the maximum number of retry attempts.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the delay growth strategy.
    #[must_use]
    pub const fn backoff(&self) -> BackoffStrategy {
        self.backoff
    }

    /// Returns the delay before the first retry.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs.get())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
