//! Dispatch pacing and retry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Pacing and retry configuration for one dispatch call.
///
/// Applies uniformly to every item in the call. The group-then-delay
/// structure bounds instantaneous concurrency to `batch_size` in-flight
/// sends and sustained throughput to roughly `batch_size` messages per
/// `batch_delay_ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Number of messages sent concurrently per group.
    ///
    /// Default: 10
    #[serde(default = "defaults::batch_size")]
    pub batch_size: usize,

    /// Delay between consecutive groups (in milliseconds).
    ///
    /// Taken between groups only, never after the final group.
    ///
    /// Default: 1000 ms
    #[serde(default = "defaults::batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Maximum retries per message after the initial attempt.
    ///
    /// A value of 2 means up to 3 total attempts per message.
    ///
    /// Default: 2
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Delay between attempts for a single message (in milliseconds).
    ///
    /// Incurred only before a retry, never after the final failure.
    ///
    /// Default: 5000 ms
    #[serde(default = "defaults::retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::batch_size(),
            batch_delay_ms: defaults::batch_delay_ms(),
            max_retries: defaults::max_retries(),
            retry_delay_ms: defaults::retry_delay_ms(),
        }
    }
}

impl DispatchConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject configurations that would make group partitioning undefined.
    ///
    /// Delays and retry counts are unsigned, so zero is the only invalid
    /// value left to catch, and only for `batch_size`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Configuration`] if `batch_size` is zero.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.batch_size == 0 {
            return Err(DispatchError::Configuration(
                "batch_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Inter-group delay as a [`Duration`].
    #[must_use]
    pub const fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Inter-attempt delay as a [`Duration`].
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Maximum total attempts per message (1 initial + `max_retries`).
    #[must_use]
    pub const fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

mod defaults {
    pub const fn batch_size() -> usize {
        10
    }

    pub const fn batch_delay_ms() -> u64 {
        1000
    }

    pub const fn max_retries() -> u32 {
        2
    }

    pub const fn retry_delay_ms() -> u64 {
        5000
    }
}
