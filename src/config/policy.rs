// src/config/policy.rs
use std::time::Duration;

use super::parsed_or;

/// How the enricher paces itself against the generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    /// Items per combined request. Never zero.
    pub batch_size: usize,
    /// Pause between consecutive batches; none after the last one.
    pub inter_batch_delay: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            batch_size: 5,
            inter_batch_delay: Duration::from_millis(500),
        }
    }
}

impl BatchPolicy {
    pub fn new(batch_size: usize, inter_batch_delay: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            inter_batch_delay,
        }
    }

    /// Same batching, no pauses.
    pub fn without_delay(self) -> Self {
        Self {
            inter_batch_delay: Duration::ZERO,
            ..self
        }
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let size = parsed_or(lookup, "TRENDS_BATCH_SIZE", d.batch_size);
        let delay_ms = parsed_or(
            lookup,
            "TRENDS_BATCH_DELAY_MS",
            d.inter_batch_delay.as_millis() as u64,
        );
        Self::new(size, Duration::from_millis(delay_ms))
    }
}
