//! Exponential backoff with jitter between RPC read rounds.

use std::time::Duration;

use rand::Rng;

/// Backoff schedule for retrying read-only RPC calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub base: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(250),
            max: Duration::from_secs(4),
        }
    }
}

impl Backoff {
    /// Delay before `round` (0 is the first try and never waits).
    pub fn delay(&self, round: u32) -> Duration {
        if round == 0 {
            return Duration::ZERO;
        }

        let factor = 2u32.saturating_pow(round - 1);
        let capped = self.base.saturating_mul(factor).min(self.max);

        // Up to 10% on top
        let jitter_range = capped.as_millis() as u64 / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        capped + Duration::from_millis(jitter)
    }
}
