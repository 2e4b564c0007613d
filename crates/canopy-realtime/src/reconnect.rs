//! Reconnection scheduling policy.
//!
//! Pure policy: given a zero-based attempt index, either a delay to wait
//! before the next attempt or `None` once the attempt budget is spent. The
//! connection driver owns the actual waiting (cancellable, epoch-guarded).
//!
//! The schedule is deterministic doubling with no jitter — callers rely on
//! the exact sequence for observability and tests.

use std::time::Duration;

use canopy_core::backoff::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS, backoff_delay_ms};

use crate::config::RealtimeConfig;

/// Decides whether and when to retry after an involuntary disconnect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Delay before the first retry; doubles on each subsequent attempt.
    pub base_delay: Duration,
    /// Attempts allowed before parking in the error state.
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ReconnectPolicy {
    /// Policy from the client configuration.
    #[must_use]
    pub fn from_config(config: &RealtimeConfig) -> Self {
        Self {
            base_delay: config.reconnect_base_delay,
            max_attempts: config.max_reconnect_attempts,
        }
    }

    /// Delay before retry number `attempt` (zero-based), or `None` once the
    /// attempt budget is exhausted.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let base_ms = self.base_delay.as_millis() as u64;
        Some(Duration::from_millis(backoff_delay_ms(attempt, base_ms)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
