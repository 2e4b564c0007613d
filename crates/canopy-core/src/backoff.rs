//! Exponential backoff delay calculation.
//!
//! Portable, sync-only math for retry scheduling. The realtime crate wraps
//! this with tokio timers; this module is just the arithmetic so it can be
//! tested exhaustively without a runtime.
//!
//! The schedule is deterministic — no jitter. Successive delays double from
//! the base: `base, base*2, base*4, ...`, saturating rather than
//! overflowing for pathological attempt counts.

/// Default maximum number of reconnect attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
/// Default base delay in milliseconds.
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Calculate the backoff delay for a zero-based attempt index.
///
/// Formula: `base_delay_ms * 2^attempt`, saturating at `u64::MAX`.
///
/// With the defaults (`base = 1000`), attempts 0..5 yield
/// 1000, 2000, 4000, 8000, 16000 ms.
#[must_use]
pub fn backoff_delay_ms(attempt: u32, base_delay_ms: u64) -> u64 {
    if attempt >= 64 {
        return u64::MAX;
    }
    base_delay_ms.saturating_mul(1u64 << attempt)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
