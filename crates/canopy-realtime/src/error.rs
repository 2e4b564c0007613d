//! Realtime error taxonomy.
//!
//! Every runtime failure is surfaced through the `on_error` handler
//! registry or a return value — the public API never panics and never
//! throws past its boundary. The only pre-flight failure is
//! [`RealtimeError::InvalidConfig`], returned from client construction.

use thiserror::Error;

/// Errors surfaced by the realtime connection manager.
///
/// `Clone` because a single failure fans out to every registered error
/// handler.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RealtimeError {
    /// Configuration rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transport construction, handshake, or socket I/O failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// No open event arrived before the establishment timeout fired.
    #[error("connection attempt timed out after {timeout_ms} ms")]
    ConnectTimeout {
        /// The configured establishment timeout.
        timeout_ms: u64,
    },

    /// An inbound frame exceeded the configured size limit and was dropped.
    #[error("inbound frame of {size} bytes exceeds the {limit} byte limit")]
    FrameTooLarge {
        /// Size of the offending frame.
        size: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// An inbound frame could not be decoded as a message envelope.
    #[error("invalid message format: {0}")]
    InvalidFormat(String),

    /// The server sent an `error`-type message.
    #[error("server error: {0}")]
    Server(String),

    /// Every scheduled reconnect attempt failed; the client is parked until
    /// the next explicit connect call.
    #[error("reconnect attempts exhausted after {attempts} tries")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
