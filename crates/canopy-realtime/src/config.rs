//! Realtime client configuration.
//!
//! Every knob has a production default and is validated once, at client
//! construction. Invalid configuration is the only error the public API
//! reports synchronously — everything after construction flows through the
//! error handler registry.

use std::time::Duration;

use canopy_core::backoff::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS};

use crate::error::RealtimeError;

/// Default transport endpoint.
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9870/realtime";
/// Default heartbeat ping interval.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
/// Default connection establishment timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default maximum inbound frame size (1 MiB).
pub const DEFAULT_MAX_FRAME_BYTES: usize = 1_048_576;
/// Default capacity of the bounded outbound queue.
pub const DEFAULT_OUTBOUND_QUEUE: usize = 256;

/// Configuration for a [`RealtimeClient`](crate::RealtimeClient).
#[derive(Clone, Debug)]
pub struct RealtimeConfig {
    /// Base WebSocket endpoint (`ws://` or `wss://`). Identity query
    /// parameters are appended at connect time.
    pub endpoint: String,
    /// Interval between outbound heartbeat pings while connected.
    pub heartbeat_interval: Duration,
    /// One-shot timeout for connection establishment. Must be shorter than
    /// the heartbeat interval.
    pub connect_timeout: Duration,
    /// Inbound frames larger than this are dropped with an error.
    pub max_frame_bytes: usize,
    /// Base delay for exponential reconnect backoff.
    pub reconnect_base_delay: Duration,
    /// Maximum number of reconnect attempts before parking in the error
    /// state.
    pub max_reconnect_attempts: u32,
    /// Capacity of the outbound send queue; `send` fails once it is full.
    pub outbound_queue_size: usize,
    /// Reserved: negotiate permessage compression. Accepted but not yet
    /// wired to the transport.
    pub compression: bool,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            reconnect_base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_reconnect_attempts: DEFAULT_MAX_ATTEMPTS,
            outbound_queue_size: DEFAULT_OUTBOUND_QUEUE,
            compression: false,
        }
    }
}

impl RealtimeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// [`RealtimeError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), RealtimeError> {
        if !self.endpoint.starts_with("ws://") && !self.endpoint.starts_with("wss://") {
            return Err(RealtimeError::InvalidConfig(format!(
                "endpoint must use ws:// or wss://, got {:?}",
                self.endpoint
            )));
        }
        if self.heartbeat_interval.is_zero() {
            return Err(RealtimeError::InvalidConfig(
                "heartbeat_interval must be positive".into(),
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(RealtimeError::InvalidConfig(
                "connect_timeout must be positive".into(),
            ));
        }
        if self.connect_timeout >= self.heartbeat_interval {
            return Err(RealtimeError::InvalidConfig(
                "connect_timeout must be shorter than heartbeat_interval".into(),
            ));
        }
        if self.max_frame_bytes == 0 {
            return Err(RealtimeError::InvalidConfig(
                "max_frame_bytes must be positive".into(),
            ));
        }
        if self.reconnect_base_delay.is_zero() {
            return Err(RealtimeError::InvalidConfig(
                "reconnect_base_delay must be positive".into(),
            ));
        }
        if self.outbound_queue_size == 0 {
            return Err(RealtimeError::InvalidConfig(
                "outbound_queue_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
