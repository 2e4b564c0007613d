//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the JSON
//! wire format of the settings file. Each type implements [`Default`] with
//! production default values, and `#[serde(default)]` allows partial JSON —
//! missing fields get their default during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the Canopy platform.
///
/// Loaded from `~/.canopy/settings.json` with defaults applied for missing
/// fields. Environment variables can override specific values.
///
/// # JSON Format
///
/// ```json
/// {
///   "version": "0.1.0",
///   "name": "canopy",
///   "realtime": { "endpoint": "wss://rt.canopy.dev/realtime" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanopySettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Realtime connection settings.
    pub realtime: RealtimeSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for CanopySettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "canopy".to_string(),
            realtime: RealtimeSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Realtime connection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RealtimeSettings {
    /// Base WebSocket endpoint (`ws://` or `wss://`).
    pub endpoint: String,
    /// Interval between heartbeat pings in milliseconds.
    pub heartbeat_interval_ms: u64,
    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Maximum inbound frame size in bytes.
    pub max_frame_bytes: usize,
    /// Base delay for exponential reconnect backoff in milliseconds.
    pub reconnect_base_delay_ms: u64,
    /// Maximum reconnect attempts before giving up.
    pub max_reconnect_attempts: u32,
    /// Capacity of the outbound send queue.
    pub outbound_queue_size: usize,
    /// Reserved: permessage compression flag.
    pub compression: bool,
}

impl Default for RealtimeSettings {
    fn default() -> Self {
        Self {
            endpoint: "ws://127.0.0.1:9870/realtime".to_string(),
            heartbeat_interval_ms: 30_000,
            connect_timeout_ms: 10_000,
            max_frame_bytes: 1_048_576,
            reconnect_base_delay_ms: 1000,
            max_reconnect_attempts: 5,
            outbound_queue_size: 256,
            compression: false,
        }
    }
}

/// Log level for the tracing subscriber.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace-level (most verbose).
    Trace,
    /// Debug-level.
    Debug,
    /// Info-level (default).
    #[default]
    Info,
    /// Warning-level.
    Warn,
    /// Error-level.
    Error,
}

impl LogLevel {
    /// Convert to a tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum log level emitted by the subscriber.
    pub level: LogLevel,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
