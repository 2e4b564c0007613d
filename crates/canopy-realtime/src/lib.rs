//! # canopy-realtime
//!
//! The realtime connection and subscription manager for the Canopy platform.
//!
//! One [`RealtimeClient`] owns at most one live WebSocket connection per
//! process. It keeps the connection alive with heartbeat pings, recovers
//! from involuntary disconnects with exponential backoff, replays the
//! declared topic subscriptions onto every new connection, and fans inbound
//! messages out to the handlers registered for each message type.
//!
//! # Usage
//!
//! ```no_run
//! use canopy_realtime::{Identity, RealtimeClient, RealtimeConfig};
//!
//! # async fn demo() -> Result<(), canopy_realtime::RealtimeError> {
//! let client = RealtimeClient::new(RealtimeConfig::default())?;
//! let _handler = client.on_message("chat_message", |envelope| {
//!     println!("chat: {}", envelope.payload);
//! });
//! client.subscribe("chat:org_1");
//! client.connect(Identity::new("user_1").with_organization("org_1"));
//! # Ok(())
//! # }
//! ```
//!
//! Connection progress is observed through `on_connection` / `on_error`
//! callbacks, never through return values: `connect` is fire-and-forget and
//! `send` is a gated `bool`.

#![deny(unsafe_code)]

mod config;
mod connection;
mod dispatcher;
mod envelope;
mod error;
mod handlers;
mod heartbeat;
mod identity;
mod reconnect;
mod subscriptions;

pub use config::RealtimeConfig;
pub use connection::{ConnectionStatus, RealtimeClient};
pub use envelope::{Envelope, SystemMessage, wire_type};
pub use error::RealtimeError;
pub use handlers::{ConnectionEvent, HandlerId};
pub use identity::Identity;
pub use reconnect::ReconnectPolicy;
pub use subscriptions::SubscriptionRegistry;
