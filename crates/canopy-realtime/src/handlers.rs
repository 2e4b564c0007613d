//! Handler registries and fan-out.
//!
//! Three observer lists: per-type message handlers, connection lifecycle
//! handlers, and error handlers. Registration returns a [`HandlerId`]
//! disposer so removal never requires the caller to retain the original
//! closure. Fan-out is synchronous, in registration order, and
//! panic-isolated — one failing consumer cannot starve the others or poison
//! the dispatch loop.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::warn;

use crate::envelope::Envelope;
use crate::error::RealtimeError;

/// Callback invoked for each application message of a registered type.
pub type MessageHandler = Arc<dyn Fn(&Envelope) + Send + Sync>;
/// Callback invoked on connection lifecycle events.
pub type ConnectionHandler = Arc<dyn Fn(&ConnectionEvent) + Send + Sync>;
/// Callback invoked when a runtime error surfaces.
pub type ErrorHandler = Arc<dyn Fn(&RealtimeError) + Send + Sync>;

/// Connection lifecycle notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The transport opened; subscriptions have been replayed.
    Connected {
        /// Epoch of the new connection.
        epoch: u64,
    },
    /// The transport closed or errored.
    Disconnected {
        /// Close code, when the peer sent one.
        code: Option<u16>,
        /// Close reason, empty when none was given.
        reason: String,
    },
    /// An involuntary loss is being retried after a backoff delay.
    Reconnecting {
        /// One-based attempt number.
        attempt: u32,
        /// Delay before the attempt fires.
        delay: Duration,
    },
}

/// Opaque disposer for a registered handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Registries for message, connection, and error handlers.
#[derive(Default)]
pub struct HandlerRegistry {
    next_id: AtomicU64,
    message: RwLock<HashMap<String, Vec<(HandlerId, MessageHandler)>>>,
    connection: RwLock<Vec<(HandlerId, ConnectionHandler)>>,
    error: RwLock<Vec<(HandlerId, ErrorHandler)>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> HandlerId {
        HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Register a handler for an application message type.
    pub fn on_message(
        &self,
        message_type: &str,
        handler: impl Fn(&Envelope) + Send + Sync + 'static,
    ) -> HandlerId {
        let id = self.next_id();
        self.message
            .write()
            .entry(message_type.to_owned())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove a message handler. Returns `true` if it was registered.
    pub fn off_message(&self, message_type: &str, id: HandlerId) -> bool {
        let mut map = self.message.write();
        let Some(list) = map.get_mut(message_type) else {
            return false;
        };
        let before = list.len();
        list.retain(|(hid, _)| *hid != id);
        let removed = list.len() < before;
        if list.is_empty() {
            let _ = map.remove(message_type);
        }
        removed
    }

    /// Register a connection lifecycle handler.
    pub fn on_connection(
        &self,
        handler: impl Fn(&ConnectionEvent) + Send + Sync + 'static,
    ) -> HandlerId {
        let id = self.next_id();
        self.connection.write().push((id, Arc::new(handler)));
        id
    }

    /// Remove a connection handler. Returns `true` if it was registered.
    pub fn off_connection(&self, id: HandlerId) -> bool {
        let mut list = self.connection.write();
        let before = list.len();
        list.retain(|(hid, _)| *hid != id);
        list.len() < before
    }

    /// Register an error handler.
    pub fn on_error(
        &self,
        handler: impl Fn(&RealtimeError) + Send + Sync + 'static,
    ) -> HandlerId {
        let id = self.next_id();
        self.error.write().push((id, Arc::new(handler)));
        id
    }

    /// Remove an error handler. Returns `true` if it was registered.
    pub fn off_error(&self, id: HandlerId) -> bool {
        let mut list = self.error.write();
        let before = list.len();
        list.retain(|(hid, _)| *hid != id);
        list.len() < before
    }

    /// Fan an application message out to every handler of its type, in
    /// registration order. Returns the number of handlers invoked.
    pub fn dispatch(&self, envelope: &Envelope) -> usize {
        // Clone the handler list out of the lock so a slow or re-entrant
        // handler cannot hold up registration from other threads.
        let handlers: Vec<MessageHandler> = self
            .message
            .read()
            .get(&envelope.message_type)
            .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        for handler in &handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(envelope))).is_err() {
                warn!(
                    message_type = envelope.message_type,
                    "message handler panicked — continuing with remaining handlers"
                );
            }
        }
        handlers.len()
    }

    /// Notify every connection handler.
    pub fn notify_connection(&self, event: &ConnectionEvent) {
        let handlers: Vec<ConnectionHandler> = self
            .connection
            .read()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                warn!("connection handler panicked");
            }
        }
    }

    /// Notify every error handler.
    pub fn notify_error(&self, error: &RealtimeError) {
        let handlers: Vec<ErrorHandler> = self
            .error
            .read()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(error))).is_err() {
                warn!("error handler panicked");
            }
        }
    }

    /// Number of handlers registered for a message type.
    #[must_use]
    pub fn message_handler_count(&self, message_type: &str) -> usize {
        self.message
            .read()
            .get(message_type)
            .map_or(0, Vec::len)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
