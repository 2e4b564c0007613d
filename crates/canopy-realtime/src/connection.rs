//! The connection manager.
//!
//! [`RealtimeClient`] owns at most one live transport per process. A single
//! driver task walks the connect → session → reconnect loop; a per-session
//! `select!` multiplexes the socket, the bounded outbound queue, and
//! cancellation. Every timer captures the connection epoch it was armed
//! under and becomes a no-op once the epoch advances, so a superseded
//! connection can never mutate its successor.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::RealtimeConfig;
use crate::dispatcher::dispatch_frame;
use crate::envelope::Envelope;
use crate::error::RealtimeError;
use crate::handlers::{ConnectionEvent, HandlerId, HandlerRegistry};
use crate::heartbeat::run_heartbeat;
use crate::identity::Identity;
use crate::reconnect::ReconnectPolicy;
use crate::subscriptions::SubscriptionRegistry;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Close codes that signal an intentional shutdown by either side.
const NORMAL_CLOSE_CODES: [u16; 2] = [1000, 1001];

/// Public connection status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// A connection attempt (first or retry) is in flight.
    Connecting,
    /// The transport is open and messages flow.
    Connected,
    /// No connection and none pending.
    Disconnected,
    /// Reconnect attempts are exhausted; waiting for an explicit connect.
    Error,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Internal state machine states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Failed,
}

impl ConnectionState {
    fn status(self) -> ConnectionStatus {
        match self {
            Self::Disconnected => ConnectionStatus::Disconnected,
            Self::Connecting | Self::Reconnecting => ConnectionStatus::Connecting,
            Self::Connected => ConnectionStatus::Connected,
            Self::Failed => ConnectionStatus::Error,
        }
    }

    fn is_active(self) -> bool {
        matches!(self, Self::Connecting | Self::Connected | Self::Reconnecting)
    }
}

/// Sender half of the per-session outbound queue, tagged with the epoch it
/// belongs to.
struct OutboundLink {
    epoch: u64,
    tx: mpsc::Sender<Envelope>,
}

/// The running driver task for the current connect call.
struct DriverHandle {
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

struct Inner {
    config: RealtimeConfig,
    policy: ReconnectPolicy,
    subscriptions: SubscriptionRegistry,
    handlers: HandlerRegistry,
    state: Mutex<ConnectionState>,
    epoch: Arc<AtomicU64>,
    outbound: Mutex<Option<OutboundLink>>,
    driver: Mutex<Option<DriverHandle>>,
}

impl Inner {
    /// Set the state unless the driver owning `cancel` has been cancelled —
    /// a cancelled driver must not touch state that `disconnect` (or a
    /// successor connect) now owns.
    fn set_state(&self, cancel: &CancellationToken, next: ConnectionState) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        *self.state.lock() = next;
        true
    }

    /// Enqueue an envelope on the current session's outbound queue.
    fn send_envelope(&self, envelope: Envelope) -> bool {
        if *self.state.lock() != ConnectionState::Connected {
            return false;
        }
        let link = self.outbound.lock();
        let Some(link) = link.as_ref() else {
            return false;
        };
        match link.tx.try_send(envelope) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "outbound queue rejected message");
                false
            }
        }
    }
}

/// The realtime connection and subscription manager.
///
/// Cheap to clone — clones share the same connection, registries, and
/// handlers. Construct one per process at startup and call
/// [`disconnect`](Self::disconnect) on shutdown.
#[derive(Clone)]
pub struct RealtimeClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for RealtimeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeClient").finish_non_exhaustive()
    }
}

impl RealtimeClient {
    /// Create a client with the given configuration.
    ///
    /// # Errors
    ///
    /// [`RealtimeError::InvalidConfig`] if the configuration is rejected.
    pub fn new(config: RealtimeConfig) -> Result<Self, RealtimeError> {
        config.validate()?;
        let policy = ReconnectPolicy::from_config(&config);
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                policy,
                subscriptions: SubscriptionRegistry::new(),
                handlers: HandlerRegistry::new(),
                state: Mutex::new(ConnectionState::Disconnected),
                epoch: Arc::new(AtomicU64::new(0)),
                outbound: Mutex::new(None),
                driver: Mutex::new(None),
            }),
        })
    }

    /// Begin connecting as `identity`.
    ///
    /// Idempotent: a no-op while a connection is live or being established.
    /// Success is observed via [`on_connection`](Self::on_connection), not a
    /// return value. The identity is retained and reused for every
    /// scheduled retry. Must be called within a tokio runtime.
    pub fn connect(&self, identity: Identity) {
        {
            let mut state = self.inner.state.lock();
            if state.is_active() {
                debug!(state = ?*state, "connect ignored — already active");
                return;
            }
            *state = ConnectionState::Connecting;
        }

        // The driver captures the identity and reuses it verbatim for every
        // scheduled retry.
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_driver(
            Arc::clone(&self.inner),
            identity,
            cancel.clone(),
        ));
        let previous = self.inner.driver.lock().replace(DriverHandle {
            cancel,
            _task: task,
        });
        if let Some(old) = previous {
            // The old driver already reached a terminal state; make sure its
            // token cannot fire anything late.
            old.cancel.cancel();
        }
    }

    /// Tear down the connection and every pending timer.
    ///
    /// Always succeeds, from any state — including mid-backoff. The
    /// subscription set is retained for the next connect.
    pub fn disconnect(&self) {
        // Advancing the epoch invalidates every armed timer before the
        // cancellation token even propagates.
        let _ = self.inner.epoch.fetch_add(1, Ordering::AcqRel);
        if let Some(handle) = self.inner.driver.lock().take() {
            handle.cancel.cancel();
        }
        *self.inner.outbound.lock() = None;
        let previous = {
            let mut state = self.inner.state.lock();
            std::mem::replace(&mut *state, ConnectionState::Disconnected)
        };
        if previous == ConnectionState::Connected {
            self.inner
                .handlers
                .notify_connection(&ConnectionEvent::Disconnected {
                    code: Some(1000),
                    reason: "client disconnect".into(),
                });
        }
        info!("realtime client disconnected");
    }

    /// Send an application message.
    ///
    /// Returns `false` with no side effects unless connected; otherwise the
    /// envelope is queued for the transport and `true` is returned
    /// (fire-and-forget — delivery is not acknowledged).
    pub fn send(&self, message_type: &str, payload: Value) -> bool {
        self.inner
            .send_envelope(Envelope::new(message_type, payload))
    }

    /// Subscribe to a topic.
    ///
    /// Idempotent. When connected, one `subscribe` message is emitted
    /// immediately; otherwise emission waits for the next connect's replay.
    pub fn subscribe(&self, topic: &str) {
        if !self.inner.subscriptions.insert(topic) {
            debug!(topic, "already subscribed");
            return;
        }
        if self.inner.send_envelope(Envelope::subscribe(topic)) {
            debug!(topic, "subscribe sent");
        } else {
            debug!(topic, "subscribe deferred until next connect");
        }
    }

    /// Unsubscribe from a topic.
    ///
    /// Idempotent. When connected, one `unsubscribe` message is emitted.
    pub fn unsubscribe(&self, topic: &str) {
        if !self.inner.subscriptions.remove(topic) {
            debug!(topic, "not subscribed");
            return;
        }
        if self.inner.send_envelope(Envelope::unsubscribe(topic)) {
            debug!(topic, "unsubscribe sent");
        }
    }

    /// Register a handler for an application message type.
    pub fn on_message(
        &self,
        message_type: &str,
        handler: impl Fn(&Envelope) + Send + Sync + 'static,
    ) -> HandlerId {
        self.inner.handlers.on_message(message_type, handler)
    }

    /// Remove a message handler by its registration id.
    pub fn off_message(&self, message_type: &str, id: HandlerId) -> bool {
        self.inner.handlers.off_message(message_type, id)
    }

    /// Register a connection lifecycle handler.
    pub fn on_connection(
        &self,
        handler: impl Fn(&ConnectionEvent) + Send + Sync + 'static,
    ) -> HandlerId {
        self.inner.handlers.on_connection(handler)
    }

    /// Remove a connection handler.
    pub fn off_connection(&self, id: HandlerId) -> bool {
        self.inner.handlers.off_connection(id)
    }

    /// Register an error handler.
    pub fn on_error(
        &self,
        handler: impl Fn(&RealtimeError) + Send + Sync + 'static,
    ) -> HandlerId {
        self.inner.handlers.on_error(handler)
    }

    /// Remove an error handler.
    pub fn off_error(&self, id: HandlerId) -> bool {
        self.inner.handlers.off_error(id)
    }

    /// Current connection status. Pure read, no side effects.
    #[must_use]
    pub fn connection_status(&self) -> ConnectionStatus {
        self.inner.state.lock().status()
    }

    /// Ordered snapshot of the subscribed topics.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<String> {
        self.inner.subscriptions.snapshot()
    }

    /// Current connection epoch (diagnostic; increments on every successful
    /// open and on explicit disconnect).
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::Acquire)
    }
}

/// URL/environment failures that can never be fixed by retrying.
fn is_construction_error(err: &tungstenite::Error) -> bool {
    matches!(err, tungstenite::Error::Url(_))
}

/// The connect → session → reconnect loop for one `connect` call.
#[allow(clippy::too_many_lines, clippy::cast_possible_truncation)]
async fn run_driver(inner: Arc<Inner>, identity: Identity, cancel: CancellationToken) {
    let mut attempts: u32 = 0;
    loop {
        if !inner.set_state(&cancel, ConnectionState::Connecting) {
            return;
        }
        let url = identity.connect_url(&inner.config.endpoint);
        debug!(endpoint = inner.config.endpoint, "opening transport");

        let attempt = tokio::select! {
            result = tokio::time::timeout(inner.config.connect_timeout, connect_async(&url)) => result,
            () = cancel.cancelled() => return,
        };

        match attempt {
            Ok(Ok((socket, _response))) => {
                attempts = 0;
                let epoch = inner.epoch.fetch_add(1, Ordering::AcqRel) + 1;
                let (outbound_tx, outbound_rx) =
                    mpsc::channel(inner.config.outbound_queue_size);
                *inner.outbound.lock() = Some(OutboundLink {
                    epoch,
                    tx: outbound_tx.clone(),
                });
                if !inner.set_state(&cancel, ConnectionState::Connected) {
                    *inner.outbound.lock() = None;
                    return;
                }
                info!(epoch, "realtime connection established");

                // Replay the declared topic set onto the fresh connection,
                // then tell the handlers — a handler reacting to `Connected`
                // sends after the replayed subscriptions.
                for topic in inner.subscriptions.snapshot() {
                    if outbound_tx.try_send(Envelope::subscribe(&topic)).is_err() {
                        warn!(topic, "failed to enqueue subscription replay");
                    }
                }
                inner
                    .handlers
                    .notify_connection(&ConnectionEvent::Connected { epoch });

                let end = run_session(&inner, socket, outbound_rx, outbound_tx, epoch, &cancel)
                    .await;

                // Release the outbound link, but only if it is still ours.
                {
                    let mut link = inner.outbound.lock();
                    if link.as_ref().is_some_and(|l| l.epoch == epoch) {
                        *link = None;
                    }
                }
                if cancel.is_cancelled() {
                    return;
                }
                let (code, reason) = end.close_info();
                inner
                    .handlers
                    .notify_connection(&ConnectionEvent::Disconnected {
                        code,
                        reason: reason.clone(),
                    });
                if end.is_intentional() {
                    info!(?code, "connection closed intentionally");
                    let _ = inner.set_state(&cancel, ConnectionState::Disconnected);
                    return;
                }
                warn!(?code, reason, "connection lost");
            }
            Ok(Err(err)) => {
                if is_construction_error(&err) {
                    error!(error = %err, "transport construction failed — not retrying");
                    inner
                        .handlers
                        .notify_error(&RealtimeError::Transport(err.to_string()));
                    let _ = inner.set_state(&cancel, ConnectionState::Disconnected);
                    return;
                }
                warn!(error = %err, "connection attempt failed");
                inner
                    .handlers
                    .notify_error(&RealtimeError::Transport(err.to_string()));
            }
            Err(_elapsed) => {
                let timeout_ms = inner.config.connect_timeout.as_millis() as u64;
                warn!(timeout_ms, "connection establishment timed out");
                inner
                    .handlers
                    .notify_error(&RealtimeError::ConnectTimeout { timeout_ms });
            }
        }

        // Involuntary loss: consult the reconnection policy.
        let Some(delay) = inner.policy.delay_for(attempts) else {
            error!(attempts, "reconnect attempts exhausted");
            let _ = inner.set_state(&cancel, ConnectionState::Failed);
            inner
                .handlers
                .notify_error(&RealtimeError::RetriesExhausted { attempts });
            return;
        };
        attempts += 1;
        if !inner.set_state(&cancel, ConnectionState::Reconnecting) {
            return;
        }
        info!(
            attempt = attempts,
            delay_ms = delay.as_millis() as u64,
            "scheduling reconnect"
        );
        inner
            .handlers
            .notify_connection(&ConnectionEvent::Reconnecting {
                attempt: attempts,
                delay,
            });

        let armed_epoch = inner.epoch.load(Ordering::Acquire);
        tokio::select! {
            () = tokio::time::sleep(delay) => {
                if inner.epoch.load(Ordering::Acquire) != armed_epoch {
                    debug!("reconnect timer stale — connection superseded");
                    return;
                }
            }
            () = cancel.cancelled() => return,
        }
    }
}

/// Why a session's select loop exited.
#[derive(Clone, Debug, PartialEq, Eq)]
enum SessionEnd {
    /// Torn down by `disconnect`.
    Cancelled,
    /// The peer sent a close frame.
    Closed { code: Option<u16>, reason: String },
    /// The socket stream ended without a close frame.
    StreamEnded,
    /// A read or write failed.
    TransportError(String),
}

impl SessionEnd {
    fn close_info(&self) -> (Option<u16>, String) {
        match self {
            Self::Closed { code, reason } => (*code, reason.clone()),
            Self::Cancelled => (Some(1000), "client disconnect".into()),
            Self::StreamEnded => (None, "stream ended".into()),
            Self::TransportError(msg) => (None, msg.clone()),
        }
    }

    fn is_intentional(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::Closed { code, .. } => {
                code.is_some_and(|c| NORMAL_CLOSE_CODES.contains(&c))
            }
            Self::StreamEnded | Self::TransportError(_) => false,
        }
    }
}

/// Run one live connection until it ends.
async fn run_session(
    inner: &Arc<Inner>,
    socket: WsStream,
    mut outbound_rx: mpsc::Receiver<Envelope>,
    outbound_tx: mpsc::Sender<Envelope>,
    epoch: u64,
    cancel: &CancellationToken,
) -> SessionEnd {
    let (mut ws_tx, mut ws_rx) = socket.split();

    // The heartbeat feeds the same outbound queue as everything else, so
    // pings and application messages keep their relative order.
    let hb_cancel = cancel.child_token();
    let heartbeat = tokio::spawn(run_heartbeat(
        inner.config.heartbeat_interval,
        epoch,
        Arc::clone(&inner.epoch),
        outbound_tx.clone(),
        hb_cancel.clone(),
    ));

    let end = loop {
        tokio::select! {
            queued = outbound_rx.recv() => {
                let Some(envelope) = queued else {
                    break SessionEnd::TransportError("outbound queue closed".into());
                };
                match envelope.encode() {
                    Ok(text) => {
                        if ws_tx.send(Message::Text(text.into())).await.is_err() {
                            break SessionEnd::TransportError("socket write failed".into());
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "dropping unencodable outbound message");
                        inner.handlers.notify_error(&err);
                    }
                }
            }
            frame = ws_rx.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        dispatch_frame(
                            &inner.handlers,
                            &outbound_tx,
                            text.as_str(),
                            inner.config.max_frame_bytes,
                        );
                    }
                    Some(Ok(Message::Binary(data))) => {
                        // Mobile clients send JSON as binary frames.
                        match std::str::from_utf8(&data) {
                            Ok(text) => dispatch_frame(
                                &inner.handlers,
                                &outbound_tx,
                                text,
                                inner.config.max_frame_bytes,
                            ),
                            Err(_) => {
                                debug!(len = data.len(), "dropping non-UTF8 binary frame");
                            }
                        }
                    }
                    Some(Ok(Message::Close(close))) => {
                        let (code, reason) = match close {
                            Some(frame) => (Some(u16::from(frame.code)), frame.reason.to_string()),
                            None => (None, String::new()),
                        };
                        info!(?code, "peer closed connection");
                        break SessionEnd::Closed { code, reason };
                    }
                    // Protocol ping/pong and raw frames are handled by the
                    // transport layer itself.
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        break SessionEnd::TransportError(err.to_string());
                    }
                    None => {
                        break SessionEnd::StreamEnded;
                    }
                }
            }
            () = cancel.cancelled() => {
                // Best-effort normal closure; the peer may already be gone.
                let _ = ws_tx.send(Message::Close(None)).await;
                break SessionEnd::Cancelled;
            }
        }
    };

    hb_cancel.cancel();
    heartbeat.abort();
    debug!(epoch, outcome = ?end, "session ended");
    end
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use std::time::Duration;

    fn quick_config(endpoint: String) -> RealtimeConfig {
        RealtimeConfig {
            endpoint,
            heartbeat_interval: Duration::from_secs(5),
            connect_timeout: Duration::from_millis(400),
            reconnect_base_delay: Duration::from_millis(50),
            max_reconnect_attempts: 1,
            ..RealtimeConfig::default()
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = RealtimeConfig {
            endpoint: "http://not-a-socket".into(),
            ..RealtimeConfig::default()
        };
        assert_matches!(
            RealtimeClient::new(config),
            Err(RealtimeError::InvalidConfig(_))
        );
    }

    #[test]
    fn initial_status_is_disconnected() {
        let client = RealtimeClient::new(RealtimeConfig::default()).unwrap();
        assert_eq!(client.connection_status(), ConnectionStatus::Disconnected);
        assert_eq!(client.epoch(), 0);
    }

    #[test]
    fn send_while_disconnected_is_false() {
        let client = RealtimeClient::new(RealtimeConfig::default()).unwrap();
        assert!(!client.send("chat_message", json!({"text": "hi"})));
    }

    #[test]
    fn subscribe_while_disconnected_is_deferred() {
        let client = RealtimeClient::new(RealtimeConfig::default()).unwrap();
        client.subscribe("chat:org_1");
        client.subscribe("chat:org_1");
        assert_eq!(client.subscriptions(), vec!["chat:org_1"]);
    }

    #[test]
    fn unsubscribe_while_disconnected_updates_registry() {
        let client = RealtimeClient::new(RealtimeConfig::default()).unwrap();
        client.subscribe("docs:42");
        client.unsubscribe("docs:42");
        client.unsubscribe("docs:42");
        assert!(client.subscriptions().is_empty());
    }

    #[tokio::test]
    async fn disconnect_without_connect_is_safe() {
        let client = RealtimeClient::new(RealtimeConfig::default()).unwrap();
        client.disconnect();
        client.disconnect();
        assert_eq!(client.connection_status(), ConnectionStatus::Disconnected);
    }

    #[tokio::test]
    async fn connect_is_idempotent_while_connecting() {
        // A TCP listener that accepts but never completes the WebSocket
        // handshake keeps the client in `Connecting` until the
        // establishment timeout.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("ws://{}", listener.local_addr().unwrap());
        let client = RealtimeClient::new(quick_config(endpoint)).unwrap();

        client.connect(Identity::new("user_1"));
        client.connect(Identity::new("user_2"));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(client.connection_status(), ConnectionStatus::Connecting);
        // The second call was ignored entirely — no epoch movement.
        assert_eq!(client.epoch(), 0);

        client.disconnect();
        assert_eq!(client.connection_status(), ConnectionStatus::Disconnected);
    }

    #[tokio::test]
    async fn disconnect_mid_backoff_clears_pending_retry() {
        // Nothing listens on this endpoint — connects are refused and the
        // driver parks in backoff.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("ws://{}", listener.local_addr().unwrap());
        drop(listener);
        let config = RealtimeConfig {
            reconnect_base_delay: Duration::from_secs(60),
            max_reconnect_attempts: 5,
            ..quick_config(endpoint)
        };
        let client = RealtimeClient::new(config).unwrap();

        client.connect(Identity::new("user_1"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        client.disconnect();
        assert_eq!(client.connection_status(), ConnectionStatus::Disconnected);

        // Long after the (cancelled) retry would have fired, nothing has
        // changed the state.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(client.connection_status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn state_to_status_mapping() {
        assert_eq!(
            ConnectionState::Disconnected.status(),
            ConnectionStatus::Disconnected
        );
        assert_eq!(
            ConnectionState::Connecting.status(),
            ConnectionStatus::Connecting
        );
        assert_eq!(
            ConnectionState::Reconnecting.status(),
            ConnectionStatus::Connecting
        );
        assert_eq!(
            ConnectionState::Connected.status(),
            ConnectionStatus::Connected
        );
        assert_eq!(ConnectionState::Failed.status(), ConnectionStatus::Error);
    }

    #[test]
    fn status_display_strings() {
        assert_eq!(ConnectionStatus::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionStatus::Connected.to_string(), "connected");
        assert_eq!(ConnectionStatus::Disconnected.to_string(), "disconnected");
        assert_eq!(ConnectionStatus::Error.to_string(), "error");
    }

    #[test]
    fn session_end_intentionality() {
        assert!(SessionEnd::Cancelled.is_intentional());
        assert!(
            SessionEnd::Closed {
                code: Some(1000),
                reason: String::new()
            }
            .is_intentional()
        );
        assert!(
            SessionEnd::Closed {
                code: Some(1001),
                reason: String::new()
            }
            .is_intentional()
        );
        assert!(
            !SessionEnd::Closed {
                code: Some(1006),
                reason: String::new()
            }
            .is_intentional()
        );
        assert!(
            !SessionEnd::Closed {
                code: None,
                reason: String::new()
            }
            .is_intentional()
        );
        assert!(!SessionEnd::StreamEnded.is_intentional());
        assert!(!SessionEnd::TransportError("io".into()).is_intentional());
    }

    #[test]
    fn construction_errors_are_not_retryable() {
        let err = tungstenite::Error::Url(
            tungstenite::error::UrlError::UnsupportedUrlScheme,
        );
        assert!(is_construction_error(&err));
        let err = tungstenite::Error::ConnectionClosed;
        assert!(!is_construction_error(&err));
    }
}
