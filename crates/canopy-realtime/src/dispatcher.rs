//! Inbound frame dispatch.
//!
//! Each frame goes through three gates: size, decode, classification.
//! System messages are consumed here (ping is answered with a pong in the
//! same dispatch turn); application messages fan out to the handler
//! registry. Nothing here ever tears down the connection — bad frames are
//! dropped and surfaced through error handlers.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::envelope::{Envelope, SystemMessage};
use crate::error::RealtimeError;
use crate::handlers::HandlerRegistry;

/// Process one inbound text frame.
pub(crate) fn dispatch_frame(
    handlers: &HandlerRegistry,
    outbound: &mpsc::Sender<Envelope>,
    raw: &str,
    max_frame_bytes: usize,
) {
    if raw.len() > max_frame_bytes {
        warn!(
            size = raw.len(),
            limit = max_frame_bytes,
            "dropping oversized inbound frame"
        );
        handlers.notify_error(&RealtimeError::FrameTooLarge {
            size: raw.len(),
            limit: max_frame_bytes,
        });
        return;
    }

    let envelope = match Envelope::decode(raw) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(error = %err, "dropping undecodable inbound frame");
            handlers.notify_error(&err);
            return;
        }
    };

    match SystemMessage::classify(&envelope.message_type) {
        Some(SystemMessage::Ping) => {
            debug!("server ping — replying with pong");
            if outbound.try_send(Envelope::pong()).is_err() {
                warn!("failed to enqueue pong reply");
            }
        }
        Some(SystemMessage::Pong) => {
            debug!("heartbeat pong received");
        }
        Some(SystemMessage::Error) => {
            let message = envelope.payload["message"]
                .as_str()
                .unwrap_or("unspecified server error")
                .to_owned();
            warn!(message, "server reported an error");
            handlers.notify_error(&RealtimeError::Server(message));
        }
        Some(SystemMessage::SubscriptionConfirmed) => {
            debug!(channel = ?envelope.payload.get("channel"), "subscription confirmed");
        }
        Some(SystemMessage::SubscriptionError) => {
            warn!(channel = ?envelope.payload.get("channel"), "subscription rejected");
        }
        None => {
            let invoked = handlers.dispatch(&envelope);
            debug!(
                message_type = envelope.message_type,
                invoked, "application message dispatched"
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::wire_type;
    use assert_matches::assert_matches;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct Fixture {
        handlers: HandlerRegistry,
        outbound_tx: mpsc::Sender<Envelope>,
        outbound_rx: mpsc::Receiver<Envelope>,
        errors: Arc<Mutex<Vec<RealtimeError>>>,
    }

    fn fixture() -> Fixture {
        let handlers = HandlerRegistry::new();
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        let _ = handlers.on_error(move |err| sink.lock().unwrap().push(err.clone()));
        let (outbound_tx, outbound_rx) = mpsc::channel(8);
        Fixture {
            handlers,
            outbound_tx,
            outbound_rx,
            errors,
        }
    }

    fn encode(message_type: &str, payload: serde_json::Value) -> String {
        Envelope::new(message_type, payload).encode().unwrap()
    }

    #[tokio::test]
    async fn application_message_reaches_handlers() {
        let mut fx = fixture();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _ = fx.handlers.on_message("chat_message", move |env| {
            sink.lock().unwrap().push(env.payload.clone());
        });

        dispatch_frame(
            &fx.handlers,
            &fx.outbound_tx,
            &encode("chat_message", json!({"text": "hello"})),
            1_048_576,
        );

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(fx.errors.lock().unwrap().is_empty());
        assert!(fx.outbound_rx.try_recv().is_err(), "no reply expected");
    }

    #[tokio::test]
    async fn ping_is_answered_with_exactly_one_pong() {
        let mut fx = fixture();
        dispatch_frame(
            &fx.handlers,
            &fx.outbound_tx,
            &encode("ping", json!({"timestamp": 123})),
            1_048_576,
        );

        let reply = fx.outbound_rx.try_recv().expect("pong enqueued same turn");
        assert_eq!(reply.message_type, wire_type::PONG);
        assert!(reply.payload["timestamp"].as_i64().unwrap() > 0);
        assert!(fx.outbound_rx.try_recv().is_err(), "exactly one pong");
    }

    #[tokio::test]
    async fn ping_is_never_fanned_out_to_consumers() {
        let mut fx = fixture();
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let _ = fx.handlers.on_message("ping", move |_| {
            *sink.lock().unwrap() += 1;
        });

        dispatch_frame(&fx.handlers, &fx.outbound_tx, &encode("ping", json!({})), 1_048_576);
        assert_eq!(*seen.lock().unwrap(), 0, "system types bypass consumers");
        let _ = fx.outbound_rx.try_recv().unwrap();
    }

    #[tokio::test]
    async fn oversized_frame_is_dropped_with_error() {
        let mut fx = fixture();
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let _ = fx.handlers.on_message("chat_message", move |_| {
            *sink.lock().unwrap() += 1;
        });

        let frame = encode("chat_message", json!({"text": "x".repeat(256)}));
        dispatch_frame(&fx.handlers, &fx.outbound_tx, &frame, 64);

        assert_eq!(*seen.lock().unwrap(), 0, "never partially processed");
        assert_matches!(
            fx.errors.lock().unwrap().as_slice(),
            [RealtimeError::FrameTooLarge { limit: 64, .. }]
        );
        assert!(fx.outbound_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn malformed_frame_surfaces_invalid_format() {
        let fx = fixture();
        dispatch_frame(&fx.handlers, &fx.outbound_tx, "{not json", 1_048_576);
        assert_matches!(
            fx.errors.lock().unwrap().as_slice(),
            [RealtimeError::InvalidFormat(_)]
        );
    }

    #[tokio::test]
    async fn server_error_is_forwarded_to_error_handlers() {
        let fx = fixture();
        dispatch_frame(
            &fx.handlers,
            &fx.outbound_tx,
            &encode("error", json!({"message": "subscription limit reached"})),
            1_048_576,
        );
        assert_eq!(
            fx.errors.lock().unwrap().as_slice(),
            [RealtimeError::Server("subscription limit reached".into())]
        );
    }

    #[tokio::test]
    async fn server_error_without_message_gets_placeholder() {
        let fx = fixture();
        dispatch_frame(&fx.handlers, &fx.outbound_tx, &encode("error", json!({})), 1_048_576);
        assert_eq!(
            fx.errors.lock().unwrap().as_slice(),
            [RealtimeError::Server("unspecified server error".into())]
        );
    }

    #[tokio::test]
    async fn subscription_acks_are_consumed_silently() {
        let mut fx = fixture();
        dispatch_frame(
            &fx.handlers,
            &fx.outbound_tx,
            &encode("subscription_confirmed", json!({"channel": "chat:org_1"})),
            1_048_576,
        );
        dispatch_frame(
            &fx.handlers,
            &fx.outbound_tx,
            &encode("subscription_error", json!({"channel": "chat:org_2"})),
            1_048_576,
        );
        assert!(fx.errors.lock().unwrap().is_empty());
        assert!(fx.outbound_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn pong_is_consumed_silently() {
        let mut fx = fixture();
        dispatch_frame(
            &fx.handlers,
            &fx.outbound_tx,
            &encode("pong", json!({"timestamp": 1})),
            1_048_576,
        );
        assert!(fx.errors.lock().unwrap().is_empty());
        assert!(fx.outbound_rx.try_recv().is_err());
    }
}
