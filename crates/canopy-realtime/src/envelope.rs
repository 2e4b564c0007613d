//! The wire message envelope and its codec.
//!
//! Every frame on the realtime socket is one JSON envelope:
//!
//! ```json
//! { "type": "chat_message", "payload": {...}, "timestamp": 1767225600000, "id": "0193..." }
//! ```
//!
//! `id` is generated locally (UUID v7 — time-ordered with a random tail) and
//! exists for consumer-side de-duplication and correlation, not ordering.
//! `userId`/`organizationId` are optional outbound fields; most callers
//! carry identity inside `payload` by convention.

use canopy_core::{MessageId, OrganizationId, UserId, now_ms};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::RealtimeError;

/// Reserved message type strings handled by the dispatcher itself.
pub mod wire_type {
    /// Outbound liveness ping.
    pub const PING: &str = "ping";
    /// Reply to a ping.
    pub const PONG: &str = "pong";
    /// Server-reported error.
    pub const ERROR: &str = "error";
    /// Topic subscription request.
    pub const SUBSCRIBE: &str = "subscribe";
    /// Topic unsubscription request.
    pub const UNSUBSCRIBE: &str = "unsubscribe";
    /// Server acknowledgement of a subscription.
    pub const SUBSCRIPTION_CONFIRMED: &str = "subscription_confirmed";
    /// Server rejection of a subscription.
    pub const SUBSCRIPTION_ERROR: &str = "subscription_error";
}

/// A single wire message.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Message type string — routing key for dispatch.
    #[serde(rename = "type")]
    pub message_type: String,
    /// Opaque payload; shape varies by type.
    pub payload: Value,
    /// Milliseconds since the Unix epoch, stamped at construction.
    pub timestamp: i64,
    /// Locally generated message ID.
    pub id: MessageId,
    /// Originating user, when the producer chose to tag the envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Originating organization, when the producer chose to tag the envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
}

impl Envelope {
    /// Build an envelope with a fresh ID and the current timestamp.
    #[must_use]
    pub fn new(message_type: impl Into<String>, payload: Value) -> Self {
        Self {
            message_type: message_type.into(),
            payload,
            timestamp: now_ms(),
            id: MessageId::new(),
            user_id: None,
            organization_id: None,
        }
    }

    /// A heartbeat ping carrying its emission time.
    #[must_use]
    pub fn ping() -> Self {
        Self::new(wire_type::PING, json!({ "timestamp": now_ms() }))
    }

    /// The reply to a server ping.
    #[must_use]
    pub fn pong() -> Self {
        Self::new(wire_type::PONG, json!({ "timestamp": now_ms() }))
    }

    /// A subscription request for `topic`.
    #[must_use]
    pub fn subscribe(topic: &str) -> Self {
        Self::new(wire_type::SUBSCRIBE, json!({ "channel": topic }))
    }

    /// An unsubscription request for `topic`.
    #[must_use]
    pub fn unsubscribe(topic: &str) -> Self {
        Self::new(wire_type::UNSUBSCRIBE, json!({ "channel": topic }))
    }

    /// Serialize to the wire JSON string.
    pub fn encode(&self) -> Result<String, RealtimeError> {
        serde_json::to_string(self).map_err(|e| RealtimeError::InvalidFormat(e.to_string()))
    }

    /// Parse a wire JSON string into an envelope.
    pub fn decode(text: &str) -> Result<Self, RealtimeError> {
        serde_json::from_str(text).map_err(|e| RealtimeError::InvalidFormat(e.to_string()))
    }
}

/// Classification of inbound system messages.
///
/// System messages are consumed by the dispatcher and never reach topic
/// consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemMessage {
    /// Server-initiated liveness probe — answered with a pong.
    Ping,
    /// Reply to one of our pings.
    Pong,
    /// Server-reported error, forwarded to error handlers.
    Error,
    /// Subscription acknowledged.
    SubscriptionConfirmed,
    /// Subscription rejected.
    SubscriptionError,
}

impl SystemMessage {
    /// Classify a message type string, or `None` for application types.
    #[must_use]
    pub fn classify(message_type: &str) -> Option<Self> {
        match message_type {
            wire_type::PING => Some(Self::Ping),
            wire_type::PONG => Some(Self::Pong),
            wire_type::ERROR => Some(Self::Error),
            wire_type::SUBSCRIPTION_CONFIRMED => Some(Self::SubscriptionConfirmed),
            wire_type::SUBSCRIPTION_ERROR => Some(Self::SubscriptionError),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn new_envelope_stamps_id_and_timestamp() {
        let env = Envelope::new("chat_message", json!({"text": "hi"}));
        assert_eq!(env.message_type, "chat_message");
        assert!(!env.id.as_str().is_empty());
        assert!(env.timestamp > 0);
        assert!(env.user_id.is_none());
    }

    #[test]
    fn ids_are_unique_per_envelope() {
        let a = Envelope::new("x", json!(null));
        let b = Envelope::new("x", json!(null));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn wire_field_names() {
        let env = Envelope::new("chat_message", json!({"text": "hi"}));
        let val: Value = serde_json::to_value(&env).unwrap();
        assert!(val.get("type").is_some(), "should use 'type' not 'message_type'");
        assert!(val.get("payload").is_some());
        assert!(val.get("timestamp").is_some());
        assert!(val.get("id").is_some());
        assert!(
            val.get("userId").is_none(),
            "userId should be omitted when None"
        );
        assert!(val.get("organizationId").is_none());
    }

    #[test]
    fn identity_fields_serialize_camel_case() {
        let mut env = Envelope::new("doc_update", json!({}));
        env.user_id = Some(UserId::from("user_1"));
        env.organization_id = Some(OrganizationId::from("org_1"));
        let val: Value = serde_json::to_value(&env).unwrap();
        assert_eq!(val["userId"], "user_1");
        assert_eq!(val["organizationId"], "org_1");
    }

    #[test]
    fn encode_decode_roundtrip() {
        let env = Envelope::new("workflow_event", json!({"step": 3}));
        let text = env.encode().unwrap();
        let back = Envelope::decode(&text).unwrap();
        assert_eq!(back.message_type, "workflow_event");
        assert_eq!(back.payload["step"], 3);
        assert_eq!(back.id, env.id);
        assert_eq!(back.timestamp, env.timestamp);
    }

    #[test]
    fn decode_tolerates_missing_identity_fields() {
        let text = r#"{"type":"chat_message","payload":{},"timestamp":1700000000000,"id":"m1"}"#;
        let env = Envelope::decode(text).unwrap();
        assert!(env.user_id.is_none());
        assert!(env.organization_id.is_none());
    }

    #[test]
    fn decode_rejects_missing_type() {
        let text = r#"{"payload":{},"timestamp":1,"id":"m1"}"#;
        assert_matches!(Envelope::decode(text), Err(RealtimeError::InvalidFormat(_)));
    }

    #[test]
    fn decode_rejects_non_json() {
        assert_matches!(
            Envelope::decode("definitely not json"),
            Err(RealtimeError::InvalidFormat(_))
        );
    }

    #[test]
    fn ping_and_pong_carry_timestamps() {
        let ping = Envelope::ping();
        assert_eq!(ping.message_type, "ping");
        assert!(ping.payload["timestamp"].as_i64().unwrap() > 0);

        let pong = Envelope::pong();
        assert_eq!(pong.message_type, "pong");
        assert!(pong.payload["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn subscribe_payload_uses_channel_key() {
        let env = Envelope::subscribe("chat:org_1");
        assert_eq!(env.message_type, "subscribe");
        assert_eq!(env.payload["channel"], "chat:org_1");

        let env = Envelope::unsubscribe("chat:org_1");
        assert_eq!(env.message_type, "unsubscribe");
        assert_eq!(env.payload["channel"], "chat:org_1");
    }

    #[test]
    fn classify_system_types() {
        assert_eq!(SystemMessage::classify("ping"), Some(SystemMessage::Ping));
        assert_eq!(SystemMessage::classify("pong"), Some(SystemMessage::Pong));
        assert_eq!(SystemMessage::classify("error"), Some(SystemMessage::Error));
        assert_eq!(
            SystemMessage::classify("subscription_confirmed"),
            Some(SystemMessage::SubscriptionConfirmed)
        );
        assert_eq!(
            SystemMessage::classify("subscription_error"),
            Some(SystemMessage::SubscriptionError)
        );
    }

    #[test]
    fn application_types_are_not_system() {
        assert_eq!(SystemMessage::classify("chat_message"), None);
        assert_eq!(SystemMessage::classify("subscribe"), None);
        assert_eq!(SystemMessage::classify(""), None);
    }
}
