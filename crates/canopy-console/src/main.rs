//! # canopy-console
//!
//! Console tail utility for the Canopy realtime endpoint: connects with a
//! user/org identity, subscribes to topics, and prints matching messages as
//! JSON lines until Ctrl-C.
//!
//! The realtime client is constructed explicitly at startup and disposed
//! with `disconnect` on shutdown — connection status and errors go to
//! stderr via `tracing`, message envelopes go to stdout.

#![deny(unsafe_code)]

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use canopy_realtime::{ConnectionEvent, Identity, RealtimeClient, RealtimeConfig};
use canopy_settings::RealtimeSettings;

/// Canopy realtime console.
#[derive(Parser, Debug)]
#[command(name = "canopy-console", about = "Tail messages from the Canopy realtime endpoint")]
struct Cli {
    /// User to connect as.
    #[arg(long)]
    user_id: String,

    /// Tenant organization to connect under.
    #[arg(long)]
    organization_id: Option<String>,

    /// Topic to subscribe to (repeatable).
    #[arg(long = "topic")]
    topics: Vec<String>,

    /// Message type to print (repeatable).
    #[arg(long = "type")]
    message_types: Vec<String>,

    /// Override the configured endpoint.
    #[arg(long)]
    endpoint: Option<String>,
}

/// Map file/env settings onto the realtime client configuration.
fn realtime_config(settings: &RealtimeSettings) -> RealtimeConfig {
    RealtimeConfig {
        endpoint: settings.endpoint.clone(),
        heartbeat_interval: Duration::from_millis(settings.heartbeat_interval_ms),
        connect_timeout: Duration::from_millis(settings.connect_timeout_ms),
        max_frame_bytes: settings.max_frame_bytes,
        reconnect_base_delay: Duration::from_millis(settings.reconnect_base_delay_ms),
        max_reconnect_attempts: settings.max_reconnect_attempts,
        outbound_queue_size: settings.outbound_queue_size,
        compression: settings.compression,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load settings early — the log level gates logging init.
    let settings = canopy_settings::load_settings().unwrap_or_default();
    canopy_core::logging::init_subscriber(settings.logging.level.as_filter_str());

    let mut config = realtime_config(&settings.realtime);
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    tracing::info!(endpoint = config.endpoint, "starting realtime console");

    let client = RealtimeClient::new(config)?;

    let _connection_handler = client.on_connection(|event| match event {
        ConnectionEvent::Connected { epoch } => {
            tracing::info!(epoch, "connected");
        }
        ConnectionEvent::Disconnected { code, reason } => {
            tracing::info!(?code, reason, "disconnected");
        }
        ConnectionEvent::Reconnecting { attempt, delay } => {
            tracing::info!(
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "reconnecting"
            );
        }
    });
    let _error_handler = client.on_error(|error| {
        tracing::warn!(%error, "realtime error");
    });

    for message_type in &args.message_types {
        let _handler = client.on_message(message_type, |envelope| {
            match serde_json::to_string(envelope) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "failed to serialize envelope"),
            }
        });
    }

    for topic in &args.topics {
        client.subscribe(topic);
    }

    let identity = match args.organization_id {
        Some(org) => Identity::new(args.user_id.as_str()).with_organization(org.as_str()),
        None => Identity::new(args.user_id.as_str()),
    };
    client.connect(identity);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    client.disconnect();
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
