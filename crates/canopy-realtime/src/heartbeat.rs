//! Heartbeat ping loop.
//!
//! While a connection is live, one heartbeat task keeps the line warm by
//! enqueueing a `ping` envelope every interval. It never declares the
//! connection dead itself — silence is detected by the transport's own
//! close/error events (and the remote side's timeout logic).
//!
//! Each tick re-checks the epoch it was armed under: a heartbeat that
//! outlives its connection exits without sending anything.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::envelope::Envelope;

/// Why the heartbeat loop exited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HeartbeatOutcome {
    /// The connection it was armed for has been superseded.
    Stale,
    /// Cancelled as part of session teardown.
    Cancelled,
    /// The outbound queue is gone; the session is over.
    ChannelClosed,
}

/// Emit a ping envelope on every interval tick until cancelled, stale, or
/// the outbound queue closes.
pub(crate) async fn run_heartbeat(
    interval: Duration,
    epoch: u64,
    epoch_counter: Arc<AtomicU64>,
    outbound: mpsc::Sender<Envelope>,
    cancel: CancellationToken,
) -> HeartbeatOutcome {
    let mut ticker = time::interval(interval);
    // Skip the immediate first tick — the connection just opened.
    let _ = ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if epoch_counter.load(Ordering::Acquire) != epoch {
                    debug!(epoch, "heartbeat stale — connection superseded");
                    return HeartbeatOutcome::Stale;
                }
                match outbound.try_send(Envelope::ping()) {
                    Ok(()) => debug!(epoch, "heartbeat ping enqueued"),
                    Err(TrySendError::Full(_)) => {
                        // A backed-up queue is not fatal; the next tick retries.
                        warn!(epoch, "outbound queue full — heartbeat ping dropped");
                    }
                    Err(TrySendError::Closed(_)) => return HeartbeatOutcome::ChannelClosed,
                }
            }
            () = cancel.cancelled() => {
                return HeartbeatOutcome::Cancelled;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
