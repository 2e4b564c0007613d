//! # canopy-core
//!
//! Foundation crate for the Canopy platform: branded ID newtypes, the
//! exponential backoff math used by the realtime reconnection scheduler,
//! millisecond timestamp helpers, and `tracing` subscriber initialization.
//!
//! This crate is deliberately small and sync-only — anything that needs a
//! runtime lives in the crates that depend on it.

#![deny(unsafe_code)]

pub mod backoff;
pub mod ids;
pub mod logging;
pub mod time;

pub use backoff::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS, backoff_delay_ms};
pub use ids::{MessageId, OrganizationId, UserId};
pub use time::now_ms;
