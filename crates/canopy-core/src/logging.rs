//! `tracing` subscriber initialization.
//!
//! All Canopy binaries log through `tracing` with structured fields. The
//! subscriber writes compact human-readable output to stderr; `RUST_LOG`
//! overrides the configured level when set.

/// Initialize the global tracing subscriber with stderr output.
///
/// Call once at application startup. Subsequent calls are no-ops.
///
/// # Arguments
///
/// * `level` - Minimum log level directive when `RUST_LOG` is unset
///   (e.g. `"info"` or `"canopy_realtime=debug"`).
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init is a no-op if a subscriber is already set
    let _ = subscriber.try_init();
}
