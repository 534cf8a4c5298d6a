//! Structured logging initialization via `tracing`.

/// Initialize the tracing subscriber for a host process.
///
/// Respects the `RUST_LOG` environment variable for filtering and falls
/// back to `info` when it is unset.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
