use tracing_subscriber::EnvFilter;

/// Initialize logging and tracing
///
/// Honours `RUST_LOG`; defaults to warnings only. Logs go to stderr so that
/// report output on stdout stays machine-readable.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
