use tracing_subscriber::EnvFilter;

/// Install a test subscriber reading `RUST_LOG`.
///
/// Repeated calls are no-ops; tests can call this unconditionally.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
