use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber for binaries and manual test runs.
///
/// Log level comes from `RUST_LOG`, defaulting to `info`. The library
/// itself only emits events; it never installs a subscriber on its own,
/// so embedding applications keep control of their logging setup.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}
