//! Log output setup.

use std::io;

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a compact `tracing` subscriber writing to stderr.
///
/// Respects `RUST_LOG`; defaults to `info`. Calling it again is a no-op, so
/// tests and the binary can both call it.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}
