//! Tracing setup shared by the GastroGuard binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber: compact format, `info` by default,
/// overridable through `RUST_LOG`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
