//! Logging setup for the tokmatch binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing; `RUST_LOG` overrides `default_filter` when set.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
