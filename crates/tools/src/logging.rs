//! Diagnostics for the command-line tools.
//!
//! Reads `RUST_LOG`, defaulting to `info`, and writes compact lines to stderr so
//! stdout stays free for run summaries.

use std::io;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).compact())
        .init();
}
