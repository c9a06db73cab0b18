//! Run-log and console logging setup
//!
//! Two sinks: human-readable lines on stderr, and an append-only run log
//! with timestamps and no ANSI codes for post-mortem reading.

use std::fs::OpenOptions;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub fn init(log_file: &Path, debug: bool) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(())
}
