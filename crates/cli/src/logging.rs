//! Tracing configuration for the stash CLI
//!
//! Logs go to stderr so stdout stays script-consumable.

use std::io;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log level options for the CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevel {
    /// Show all logs (trace level)
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above
    Info,
    /// Show warnings and above (default)
    Warn,
    /// Show errors only
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Initialize tracing with an explicit level, or from `RUST_LOG`
pub fn init_tracing(level: Option<LogLevel>) -> miette::Result<()> {
    let env_filter = match level {
        Some(level) => EnvFilter::try_new(format!(
            "stash_cli={0},stash_cache={0}",
            level.as_str()
        )),
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("stash_cli=warn,stash_cache=warn")),
    }
    .map_err(|e| miette::miette!("Failed to create tracing filter: {e}"))?;

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry().with(env_filter).with(layer).init();
    Ok(())
}
