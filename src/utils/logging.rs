use anyhow::Error;
use tracing::span::Span;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use crate::config::Quiet;

pub trait LogError {
    fn log_error(&self, error: &Error);
}

impl LogError for Span {
    fn log_error(&self, error: &Error) {
        self.in_scope(|| {
            tracing::error!("Error: {error:?}");
        });
    }
}

/// Default log level. `RUST_LOG` takes precedence over it.
pub fn default_level(quiet: Quiet) -> LevelFilter {
    if quiet.is_quiet() {
        LevelFilter::WARN
    } else {
        LevelFilter::DEBUG
    }
}

/// Installs the global `tracing` subscriber, writing to stderr.
pub fn init_logging(quiet: Quiet) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(quiet).into())
        .from_env_lossy()
        // The HTTP stack is too chatty at debug level.
        .add_directive("hyper=info".parse()?)
        .add_directive("octocrab=info".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("Cannot initialize logging: {error}"))
}
