//! Tracing subscriber setup for the binary.

use crate::config::{LogFormat, LoggingConfig};
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(logging: &LoggingConfig) {
    // Logs go to stderr so `--json` output on stdout stays parseable.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(&logging.level))
        .with_writer(std::io::stderr);

    let result = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {}", e);
    }
}

/// Run `f` under a temporary subscriber at the default level.
///
/// Config resolution logs before the configured subscriber can exist, so
/// its fallback warnings go through this one instead.
pub fn bootstrap<T>(format: LogFormat, f: impl FnOnce() -> T) -> T {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(&LoggingConfig::default().level))
        .with_writer(std::io::stderr);

    let dispatch = match format {
        LogFormat::Json => Dispatch::new(builder.json().finish()),
        LogFormat::Text => Dispatch::new(builder.finish()),
    };
    tracing::dispatcher::with_default(&dispatch, f)
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}
