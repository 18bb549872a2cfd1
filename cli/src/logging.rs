//! Diagnostic logging setup.

use coscientist_infrastructure::FileLoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "co-scientist.log";

/// Filter for the `-v` count; `RUST_LOG` wins when set.
fn env_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    })
}

/// Install the global subscriber: stderr always, plus a non-blocking file
/// writer when file logging is on and a directory can be resolved.
///
/// The returned guard must live until exit or buffered lines are lost.
pub fn init(verbose: u8, config: &FileLoggingConfig) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let directory = config
        .file
        .then(|| config.resolved_directory())
        .flatten()
        .filter(|dir| std::fs::create_dir_all(dir).is_ok());

    match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(env_filter(verbose))
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter(verbose))
                .with(stderr_layer)
                .init();
            None
        }
    }
}
