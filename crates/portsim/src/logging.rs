use std::path::Path;

use color_eyre::eyre::eyre;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr, or to `log_file` when one is given.
///
/// The log level can be controlled via the `level` parameter or the `RUST_LOG` environment variable.
/// When logging to a file the returned guard must be held until exit so buffered lines are flushed.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<Option<WorkerGuard>> {
    // Build filter from RUST_LOG env var or use provided level
    let default_filter = format!("portsim={level},portsim_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let guard = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| eyre!("log file path {} has no file name", path.display()))?;
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(directory)?;

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .try_init()?;

            tracing::info!("portsim logging initialized (log_path={})", path.display());
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .try_init()?;
            None
        }
    };

    Ok(guard)
}
