//! Logging setup.
//!
//! Diagnostics go to stderr so that stdout stays free for the summary or the
//! JSON index. When a log directory is configured, the same events are also
//! written to a daily rolling file in that directory.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging system.
///
/// Log level can be controlled via the `FACESPLIT_LOG` environment variable:
/// - `FACESPLIT_LOG=debug` also prints the folder listing and summary block
/// - `FACESPLIT_LOG=info` for per-person progress (default)
/// - `FACESPLIT_LOG=warn` for missing directories and skipped persons only
pub fn init(log_dir: Option<PathBuf>) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_env("FACESPLIT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let file_layer = match log_dir {
        Some(ref log_dir) => {
            std::fs::create_dir_all(log_dir)?;

            let file_appender = tracing_appender::rolling::daily(log_dir, "facesplit.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes the writer on drop, so it must live as long as the process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    match log_dir {
        Some(dir) => tracing::debug!("Logging initialized, also writing to {:?}", dir),
        None => tracing::debug!("Logging initialized"),
    }
    Ok(())
}
