//! Logging to stderr and to a per-run log file.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let run_dir = log_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(default_log_directory)
        .join(format!("run_{timestamp}"));
    std::fs::create_dir_all(&run_dir)?;

    let file_appender = tracing_appender::rolling::never(&run_dir, "modloader.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!(log_file = %run_dir.join("modloader.log").display(), "logging initialized");
    Ok(guard)
}

fn default_log_directory() -> PathBuf {
    ProjectDirs::from("", "", "modloader")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("modloader").join("logs"))
}
