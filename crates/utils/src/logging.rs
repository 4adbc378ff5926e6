//! provides logging helpers

use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::filter::{self};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

const MAX_LOG_FILES: usize = 3;

fn env_filter() -> filter::EnvFilter {
    filter::EnvFilter::builder()
        .with_default_directive(filter::LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Splits `log_file` into the directory and file-name prefix the rolling
/// appender wants.
fn split_log_path(log_file: &Path) -> Result<(&Path, &str)> {
    let file_name = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("log file {} has no usable file name", log_file.display()))?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, file_name))
}

/// initiate the global tracing subscriber
///
/// Logs go to stderr, and additionally to a daily rolling file when
/// `log_file` is given. The returned guard flushes the file writer on drop
/// and must be held for as long as logging is needed.
pub fn init(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let stderr_layer = layer().with_writer(std::io::stderr).with_target(true);

    let (file_layer, guard) = match log_file {
        Some(log_file) => {
            let (dir, prefix) = split_log_path(log_file)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(prefix)
                .max_log_files(MAX_LOG_FILES)
                .build(dir)
                .context("failed to create rolling file appender")?;
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(file_writer).with_ansi(false);
            (Some(file_layer), Some(guard))
        }
        None => (None, None),
    };

    registry()
        .with(env_filter())
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("global tracing subscriber already set")?;

    Ok(guard)
}
