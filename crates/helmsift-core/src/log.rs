//! Logging system for helmsift.
//!
//! Human-facing progress goes to stderr through `tracing`; an optional log
//! file receives the same events through a non-blocking appender.

use helmsift_types::{HelmsiftError, LogFormat, LogLevel, LoggingConfig, Result};
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Crates whose events are shown by default.
const TARGETS: &[&str] = &["helmsift", "helmsift_core", "helmsift_manifest"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the file appender flushing until dropped.
///
/// Hold on to this for the lifetime of the process.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Filter directives applied when `RUST_LOG` is not set.
pub fn default_directives(level: LogLevel) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level.as_directive()))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_level(true)
        .with_ansi(ansi);

    match format {
        LogFormat::Pretty => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        HelmsiftError::Config(format!("Log file path has no file name: {}", path.display()))
    })?;

    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Initialize logging from configuration.
///
/// `level_override` (from command-line flags) takes precedence over the
/// configured level; `RUST_LOG` takes precedence over both.
pub fn init(config: &LoggingConfig, level_override: Option<LogLevel>) -> Result<LogGuard> {
    let level = level_override.unwrap_or(config.level);

    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(
        config.format,
        std::io::stderr,
        std::io::stderr().is_terminal(),
    )];

    let file_guard = match &config.file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            layers.push(fmt_layer(config.format, writer, false));
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(build_filter(level))
        .try_init()
        .map_err(|e| HelmsiftError::Other(format!("Failed to initialize logging: {}", e)))?;

    Ok(LogGuard { _file: file_guard })
}
