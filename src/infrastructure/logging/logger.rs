use super::config::{LogFormat, LogSettings};
use anyhow::{Context, Result};
use std::fs;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logger implementation using tracing
pub struct LoggerImpl {
    _guard: Option<WorkerGuard>,
}

impl LoggerImpl {
    /// Install the global subscriber described by `settings`.
    ///
    /// Console output goes to stderr so stdout stays free for command output. With a log
    /// directory configured, JSON lines are also written to `<log_dir>/<file_name>`.
    /// Keep the returned value alive for the whole run; dropping it flushes the file writer.
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created or a global subscriber is
    /// already installed.
    pub fn init(settings: &LogSettings) -> Result<Self> {
        let default_level = LevelFilter::from_level(settings.level.as_tracing_level());
        let env_filter = || {
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy()
        };

        let (json_console, pretty_console) = match settings.format {
            LogFormat::Json => (
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true)
                        .with_filter(env_filter()),
                ),
                None,
            ),
            LogFormat::Pretty => (
                None,
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_filter(env_filter()),
                ),
            ),
        };

        let (file_layer, guard) = match settings.log_dir {
            Some(ref log_dir) => {
                fs::create_dir_all(log_dir).with_context(|| {
                    format!("Failed to create log directory {}", log_dir.display())
                })?;
                let file_appender = rolling::never(log_dir, &settings.file_name);
                let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

                // File layer - always JSON for structured logging
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking_file)
                    .with_ansi(false)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_filter(env_filter());
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(json_console)
            .with(pretty_console)
            .with(file_layer)
            .try_init()
            .context("Failed to install global tracing subscriber")?;

        tracing::debug!(
            level = %settings.level,
            format = ?settings.format,
            file_output = settings.log_dir.is_some(),
            "logger initialized"
        );

        Ok(Self { _guard: guard })
    }

    /// Whether a file writer is attached
    pub const fn has_file_output(&self) -> bool {
        self._guard.is_some()
    }
}
