//! Logging setup for the `hashnav` binary.
//!
//! The library only emits `tracing` events; the binary decides where they go.
//!
//! # Log Levels
//!
//! - `error`: store writes that failed
//! - `warn`: corrupt stored values, fetch failures
//! - `info`: comment submissions, counter increments
//! - `debug`: route resolution, fetch issue/apply, stale results dropped
//! - `trace`: unused
//!
//! `RUST_LOG` overrides the level chosen from `-v`.

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log output format, selected with `--log-format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Multi-line human-readable output with source locations.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::default(),
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Map the `-v` count to a level.
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber, writing to stderr.
///
/// A second call is a no-op.
pub fn init_logging(config: &LogConfig) {
    init_logging_with_writer(config, std::io::stderr);
}

/// Install the global subscriber with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    if build_subscriber(config, writer).try_init().is_err() {
        tracing::debug!("global subscriber already installed");
    }
}

/// Build the subscriber for `config` without installing it.
pub fn build_subscriber<W>(config: &LogConfig, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level);
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    match config.format {
        LogFormat::Pretty => Box::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.pretty()),
        ),
        LogFormat::Compact => Box::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.compact()),
        ),
    }
}

/// Default filter: our crate at `level`, everything else at warn.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("warn,hashnav={level}")
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}
