//! Diagnostics for the CLI.
//!
//! Sampled spans own stdout, so every log line goes to stderr. Compact logs
//! are meant for people at a terminal and carry no timestamp; JSON logs are
//! stamped in UTC for whatever collects them.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

use crate::config::{Config, LogFormat};

/// Format of the subscriber installed by the first successful call.
static INSTALLED_FORMAT: OnceCell<LogFormat> = OnceCell::new();

/// Errors encountered while configuring diagnostics.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TelemetryError {
    /// The configured filter directive does not parse.
    #[error("invalid log filter '{directive}': {message}")]
    Filter { directive: String, message: String },
    /// Another subscriber already owns the process.
    #[error("failed to install the log subscriber: {0}")]
    Install(String),
}

/// Installs the stderr subscriber described by `config`.
///
/// Only the first successful call installs anything; later calls, such as
/// repeated runs inside one test process, report the format already in
/// place.
pub(crate) fn initialise(config: &Config) -> Result<LogFormat, TelemetryError> {
    INSTALLED_FORMAT
        .get_or_try_init(|| install(config))
        .copied()
}

fn install(config: &Config) -> Result<LogFormat, TelemetryError> {
    let filter = parse_filter(&config.log_filter)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    let installed = match config.log_format {
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_timer(UtcTime::rfc_3339())
            .try_init(),
        LogFormat::Compact => builder.compact().without_time().with_target(false).try_init(),
    };
    installed.map_err(|error| TelemetryError::Install(error.to_string()))?;
    Ok(config.log_format)
}

fn parse_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|error| TelemetryError::Filter {
        directive: directive.to_owned(),
        message: error.to_string(),
    })
}
