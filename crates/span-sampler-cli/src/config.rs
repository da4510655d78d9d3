//! Configuration loading for the span sampler CLI.
//!
//! `ortho-config` layers the settings: built-in defaults, then a TOML file
//! named by `--config-path` or `SPAN_SAMPLER_CONFIG_PATH`, then
//! `SPAN_SAMPLER_*` environment variables, then command-line flags. Only the
//! flags the user actually passed are forwarded to the loader, so an unset
//! flag never masks a file or environment value.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use span_sampler::SamplingConfig;
use strum::{Display, EnumString};

use crate::cli::Cli;
use crate::errors::AppError;

/// Program name handed to the configuration loader as `argv[0]`.
const PROGRAM_NAME: &str = "span-sampler";

/// Default tracing filter directive.
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

/// Default number of context characters shown around a span.
pub(crate) const DEFAULT_CONTEXT_CHARS: usize = 180;

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub(crate) enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    Json,
    /// Human-readable single line output.
    #[default]
    Compact,
}

fn default_num_samples() -> usize {
    SamplingConfig::default().num_samples
}

fn default_min_bytes() -> usize {
    SamplingConfig::default().min_bytes_length
}

fn default_max_bytes() -> usize {
    SamplingConfig::default().max_bytes_length
}

fn default_temperature() -> f64 {
    SamplingConfig::default().temperature
}

fn default_log_filter() -> String {
    String::from(DEFAULT_LOG_FILTER)
}

/// Resolved settings for one CLI run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SPAN_SAMPLER_")]
pub(crate) struct Config {
    /// Number of spans to sample.
    #[ortho_config(default = default_num_samples())]
    pub(crate) num_samples: usize,
    /// Spans must be strictly longer than this many bytes.
    #[ortho_config(default = default_min_bytes())]
    pub(crate) min_bytes: usize,
    /// Spans may be at most this many bytes long.
    #[ortho_config(default = default_max_bytes())]
    pub(crate) max_bytes: usize,
    /// Sampling temperature.
    #[ortho_config(default = default_temperature())]
    pub(crate) temperature: f64,
    /// Whether the same span may be drawn more than once.
    #[ortho_config(default = false)]
    pub(crate) with_replacement: bool,
    /// Characters of context rendered around each span.
    #[ortho_config(default = DEFAULT_CONTEXT_CHARS)]
    pub(crate) context_chars: usize,
    /// Tracing filter directive.
    #[ortho_config(default = default_log_filter())]
    pub(crate) log_filter: String,
    /// Log output format.
    #[ortho_config(default = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}

impl Config {
    /// Loads the layered configuration for `cli`.
    pub(crate) fn resolve(cli: &Cli) -> Result<Self, AppError> {
        let mut config =
            Self::load_from_iter(config_arguments(cli)).map_err(AppError::LoadConfiguration)?;
        // The switch can only turn replacement on, so it is applied last.
        config.with_replacement |= cli.with_replacement;
        Ok(config)
    }

    /// Returns the parameters forwarded to the sampler.
    pub(crate) const fn sampling(&self) -> SamplingConfig {
        SamplingConfig {
            min_bytes_length: self.min_bytes,
            max_bytes_length: self.max_bytes,
            num_samples: self.num_samples,
            sample_with_replacement: self.with_replacement,
            temperature: self.temperature,
        }
    }
}

/// Rebuilds the configuration flags present on `cli` as `--flag=value`
/// arguments for the loader.
fn config_arguments(cli: &Cli) -> Vec<OsString> {
    let mut arguments = vec![OsString::from(PROGRAM_NAME)];
    if let Some(path) = &cli.config_path {
        let mut flag = OsString::from("--config-path=");
        flag.push(path);
        arguments.push(flag);
    }

    let values = [
        ("num-samples", cli.num_samples.map(|value| value.to_string())),
        ("min-bytes", cli.min_bytes.map(|value| value.to_string())),
        ("max-bytes", cli.max_bytes.map(|value| value.to_string())),
        ("temperature", cli.temperature.map(|value| value.to_string())),
        ("context-chars", cli.context_chars.map(|value| value.to_string())),
        ("log-filter", cli.log_filter.clone()),
        ("log-format", cli.log_format.map(|format| format.to_string())),
    ];
    arguments.extend(values.into_iter().filter_map(|(flag, value)| {
        value.map(|text| OsString::from(format!("--{flag}={text}")))
    }));
    arguments
}
