//! CLI argument definitions for the span sampler visualiser.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use span_sampler::SupportedLanguage;

use crate::config::LogFormat;
use crate::output::OutputFormat;

/// Which built-in policy decides where spans may be sampled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum PolicyKind {
    /// Statement-aligned holes inside function bodies.
    #[default]
    Holes,
    /// Any node inside a function definition.
    Functions,
}

/// Samples syntax-aligned spans from a source file and shows them in context.
#[derive(Parser, Debug)]
#[command(name = "span-sampler", version)]
pub(crate) struct Cli {
    /// Source file to sample from.
    #[arg(value_name = "INPUT")]
    pub(crate) input: PathBuf,
    /// Language of the input; detected from the file extension when omitted.
    #[arg(long, value_parser = parse_language)]
    pub(crate) language: Option<SupportedLanguage>,
    /// Policy deciding which subtrees are eligible.
    #[arg(long, value_enum, default_value_t = PolicyKind::Holes)]
    pub(crate) policy: PolicyKind,
    /// Restricts sampling to subtrees touching this one-based line.
    #[arg(long = "line", value_name = "LINE")]
    pub(crate) lines: Vec<u32>,
    /// TOML file with sampling and logging settings.
    #[arg(long, value_name = "PATH")]
    pub(crate) config_path: Option<PathBuf>,
    /// Number of spans to sample.
    #[arg(long)]
    pub(crate) num_samples: Option<usize>,
    /// Spans must be strictly longer than this many bytes.
    #[arg(long)]
    pub(crate) min_bytes: Option<usize>,
    /// Spans may be at most this many bytes long.
    #[arg(long)]
    pub(crate) max_bytes: Option<usize>,
    /// Sampling temperature; lower values favour heavier spans.
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) temperature: Option<f64>,
    /// Allows the same span to be drawn more than once.
    #[arg(long)]
    pub(crate) with_replacement: bool,
    /// Seed for reproducible sampling.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Widens each span to complete lines, skipping spans that share their
    /// first line with preceding code.
    #[arg(long)]
    pub(crate) whole_lines: bool,
    /// Characters of context to show around each span.
    #[arg(long, value_name = "CHARS")]
    pub(crate) context_chars: Option<usize>,
    /// Controls how spans are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// Tracing filter directive, for example `span_sampler=debug`.
    #[arg(long, value_name = "FILTER")]
    pub(crate) log_filter: Option<String>,
    /// Log output format.
    #[arg(long, value_name = "FORMAT", value_parser = parse_log_format)]
    pub(crate) log_format: Option<LogFormat>,
}

fn parse_language(value: &str) -> Result<SupportedLanguage, String> {
    value.parse().map_err(|error| format!("{error}"))
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    value
        .parse()
        .map_err(|_| format!("unknown log format '{value}', expected json or compact"))
}
