//! Rendering of sampled spans for humans and machines.
//!
//! Human output prints each span inside its surrounding source, highlighted
//! on terminals. JSON output emits one object per span.

mod context;
mod render;

use clap::ValueEnum;

pub(crate) use context::{ContextError, expand_to_full_lines, span_with_context};
pub(crate) use render::{SpanRecord, render_human};

/// Output format selection for sampled spans.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render spans in their source context.
    Human,
    /// Always emit one JSON object per span.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Spans in their source context.
    Human,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}
