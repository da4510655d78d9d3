//! Human-readable and JSON rendering of sampled spans.

use std::ops::Range;

use crossterm::style::Stylize;
use serde::Serialize;
use span_sampler::{SampledSpan, SupportedLanguage};

use super::context::SpanWithContext;

const SEPARATOR: &str =
    "-----------------------------------------------------------------------";

/// One sampled span as emitted in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SpanRecord<'a> {
    pub(crate) start_byte: usize,
    pub(crate) end_byte: usize,
    pub(crate) start_line: u32,
    pub(crate) start_column: u32,
    pub(crate) end_line: u32,
    pub(crate) end_column: u32,
    pub(crate) kind: &'static str,
    pub(crate) text: &'a str,
}

impl<'a> SpanRecord<'a> {
    /// Describes `span` over the byte range `range`, which may have been
    /// widened beyond the sampled candidate.
    pub(crate) fn new(span: &SampledSpan<'_>, range: Range<usize>, source: &'a str) -> Self {
        let (start_line, start_column) = one_based_position(source, range.start);
        let (end_line, end_column) = one_based_position(source, range.end);
        Self {
            start_byte: range.start,
            end_byte: range.end,
            start_line,
            start_column,
            end_line,
            end_column,
            kind: span.candidate.kind(),
            text: source.get(range).unwrap_or_default(),
        }
    }
}

impl SpanRecord<'_> {
    /// Describes the span as a line comment in `language`, so a header in
    /// human output reads as part of the source listing.
    pub(crate) fn header(&self, language: SupportedLanguage) -> String {
        format!(
            "{} {} at {}:{}",
            language.line_comment_prefix(),
            self.kind,
            self.start_line,
            self.start_column
        )
    }
}

/// Returns the one-based (line, byte column) of `offset` in `source`.
fn one_based_position(source: &str, offset: usize) -> (u32, u32) {
    let before = source.as_bytes().get(..offset).unwrap_or_default();
    let line = before.iter().filter(|&&byte| byte == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|&byte| byte == b'\n')
        .map_or(0, |newline| newline + 1);
    let column = offset.saturating_sub(line_start);
    (to_one_based(line), to_one_based(column))
}

fn to_one_based(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1)
}

/// Renders a span inside its context under `header`, followed by a
/// separator line.
///
/// With `highlight`, the span itself is shown in bold red.
pub(crate) fn render_human(header: &str, context: &SpanWithContext, highlight: bool) -> String {
    let mut output = String::from(header);
    output.push('\n');
    output.push_str(&context.left_context);
    if highlight {
        output.push_str(&context.span.as_str().red().bold().to_string());
    } else {
        output.push_str(&context.span);
    }
    output.push_str(&context.right_context);
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(SEPARATOR);
    output.push('\n');
    output
}
