//! Line-aligned context around a span.

use std::ops::Range;

use thiserror::Error;

/// Marker placed where context has been cut off.
pub(crate) const TRUNCATION_DELIMITER: &str = "...";

/// Errors raised while extracting span context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ContextError {
    /// The span covers no bytes.
    #[error("span {start}..{end} is empty")]
    EmptySpan { start: usize, end: usize },
    /// The span lies outside the source or splits a character.
    #[error("span {start}..{end} does not fit the source")]
    OutOfBounds { start: usize, end: usize },
    /// The span shares its first line with preceding code.
    #[error("span starting at byte {start} does not begin a line")]
    NotFullLine { start: usize },
}

/// A span together with the source before and after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpanWithContext {
    pub(crate) left_context: String,
    pub(crate) span: String,
    pub(crate) right_context: String,
}

/// Cuts `context_chars` characters of context around `span`.
///
/// The budget is split evenly between the two sides; a side that runs out of
/// source hands its unused budget to the other. Each side is then widened to
/// whole lines, and a side that still had to be cut is marked with
/// [`TRUNCATION_DELIMITER`].
pub(crate) fn span_with_context(
    source: &str,
    span: Range<usize>,
    context_chars: usize,
) -> Result<SpanWithContext, ContextError> {
    let Range { start, end } = span;
    if start >= end {
        return Err(ContextError::EmptySpan { start, end });
    }
    let out_of_bounds = || ContextError::OutOfBounds { start, end };
    let prefix = source.get(..start).ok_or_else(out_of_bounds)?;
    let hole = source.get(start..end).ok_or_else(out_of_bounds)?;
    let suffix = source.get(end..).ok_or_else(out_of_bounds)?;

    let mut right_budget = context_chars.div_euclid(2);
    let mut left_budget = context_chars - right_budget;
    let prefix_chars = prefix.chars().count();
    let suffix_chars = suffix.chars().count();
    if prefix_chars < left_budget {
        right_budget += left_budget - prefix_chars;
    } else if suffix_chars < right_budget {
        left_budget += right_budget - suffix_chars;
    }

    Ok(SpanWithContext {
        left_context: left_context(prefix, prefix_chars.saturating_sub(left_budget)),
        span: hole.to_owned(),
        right_context: right_context(suffix, right_budget),
    })
}

/// Keeps the lines of `prefix` that reach back to character `cut`.
fn left_context(prefix: &str, cut: usize) -> String {
    let cut_byte = byte_offset(prefix, cut);
    match prefix.get(..cut_byte).and_then(|head| head.rfind('\n')) {
        Some(newline) if newline > 0 => {
            format!("{TRUNCATION_DELIMITER}{}", prefix.get(newline..).unwrap_or_default())
        }
        _ => prefix.to_owned(),
    }
}

/// Keeps the lines of `suffix` up to and including character `budget`.
fn right_context(suffix: &str, budget: usize) -> String {
    let from = byte_offset(suffix, budget);
    let found = suffix
        .get(from..)
        .and_then(|tail| tail.find('\n'))
        .map(|offset| offset + from);
    match found {
        Some(newline) if newline + 1 < suffix.len() => format!(
            "{}\n{TRUNCATION_DELIMITER}",
            suffix.get(..newline).unwrap_or_default()
        ),
        _ => suffix.to_owned(),
    }
}

/// Returns the byte offset of character `index`, or the length of `text`
/// when it has fewer characters.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Widens `span` to the whole lines it touches.
///
/// The start moves back over indentation to the beginning of its line; the
/// end moves forward past the next newline, absorbing any trailing comment.
///
/// # Errors
///
/// Returns [`ContextError::NotFullLine`] when code precedes the span on its
/// first line.
pub(crate) fn expand_to_full_lines(
    source: &[u8],
    span: Range<usize>,
) -> Result<Range<usize>, ContextError> {
    let Range { start, end } = span;
    if start > end || end > source.len() {
        return Err(ContextError::OutOfBounds { start, end });
    }

    let indentation = source
        .get(..start)
        .unwrap_or_default()
        .iter()
        .rev()
        .take_while(|&&byte| byte != b'\n' && byte.is_ascii_whitespace())
        .count();
    let line_start = start - indentation;
    if line_start > 0 && source.get(line_start - 1) != Some(&b'\n') {
        return Err(ContextError::NotFullLine { start });
    }

    let line_end = source
        .get(end..)
        .unwrap_or_default()
        .iter()
        .position(|&byte| byte == b'\n')
        .map_or(source.len(), |offset| end + offset + 1);

    Ok(line_start..line_end)
}
