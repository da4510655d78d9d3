//! Overlap-aware candidate weighting.
//!
//! Candidates overlap: in `(a + b) + c` both `a + b` and the whole
//! expression may be eligible. Weighting each by its own length would count
//! the shared characters twice and bias sampling towards nested code.
//! Instead the covered byte range is split into elementary intervals, and
//! the non-whitespace characters of each interval are shared equally among
//! the candidates covering it. The weights therefore sum to the number of
//! non-whitespace characters in the union of all candidate spans.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::candidate::Candidate;

/// Candidates paired index-by-index with their weights.
///
/// Identity is positional: two candidates with the same byte range are
/// weighted independently.
#[derive(Debug, Clone)]
pub struct WeightedCandidates<'tree> {
    candidates: Vec<Candidate<'tree>>,
    weights: Vec<f64>,
}

impl<'tree> WeightedCandidates<'tree> {
    /// Returns the weighted candidates.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate<'tree>] {
        &self.candidates
    }

    /// Returns the weights, aligned with [`Self::candidates`].
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Returns the number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true when there are no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Splits into candidates and weights.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Candidate<'tree>>, Vec<f64>) {
        (self.candidates, self.weights)
    }
}

/// A byte range between two consecutive span boundaries, with the
/// candidates covering it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CoveredInterval {
    range: Range<usize>,
    covering: Vec<usize>,
}

/// Weights `candidates` by their overlap-corrected non-whitespace length.
///
/// `source` is the buffer the candidates' byte offsets refer to. Candidates
/// that cover only whitespace get weight zero and are kept.
#[must_use]
pub fn weigh_candidates<'tree>(
    candidates: Vec<Candidate<'tree>>,
    source: &[u8],
) -> WeightedCandidates<'tree> {
    let spans: Vec<_> = candidates.iter().map(Candidate::byte_range).collect();
    let intervals = covered_intervals(&spans);
    tracing::debug!(
        candidates = candidates.len(),
        intervals = intervals.len(),
        "split candidate spans"
    );

    let mut weights = vec![0.0; candidates.len()];
    for interval in &intervals {
        let share = interval_share(interval, source);
        for &index in &interval.covering {
            if let Some(weight) = weights.get_mut(index) {
                *weight = accumulate(*weight, share);
            }
        }
    }

    WeightedCandidates {
        candidates,
        weights,
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "weights are character counts shared among overlapping candidates"
)]
fn interval_share(interval: &CoveredInterval, source: &[u8]) -> f64 {
    let chars = non_whitespace_chars(source.get(interval.range.clone()).unwrap_or_default());
    chars as f64 / interval.covering.len() as f64
}

#[expect(clippy::float_arithmetic, reason = "running weight total")]
fn accumulate(total: f64, share: f64) -> f64 {
    total + share
}

/// Counts the characters of `bytes` that are not whitespace.
///
/// The bytes are decoded as UTF-8; invalid sequences count as one
/// replacement character each.
#[must_use]
pub fn non_whitespace_chars(bytes: &[u8]) -> usize {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| !c.is_whitespace())
        .count()
}

/// Merges `spans` into their sorted, disjoint union.
///
/// Touching spans are merged, so a contiguous covered region is a single
/// range.
#[must_use]
pub fn merge_spans(spans: impl IntoIterator<Item = Range<usize>>) -> Vec<Range<usize>> {
    let mut sorted: Vec<_> = spans.into_iter().filter(|span| !span.is_empty()).collect();
    sorted.sort_by_key(|span| (span.start, span.end));

    let mut merged: Vec<Range<usize>> = Vec::new();
    for span in sorted {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Splits `spans` into disjoint intervals tagged with the indices of the
/// spans covering them.
///
/// Every span boundary starts a new interval, so the covering set changes
/// from one interval to the next. Uncovered gaps and empty spans produce no
/// interval.
fn covered_intervals(spans: &[Range<usize>]) -> Vec<CoveredInterval> {
    let mut boundaries: Vec<usize> = spans
        .iter()
        .filter(|span| !span.is_empty())
        .flat_map(|span| [span.start, span.end])
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut openings: Vec<(usize, usize)> = spans
        .iter()
        .enumerate()
        .filter(|(_, span)| !span.is_empty())
        .map(|(index, span)| (span.start, index))
        .collect();
    openings.sort_unstable();
    let mut closings: Vec<(usize, usize)> = spans
        .iter()
        .enumerate()
        .filter(|(_, span)| !span.is_empty())
        .map(|(index, span)| (span.end, index))
        .collect();
    closings.sort_unstable();

    let mut openings = openings.into_iter().peekable();
    let mut closings = closings.into_iter().peekable();
    let mut active = BTreeSet::new();
    let mut intervals = Vec::new();

    for window in boundaries.windows(2) {
        let &[begin, end] = window else {
            continue;
        };
        while let Some((_, index)) = closings.next_if(|&(at, _)| at <= begin) {
            active.remove(&index);
        }
        while let Some((_, index)) = openings.next_if(|&(at, _)| at <= begin) {
            active.insert(index);
        }
        if active.is_empty() {
            continue;
        }

        intervals.push(CoveredInterval {
            range: begin..end,
            covering: active.iter().copied().collect(),
        });
    }

    intervals
}
