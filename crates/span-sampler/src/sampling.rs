//! Syntax-constrained span sampling.
//!
//! [`sample`] ties the stages together: collect eligible candidates, weight
//! them so that every covered non-whitespace character is equally likely to
//! be sampled, then draw spans at the configured temperature.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Point};

use crate::candidate::Candidate;
use crate::collector::{CandidateBounds, collect_candidates};
use crate::error::SamplingError;
use crate::policy::SamplingPolicy;
use crate::temperature::{Draws, Temperature, select_indices};
use crate::weighting::weigh_candidates;

/// Parameters of one sampling call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    /// Spans must be strictly longer than this many bytes.
    pub min_bytes_length: usize,
    /// Spans may be at most this many bytes long.
    pub max_bytes_length: usize,
    /// How many spans to draw.
    pub num_samples: usize,
    /// Whether the same span may be drawn more than once.
    pub sample_with_replacement: bool,
    /// Non-negative sampling temperature. As it tends to zero the longest
    /// permitted span wins; as it grows, spans are drawn uniformly regardless
    /// of their length.
    pub temperature: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            min_bytes_length: 8,
            max_bytes_length: 1024,
            num_samples: 1,
            sample_with_replacement: false,
            temperature: Temperature::default().value(),
        }
    }
}

impl SamplingConfig {
    /// Returns the candidate length bounds.
    #[must_use]
    pub const fn bounds(&self) -> CandidateBounds {
        CandidateBounds::new(self.min_bytes_length, self.max_bytes_length)
    }

    /// Validates the temperature and draw count.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidArgument`] for a negative or NaN
    /// temperature, or a zero sample count.
    pub fn validate(&self) -> Result<(Temperature, Draws), SamplingError> {
        let temperature = Temperature::new(self.temperature)?;
        let draws = Draws::new(self.num_samples, self.sample_with_replacement)?;
        Ok((temperature, draws))
    }
}

/// A sampled span of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledSpan<'tree> {
    /// Byte offset where the span starts.
    pub start_pos: usize,
    /// Byte offset just past the end of the span.
    pub end_pos: usize,
    /// Zero-based (row, column) where the span starts.
    pub start_point: Point,
    /// Zero-based (row, column) where the span ends.
    pub end_point: Point,
    /// The node or node group the span was drawn from.
    pub candidate: Candidate<'tree>,
    /// Position of the candidate among all collected candidates.
    pub candidate_index: usize,
}

impl<'tree> SampledSpan<'tree> {
    fn new(candidate: Candidate<'tree>, candidate_index: usize) -> Self {
        Self {
            start_pos: candidate.start_byte(),
            end_pos: candidate.end_byte(),
            start_point: candidate.start_point(),
            end_point: candidate.end_point(),
            candidate,
            candidate_index,
        }
    }

    /// Returns the text of the span, or `None` if `source` is not the
    /// buffer the tree was parsed from.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start_pos..self.end_pos)
    }
}

/// Samples spans from the tree rooted at `root`.
///
/// Each non-whitespace character covered by an eligible candidate has the
/// same chance of being selected; `config.temperature` then biases the draw
/// towards longer (low temperature) or arbitrary (high temperature) spans.
/// Randomness comes entirely from `rng`, so a seeded generator gives
/// reproducible results.
///
/// Returns an empty list when the policy admits no candidate.
///
/// # Errors
///
/// Returns [`SamplingError::InvalidArgument`] for an invalid configuration
/// (checked before the tree is traversed) and
/// [`SamplingError::DegenerateWeights`] when the candidates carry no weight
/// to sample from.
pub fn sample<'tree, P, R>(
    root: Node<'tree>,
    source: &[u8],
    policy: &P,
    config: &SamplingConfig,
    rng: &mut R,
) -> Result<Vec<SampledSpan<'tree>>, SamplingError>
where
    P: SamplingPolicy + ?Sized,
    R: Rng + ?Sized,
{
    let (temperature, draws) = config.validate()?;

    let candidates = collect_candidates(root, policy, config.bounds());
    tracing::info!(count = candidates.len(), "found eligible candidates");
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let weighted = weigh_candidates(candidates, source);
    let selected = select_indices(weighted.weights(), temperature, draws, rng)?;
    tracing::debug!(
        selected = selected.len(),
        temperature = temperature.value(),
        "sampled spans"
    );

    let (candidates, _) = weighted.into_parts();
    Ok(selected
        .into_iter()
        .filter_map(|index| {
            let candidate = candidates.get(index)?;
            tracing::debug!(candidate = %candidate.id(), kind = candidate.kind(), "selected");
            Some(SampledSpan::new(candidate.clone(), index))
        })
        .collect())
}
