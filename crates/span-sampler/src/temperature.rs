//! Temperature-controlled weighted selection.
//!
//! Weights are raised to `1 / temperature` and normalised into a
//! probability distribution. Low temperatures concentrate the distribution
//! on the heaviest candidates; high temperatures flatten it towards uniform.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::index;

use crate::error::SamplingError;

/// A validated, non-negative sampling temperature.
///
/// Zero is accepted and means "deterministic arg-max": candidates are taken
/// in decreasing weight order instead of being drawn at random.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f64);

impl Temperature {
    /// Validates `value` as a temperature.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidArgument`] when `value` is negative
    /// or NaN.
    pub fn new(value: f64) -> Result<Self, SamplingError> {
        if value.is_nan() || value < 0.0 {
            return Err(SamplingError::invalid_argument(
                "temperature",
                format!("must be non-negative, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw temperature.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns true for the zero-temperature (arg-max) limit.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 <= 0.0
    }

    /// Rescales `weights` into unnormalised selection probabilities.
    ///
    /// Weights are divided by their maximum before exponentiation, which
    /// leaves the normalised distribution unchanged while keeping very low
    /// temperatures from overflowing.
    #[expect(clippy::float_arithmetic, reason = "temperature scaling")]
    fn adjust(self, weights: &[f64]) -> Vec<f64> {
        let max = weights.iter().copied().fold(0.0_f64, f64::max);
        let exponent = self.0.recip();
        weights
            .iter()
            .map(|&weight| {
                if weight > 0.0 {
                    (weight / max).powf(exponent)
                } else {
                    0.0
                }
            })
            .collect()
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(0.8)
    }
}

/// How many candidates to draw and whether a candidate may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draws {
    count: usize,
    with_replacement: bool,
}

impl Draws {
    /// Describes `count` draws.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidArgument`] when `count` is zero.
    pub fn new(count: usize, with_replacement: bool) -> Result<Self, SamplingError> {
        if count == 0 {
            return Err(SamplingError::invalid_argument(
                "num_samples",
                "must be at least 1",
            ));
        }
        Ok(Self {
            count,
            with_replacement,
        })
    }

    /// Returns the number of draws requested.
    #[must_use]
    pub const fn count(self) -> usize {
        self.count
    }

    /// Returns true when a candidate may be drawn more than once.
    #[must_use]
    pub const fn with_replacement(self) -> bool {
        self.with_replacement
    }
}

/// Selects candidate indices from `weights`.
///
/// With replacement, exactly `draws.count()` independent draws are made.
/// Without replacement, at most `min(draws.count(), weights.len())` distinct
/// indices are returned; candidates with zero probability are never drawn.
/// An empty `weights` slice selects nothing.
///
/// # Errors
///
/// Returns [`SamplingError::DegenerateWeights`] when a positive temperature
/// leaves no candidate with a positive weight, or a weight is not finite.
pub fn select_indices<R>(
    weights: &[f64],
    temperature: Temperature,
    draws: Draws,
    rng: &mut R,
) -> Result<Vec<usize>, SamplingError>
where
    R: Rng + ?Sized,
{
    if weights.is_empty() {
        return Ok(Vec::new());
    }
    if temperature.is_zero() {
        return Ok(select_heaviest(weights, draws));
    }

    let adjusted = temperature.adjust(weights);
    if !adjusted.iter().any(|&weight| weight > 0.0) {
        return Err(SamplingError::degenerate_weights(
            "no candidate has a positive weight",
        ));
    }

    if draws.with_replacement() {
        let distribution = WeightedIndex::new(&adjusted)
            .map_err(|error| SamplingError::degenerate_weights(error.to_string()))?;
        return Ok((0..draws.count())
            .map(|_| distribution.sample(rng))
            .collect());
    }

    // Weighted reservoir keys are compared in log space; tiny weights stay drawable.
    let amount = draws.count().min(adjusted.len());
    let selected = index::sample_weighted(
        rng,
        adjusted.len(),
        |position| adjusted.get(position).copied().unwrap_or_default(),
        amount,
    )
    .map_err(|error| SamplingError::degenerate_weights(error.to_string()))?;
    Ok(selected.into_vec())
}

/// Zero-temperature selection: indices in decreasing weight order, ties
/// broken by position.
fn select_heaviest(weights: &[f64], draws: Draws) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..weights.len()).collect();
    ranked.sort_by(|&a, &b| {
        let weight_a = weights.get(a).copied().unwrap_or_default();
        let weight_b = weights.get(b).copied().unwrap_or_default();
        weight_b.total_cmp(&weight_a)
    });

    if draws.with_replacement() {
        return ranked
            .first()
            .map(|&heaviest| vec![heaviest; draws.count()])
            .unwrap_or_default();
    }
    ranked.truncate(draws.count());
    ranked
}
