//! Fitness-proportionate (roulette-wheel) parent selection.
//!
//! Scores are first turned into non-negative weights with
//! [`selection_weights`]. A [`RouletteWheel`] then samples indices with
//! probability proportional to those weights, using the total of the weights
//! it was actually built from.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Converts raw scores into roulette weights.
///
/// When maximizing, the score is the weight. When minimizing, each weight is
/// `|max_score| - score`, so the lowest score gets the widest slice. Weights
/// that would be negative are clamped to zero. If the minimize shift
/// overflows for finite scores, every weight is halved so the proportions
/// survive.
///
/// # Examples
/// ```
/// use geneloop::ops::selection_weights;
/// assert_eq!(selection_weights(&[5.0, 1.0, 3.0], 5.0, true), vec![0.0, 4.0, 2.0]);
/// assert_eq!(selection_weights(&[5.0, 1.0, 3.0], 5.0, false), vec![5.0, 1.0, 3.0]);
/// assert_eq!(selection_weights(&[1e308, -1e308], 1e308, true), vec![0.0, 1e308]);
/// ```
#[must_use]
pub fn selection_weights(scores: &[f64], max_score: f64, minimize: bool) -> Vec<f64> {
    let weights = scaled_weights(scores, max_score, minimize, 1.0);
    if weights.iter().all(|weight| weight.is_finite()) {
        return weights;
    }
    scaled_weights(scores, max_score, minimize, 0.5)
}

fn scaled_weights(scores: &[f64], max_score: f64, minimize: bool, scale: f64) -> Vec<f64> {
    let shift = scale * max_score.abs();
    scores
        .iter()
        .map(|&score| {
            let weight = if minimize {
                shift - scale * score
            } else {
                scale * score
            };
            weight.max(0.0)
        })
        .collect()
}

#[derive(Debug, Clone)]
enum Sampler {
    Weighted(WeightedIndex<f64>),
    Uniform(usize),
}

/// Samples indices with probability proportional to their weight.
///
/// Negative and NaN weights count as zero. When the weights sum past
/// `f64::MAX` they are divided by the largest one first, and infinite
/// weights split the wheel evenly among themselves. Only a wheel whose
/// weights are all zero degrades to uniform selection.
///
/// # Examples
/// ```
/// use geneloop::ops::RouletteWheel;
/// use rand::SeedableRng;
///
/// let wheel = RouletteWheel::new(&[0.0, 3.0, 0.0]).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// assert_eq!(wheel.sample(&mut rng), 1);
/// assert_eq!(wheel.total(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    sampler: Sampler,
    total: f64,
}

impl RouletteWheel {
    /// Builds a wheel over `weights`. Returns `None` when there is nothing to
    /// select from.
    #[must_use]
    pub fn new(weights: &[f64]) -> Option<Self> {
        if weights.is_empty() {
            return None;
        }
        let clamped: Vec<f64> = weights.iter().map(|weight| weight.max(0.0)).collect();
        let largest = clamped.iter().copied().fold(0.0, f64::max);
        if largest == 0.0 {
            tracing::warn!(
                candidates = weights.len(),
                "roulette weights are all zero, selecting uniformly"
            );
            return Some(Self::uniform(weights.len()));
        }
        let slices: Vec<f64> = if largest.is_infinite() {
            clamped
                .iter()
                .map(|weight| if weight.is_infinite() { 1.0 } else { 0.0 })
                .collect()
        } else if clamped.iter().sum::<f64>().is_finite() {
            clamped
        } else {
            clamped.iter().map(|weight| weight / largest).collect()
        };
        let total: f64 = slices.iter().sum();
        match WeightedIndex::new(&slices) {
            Ok(index) => Some(Self {
                sampler: Sampler::Weighted(index),
                total,
            }),
            Err(err) => {
                tracing::warn!(%err, "roulette weights rejected, selecting uniformly");
                Some(Self::uniform(weights.len()))
            }
        }
    }

    fn uniform(len: usize) -> Self {
        Self {
            sampler: Sampler::Uniform(len),
            total: 0.0,
        }
    }

    /// Returns the total weight the wheel samples against, after any
    /// rescaling. Zero for a uniform fallback wheel.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Indicates whether the wheel fell back to uniform selection.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        matches!(self.sampler, Sampler::Uniform(_))
    }

    /// Draws one index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match &self.sampler {
            Sampler::Weighted(index) => index.sample(rng),
            Sampler::Uniform(len) => rng.gen_range(0..*len),
        }
    }
}
