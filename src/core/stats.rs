//! Per-generation and best-of-run statistics.
//!
//! [`GenerationStats`] is recomputed from the scored population every
//! generation. [`RunStats`] folds those snapshots into monotonic best-of-run
//! extrema and is what [`Task::run`](crate::Task::run) returns.

use crate::core::Individual;
use std::fmt::{self, Display, Formatter};

/// Errors raised when statistics cannot be computed from a population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The population contained no individuals.
    EmptyPopulation,
    /// The individual at `index` had not been scored.
    Unscored {
        /// Position of the offending individual.
        index: usize,
    },
}

impl Display for StatsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPopulation => f.write_str("cannot compute statistics of an empty population"),
            Self::Unscored { index } => {
                write!(f, "individual {index} has no fitness score")
            }
        }
    }
}

impl std::error::Error for StatsError {}

/// Statistics of a single scored generation.
///
/// Extremum ties keep the earliest individual in population order.
///
/// # Examples
/// ```
/// use geneloop::{GenerationStats, Individual};
/// let population = vec![
///     Individual::scored("a", 2.0),
///     Individual::scored("b", 5.0),
///     Individual::scored("c", 5.0),
/// ];
/// let stats = GenerationStats::compute(&population).unwrap();
/// assert_eq!(stats.max_score, 5.0);
/// assert_eq!(stats.max.solution(), &"b");
/// assert_eq!(stats.sum, 12.0);
/// assert_eq!(stats.avg, 4.0);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats<S> {
    /// Lowest score in the generation.
    pub min_score: f64,
    /// Highest score in the generation.
    pub max_score: f64,
    /// Copy of the individual holding [`Self::min_score`].
    pub min: Individual<S>,
    /// Copy of the individual holding [`Self::max_score`].
    pub max: Individual<S>,
    /// Mean score.
    pub avg: f64,
    /// Sum of all scores.
    pub sum: f64,
}

impl<S: Clone> GenerationStats<S> {
    /// Scans the population once and collects its statistics.
    ///
    /// # Errors
    /// Returns [`StatsError::EmptyPopulation`] for an empty slice and
    /// [`StatsError::Unscored`] when any individual has no score.
    pub fn compute(population: &[Individual<S>]) -> Result<Self, StatsError> {
        let first = population.first().ok_or(StatsError::EmptyPopulation)?;
        let first_score = first.score().ok_or(StatsError::Unscored { index: 0 })?;
        let mut min_idx = 0;
        let mut max_idx = 0;
        let mut min_score = first_score;
        let mut max_score = first_score;
        let mut sum = 0.0;
        for (index, individual) in population.iter().enumerate() {
            let score = individual.score().ok_or(StatsError::Unscored { index })?;
            sum += score;
            if score > max_score {
                max_score = score;
                max_idx = index;
            }
            if score < min_score {
                min_score = score;
                min_idx = index;
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let avg = sum / population.len() as f64;
        Ok(Self {
            min_score,
            max_score,
            min: population[min_idx].clone(),
            max: population[max_idx].clone(),
            avg,
            sum,
        })
    }
}

/// Best-of-run statistics.
///
/// `min`/`max` only ever improve: a later generation replaces them only when
/// its extremum is strictly better. `avg` and `sum` always describe the most
/// recently folded generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats<S> {
    /// Lowest score seen during the run.
    pub min_score: f64,
    /// Highest score seen during the run.
    pub max_score: f64,
    /// Individual that produced [`Self::min_score`].
    pub min: Individual<S>,
    /// Individual that produced [`Self::max_score`].
    pub max: Individual<S>,
    /// Mean score of the last generation.
    pub avg: f64,
    /// Score sum of the last generation.
    pub sum: f64,
    /// Number of reproduction cycles completed.
    pub generations: usize,
}

impl<S: Clone> RunStats<S> {
    /// Seeds best-of-run statistics from the first evaluated generation.
    #[must_use]
    pub fn seed(generation: &GenerationStats<S>) -> Self {
        Self {
            min_score: generation.min_score,
            max_score: generation.max_score,
            min: generation.min.clone(),
            max: generation.max.clone(),
            avg: generation.avg,
            sum: generation.sum,
            generations: 0,
        }
    }

    /// Folds a later generation into the running extrema.
    ///
    /// # Examples
    /// ```
    /// use geneloop::{GenerationStats, Individual, RunStats};
    /// let first = GenerationStats::compute(&[Individual::scored(1, 1.0), Individual::scored(2, 9.0)]).unwrap();
    /// let second = GenerationStats::compute(&[Individual::scored(3, 4.0), Individual::scored(4, 5.0)]).unwrap();
    /// let mut run = RunStats::seed(&first);
    /// run.fold(&second, 1);
    /// assert_eq!(run.max_score, 9.0);
    /// assert_eq!(run.min_score, 1.0);
    /// assert_eq!(run.avg, 4.5);
    /// ```
    pub fn fold(&mut self, generation: &GenerationStats<S>, generations: usize) {
        if generation.max_score > self.max_score {
            self.max_score = generation.max_score;
            self.max = generation.max.clone();
        }
        if generation.min_score < self.min_score {
            self.min_score = generation.min_score;
            self.min = generation.min.clone();
        }
        self.avg = generation.avg;
        self.sum = generation.sum;
        self.generations = generations;
    }
}
