//! Stop predicates evaluated once per generation.

use crate::core::{GenerationStats, Individual, RunStats};

/// Read-only view of the engine handed to a [`StopCriteria`].
///
/// The view is taken after the current population has been scored and its
/// statistics recorded.
#[derive(Debug)]
pub struct TaskState<'a, S> {
    generation: usize,
    statistics: &'a GenerationStats<S>,
    run_statistics: &'a RunStats<S>,
    population: &'a [Individual<S>],
}

impl<'a, S> TaskState<'a, S> {
    pub(crate) fn new(
        generation: usize,
        statistics: &'a GenerationStats<S>,
        run_statistics: &'a RunStats<S>,
        population: &'a [Individual<S>],
    ) -> Self {
        Self {
            generation,
            statistics,
            run_statistics,
            population,
        }
    }

    /// Number of reproduction cycles completed. Zero on the first check.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Statistics of the current generation.
    #[must_use]
    pub fn statistics(&self) -> &'a GenerationStats<S> {
        self.statistics
    }

    /// Best-of-run statistics so far.
    #[must_use]
    pub fn run_statistics(&self) -> &'a RunStats<S> {
        self.run_statistics
    }

    /// The scored population of the current generation.
    #[must_use]
    pub fn population(&self) -> &'a [Individual<S>] {
        self.population
    }
}

/// Decides whether the run should end.
///
/// Called once per generation, the first time with generation zero before
/// any reproduction has happened.
///
/// # Examples
/// ```
/// use geneloop::ops::{StopCriteria, TaskState};
///
/// let mut stop = |state: &TaskState<'_, u8>| state.generation() >= 10;
/// # let _ = &mut stop as &mut dyn StopCriteria<u8>;
/// ```
pub trait StopCriteria<S> {
    /// Returns `true` once the run should terminate.
    fn should_stop(&mut self, state: &TaskState<'_, S>) -> bool;
}

impl<S, F> StopCriteria<S> for F
where
    F: FnMut(&TaskState<'_, S>) -> bool,
{
    fn should_stop(&mut self, state: &TaskState<'_, S>) -> bool {
        self(state)
    }
}

/// Ready-made stop conditions that can be combined.
///
/// # Examples
/// ```
/// use geneloop::StopCondition;
/// let condition = StopCondition::max_generations(100).or(StopCondition::target_max_score(0.99));
/// # let _ = condition;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum StopCondition {
    /// Stop when the generation counter reaches this limit.
    MaxGenerations {
        /// Maximum number of reproduction cycles.
        limit: usize,
    },
    /// Stop once the best-of-run maximum reaches the threshold.
    TargetMaxScore {
        /// Score at or above which the run ends.
        threshold: f64,
    },
    /// Stop once the best-of-run minimum falls to the threshold.
    TargetMinScore {
        /// Score at or below which the run ends.
        threshold: f64,
    },
    /// Triggers when either child condition is met.
    Or(Box<StopCondition>, Box<StopCondition>),
    /// Triggers when both child conditions are met.
    And(Box<StopCondition>, Box<StopCondition>),
}

impl StopCondition {
    /// Creates a stop condition that limits the number of generations.
    #[must_use]
    pub fn max_generations(limit: usize) -> Self {
        Self::MaxGenerations { limit }
    }

    /// Creates a stop condition for maximization targets.
    #[must_use]
    pub fn target_max_score(threshold: f64) -> Self {
        Self::TargetMaxScore { threshold }
    }

    /// Creates a stop condition for minimization targets.
    #[must_use]
    pub fn target_min_score(threshold: f64) -> Self {
        Self::TargetMinScore { threshold }
    }

    /// Combines two stop conditions using logical OR semantics.
    #[must_use]
    pub fn or(self, other: StopCondition) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Combines two stop conditions using logical AND semantics.
    #[must_use]
    pub fn and(self, other: StopCondition) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    fn is_met(&self, generation: usize, min_score: f64, max_score: f64) -> bool {
        match self {
            Self::MaxGenerations { limit } => generation >= *limit,
            Self::TargetMaxScore { threshold } => max_score >= *threshold,
            Self::TargetMinScore { threshold } => min_score <= *threshold,
            Self::Or(left, right) => {
                left.is_met(generation, min_score, max_score)
                    || right.is_met(generation, min_score, max_score)
            }
            Self::And(left, right) => {
                left.is_met(generation, min_score, max_score)
                    && right.is_met(generation, min_score, max_score)
            }
        }
    }
}

impl<S> StopCriteria<S> for StopCondition {
    fn should_stop(&mut self, state: &TaskState<'_, S>) -> bool {
        let run = state.run_statistics();
        self.is_met(state.generation(), run.min_score, run.max_score)
    }
}
