//! Core population primitives.
//!
//! An [`Individual`] pairs a caller-defined solution with the score assigned
//! by the fitness function. A [`Population`] owns the ordered individuals of
//! the current generation and is only ever replaced wholesale.

pub mod stats;

pub use stats::{GenerationStats, RunStats};

/// A candidate solution together with its fitness score.
///
/// The engine never looks inside the solution. Freshly generated or bred
/// individuals are unscored until the fitness function has been applied.
///
/// # Examples
/// ```
/// use geneloop::Individual;
/// let mut individual = Individual::new(vec![0.5, 1.5]);
/// assert_eq!(individual.score(), None);
/// individual.set_score(2.0);
/// assert_eq!(individual.score(), Some(2.0));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<S> {
    solution: S,
    score: Option<f64>,
}

impl<S> Individual<S> {
    /// Wraps an unscored solution.
    #[must_use]
    pub fn new(solution: S) -> Self {
        Self {
            solution,
            score: None,
        }
    }

    /// Creates an individual that already carries a score.
    ///
    /// # Examples
    /// ```
    /// use geneloop::Individual;
    /// let individual = Individual::scored("abc", 3.0);
    /// assert_eq!(individual.score(), Some(3.0));
    /// ```
    #[must_use]
    pub fn scored(solution: S, score: f64) -> Self {
        Self {
            solution,
            score: Some(score),
        }
    }

    /// Returns the wrapped solution.
    #[must_use]
    pub fn solution(&self) -> &S {
        &self.solution
    }

    /// Consumes the individual and returns the solution.
    ///
    /// ```
    /// use geneloop::Individual;
    /// let genes = Individual::scored(vec![1.0, 2.0], 0.5).into_solution();
    /// assert_eq!(genes, vec![1.0, 2.0]);
    /// ```
    #[must_use]
    pub fn into_solution(self) -> S {
        self.solution
    }

    /// Returns the score, or `None` when the individual has not been evaluated.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Indicates whether a score has been assigned.
    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    /// Assigns the fitness score.
    pub fn set_score(&mut self, score: f64) {
        self.score = Some(score);
    }
}

/// The ordered set of individuals that make up one generation.
///
/// Membership only changes through [`Population::replace`]; individual
/// scores may be written in place by the fitness evaluator.
///
/// # Examples
/// ```
/// use geneloop::{Individual, Population};
/// let mut population = Population::from_solutions(vec![1, 2, 3]);
/// assert_eq!(population.len(), 3);
/// population.replace(vec![Individual::new(4)]);
/// assert_eq!(population.individuals()[0].solution(), &4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Population<S> {
    individuals: Vec<Individual<S>>,
}

impl<S> Population<S> {
    /// Creates an empty population.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }

    /// Creates an empty population able to hold `capacity` individuals
    /// without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    /// Wraps every solution as an unscored individual.
    #[must_use]
    pub fn from_solutions(solutions: Vec<S>) -> Self {
        Self {
            individuals: solutions.into_iter().map(Individual::new).collect(),
        }
    }

    /// Returns the number of individuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Indicates whether the population has no individuals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Appends an individual. Only used while the initial generation is filled.
    pub fn push(&mut self, individual: Individual<S>) {
        self.individuals.push(individual);
    }

    /// Returns the individuals in order.
    #[must_use]
    pub fn individuals(&self) -> &[Individual<S>] {
        &self.individuals
    }

    /// Returns mutable access to the individuals so scores can be assigned.
    pub fn individuals_mut(&mut self) -> &mut [Individual<S>] {
        &mut self.individuals
    }

    /// Swaps in a whole new generation, returning the previous one.
    pub fn replace(&mut self, individuals: Vec<Individual<S>>) -> Vec<Individual<S>> {
        std::mem::replace(&mut self.individuals, individuals)
    }

    /// Returns an iterator over the individuals.
    pub fn iter(&self) -> impl Iterator<Item = &Individual<S>> {
        self.individuals.iter()
    }
}

impl<S> Default for Population<S> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_individuals_are_unscored() {
        let individual = Individual::new([1.0, 2.0]);
        assert!(!individual.is_scored());
        assert_eq!(individual.solution(), &[1.0, 2.0]);
    }

    #[test]
    fn replace_swaps_whole_generation() {
        let mut population = Population::from_solutions(vec!['a', 'b']);
        let previous = population.replace(vec![Individual::scored('c', 1.0)]);
        assert_eq!(previous.len(), 2);
        assert_eq!(population.len(), 1);
        assert_eq!(population.individuals()[0].score(), Some(1.0));
    }

    #[test]
    fn scores_are_written_in_place() {
        let mut population = Population::from_solutions(vec![1, 2]);
        for individual in population.individuals_mut() {
            let value = f64::from(*individual.solution());
            individual.set_score(value * 10.0);
        }
        let scores: Vec<_> = population.iter().filter_map(Individual::score).collect();
        assert_eq!(scores, vec![10.0, 20.0]);
    }
}
