//! Fitness functions and whole-population evaluation.

use crate::core::Individual;
use crate::ops::{OperatorError, OperatorResult};

/// Assigns a numeric score to a solution.
///
/// Higher is better unless the task minimizes. The score must be finite.
///
/// # Examples
/// ```
/// use geneloop::ops::{FitnessFunction, OperatorResult};
///
/// let mut sphere = |genes: &Vec<f64>| -> OperatorResult<f64> { Ok(genes.iter().map(|g| g * g).sum()) };
/// assert_eq!(sphere.fitness(&vec![1.0, 2.0]).unwrap(), 5.0);
/// ```
pub trait FitnessFunction<S> {
    /// Scores the provided solution.
    ///
    /// # Errors
    /// Implementations return an [`OperatorError`] when the solution cannot
    /// be evaluated.
    fn fitness(&mut self, solution: &S) -> OperatorResult<f64>;
}

impl<S, F> FitnessFunction<S> for F
where
    F: FnMut(&S) -> OperatorResult<f64>,
{
    fn fitness(&mut self, solution: &S) -> OperatorResult<f64> {
        self(solution)
    }
}

/// Scores every individual in place, one at a time and in order.
///
/// The first failure aborts the pass; individuals after it keep whatever
/// score they had.
///
/// # Errors
/// Propagates the fitness function's error, and returns
/// [`OperatorError::InvalidScore`] for NaN or infinite scores.
///
/// # Examples
/// ```
/// use geneloop::Individual;
/// use geneloop::ops::evaluate_population;
///
/// let mut population = vec![Individual::new(2.0_f64), Individual::new(3.0)];
/// let mut double = |x: &f64| -> geneloop::OperatorResult<f64> { Ok(x * 2.0) };
/// evaluate_population(&mut double, &mut population).unwrap();
/// assert_eq!(population[1].score(), Some(6.0));
/// ```
pub fn evaluate_population<S, F>(
    fitness: &mut F,
    population: &mut [Individual<S>],
) -> OperatorResult<()>
where
    F: FitnessFunction<S> + ?Sized,
{
    for individual in population.iter_mut() {
        let score = fitness.fitness(individual.solution())?;
        if !score.is_finite() {
            return Err(OperatorError::InvalidScore(score));
        }
        individual.set_score(score);
    }
    Ok(())
}
