//! Awaitable fitness functions.
//!
//! [`AsyncFitnessFunction`] is the asynchronous counterpart of
//! [`FitnessFunction`] for evaluations that wait on I/O or a remote service.
//! [`BlockingFitness`] bridges it into the synchronous engine: it owns a
//! single-threaded Tokio runtime and drives each evaluation to completion
//! before returning, so individuals are still scored one at a time and in
//! population order.

use crate::ops::{FitnessFunction, OperatorResult};
use crate::task::TaskError;
use async_trait::async_trait;
use tokio::runtime::{Builder, Runtime};

/// Scores a solution asynchronously.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use geneloop::ops::{AsyncFitnessFunction, BlockingFitness, FitnessFunction, OperatorResult};
///
/// struct RemoteSphere;
///
/// #[async_trait]
/// impl AsyncFitnessFunction<Vec<f64>> for RemoteSphere {
///     async fn fitness_async(&self, genes: &Vec<f64>) -> OperatorResult<f64> {
///         Ok(genes.iter().map(|g| g * g).sum())
///     }
/// }
///
/// let mut fitness = BlockingFitness::new(RemoteSphere).unwrap();
/// assert_eq!(fitness.fitness(&vec![1.0, 2.0]).unwrap(), 5.0);
/// ```
#[async_trait]
pub trait AsyncFitnessFunction<S: Sync>: Send + Sync {
    /// Scores the provided solution.
    ///
    /// # Errors
    /// Implementations return an [`OperatorError`](crate::ops::OperatorError)
    /// when the solution cannot be evaluated.
    async fn fitness_async(&self, solution: &S) -> OperatorResult<f64>;
}

/// Runs an [`AsyncFitnessFunction`] on a dedicated runtime and exposes it as
/// a [`FitnessFunction`].
///
/// # Panics
/// Evaluation panics if it is invoked from inside another Tokio runtime,
/// since the bridge blocks the calling thread.
pub struct BlockingFitness<F> {
    fitness: F,
    runtime: Runtime,
}

impl<F> BlockingFitness<F> {
    /// Wraps `fitness` with a fresh current-thread runtime.
    ///
    /// # Errors
    /// Returns [`TaskError::Runtime`] when the runtime cannot be built.
    pub fn new(fitness: F) -> Result<Self, TaskError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TaskError::Runtime)?;
        Ok(Self { fitness, runtime })
    }

    /// Returns the wrapped asynchronous function.
    #[must_use]
    pub fn get_ref(&self) -> &F {
        &self.fitness
    }
}

impl<S, F> FitnessFunction<S> for BlockingFitness<F>
where
    S: Sync,
    F: AsyncFitnessFunction<S>,
{
    fn fitness(&mut self, solution: &S) -> OperatorResult<f64> {
        self.runtime.block_on(self.fitness.fitness_async(solution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Individual;
    use crate::ops::{evaluate_population, OperatorError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct DelayedLength {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AsyncFitnessFunction<String> for DelayedLength {
        async fn fitness_async(&self, solution: &String) -> OperatorResult<f64> {
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(running, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(2)).await;
            self.seen.lock().expect("lock poisoned").push(solution.clone());
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if solution.is_empty() {
                return Err(OperatorError::invalid_solution("empty word"));
            }
            Ok(solution.len() as f64)
        }
    }

    #[test]
    fn evaluates_one_individual_at_a_time_in_order() {
        let mut fitness = BlockingFitness::new(DelayedLength::default()).unwrap();
        let mut population: Vec<_> = ["a", "abc", "ab"]
            .iter()
            .map(|word| Individual::new((*word).to_owned()))
            .collect();
        evaluate_population(&mut fitness, &mut population).unwrap();
        let scores: Vec<_> = population.iter().filter_map(Individual::score).collect();
        assert_eq!(scores, vec![1.0, 3.0, 2.0]);
        assert_eq!(fitness.get_ref().peak.load(Ordering::SeqCst), 1);
        assert_eq!(
            *fitness.get_ref().seen.lock().unwrap(),
            vec!["a".to_owned(), "abc".to_owned(), "ab".to_owned()]
        );
    }

    #[test]
    fn async_errors_are_returned() {
        let mut fitness = BlockingFitness::new(DelayedLength::default()).unwrap();
        let err = fitness.fitness(&String::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "operator produced an invalid solution: empty word"
        );
    }
}
