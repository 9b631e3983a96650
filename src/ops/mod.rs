//! Genetic operators and the stop predicate.
//!
//! Every caller-supplied capability is a single-method trait with a blanket
//! implementation for the matching closure, so a problem can be wired up with
//! plain functions or with stateful structs.

pub mod async_fitness;
pub mod crossover;
pub mod fitness;
pub mod generator;
pub mod mutation;
pub mod selection;
pub mod stop;

pub use async_fitness::{AsyncFitnessFunction, BlockingFitness};
pub use crossover::CrossoverOperator;
pub use fitness::{evaluate_population, FitnessFunction};
pub use generator::SolutionGenerator;
pub use mutation::MutationOperator;
pub use selection::{selection_weights, RouletteWheel};
pub use stop::{StopCondition, StopCriteria, TaskState};

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Convenience alias returned by all operators.
pub type OperatorResult<T> = Result<T, OperatorError>;

/// Failure reported by a caller-supplied operator.
///
/// # Examples
/// ```
/// use geneloop::ops::OperatorError;
/// let err = OperatorError::failed("simulation diverged");
/// assert_eq!(err.to_string(), "operator failed: simulation diverged");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorError {
    /// The operator could not produce a result.
    Failed(String),
    /// The fitness function produced a score that is not a finite number.
    InvalidScore(f64),
    /// The operator produced a solution the caller considers malformed.
    InvalidSolution(String),
}

impl OperatorError {
    /// Creates an [`OperatorError::Failed`] from any message.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    /// Creates an [`OperatorError::InvalidSolution`] from any message.
    ///
    /// ```
    /// use geneloop::ops::OperatorError;
    /// let err = OperatorError::invalid_solution("route visits a city twice");
    /// assert!(matches!(err, OperatorError::InvalidSolution(_)));
    /// ```
    pub fn invalid_solution(reason: impl Into<String>) -> Self {
        Self::InvalidSolution(reason.into())
    }
}

impl Display for OperatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "operator failed: {reason}"),
            Self::InvalidScore(value) => {
                write!(f, "fitness score must be a finite number (received {value})")
            }
            Self::InvalidSolution(reason) => write!(f, "operator produced an invalid solution: {reason}"),
        }
    }
}

impl Error for OperatorError {}
