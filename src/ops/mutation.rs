//! Mutation operator abstraction for perturbing a freshly bred child.

use crate::ops::OperatorResult;
use rand::RngCore;

/// Takes ownership of a child and returns its mutated form.
///
/// # Examples
/// ```
/// use geneloop::ops::{MutationOperator, OperatorResult};
/// use rand::SeedableRng;
///
/// struct AddOne;
///
/// impl MutationOperator<Vec<f64>> for AddOne {
///     fn mutate(&mut self, mut child: Vec<f64>, _rng: &mut dyn rand::RngCore) -> OperatorResult<Vec<f64>> {
///         child.iter_mut().for_each(|gene| *gene += 1.0);
///         Ok(child)
///     }
/// }
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// assert_eq!(AddOne.mutate(vec![0.0, 1.0], &mut rng).unwrap(), vec![1.0, 2.0]);
/// ```
pub trait MutationOperator<S> {
    /// Mutates the child.
    ///
    /// # Errors
    /// Implementations return an [`OperatorError`](crate::ops::OperatorError)
    /// when the child cannot be mutated.
    fn mutate(&mut self, child: S, rng: &mut dyn RngCore) -> OperatorResult<S>;
}

impl<S, F> MutationOperator<S> for F
where
    F: FnMut(S, &mut dyn RngCore) -> OperatorResult<S>,
{
    fn mutate(&mut self, child: S, rng: &mut dyn RngCore) -> OperatorResult<S> {
        self(child, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn jitter(mut child: Vec<f64>, rng: &mut dyn RngCore) -> OperatorResult<Vec<f64>> {
        for gene in &mut child {
            *gene += rng.gen_range(-0.1..0.1);
        }
        Ok(child)
    }

    #[test]
    fn mutation_keeps_shape() {
        let mut operator = jitter;
        let mut rng = StdRng::seed_from_u64(9);
        let child = operator.mutate(vec![0.0; 3], &mut rng).unwrap();
        assert_eq!(child.len(), 3);
        assert!(child.iter().all(|gene| gene.abs() < 0.1));
    }

    #[test]
    fn boxed_operators_forward() {
        let mut operator: Box<dyn MutationOperator<Vec<f64>>> = Box::new(jitter);
        let mut rng = StdRng::seed_from_u64(9);
        assert!(operator.mutate(vec![1.0], &mut rng).is_ok());
    }
}
