//! Crossover operator abstraction for recombining two parents into one child.

use crate::ops::OperatorResult;
use rand::RngCore;

/// Produces one child from two parents.
///
/// The engine passes the same parent twice when no crossover event fires, so
/// implementations must accept self-pairing.
///
/// # Examples
/// ```
/// use geneloop::ops::{CrossoverOperator, OperatorResult};
/// use rand::SeedableRng;
///
/// struct Midpoint;
///
/// impl CrossoverOperator<f64> for Midpoint {
///     fn crossover(&mut self, a: &f64, b: &f64, _rng: &mut dyn rand::RngCore) -> OperatorResult<f64> {
///         Ok((a + b) / 2.0)
///     }
/// }
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// assert_eq!(Midpoint.crossover(&1.0, &3.0, &mut rng).unwrap(), 2.0);
/// ```
pub trait CrossoverOperator<S> {
    /// Recombines two parents.
    ///
    /// # Errors
    /// Implementations return an [`OperatorError`](crate::ops::OperatorError)
    /// when the parents cannot be combined.
    fn crossover(&mut self, first: &S, second: &S, rng: &mut dyn RngCore) -> OperatorResult<S>;
}

impl<S, F> CrossoverOperator<S> for F
where
    F: FnMut(&S, &S, &mut dyn RngCore) -> OperatorResult<S>,
{
    fn crossover(&mut self, first: &S, second: &S, rng: &mut dyn RngCore) -> OperatorResult<S> {
        self(first, second, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn uniform(a: &Vec<u8>, b: &Vec<u8>, rng: &mut dyn RngCore) -> OperatorResult<Vec<u8>> {
        Ok(a.iter()
            .zip(b)
            .map(|(x, y)| if rng.gen_bool(0.5) { *x } else { *y })
            .collect())
    }

    #[test]
    fn function_items_are_operators() {
        let mut operator = uniform;
        let mut rng = StdRng::seed_from_u64(11);
        let child = operator
            .crossover(&vec![0, 0, 0, 0], &vec![1, 1, 1, 1], &mut rng)
            .unwrap();
        assert_eq!(child.len(), 4);
        assert!(child.iter().all(|gene| *gene <= 1));
    }

    #[test]
    fn self_pairing_is_a_copy_for_uniform_crossover() {
        let mut operator = uniform;
        let mut rng = StdRng::seed_from_u64(5);
        let parent = vec![3, 1, 4, 1, 5];
        let child = operator.crossover(&parent, &parent, &mut rng).unwrap();
        assert_eq!(child, parent);
    }
}
