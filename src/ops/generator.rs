//! Random solution generation used to seed the first generation.

use crate::ops::OperatorResult;
use rand::RngCore;

/// Produces one new random solution per call.
///
/// # Examples
/// ```
/// use geneloop::ops::{OperatorResult, SolutionGenerator};
/// use rand::{Rng, SeedableRng};
///
/// let mut generator = |rng: &mut dyn rand::RngCore| -> OperatorResult<f64> {
///     Ok(rng.gen_range(0.0..1.0))
/// };
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let value = generator.generate(&mut rng).unwrap();
/// assert!((0.0..1.0).contains(&value));
/// ```
pub trait SolutionGenerator<S> {
    /// Generates a random solution.
    ///
    /// # Errors
    /// Implementations return an [`OperatorError`](crate::ops::OperatorError)
    /// when no solution can be produced.
    fn generate(&mut self, rng: &mut dyn RngCore) -> OperatorResult<S>;
}

impl<S, F> SolutionGenerator<S> for F
where
    F: FnMut(&mut dyn RngCore) -> OperatorResult<S>,
{
    fn generate(&mut self, rng: &mut dyn RngCore) -> OperatorResult<S> {
        self(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::OperatorError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Counter {
        next: u32,
    }

    impl SolutionGenerator<u32> for Counter {
        fn generate(&mut self, _rng: &mut dyn RngCore) -> OperatorResult<u32> {
            self.next += 1;
            Ok(self.next)
        }
    }

    #[test]
    fn stateful_generators_advance() {
        let mut generator = Counter { next: 0 };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generator.generate(&mut rng).unwrap(), 1);
        assert_eq!(generator.generate(&mut rng).unwrap(), 2);
    }

    #[test]
    fn boxed_generators_forward() {
        let mut generator: Box<dyn SolutionGenerator<u8>> =
            Box::new(|_: &mut dyn RngCore| -> OperatorResult<u8> {
                Err(OperatorError::failed("exhausted"))
            });
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generator.generate(&mut rng).is_err());
    }
}
