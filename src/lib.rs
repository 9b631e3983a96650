#![warn(missing_docs)]

/*! A generational genetic algorithm engine with pluggable operators.

The caller supplies the solution type and five operators: a random
solution generator, a fitness function, crossover, mutation, and a stop
predicate. The engine owns the loop. It scores the population, records
statistics, selects parents by roulette wheel, breeds a full replacement
generation, and tracks best-of-run extrema until the stop predicate
accepts.

```
use geneloop::ops::OperatorResult;
use geneloop::{StopCondition, Task};
use rand::{Rng, RngCore, SeedableRng};

// Minimize (x - 3)^2 over a single real value.
let mut task = Task::builder()
    .population_size(30)
    .minimize(true)
    .crossover_probability(0.5)
    .mutation_probability(0.3)
    .generator(|rng: &mut dyn RngCore| -> OperatorResult<f64> { Ok(rng.gen_range(-10.0..10.0)) })
    .fitness(|x: &f64| -> OperatorResult<f64> { Ok((x - 3.0).powi(2)) })
    .crossover(|a: &f64, b: &f64, _: &mut dyn RngCore| -> OperatorResult<f64> { Ok((a + b) / 2.0) })
    .mutation(|x: f64, rng: &mut dyn RngCore| -> OperatorResult<f64> { Ok(x + rng.gen_range(-0.5..0.5)) })
    .stop_criteria(StopCondition::max_generations(40))
    .build()
    .unwrap();
let report = task.run(&mut rand::rngs::StdRng::seed_from_u64(1)).unwrap();
assert!(report.min_score < 1.0);
```
!*/

pub mod core;
pub mod events;
pub mod ops;
pub mod settings;
pub mod task;

pub use crate::core::stats::StatsError;
pub use crate::core::{GenerationStats, Individual, Population, RunStats};
pub use events::{Event, Observer, TracingObserver};
pub use ops::{OperatorError, OperatorResult, StopCondition, StopCriteria, TaskState};
pub use settings::Settings;
pub use task::{Task, TaskBuilder, TaskError};
