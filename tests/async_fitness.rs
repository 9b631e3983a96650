use async_trait::async_trait;
use geneloop::ops::{AsyncFitnessFunction, BlockingFitness, OperatorResult};
use geneloop::{OperatorError, StopCondition, Task, TaskError};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct Counters {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

/// Scores a value after a short timer, as an I/O-bound evaluation would.
struct SlowAbsolute {
    counters: Arc<Counters>,
    fail_after: Option<usize>,
}

#[async_trait]
impl AsyncFitnessFunction<i64> for SlowAbsolute {
    async fn fitness_async(&self, solution: &i64) -> OperatorResult<f64> {
        let counters = &self.counters;
        let call = counters.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let running = counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        counters.peak.fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(1)).await;
        counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail_after.map_or(false, |limit| call > limit) {
            return Err(OperatorError::failed("remote evaluator timed out"));
        }
        Ok(solution.abs() as f64)
    }
}

fn builder(fitness: BlockingFitness<SlowAbsolute>) -> geneloop::TaskBuilder<i64> {
    Task::builder()
        .population_size(5)
        .minimize(true)
        .crossover_probability(0.5)
        .mutation_probability(0.5)
        .generator(|rng: &mut dyn RngCore| -> OperatorResult<i64> { Ok(rng.gen_range(-50..50)) })
        .fitness(fitness)
        .crossover(|a: &i64, b: &i64, _: &mut dyn RngCore| -> OperatorResult<i64> { Ok((a + b) / 2) })
        .mutation(|x: i64, rng: &mut dyn RngCore| -> OperatorResult<i64> { Ok(x + rng.gen_range(-3..=3)) })
}

#[test]
fn async_fitness_drives_a_full_run() {
    let counters = Arc::new(Counters::default());
    let evaluator = SlowAbsolute {
        counters: Arc::clone(&counters),
        fail_after: None,
    };
    let mut task = builder(BlockingFitness::new(evaluator).unwrap())
        .stop_criteria(StopCondition::max_generations(4))
        .build()
        .unwrap();

    let report = task.run(&mut StdRng::seed_from_u64(6)).unwrap();

    assert_eq!(report.generations, 4);
    assert_eq!(counters.calls.load(Ordering::SeqCst), 5 * 5);
    assert_eq!(counters.peak.load(Ordering::SeqCst), 1);
    assert!(report.min_score >= 0.0);
}

#[test]
fn async_fitness_failure_aborts_the_run() {
    let counters = Arc::new(Counters::default());
    let evaluator = SlowAbsolute {
        counters: Arc::clone(&counters),
        fail_after: Some(7),
    };
    let mut task = builder(BlockingFitness::new(evaluator).unwrap())
        .stop_criteria(StopCondition::max_generations(10))
        .build()
        .unwrap();

    let err = task.run(&mut StdRng::seed_from_u64(6)).unwrap_err();

    assert!(matches!(
        err,
        TaskError::Operator {
            operator: "fitness",
            source: OperatorError::Failed(_)
        }
    ));
    assert_eq!(counters.calls.load(Ordering::SeqCst), 8);
}
