//! The generational engine.
//!
//! A [`Task`] is assembled through [`Task::builder`], which validates the
//! [`Settings`] and checks that every operator is present. [`Task::run`] then
//! drives the loop:
//!
//! 1. generate `population_size` random solutions and score them,
//! 2. record statistics and ask the stop predicate whether to end,
//! 3. breed a full generation of children by roulette-wheel selection,
//!    crossover and conditional mutation,
//! 4. replace the population with the children, score them, record
//!    statistics, and go back to step 2.
//!
//! Every child of the next generation is newly bred; nothing is carried over.

use crate::core::stats::StatsError;
use crate::core::{GenerationStats, Individual, Population, RunStats};
use crate::events::{Event, Observer};
use crate::ops::{
    evaluate_population, selection_weights, CrossoverOperator, FitnessFunction, MutationOperator,
    OperatorError, RouletteWheel, SolutionGenerator, StopCriteria, TaskState,
};
use crate::settings::Settings;
use rand::{Rng, RngCore};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use tracing::instrument;

/// Errors produced while configuring or running a [`Task`].
#[derive(Debug)]
pub enum TaskError {
    /// The configured population size was zero.
    InvalidPopulationSize(usize),
    /// A probability was NaN or outside `[0, 1]`.
    InvalidProbability {
        /// Name of the offending setting.
        parameter: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A required operator was never supplied to the builder.
    MissingOperator(&'static str),
    /// A caller-supplied operator failed; the run was aborted.
    Operator {
        /// Which operator failed.
        operator: &'static str,
        /// The reported failure.
        source: OperatorError,
    },
    /// Statistics could not be computed from the population.
    Statistics(StatsError),
    /// The Tokio runtime behind an asynchronous operator failed to start.
    Runtime(std::io::Error),
}

impl TaskError {
    fn operator(operator: &'static str, source: OperatorError) -> Self {
        Self::Operator { operator, source }
    }

    /// Indicates whether the error was raised before any generation ran.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidPopulationSize(_)
                | Self::InvalidProbability { .. }
                | Self::MissingOperator(_)
                | Self::Runtime(_)
        )
    }
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPopulationSize(size) => {
                write!(
                    f,
                    "population size must be greater than zero (received {size})"
                )
            }
            Self::InvalidProbability { parameter, value } => {
                write!(f, "{parameter} must be within [0, 1] (received {value})")
            }
            Self::MissingOperator(operator) => {
                write!(f, "no {operator} operator was configured")
            }
            Self::Operator { operator, source } => write!(f, "{operator}: {source}"),
            Self::Statistics(err) => write!(f, "{err}"),
            Self::Runtime(err) => write!(f, "failed to initialize Tokio runtime: {err}"),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Operator { source, .. } => Some(source),
            Self::Statistics(err) => Some(err),
            Self::Runtime(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StatsError> for TaskError {
    fn from(err: StatsError) -> Self {
        Self::Statistics(err)
    }
}

/// Builder returned by [`Task::builder`].
pub struct TaskBuilder<S> {
    settings: Settings,
    generator: Option<Box<dyn SolutionGenerator<S>>>,
    fitness: Option<Box<dyn FitnessFunction<S>>>,
    crossover: Option<Box<dyn CrossoverOperator<S>>>,
    mutation: Option<Box<dyn MutationOperator<S>>>,
    stop: Option<Box<dyn StopCriteria<S>>>,
    observers: Vec<Box<dyn Observer<S>>>,
}

impl<S> TaskBuilder<S> {
    /// Replaces all numeric settings at once.
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Configures the number of individuals per generation.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.settings.population_size = size;
        self
    }

    /// Selects minimization (`true`) or maximization (`false`).
    #[must_use]
    pub fn minimize(mut self, minimize: bool) -> Self {
        self.settings.minimize = minimize;
        self
    }

    /// Configures the crossover probability.
    #[must_use]
    pub fn crossover_probability(mut self, probability: f64) -> Self {
        self.settings.crossover_probability = probability;
        self
    }

    /// Configures the mutation probability.
    #[must_use]
    pub fn mutation_probability(mut self, probability: f64) -> Self {
        self.settings.mutation_probability = probability;
        self
    }

    /// Sets the random solution generator.
    #[must_use]
    pub fn generator(mut self, generator: impl SolutionGenerator<S> + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    /// Sets the fitness function.
    #[must_use]
    pub fn fitness(mut self, fitness: impl FitnessFunction<S> + 'static) -> Self {
        self.fitness = Some(Box::new(fitness));
        self
    }

    /// Sets the crossover operator.
    #[must_use]
    pub fn crossover(mut self, operator: impl CrossoverOperator<S> + 'static) -> Self {
        self.crossover = Some(Box::new(operator));
        self
    }

    /// Sets the mutation operator.
    #[must_use]
    pub fn mutation(mut self, operator: impl MutationOperator<S> + 'static) -> Self {
        self.mutation = Some(Box::new(operator));
        self
    }

    /// Sets the stop predicate.
    #[must_use]
    pub fn stop_criteria(mut self, criteria: impl StopCriteria<S> + 'static) -> Self {
        self.stop = Some(Box::new(criteria));
        self
    }

    /// Registers an observer. Observers are notified in registration order.
    #[must_use]
    pub fn observer(mut self, observer: impl Observer<S> + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Finalizes the builder into a [`Task`].
    ///
    /// # Errors
    /// Returns a configuration [`TaskError`] when the settings are invalid or
    /// any of the five operators is missing.
    pub fn build(self) -> Result<Task<S>, TaskError> {
        self.settings.validate()?;
        Ok(Task {
            settings: self.settings,
            generator: self
                .generator
                .ok_or(TaskError::MissingOperator("generator"))?,
            fitness: self.fitness.ok_or(TaskError::MissingOperator("fitness"))?,
            crossover: self
                .crossover
                .ok_or(TaskError::MissingOperator("crossover"))?,
            mutation: self.mutation.ok_or(TaskError::MissingOperator("mutation"))?,
            stop: self
                .stop
                .ok_or(TaskError::MissingOperator("stop criteria"))?,
            observers: self.observers,
        })
    }
}

/// Mutable state of a single run.
struct RunState<S> {
    generation: usize,
    population: Population<S>,
    statistics: GenerationStats<S>,
    run: RunStats<S>,
}

/// Generational genetic algorithm over caller-defined solutions.
///
/// # Examples
/// ```
/// use geneloop::ops::OperatorResult;
/// use geneloop::{StopCondition, Task};
/// use rand::{Rng, RngCore, SeedableRng};
///
/// let mut task = Task::builder()
///     .population_size(20)
///     .crossover_probability(0.7)
///     .mutation_probability(0.2)
///     .generator(|rng: &mut dyn RngCore| -> OperatorResult<f64> { Ok(rng.gen_range(0.0..10.0)) })
///     .fitness(|x: &f64| -> OperatorResult<f64> { Ok(*x) })
///     .crossover(|a: &f64, b: &f64, _: &mut dyn RngCore| -> OperatorResult<f64> { Ok((a + b) / 2.0) })
///     .mutation(|x: f64, rng: &mut dyn RngCore| -> OperatorResult<f64> { Ok(x + rng.gen_range(-1.0..1.0)) })
///     .stop_criteria(StopCondition::max_generations(15))
///     .build()
///     .unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let report = task.run(&mut rng).unwrap();
/// assert_eq!(report.generations, 15);
/// assert!(report.max_score >= report.min_score);
/// ```
pub struct Task<S> {
    settings: Settings,
    generator: Box<dyn SolutionGenerator<S>>,
    fitness: Box<dyn FitnessFunction<S>>,
    crossover: Box<dyn CrossoverOperator<S>>,
    mutation: Box<dyn MutationOperator<S>>,
    stop: Box<dyn StopCriteria<S>>,
    observers: Vec<Box<dyn Observer<S>>>,
}

impl<S> Task<S> {
    /// Creates a builder with default [`Settings`] and no operators.
    #[must_use]
    pub fn builder() -> TaskBuilder<S> {
        TaskBuilder {
            settings: Settings::default(),
            generator: None,
            fitness: None,
            crossover: None,
            mutation: None,
            stop: None,
            observers: Vec::new(),
        }
    }

    /// Returns the validated settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn emit(&mut self, event: &Event<'_, S>) {
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }
}

impl<S: Clone> Task<S> {
    /// Runs the engine until the stop predicate accepts.
    ///
    /// Each call is an independent run with a fresh population.
    ///
    /// # Errors
    /// Returns [`TaskError::Operator`] as soon as any operator fails. The
    /// failure is also published as [`Event::Error`].
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            population_size = self.settings.population_size,
            minimize = self.settings.minimize
        )
    )]
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Result<RunStats<S>, TaskError> {
        self.emit(&Event::RunStart);
        match self.execute(rng) {
            Ok(statistics) => {
                self.emit(&Event::RunFinished {
                    statistics: &statistics,
                });
                Ok(statistics)
            }
            Err(err) => {
                tracing::error!(%err, "run aborted");
                self.emit(&Event::Error { error: &err });
                Err(err)
            }
        }
    }

    fn execute(&mut self, rng: &mut dyn RngCore) -> Result<RunStats<S>, TaskError> {
        let mut population = self.initialize(rng)?;
        let statistics = self.evaluate(&mut population)?;
        let run = RunStats::seed(&statistics);
        let mut state = RunState {
            generation: 0,
            population,
            statistics,
            run,
        };
        self.emit(&Event::LoopStart);
        while !self.should_stop(&state) {
            self.iteration(&mut state, rng)?;
        }
        self.emit(&Event::LoopEnd);
        Ok(state.run)
    }

    fn initialize(&mut self, rng: &mut dyn RngCore) -> Result<Population<S>, TaskError> {
        self.emit(&Event::InitStart);
        let size = self.settings.population_size;
        let mut population = Population::with_capacity(size);
        while population.len() < size {
            let solution = self
                .generator
                .generate(rng)
                .map_err(|source| TaskError::operator("generator", source))?;
            population.push(Individual::new(solution));
        }
        self.emit(&Event::InitEnd {
            population: population.individuals(),
        });
        Ok(population)
    }

    fn evaluate(&mut self, population: &mut Population<S>) -> Result<GenerationStats<S>, TaskError> {
        self.emit(&Event::FitnessEvalStart);
        evaluate_population(&mut *self.fitness, population.individuals_mut())
            .map_err(|source| TaskError::operator("fitness", source))?;
        self.emit(&Event::FitnessEvalEnd {
            population: population.individuals(),
        });
        let statistics = GenerationStats::compute(population.individuals())?;
        self.emit(&Event::Statistics {
            statistics: &statistics,
        });
        Ok(statistics)
    }

    fn should_stop(&mut self, state: &RunState<S>) -> bool {
        let view = TaskState::new(
            state.generation,
            &state.statistics,
            &state.run,
            state.population.individuals(),
        );
        self.stop.should_stop(&view)
    }

    fn iteration(&mut self, state: &mut RunState<S>, rng: &mut dyn RngCore) -> Result<(), TaskError> {
        state.generation += 1;
        let generation = state.generation;
        self.emit(&Event::IterationStart { generation });
        self.emit(&Event::ParentSelectionEnd {
            parents: state.population.individuals(),
        });
        let children = self.reproduce(state.population.individuals(), &state.statistics, rng)?;
        state.population.replace(children);
        self.emit(&Event::ChildSelectionEnd {
            population: state.population.individuals(),
        });
        state.statistics = self.evaluate(&mut state.population)?;
        state.run.fold(&state.statistics, generation);
        self.emit(&Event::IterationEnd { generation });
        Ok(())
    }

    /// Breeds exactly `population_size` children from the scored parents.
    ///
    /// Parent scores are never modified; minimization is applied to a
    /// separate weight vector whose own total drives the wheel.
    fn reproduce(
        &mut self,
        parents: &[Individual<S>],
        statistics: &GenerationStats<S>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Individual<S>>, TaskError> {
        self.emit(&Event::ReproductionStart);
        let scores = parents
            .iter()
            .enumerate()
            .map(|(index, parent)| parent.score().ok_or(StatsError::Unscored { index }))
            .collect::<Result<Vec<_>, _>>()?;
        let weights = selection_weights(&scores, statistics.max_score, self.settings.minimize);
        let wheel = RouletteWheel::new(&weights).ok_or(StatsError::EmptyPopulation)?;
        let size = self.settings.population_size;
        let mut children = Vec::with_capacity(size);
        while children.len() < size {
            let first = wheel.sample(rng);
            let mut second = first;
            if rng.gen::<f64>() < self.settings.crossover_probability {
                self.emit(&Event::Crossover);
                second = rng.gen_range(0..parents.len());
            }
            let mut child = self
                .crossover
                .crossover(parents[first].solution(), parents[second].solution(), rng)
                .map_err(|source| TaskError::operator("crossover", source))?;
            if rng.gen::<f64>() < self.settings.mutation_probability {
                self.emit(&Event::Mutate);
                child = self
                    .mutation
                    .mutate(child, rng)
                    .map_err(|source| TaskError::operator("mutation", source))?;
            }
            children.push(Individual::new(child));
        }
        self.emit(&Event::ReproductionEnd {
            children: &children,
        });
        Ok(children)
    }
}
