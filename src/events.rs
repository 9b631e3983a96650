//! Lifecycle notifications published by [`Task::run`](crate::Task::run).
//!
//! Payloads borrow engine data only for the duration of the call, so an
//! observer always sees the state at the moment the event was emitted. Clone
//! what needs to outlive the callback.

use crate::core::{GenerationStats, Individual, RunStats};
use crate::task::TaskError;

/// A single lifecycle notification.
#[derive(Debug)]
pub enum Event<'a, S> {
    /// The run has started.
    RunStart,
    /// Initial population generation is about to begin.
    InitStart,
    /// The initial population has been generated (unscored).
    InitEnd {
        /// The freshly generated individuals.
        population: &'a [Individual<S>],
    },
    /// The initial generation has been scored and recorded; the loop begins.
    LoopStart,
    /// Fitness evaluation of the current population is about to begin.
    FitnessEvalStart,
    /// Every individual of the current population has been scored.
    FitnessEvalEnd {
        /// The scored population.
        population: &'a [Individual<S>],
    },
    /// Statistics of the current generation have been computed.
    Statistics {
        /// Statistics of the current generation.
        statistics: &'a GenerationStats<S>,
    },
    /// A reproduction cycle has started.
    IterationStart {
        /// Generation number after increment, starting at one.
        generation: usize,
    },
    /// The parents for this cycle have been fixed.
    ParentSelectionEnd {
        /// Scored parents in population order.
        parents: &'a [Individual<S>],
    },
    /// Children are about to be bred.
    ReproductionStart,
    /// A crossover event fired and a second parent was drawn uniformly.
    Crossover,
    /// A child is about to be mutated.
    Mutate,
    /// All children have been bred.
    ReproductionEnd {
        /// The unscored children.
        children: &'a [Individual<S>],
    },
    /// The children have replaced the population.
    ChildSelectionEnd {
        /// The new, not yet scored, population.
        population: &'a [Individual<S>],
    },
    /// A reproduction cycle has completed and been recorded.
    IterationEnd {
        /// Generation number of the completed cycle.
        generation: usize,
    },
    /// The stop predicate accepted; no further cycles will run.
    LoopEnd,
    /// The run completed.
    RunFinished {
        /// Final best-of-run statistics.
        statistics: &'a RunStats<S>,
    },
    /// The run was aborted.
    Error {
        /// The error about to be returned to the caller.
        error: &'a TaskError,
    },
}

impl<S> Event<'_, S> {
    /// Stable hook name of the event.
    ///
    /// # Examples
    /// ```
    /// use geneloop::Event;
    /// assert_eq!(Event::<()>::RunStart.name(), "run start");
    /// assert_eq!(Event::IterationStart::<()> { generation: 1 }.name(), "iteration start");
    /// ```
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RunStart => "run start",
            Self::InitStart => "init start",
            Self::InitEnd { .. } => "init end",
            Self::LoopStart => "loop start",
            Self::FitnessEvalStart => "fitness start",
            Self::FitnessEvalEnd { .. } => "fitness end",
            Self::Statistics { .. } => "statistics",
            Self::IterationStart { .. } => "iteration start",
            Self::ParentSelectionEnd { .. } => "parent selection end",
            Self::ReproductionStart => "reproduction start",
            Self::Crossover => "crossover",
            Self::Mutate => "mutate",
            Self::ReproductionEnd { .. } => "reproduction end",
            Self::ChildSelectionEnd { .. } => "child selection end",
            Self::IterationEnd { .. } => "iteration end",
            Self::LoopEnd => "loop end",
            Self::RunFinished { .. } => "run finished",
            Self::Error { .. } => "error",
        }
    }
}

/// Receives lifecycle notifications. Observers cannot influence the run.
///
/// # Examples
/// ```
/// use geneloop::{Event, Observer};
///
/// let mut names = Vec::new();
/// let mut observer = |event: &Event<'_, u8>| names.push(event.name());
/// observer.notify(&Event::RunStart);
/// assert_eq!(names, vec!["run start"]);
/// ```
pub trait Observer<S> {
    /// Handles a single event.
    fn notify(&mut self, event: &Event<'_, S>);
}

impl<S, F> Observer<S> for F
where
    F: FnMut(&Event<'_, S>),
{
    fn notify(&mut self, event: &Event<'_, S>) {
        self(event);
    }
}

/// Forwards lifecycle events to `tracing`.
///
/// This is the only place per-generation statistics are logged; register it
/// to get them. Payload-free events are logged at trace level. Aborts are
/// already logged by the engine at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<S> Observer<S> for TracingObserver {
    fn notify(&mut self, event: &Event<'_, S>) {
        match event {
            Event::InitEnd { population }
            | Event::FitnessEvalEnd { population }
            | Event::ChildSelectionEnd { population } => {
                tracing::debug!(event = event.name(), individuals = population.len());
            }
            Event::ParentSelectionEnd { parents } => {
                tracing::debug!(event = event.name(), individuals = parents.len());
            }
            Event::ReproductionEnd { children } => {
                tracing::debug!(event = event.name(), individuals = children.len());
            }
            Event::Statistics { statistics } => tracing::debug!(
                event = event.name(),
                min = statistics.min_score,
                max = statistics.max_score,
                avg = statistics.avg,
            ),
            Event::IterationStart { generation } | Event::IterationEnd { generation } => {
                tracing::debug!(event = event.name(), generation);
            }
            Event::RunFinished { statistics } => tracing::debug!(
                event = event.name(),
                generations = statistics.generations,
                min = statistics.min_score,
                max = statistics.max_score,
            ),
            _ => tracing::trace!(event = event.name()),
        }
    }
}
