//! Observation hooks for the evolutionary loop.
//!
//! A [`SolverListener`] is handed to the solver at construction and notified
//! at fixed points of every generation. Listeners only observe: the solver's
//! random draws and results are the same whichever listener is attached.
//!
//! Positions passed to the hooks are indices into the list named by the
//! hook (population, selected parents, children or merged list), so
//! duplicate-valued boards can still be told apart.
//!
//! Provided implementations:
//!
//! - [`NoopListener`]: ignores everything (the default)
//! - [`TracingListener`]: forwards events to `tracing` at debug level
//! - [`RecordingListener`]: stores events for later replay or rendering

use tracing::debug;

use super::solution::Solution;
use super::state::CandidateState;

/// Positions involved in one mating pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairEvent {
    /// Index of the pair within the generation.
    pub pair: usize,
    /// Positions of the two parents in the selected list.
    pub parents: (usize, usize),
    /// Positions of the two resulting children in the children list.
    pub children: (usize, usize),
}

/// Callbacks fired by the [`GeneticSolver`](super::GeneticSolver).
///
/// Every method has a no-op default, so implementors override only what
/// they need.
pub trait SolverListener {
    /// The initial population was created.
    fn on_population_created(&mut self, _population: &[CandidateState]) {}

    /// Parents were chosen; `indices` point into the current population.
    fn on_parents_selected(&mut self, _indices: &[usize]) {}

    /// The selected parents, in mating order.
    fn on_selection_finished(&mut self, _selected: &[CandidateState]) {}

    /// A pair was recombined. `cutoff` is set for the cutoff strategies.
    fn on_crossover_hit(&mut self, _event: PairEvent, _cutoff: Option<usize>) {}

    /// A pair passed through without recombination.
    fn on_crossover_miss(&mut self, _event: PairEvent) {}

    /// All pairs were processed.
    fn on_crossover_finished(&mut self, _children: &[CandidateState]) {}

    /// The child at `index` is about to be mutated.
    fn on_mutation(&mut self, _index: usize) {}

    /// All children went through the mutation step.
    fn on_mutation_finished(&mut self, _children: &[CandidateState]) {}

    /// Children followed by the previous population.
    fn on_merge(&mut self, _merged: &[CandidateState]) {}

    /// Survivors were chosen; `survivors` point into `merged`, best first.
    fn on_truncation(&mut self, _merged: &[CandidateState], _survivors: &[usize]) {}

    /// The generation counter advanced to `generation`.
    fn on_new_generation(&mut self, _generation: usize) {}

    /// An optimal board sits at `index` in the current population.
    fn on_optimum_found(&mut self, _index: usize) {}

    /// The run ended.
    fn on_finish(&mut self, _solution: &Solution) {}
}

impl<L: SolverListener + ?Sized> SolverListener for &mut L {
    fn on_population_created(&mut self, population: &[CandidateState]) {
        (**self).on_population_created(population)
    }
    fn on_parents_selected(&mut self, indices: &[usize]) {
        (**self).on_parents_selected(indices)
    }
    fn on_selection_finished(&mut self, selected: &[CandidateState]) {
        (**self).on_selection_finished(selected)
    }
    fn on_crossover_hit(&mut self, event: PairEvent, cutoff: Option<usize>) {
        (**self).on_crossover_hit(event, cutoff)
    }
    fn on_crossover_miss(&mut self, event: PairEvent) {
        (**self).on_crossover_miss(event)
    }
    fn on_crossover_finished(&mut self, children: &[CandidateState]) {
        (**self).on_crossover_finished(children)
    }
    fn on_mutation(&mut self, index: usize) {
        (**self).on_mutation(index)
    }
    fn on_mutation_finished(&mut self, children: &[CandidateState]) {
        (**self).on_mutation_finished(children)
    }
    fn on_merge(&mut self, merged: &[CandidateState]) {
        (**self).on_merge(merged)
    }
    fn on_truncation(&mut self, merged: &[CandidateState], survivors: &[usize]) {
        (**self).on_truncation(merged, survivors)
    }
    fn on_new_generation(&mut self, generation: usize) {
        (**self).on_new_generation(generation)
    }
    fn on_optimum_found(&mut self, index: usize) {
        (**self).on_optimum_found(index)
    }
    fn on_finish(&mut self, solution: &Solution) {
        (**self).on_finish(solution)
    }
}

/// Listener that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl SolverListener for NoopListener {}

/// Listener that logs each event with `tracing::debug!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl SolverListener for TracingListener {
    fn on_population_created(&mut self, population: &[CandidateState]) {
        debug!(size = population.len(), "population created");
    }

    fn on_parents_selected(&mut self, indices: &[usize]) {
        debug!(?indices, "parents selected");
    }

    fn on_crossover_hit(&mut self, event: PairEvent, cutoff: Option<usize>) {
        debug!(pair = event.pair, ?cutoff, "crossover applied");
    }

    fn on_crossover_miss(&mut self, event: PairEvent) {
        debug!(pair = event.pair, "crossover skipped");
    }

    fn on_mutation(&mut self, index: usize) {
        debug!(child = index, "mutation applied");
    }

    fn on_truncation(&mut self, merged: &[CandidateState], survivors: &[usize]) {
        debug!(
            merged = merged.len(),
            survivors = survivors.len(),
            "population truncated"
        );
    }

    fn on_new_generation(&mut self, generation: usize) {
        debug!(generation, "new generation");
    }

    fn on_optimum_found(&mut self, index: usize) {
        debug!(index, "optimum found");
    }

    fn on_finish(&mut self, solution: &Solution) {
        debug!(
            has_found = solution.has_found(),
            generations = solution.generations(),
            "run finished"
        );
    }
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverEvent {
    PopulationCreated(Vec<CandidateState>),
    ParentsSelected(Vec<usize>),
    SelectionFinished(Vec<CandidateState>),
    CrossoverHit(PairEvent, Option<usize>),
    CrossoverMiss(PairEvent),
    CrossoverFinished(Vec<CandidateState>),
    Mutation(usize),
    MutationFinished(Vec<CandidateState>),
    Merge(Vec<CandidateState>),
    Truncation(Vec<usize>),
    NewGeneration(usize),
    OptimumFound(usize),
    Finished { has_found: bool, generations: usize },
}

/// Listener that keeps every event in order.
///
/// Useful for step-by-step replay of a run, e.g. to render each generation.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Vec<SolverEvent>,
}

impl RecordingListener {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[SolverEvent] {
        &self.events
    }

    /// Takes the recorded events, leaving the recorder empty.
    pub fn take_events(&mut self) -> Vec<SolverEvent> {
        std::mem::take(&mut self.events)
    }
}

impl SolverListener for RecordingListener {
    fn on_population_created(&mut self, population: &[CandidateState]) {
        self.events
            .push(SolverEvent::PopulationCreated(population.to_vec()));
    }

    fn on_parents_selected(&mut self, indices: &[usize]) {
        self.events.push(SolverEvent::ParentsSelected(indices.to_vec()));
    }

    fn on_selection_finished(&mut self, selected: &[CandidateState]) {
        self.events
            .push(SolverEvent::SelectionFinished(selected.to_vec()));
    }

    fn on_crossover_hit(&mut self, event: PairEvent, cutoff: Option<usize>) {
        self.events.push(SolverEvent::CrossoverHit(event, cutoff));
    }

    fn on_crossover_miss(&mut self, event: PairEvent) {
        self.events.push(SolverEvent::CrossoverMiss(event));
    }

    fn on_crossover_finished(&mut self, children: &[CandidateState]) {
        self.events
            .push(SolverEvent::CrossoverFinished(children.to_vec()));
    }

    fn on_mutation(&mut self, index: usize) {
        self.events.push(SolverEvent::Mutation(index));
    }

    fn on_mutation_finished(&mut self, children: &[CandidateState]) {
        self.events
            .push(SolverEvent::MutationFinished(children.to_vec()));
    }

    fn on_merge(&mut self, merged: &[CandidateState]) {
        self.events.push(SolverEvent::Merge(merged.to_vec()));
    }

    fn on_truncation(&mut self, _merged: &[CandidateState], survivors: &[usize]) {
        self.events.push(SolverEvent::Truncation(survivors.to_vec()));
    }

    fn on_new_generation(&mut self, generation: usize) {
        self.events.push(SolverEvent::NewGeneration(generation));
    }

    fn on_optimum_found(&mut self, index: usize) {
        self.events.push(SolverEvent::OptimumFound(index));
    }

    fn on_finish(&mut self, solution: &Solution) {
        self.events.push(SolverEvent::Finished {
            has_found: solution.has_found(),
            generations: solution.generations(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queens::{GeneticSolver, SolverConfig};

    #[derive(Default)]
    struct Counter {
        generations: usize,
        hits: usize,
        misses: usize,
        finished: bool,
    }

    impl SolverListener for Counter {
        fn on_crossover_hit(&mut self, _event: PairEvent, _cutoff: Option<usize>) {
            self.hits += 1;
        }
        fn on_crossover_miss(&mut self, _event: PairEvent) {
            self.misses += 1;
        }
        fn on_new_generation(&mut self, _generation: usize) {
            self.generations += 1;
        }
        fn on_finish(&mut self, _solution: &Solution) {
            self.finished = true;
        }
    }

    #[test]
    fn test_borrowed_listener_receives_events() {
        let mut counter = Counter::default();
        let config = SolverConfig::new(10, 0.5, 0.1, 40).with_seed(12);
        let solution = {
            let mut solver = GeneticSolver::with_listener(config, &mut counter).unwrap();
            solver.solve()
        };
        assert!(counter.finished);
        assert_eq!(counter.generations, solution.generations());
        // Five pairs per generation that ran (including a converging one).
        let pairs = counter.hits + counter.misses;
        assert_eq!(pairs % 5, 0);
        assert!(pairs / 5 >= solution.generations());
    }

    #[test]
    fn test_tracing_listener_runs_under_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let config = SolverConfig::new(8, 0.8, 0.1, 20).with_seed(4);
        let with_tracing = tracing::subscriber::with_default(subscriber, || {
            GeneticSolver::with_listener(config.clone(), TracingListener)
                .unwrap()
                .solve()
        });
        let plain = GeneticSolver::new(config).unwrap().solve();
        assert_eq!(with_tracing, plain);
    }

    #[test]
    fn test_recording_listener_take_events() {
        let config = SolverConfig::new(6, 0.8, 0.1, 5).with_seed(1);
        let mut solver = GeneticSolver::with_listener(config, RecordingListener::new()).unwrap();
        solver.solve();
        let mut recorder = solver.into_listener();
        let events = recorder.take_events();
        assert!(!events.is_empty());
        assert!(recorder.events().is_empty());
        let finished = events
            .iter()
            .filter(|e| matches!(e, SolverEvent::Finished { .. }))
            .count();
        assert_eq!(finished, 1);
    }
}
