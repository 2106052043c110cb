//! Generational loop.
//!
//! [`GeneticSolver`] runs one evolutionary search per call to
//! [`solve`](GeneticSolver::solve):
//!
//! 1. Create a random population; stop if it already holds an optimum.
//! 2. Each generation:
//!    a. select parents (tournament by default)
//!    b. pair them, wrapping an odd tail to the first parent
//!    c. recombine each pair with probability `crossing_rate`
//!    d. mutate each child with probability `mutation_rate`
//!    e. merge children with the previous population
//!    f. keep the best `population_size` (elitist truncation)
//!    g. stop if any survivor is optimal
//! 3. Give up after `generation_size` generations.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::config::SolverConfig;
use super::listener::{NoopListener, PairEvent, SolverListener};
use super::pairing::pairwise;
use super::solution::Solution;
use super::state::CandidateState;
use crate::error::Result;

/// Genetic-algorithm solver for the eight queens problem.
///
/// # Usage
///
/// ```
/// use u_queens::queens::{GeneticSolver, SolverConfig};
///
/// let config = SolverConfig::new(20, 0.8, 0.03, 1000).with_seed(42);
/// let mut solver = GeneticSolver::new(config).unwrap();
/// let solution = solver.solve();
/// if solution.has_found() {
///     assert_eq!(solution.best().unwrap().fitness(), 28);
/// }
/// println!("stopped at generation {}", solver.current_generation());
/// ```
#[derive(Debug)]
pub struct GeneticSolver<L: SolverListener = NoopListener> {
    config: SolverConfig,
    listener: L,
    current_generation: usize,
}

impl GeneticSolver<NoopListener> {
    /// Creates a solver without a listener.
    ///
    /// Fails with [`QueensError::InvalidConfig`](crate::QueensError::InvalidConfig)
    /// if the configuration does not validate.
    pub fn new(config: SolverConfig) -> Result<Self> {
        Self::with_listener(config, NoopListener)
    }
}

impl<L: SolverListener> GeneticSolver<L> {
    /// Creates a solver that notifies `listener` during each run.
    pub fn with_listener(config: SolverConfig, listener: L) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            listener,
            current_generation: 0,
        })
    }

    /// The configuration this solver was built with.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Generation counter of the last run.
    pub fn current_generation(&self) -> usize {
        self.current_generation
    }

    /// The attached listener.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Consumes the solver, returning its listener.
    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Runs one search seeded from the configuration.
    ///
    /// With `seed: None` a fresh seed is drawn on every call.
    pub fn solve(&mut self) -> Solution {
        self.solve_with_cancel(None)
    }

    /// Runs one search with an optional cancellation flag.
    ///
    /// The flag is checked before each generation; once set, the run stops
    /// with the current population and [`Solution::cancelled`] is `true`.
    pub fn solve_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> Solution {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        info!(seed, "seeding solver");
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(&mut rng, cancel.as_deref())
    }

    /// Runs one search drawing every random number from `rng`.
    ///
    /// The configured seed is ignored.
    pub fn solve_with_rng<R: Rng>(&mut self, rng: &mut R) -> Solution {
        self.run(rng, None)
    }

    fn run<R: Rng>(&mut self, rng: &mut R, cancel: Option<&AtomicBool>) -> Solution {
        let config = self.config.clone();
        self.current_generation = 0;

        info!(
            population_size = config.population_size,
            crossing_rate = config.crossing_rate,
            mutation_rate = config.mutation_rate,
            generation_size = config.generation_size,
            selection = %config.selection,
            crossover = %config.crossover,
            mutation = %config.mutation,
            "starting genetic solver"
        );

        let mut population: Vec<CandidateState> = (0..config.population_size)
            .map(|_| CandidateState::random(rng))
            .collect();
        self.listener.on_population_created(&population);

        let mut fitness_history = Vec::with_capacity(config.generation_size.min(4096) + 1);
        fitness_history.push(best_fitness(&population));

        if let Some(solution) = self.converged(&population, &mut fitness_history) {
            return solution;
        }

        loop {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                info!(generation = self.current_generation, "genetic solver cancelled");
                let solution = Solution::non_optimal(
                    population.into_iter().collect(),
                    self.current_generation,
                    true,
                    fitness_history,
                );
                return self.finish(solution);
            }

            // Selection
            let selected_indices = config.selection.select(&population, rng);
            self.listener.on_parents_selected(&selected_indices);
            let selected: Vec<CandidateState> =
                selected_indices.iter().map(|&i| population[i]).collect();
            self.listener.on_selection_finished(&selected);

            // Crossover
            let positions: Vec<usize> = (0..selected.len()).collect();
            let mut children: Vec<CandidateState> = Vec::with_capacity(selected.len() + 1);
            for (pair, (a, b)) in pairwise(&positions).into_iter().enumerate() {
                let event = PairEvent {
                    pair,
                    parents: (a, b),
                    children: (children.len(), children.len() + 1),
                };
                if rng.random::<f64>() <= config.crossing_rate {
                    let outcome = selected[a].cross(&selected[b], config.crossover, rng);
                    trace!(pair, cutoff = ?outcome.cutoff, "crossover");
                    self.listener.on_crossover_hit(event, outcome.cutoff);
                    children.push(outcome.first);
                    children.push(outcome.second);
                } else {
                    self.listener.on_crossover_miss(event);
                    children.push(selected[a]);
                    children.push(selected[b]);
                }
            }
            self.listener.on_crossover_finished(&children);

            // Mutation
            for (index, child) in children.iter_mut().enumerate() {
                if rng.random::<f64>() <= config.mutation_rate {
                    trace!(child = index, "mutation");
                    self.listener.on_mutation(index);
                    child.mutate(config.mutation, rng);
                }
            }
            self.listener.on_mutation_finished(&children);

            // Merge children with their parents' generation
            let mut merged = children;
            merged.extend_from_slice(&population);
            self.listener.on_merge(&merged);

            // Elitist truncation
            let survivors = fittest(&merged, config.population_size);
            self.listener.on_truncation(&merged, &survivors);
            population = survivors.iter().map(|&i| merged[i]).collect();
            fitness_history.push(best_fitness(&population));

            if let Some(solution) = self.converged(&population, &mut fitness_history) {
                return solution;
            }

            self.current_generation += 1;
            self.listener.on_new_generation(self.current_generation);
            debug!(
                generation = self.current_generation,
                best_fitness = fitness_history.last().copied().unwrap_or_default(),
                mean_fitness = mean_fitness(&population),
                "generation finished"
            );

            if self.current_generation == config.generation_size {
                info!(
                    generations = self.current_generation,
                    best_fitness = fitness_history.last().copied().unwrap_or_default(),
                    "generation budget exhausted"
                );
                let solution = Solution::non_optimal(
                    population.into_iter().collect(),
                    self.current_generation,
                    false,
                    fitness_history,
                );
                return self.finish(solution);
            }
        }
    }

    /// Builds the converged solution if `population` holds an optimum.
    fn converged(
        &mut self,
        population: &[CandidateState],
        fitness_history: &mut Vec<u32>,
    ) -> Option<Solution> {
        let index = population.iter().position(CandidateState::is_optimal)?;
        self.listener.on_optimum_found(index);

        let optimal: HashSet<CandidateState> = population
            .iter()
            .filter(|state| state.is_optimal())
            .copied()
            .collect();
        info!(
            generation = self.current_generation,
            distinct_optima = optimal.len(),
            "optimal board found"
        );
        let solution = Solution::optimal(
            optimal,
            self.current_generation,
            std::mem::take(fitness_history),
        );
        Some(self.finish(solution))
    }

    fn finish(&mut self, solution: Solution) -> Solution {
        self.listener.on_finish(&solution);
        solution
    }
}

/// Indices of the `keep` fittest entries, best first.
///
/// The sort is stable, so among equal fitness the earlier entry wins.
fn fittest(merged: &[CandidateState], keep: usize) -> Vec<usize> {
    let fitness: Vec<u32> = merged.iter().map(CandidateState::fitness).collect();
    let mut order: Vec<usize> = (0..merged.len()).collect();
    order.sort_by_key(|&i| Reverse(fitness[i]));
    order.truncate(keep);
    order
}

fn best_fitness(population: &[CandidateState]) -> u32 {
    population
        .iter()
        .map(CandidateState::fitness)
        .max()
        .unwrap_or_default()
}

fn mean_fitness(population: &[CandidateState]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    let total: u32 = population.iter().map(CandidateState::fitness).sum();
    total as f64 / population.len() as f64
}

// ============================================================================
// Tests
// ============================================================================
