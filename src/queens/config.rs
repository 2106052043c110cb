//! Solver configuration.
//!
//! [`SolverConfig`] holds every parameter that controls one evolutionary run.

use super::operators::{Crossover, Mutation};
use super::selection::Selection;
use crate::error::{QueensError, Result};

/// Configuration for the [`GeneticSolver`](super::GeneticSolver).
///
/// # Defaults
///
/// ```
/// use u_queens::queens::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.generation_size, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_queens::queens::{Crossover, Mutation, Selection, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_population_size(40)
///     .with_selection(Selection::Roulette)
///     .with_crossover(Crossover::Uniform)
///     .with_mutation(Mutation::Permutation)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
///
/// Builders store values as given; out-of-range values are reported by
/// [`validate`](Self::validate) rather than clamped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Number of individuals kept after each generation. At least 2.
    pub population_size: usize,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, both parents pass through unchanged.
    pub crossing_rate: f64,

    /// Probability of mutating each child (0.0–1.0).
    pub mutation_rate: f64,

    /// Maximum number of generations before giving up. At least 1.
    pub generation_size: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Crossover strategy.
    pub crossover: Crossover,

    /// Mutation strategy.
    pub mutation: Mutation,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed for every run.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            crossing_rate: 0.8,
            mutation_rate: 0.03,
            generation_size: 1000,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Builds a configuration from the four core parameters, with default
    /// strategies and no seed.
    pub fn new(
        population_size: usize,
        crossing_rate: f64,
        mutation_rate: f64,
        generation_size: usize,
    ) -> Self {
        Self {
            population_size,
            crossing_rate,
            mutation_rate,
            generation_size,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossing rate.
    pub fn with_crossing_rate(mut self, rate: f64) -> Self {
        self.crossing_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the generation budget.
    pub fn with_generation_size(mut self, n: usize) -> Self {
        self.generation_size = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick checks: 100 generations.
    pub fn fast() -> Self {
        Self {
            generation_size: 100,
            ..Self::default()
        }
    }

    /// Preset for hard runs: population 50, 5000 generations.
    pub fn thorough() -> Self {
        Self {
            population_size: 50,
            generation_size: 5000,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`QueensError::InvalidConfig`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(QueensError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossing_rate) {
            return Err(QueensError::InvalidConfig(format!(
                "crossing_rate must be between 0 and 1, got {}",
                self.crossing_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(QueensError::InvalidConfig(format!(
                "mutation_rate must be between 0 and 1, got {}",
                self.mutation_rate
            )));
        }
        if self.generation_size == 0 {
            return Err(QueensError::InvalidConfig(
                "generation_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
