//! Repeated seeded runs.
//!
//! The solver is stochastic, so its quality is judged over many runs.
//! [`run_trials`] solves the same configuration under consecutive seeds and
//! collects one [`TrialOutcome`] per run. With the `parallel` feature the
//! trials run on the rayon thread pool; each trial owns its own solver and
//! RNG, so the outcomes are identical either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use super::config::SolverConfig;
use super::solver::GeneticSolver;
use crate::error::Result;

/// Result of one seeded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialOutcome {
    /// Seed used for this run.
    pub seed: u64,
    /// Whether an optimal board was found.
    pub has_found: bool,
    /// Generation counter at termination.
    pub generations: usize,
    /// Fitness of the best board in the solution.
    pub best_fitness: u32,
}

/// Outcomes of a batch of runs, in seed order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialSummary {
    pub outcomes: Vec<TrialOutcome>,
}

impl TrialSummary {
    /// Number of runs that found an optimum.
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.has_found).count()
    }

    /// Fraction of runs that found an optimum, `0.0` for an empty batch.
    pub fn success_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.success_count() as f64 / self.outcomes.len() as f64
    }

    /// Mean generation at which successful runs stopped.
    ///
    /// `None` when no run succeeded.
    pub fn mean_generations_to_solve(&self) -> Option<f64> {
        let solved: Vec<usize> = self
            .outcomes
            .iter()
            .filter(|o| o.has_found)
            .map(|o| o.generations)
            .collect();
        if solved.is_empty() {
            return None;
        }
        Some(solved.iter().sum::<usize>() as f64 / solved.len() as f64)
    }
}

/// Runs `trials` independent searches; trial `k` uses seed `base_seed + k`.
///
/// Any seed already present in `config` is replaced. Fails only if the
/// configuration is invalid.
///
/// # Examples
///
/// ```
/// use u_queens::queens::{run_trials, SolverConfig};
///
/// let summary = run_trials(&SolverConfig::fast(), 4, 100).unwrap();
/// assert_eq!(summary.outcomes.len(), 4);
/// assert_eq!(summary.outcomes[2].seed, 102);
/// ```
pub fn run_trials(config: &SolverConfig, trials: usize, base_seed: u64) -> Result<TrialSummary> {
    config.validate()?;

    let run_one = |k: usize| -> Result<TrialOutcome> {
        let seed = base_seed.wrapping_add(k as u64);
        let mut solver = GeneticSolver::new(config.clone().with_seed(seed))?;
        let solution = solver.solve();
        Ok(TrialOutcome {
            seed,
            has_found: solution.has_found(),
            generations: solver.current_generation(),
            best_fitness: solution.best().map_or(0, |best| best.fitness()),
        })
    };

    #[cfg(feature = "parallel")]
    let outcomes = (0..trials)
        .into_par_iter()
        .map(run_one)
        .collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let outcomes = (0..trials).map(run_one).collect::<Result<Vec<_>>>()?;

    let summary = TrialSummary { outcomes };
    info!(
        trials,
        successes = summary.success_count(),
        mean_generations = ?summary.mean_generations_to_solve(),
        "trials finished"
    );
    Ok(summary)
}
