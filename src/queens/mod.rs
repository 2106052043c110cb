//! Eight queens genetic solver.
//!
//! Boards are encoded as eight 3-bit rows packed into one integer
//! ([`CandidateState`]). The [`GeneticSolver`] evolves a population of
//! boards until one has no attacking pair (fitness 28) or the generation
//! budget runs out.
//!
//! # Key Types
//!
//! - [`SolverConfig`]: population size, rates, budget, strategies, seed
//! - [`GeneticSolver`]: executes the evolutionary loop
//! - [`Solution`]: distinct final boards and whether an optimum was reached
//! - [`SolverListener`]: observation hooks for each step of a generation
//!
//! # Submodules
//!
//! - [`selection`]: roulette and tournament parent selection
//! - [`operators`]: crossover and mutation strategies
//! - [`listener`]: listener trait and the provided implementations
//! - [`trials`]: batches of seeded runs
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Russell & Norvig (2010), *Artificial Intelligence: A Modern Approach*, §4.1.4

mod config;
pub mod listener;
pub mod operators;
mod pairing;
pub mod selection;
mod solution;
mod solver;
mod state;
pub mod trials;

pub use config::SolverConfig;
pub use listener::{NoopListener, PairEvent, RecordingListener, SolverListener, TracingListener};
pub use operators::{Crossover, Mutation};
pub use pairing::pairwise;
pub use selection::Selection;
pub use solution::Solution;
pub use solver::GeneticSolver;
pub use state::{CandidateState, CrossoverOutcome, BOARD_SIZE, MAX_FITNESS, ROW_BITS};
pub use trials::{run_trials, TrialOutcome, TrialSummary};
