//! Genetic-algorithm solver for the eight queens problem.
//!
//! Places eight queens on an 8×8 board so that no two attack each other,
//! using a population-based evolutionary search:
//!
//! - **Packed encoding**: each board is eight 3-bit rows inside one integer
//!   ([`packed::PackedVector`]).
//! - **Fitness**: number of non-attacking queen pairs, 28 at best.
//! - **Operators**: roulette or tournament selection, cutoff or uniform
//!   crossover, bit-flip or permutation mutation.
//! - **Survivors**: elitist truncation over parents and children.
//!
//! # Quick start
//!
//! ```
//! use u_queens::queens::{GeneticSolver, SolverConfig};
//!
//! let mut solver = GeneticSolver::new(SolverConfig::default().with_seed(7)).unwrap();
//! let solution = solver.solve();
//! let best = solution.best().unwrap();
//! println!("{best} fitness={} found={}", best.fitness(), solution.has_found());
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for configurations, boards and results
//! - `parallel`: run [`queens::run_trials`] on the rayon thread pool

pub mod error;
pub mod packed;
pub mod queens;

pub use error::{QueensError, Result};
