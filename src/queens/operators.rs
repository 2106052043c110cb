//! Crossover and mutation strategies for eight-queens boards.
//!
//! Boards are handled here as decoded `[u8; 8]` row arrays; packing and
//! validation live in [`CandidateState`](super::CandidateState).
//!
//! # Crossover
//!
//! - [`Crossover::Cutoff`]: single cut point in `[1, 6]`
//! - [`Crossover::CutoffFull`]: single cut point in `[0, 7]`
//! - [`Crossover::Uniform`]: independent coin flip per column, per child
//!
//! # Mutation
//!
//! - [`Mutation::BitFlip`]: flip one bit of one column's 3-bit row
//! - [`Mutation::Permutation`]: swap the rows of two distinct columns

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::state::BOARD_SIZE;
use crate::error::QueensError;

/// Row array of a decoded board.
pub(crate) type Rows = [u8; BOARD_SIZE];

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Crossover {
    /// Single-point crossover with the cut drawn from `[1, 6]`.
    ///
    /// Both sides of the cut always contribute at least one column.
    #[default]
    Cutoff,

    /// Single-point crossover with the cut drawn from `[0, 7]`.
    ///
    /// A cut of 7 copies the first parent whole into the first child.
    CutoffFull,

    /// Uniform crossover: each child draws eight fair coin flips and takes
    /// column `i` from the first parent on 0, from the second on 1.
    Uniform,
}

impl Crossover {
    /// Canonical name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Crossover::Cutoff => "cutoff",
            Crossover::CutoffFull => "cutoff-full",
            Crossover::Uniform => "uniform",
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crossover {
    type Err = QueensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cutoff" => Ok(Crossover::Cutoff),
            "cutoff-full" => Ok(Crossover::CutoffFull),
            "uniform" => Ok(Crossover::Uniform),
            other => Err(QueensError::InvalidStrategy {
                kind: "crossover",
                name: other.to_string(),
            }),
        }
    }
}

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Mutation {
    /// XOR a single random bit of a random column's row.
    #[default]
    BitFlip,

    /// Swap the rows of two distinct random columns.
    Permutation,
}

impl Mutation {
    /// Canonical name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Mutation::BitFlip => "bitflip",
            Mutation::Permutation => "permutation",
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mutation {
    type Err = QueensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bitflip" => Ok(Mutation::BitFlip),
            "permutation" => Ok(Mutation::Permutation),
            other => Err(QueensError::InvalidStrategy {
                kind: "mutation",
                name: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Draws a cut point for the given cutoff strategy.
pub(crate) fn draw_cutoff<R: Rng>(strategy: Crossover, rng: &mut R) -> usize {
    match strategy {
        Crossover::CutoffFull => rng.random_range(0..BOARD_SIZE),
        _ => rng.random_range(1..BOARD_SIZE - 1),
    }
}

/// Single-point crossover at `cutoff`.
///
/// The first child takes columns `0..=cutoff` from `a` and the rest from `b`;
/// the second child is the complement.
pub(crate) fn cutoff_crossover(a: &Rows, b: &Rows, cutoff: usize) -> (Rows, Rows) {
    let mut first = *b;
    let mut second = *a;
    first[..=cutoff].copy_from_slice(&a[..=cutoff]);
    second[..=cutoff].copy_from_slice(&b[..=cutoff]);
    (first, second)
}

/// Builds one uniform-crossover child from its own coin flips.
pub(crate) fn uniform_child<R: Rng>(a: &Rows, b: &Rows, rng: &mut R) -> Rows {
    let mut child = [0u8; BOARD_SIZE];
    for (i, slot) in child.iter_mut().enumerate() {
        *slot = if rng.random_bool(0.5) { b[i] } else { a[i] };
    }
    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Picks two distinct columns uniformly at random.
pub(crate) fn distinct_columns<R: Rng>(rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(0..BOARD_SIZE);
    // Shift past `i` so the second draw is uniform over the other seven.
    let mut j = rng.random_range(0..BOARD_SIZE - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const A: Rows = [0, 1, 2, 3, 4, 5, 6, 7];
    const B: Rows = [7, 6, 5, 4, 3, 2, 1, 0];

    #[test]
    fn test_cutoff_crossover_split() {
        let (first, second) = cutoff_crossover(&A, &B, 2);
        assert_eq!(first, [0, 1, 2, 4, 3, 2, 1, 0]);
        assert_eq!(second, [7, 6, 5, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_cutoff_crossover_last_column_copies_parent() {
        let (first, second) = cutoff_crossover(&A, &B, 7);
        assert_eq!(first, A);
        assert_eq!(second, B);
    }

    #[test]
    fn test_draw_cutoff_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen_full = [false; BOARD_SIZE];
        for _ in 0..2000 {
            let c = draw_cutoff(Crossover::Cutoff, &mut rng);
            assert!((1..=6).contains(&c), "cutoff {c} outside [1, 6]");
            seen_full[draw_cutoff(Crossover::CutoffFull, &mut rng)] = true;
        }
        assert!(seen_full.iter().all(|&s| s), "full range should hit every cut");
    }

    #[test]
    fn test_uniform_child_takes_from_parents() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let child = uniform_child(&A, &B, &mut rng);
            for i in 0..BOARD_SIZE {
                assert!(child[i] == A[i] || child[i] == B[i]);
            }
        }
    }

    #[test]
    fn test_distinct_columns() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0u32; BOARD_SIZE];
        for _ in 0..8000 {
            let (i, j) = distinct_columns(&mut rng);
            assert_ne!(i, j);
            assert!(i < BOARD_SIZE && j < BOARD_SIZE);
            counts[j] += 1;
        }
        for &c in &counts {
            assert!(c > 700, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_strategy_names_roundtrip() {
        for c in [Crossover::Cutoff, Crossover::CutoffFull, Crossover::Uniform] {
            assert_eq!(c.as_str().parse::<Crossover>().unwrap(), c);
        }
        for m in [Mutation::BitFlip, Mutation::Permutation] {
            assert_eq!(m.to_string().parse::<Mutation>().unwrap(), m);
        }
    }

    #[test]
    fn test_unknown_strategy_names() {
        assert_eq!(
            "onepoint".parse::<Crossover>().unwrap_err(),
            QueensError::InvalidStrategy {
                kind: "crossover",
                name: "onepoint".into()
            }
        );
        assert!("BitFlip".parse::<Mutation>().is_err());
    }
}
