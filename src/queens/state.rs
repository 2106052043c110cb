//! Candidate boards and their fitness.
//!
//! A [`CandidateState`] places one queen per column; the packed value of
//! column `i` is the row of that queen. Rows may repeat after crossover or
//! mutation, so the fitness counts same-row conflicts as well as diagonal
//! ones.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::operators::{self, Crossover, Mutation, Rows};
use crate::error::{QueensError, Result};
use crate::packed::PackedVector;

/// Number of columns (and rows) on the board.
pub const BOARD_SIZE: usize = 8;

/// Bits needed to store one row index.
pub const ROW_BITS: u32 = 3;

/// Fitness of a board with no attacking pair: C(8, 2).
pub const MAX_FITNESS: u32 = 28;

/// One candidate solution: eight 3-bit rows packed into a [`PackedVector`].
///
/// Equality, ordering and hashing follow the packed bit pattern.
///
/// # Examples
///
/// ```
/// use u_queens::queens::{CandidateState, MAX_FITNESS};
///
/// let solved = CandidateState::new(&[3, 6, 2, 7, 1, 4, 0, 5]).unwrap();
/// assert_eq!(solved.fitness(), MAX_FITNESS);
/// assert!(solved.is_optimal());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct CandidateState {
    genes: PackedVector,
}

/// The two children of a crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverOutcome {
    pub first: CandidateState,
    pub second: CandidateState,
    /// Cut point for the cutoff strategies, `None` for uniform crossover.
    pub cutoff: Option<usize>,
}

impl CandidateState {
    /// Builds a board from one row per column.
    ///
    /// Fails with [`QueensError::InvalidLength`] unless exactly eight rows are
    /// given, and with [`QueensError::InvalidValue`] for any row above 7.
    pub fn new(rows: &[u8]) -> Result<Self> {
        if rows.len() != BOARD_SIZE {
            return Err(QueensError::InvalidLength {
                expected: BOARD_SIZE,
                actual: rows.len(),
            });
        }
        let mut genes = PackedVector::new(ROW_BITS)?;
        for (index, &row) in rows.iter().enumerate() {
            if row as usize >= BOARD_SIZE {
                return Err(QueensError::InvalidValue {
                    index,
                    value: row as u64,
                });
            }
            genes.set(index, row as u64)?;
        }
        Ok(Self { genes })
    }

    /// A random permutation of rows 0–7: no two queens share a row at birth.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut rows: Rows = [0, 1, 2, 3, 4, 5, 6, 7];
        rows.shuffle(rng);
        Self::from_rows(&rows)
    }

    fn from_rows(rows: &Rows) -> Self {
        let bits = rows
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &row)| {
                acc | (((row & 0b111) as u64) << (i as u32 * ROW_BITS))
            });
        Self {
            genes: PackedVector::with_bits(bits, ROW_BITS),
        }
    }

    /// The packed representation.
    pub fn genes(&self) -> &PackedVector {
        &self.genes
    }

    /// Row of the queen in `column`.
    ///
    /// # Panics
    /// Panics if `column >= 8`.
    pub fn row(&self, column: usize) -> u8 {
        assert!(column < BOARD_SIZE, "column {column} out of range");
        self.genes.slot(column) as u8
    }

    /// All eight rows, column order.
    pub fn rows(&self) -> Rows {
        let mut rows = [0u8; BOARD_SIZE];
        for (slot, value) in rows.iter_mut().zip(self.genes.iter(BOARD_SIZE)) {
            *slot = value as u8;
        }
        rows
    }

    /// Number of queen pairs that do not attack each other, in `[0, 28]`.
    ///
    /// Same-row conflicts cost one point per repeated row value
    /// (`8 - distinct rows`). Diagonal conflicts are scanned from each column
    /// `i` towards higher columns; at most one conflict is charged per
    /// direction (row increasing, row decreasing) per `i`, so a third queen
    /// further along the same diagonal ray is not charged again from `i`.
    pub fn fitness(&self) -> u32 {
        let rows = self.rows();

        let occupied = rows.iter().fold(0u8, |acc, &row| acc | (1 << row));
        let repeated = BOARD_SIZE as u32 - occupied.count_ones();
        let mut total = MAX_FITNESS - repeated;

        for i in 0..BOARD_SIZE {
            let mut upward = false;
            let mut downward = false;
            for j in i + 1..BOARD_SIZE {
                let dx = (j - i) as i32;
                let dy = rows[j] as i32 - rows[i] as i32;
                if dx != dy.abs() {
                    continue;
                }
                let seen = if dy < 0 { &mut upward } else { &mut downward };
                if !*seen {
                    *seen = true;
                    total -= 1;
                }
            }
        }

        total
    }

    /// Whether no two queens attack each other.
    pub fn is_optimal(&self) -> bool {
        self.fitness() == MAX_FITNESS
    }

    /// Recombines `self` with `other` into two children.
    pub fn cross<R: Rng>(
        &self,
        other: &CandidateState,
        strategy: Crossover,
        rng: &mut R,
    ) -> CrossoverOutcome {
        let (a, b) = (self.rows(), other.rows());
        match strategy {
            Crossover::Cutoff | Crossover::CutoffFull => {
                let cutoff = operators::draw_cutoff(strategy, rng);
                let (first, second) = operators::cutoff_crossover(&a, &b, cutoff);
                CrossoverOutcome {
                    first: Self::from_rows(&first),
                    second: Self::from_rows(&second),
                    cutoff: Some(cutoff),
                }
            }
            Crossover::Uniform => {
                let first = operators::uniform_child(&a, &b, rng);
                let second = operators::uniform_child(&a, &b, rng);
                CrossoverOutcome {
                    first: Self::from_rows(&first),
                    second: Self::from_rows(&second),
                    cutoff: None,
                }
            }
        }
    }

    /// Mutates this board in place.
    pub fn mutate<R: Rng>(&mut self, strategy: Mutation, rng: &mut R) {
        match strategy {
            Mutation::BitFlip => {
                let column = rng.random_range(0..BOARD_SIZE) as u32;
                let bit = rng.random_range(0..ROW_BITS);
                let flipped = self.genes.as_u64() ^ (1u64 << (column * ROW_BITS + bit));
                self.genes = PackedVector::with_bits(flipped, ROW_BITS);
            }
            Mutation::Permutation => {
                let (i, j) = operators::distinct_columns(rng);
                let mut rows = self.rows();
                rows.swap(i, j);
                *self = Self::from_rows(&rows);
            }
        }
    }

    /// Returns a mutated copy, leaving `self` untouched.
    pub fn mutated<R: Rng>(&self, strategy: Mutation, rng: &mut R) -> Self {
        let mut copy = *self;
        copy.mutate(strategy, rng);
        copy
    }
}

impl fmt::Debug for CandidateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CandidateState").field(&self.rows()).finish()
    }
}

impl fmt::Display for CandidateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.rows())
    }
}

impl TryFrom<Vec<u8>> for CandidateState {
    type Error = QueensError;

    fn try_from(rows: Vec<u8>) -> Result<Self> {
        Self::new(&rows)
    }
}

impl From<CandidateState> for Vec<u8> {
    fn from(state: CandidateState) -> Self {
        state.rows().to_vec()
    }
}
