//! Parent selection strategies.
//!
//! Selection turns a population into an equally sized list of parents.
//! Parents are drawn with replacement, so the same board may be picked more
//! than once. Fitness is maximized: 28 is the best possible board.
//!
//! Both strategies return *indices* into the population rather than copies,
//! so callers can tell duplicate-valued individuals apart.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::state::CandidateState;
use crate::error::QueensError;

/// Number of contestants drawn per tournament.
pub const TOURNAMENT_SIZE: usize = 2;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_queens::queens::{CandidateState, Selection};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let population: Vec<_> = (0..10).map(|_| CandidateState::random(&mut rng)).collect();
/// let parents = Selection::Tournament.select(&population, &mut rng);
/// assert_eq!(parents.len(), population.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// The probability of drawing an individual is its fitness divided by
    /// the population's total fitness. Falls back to uniform sampling when
    /// every fitness is zero.
    Roulette,

    /// Binary tournament: draw two individuals uniformly, keep the fitter.
    ///
    /// Ties keep the first contestant drawn.
    #[default]
    Tournament,
}

impl Selection {
    /// Canonical name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Roulette => "roulette",
            Selection::Tournament => "tournament",
        }
    }

    /// Draws `population.len()` parent indices.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[CandidateState], rng: &mut R) -> Vec<usize> {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let fitness: Vec<u32> = population.iter().map(CandidateState::fitness).collect();
        match self {
            Selection::Roulette => roulette(&fitness, rng),
            Selection::Tournament => tournament(&fitness, rng),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Selection {
    type Err = QueensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roulette" => Ok(Selection::Roulette),
            "tournament" => Ok(Selection::Tournament),
            other => Err(QueensError::InvalidStrategy {
                kind: "selection",
                name: other.to_string(),
            }),
        }
    }
}

/// Roulette wheel over integer fitness weights.
fn roulette<R: Rng>(fitness: &[u32], rng: &mut R) -> Vec<usize> {
    let n = fitness.len();
    let total: u32 = fitness.iter().sum();
    if total == 0 {
        return (0..n).map(|_| rng.random_range(0..n)).collect();
    }

    (0..n)
        .map(|_| {
            let threshold = rng.random_range(0..total);
            let mut cumulative = 0;
            for (i, &w) in fitness.iter().enumerate() {
                cumulative += w;
                if cumulative > threshold {
                    return i;
                }
            }
            n - 1
        })
        .collect()
}

/// Repeated tournaments of [`TOURNAMENT_SIZE`] contestants.
fn tournament<R: Rng>(fitness: &[u32], rng: &mut R) -> Vec<usize> {
    let n = fitness.len();
    (0..n)
        .map(|_| {
            let mut best = rng.random_range(0..n);
            for _ in 1..TOURNAMENT_SIZE {
                let idx = rng.random_range(0..n);
                if fitness[idx] > fitness[best] {
                    best = idx;
                }
            }
            best
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(rows: &[[u8; 8]]) -> Vec<CandidateState> {
        rows.iter()
            .map(|r| CandidateState::new(r).unwrap())
            .collect()
    }

    fn mixed_population() -> Vec<CandidateState> {
        population(&[
            [5, 5, 5, 5, 5, 5, 5, 5], // 21
            [0, 4, 7, 5, 2, 6, 1, 3], // 28
            [0, 1, 2, 3, 4, 5, 6, 7], // 21
            [0, 0, 1, 1, 2, 2, 3, 3], // 21
        ])
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = mixed_population();
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..2500 {
            for idx in Selection::Tournament.select(&pop, &mut rng) {
                counts[idx] += 1;
            }
        }
        // Index 1 wins whenever it is drawn: 1 - (3/4)^2 = 43.75%.
        let best = counts[1];
        assert!(
            best > 4000,
            "expected optimum to be selected ~43% of the time, got {counts:?}"
        );
        assert!(counts[3] < counts[1]);
        assert!(counts[0] < counts[1]);
    }

    #[test]
    fn test_tournament_tie_keeps_first() {
        let fitness = [21u32; 6];
        let mut rng = StdRng::seed_from_u64(3);
        let mut replay = rng.clone();
        let mut distinct_draws = 0;
        for _ in 0..50 {
            for picked in tournament(&fitness, &mut rng) {
                let first = replay.random_range(0..fitness.len());
                let second = replay.random_range(0..fitness.len());
                assert_eq!(picked, first, "tie went to {picked}, first drawn was {first}");
                if first != second {
                    distinct_draws += 1;
                }
            }
        }
        assert!(distinct_draws > 0);
    }

    #[test]
    fn test_tournament_fitter_second_wins() {
        let fitness = [10u32, 11, 12, 13, 14, 15];
        let mut rng = StdRng::seed_from_u64(3);
        let mut replay = rng.clone();
        let mut second_wins = 0;
        for _ in 0..50 {
            for picked in tournament(&fitness, &mut rng) {
                let first = replay.random_range(0..fitness.len());
                let second = replay.random_range(0..fitness.len());
                if fitness[second] > fitness[first] {
                    assert_eq!(picked, second);
                    second_wins += 1;
                } else {
                    assert_eq!(picked, first);
                }
            }
        }
        assert!(second_wins > 0);
    }

    #[test]
    fn test_roulette_proportional() {
        let pop = mixed_population();
        let fitness: Vec<u32> = pop.iter().map(CandidateState::fitness).collect();
        let total: u32 = fitness.iter().sum();
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let rounds = 5000;
        for _ in 0..rounds {
            for idx in Selection::Roulette.select(&pop, &mut rng) {
                counts[idx] += 1;
            }
        }
        let draws = (rounds * pop.len()) as f64;
        for i in 0..4 {
            let expected = fitness[i] as f64 / total as f64;
            let observed = counts[i] as f64 / draws;
            assert!(
                (observed - expected).abs() < 0.02,
                "index {i}: expected {expected:.3}, observed {observed:.3}"
            );
        }
    }

    #[test]
    fn test_roulette_zero_weights_fallback() {
        let mut rng = StdRng::seed_from_u64(1);
        let picks = roulette(&[0, 0, 0], &mut rng);
        assert_eq!(picks.len(), 3);
        assert!(picks.iter().all(|&i| i < 3));
    }

    #[test]
    fn test_roulette_skips_zero_weight() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let picks = roulette(&[0, 3, 0, 1], &mut rng);
            assert!(picks.iter().all(|&i| i == 1 || i == 3));
        }
    }

    #[test]
    fn test_output_length_matches_population() {
        let mut rng = StdRng::seed_from_u64(8);
        for n in 1..12 {
            let pop: Vec<_> = (0..n).map(|_| CandidateState::random(&mut rng)).collect();
            for sel in [Selection::Roulette, Selection::Tournament] {
                let picked = sel.select(&pop, &mut rng);
                assert_eq!(picked.len(), n);
                assert!(picked.iter().all(|&i| i < n));
            }
        }
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!("roulette".parse::<Selection>().unwrap(), Selection::Roulette);
        assert_eq!(
            "tournament".parse::<Selection>().unwrap(),
            Selection::Tournament
        );
        assert_eq!(Selection::default(), Selection::Tournament);
        assert_eq!(
            "rank".parse::<Selection>().unwrap_err(),
            QueensError::InvalidStrategy {
                kind: "selection",
                name: "rank".into()
            }
        );
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<CandidateState> = vec![];
        let mut rng = StdRng::seed_from_u64(42);
        Selection::Tournament.select(&pop, &mut rng);
    }
}
