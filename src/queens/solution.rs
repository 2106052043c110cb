//! Result of a solver run.

use std::collections::HashSet;

use super::state::CandidateState;

/// Outcome of [`GeneticSolver::solve`](super::GeneticSolver::solve).
///
/// When [`has_found`](Self::has_found) is `true`, [`states`](Self::states)
/// holds every distinct optimal board in the final population. Otherwise the
/// run ran out of generations (or was cancelled) and `states` holds the
/// distinct boards of the last population.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    states: HashSet<CandidateState>,
    has_found: bool,
    generations: usize,
    cancelled: bool,
    fitness_history: Vec<u32>,
}

impl Solution {
    pub(crate) fn optimal(
        states: HashSet<CandidateState>,
        generations: usize,
        fitness_history: Vec<u32>,
    ) -> Self {
        Self {
            states,
            has_found: true,
            generations,
            cancelled: false,
            fitness_history,
        }
    }

    pub(crate) fn non_optimal(
        states: HashSet<CandidateState>,
        generations: usize,
        cancelled: bool,
        fitness_history: Vec<u32>,
    ) -> Self {
        Self {
            states,
            has_found: false,
            generations,
            cancelled,
            fitness_history,
        }
    }

    /// Distinct boards in this solution.
    pub fn states(&self) -> &HashSet<CandidateState> {
        &self.states
    }

    /// Whether an optimal board was reached.
    pub fn has_found(&self) -> bool {
        self.has_found
    }

    /// Generation counter at termination.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Whether the run was stopped by a cancellation flag.
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// Best fitness of the initial population, then after each generation.
    pub fn fitness_history(&self) -> &[u32] {
        &self.fitness_history
    }

    /// The fittest board.
    ///
    /// Among equally fit boards the one with the largest packed encoding
    /// wins, so the choice does not depend on hash order.
    pub fn best(&self) -> Option<&CandidateState> {
        self.states.iter().max_by_key(|state| (state.fitness(), **state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [u8; 8]) -> CandidateState {
        CandidateState::new(&rows).unwrap()
    }

    #[test]
    fn test_best_picks_highest_fitness() {
        let states: HashSet<_> = [
            board([5; 8]),
            board([0, 4, 7, 5, 2, 6, 1, 3]),
            board([0, 1, 5, 2, 6, 3, 7, 4]),
        ]
        .into_iter()
        .collect();
        let solution = Solution::non_optimal(states, 3, false, vec![27, 27, 27, 27]);
        assert_eq!(solution.best().unwrap().rows(), [0, 4, 7, 5, 2, 6, 1, 3]);
        assert!(!solution.has_found());
        assert_eq!(solution.generations(), 3);
    }

    #[test]
    fn test_best_tie_break_is_stable() {
        let a = board([5; 8]);
        let b = board([0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(a.fitness(), b.fitness());
        let expected = a.max(b);
        for _ in 0..10 {
            let states: HashSet<_> = [a, b].into_iter().collect();
            let solution = Solution::non_optimal(states, 1, false, vec![21, 21]);
            assert_eq!(*solution.best().unwrap(), expected);
        }
    }

    #[test]
    fn test_optimal_deduplicates() {
        let s = board([3, 6, 2, 7, 1, 4, 0, 5]);
        let states: HashSet<_> = [s, s, s].into_iter().collect();
        let solution = Solution::optimal(states, 0, vec![28]);
        assert!(solution.has_found());
        assert!(!solution.cancelled());
        assert_eq!(solution.states().len(), 1);
        assert_eq!(solution.fitness_history(), &[28]);
    }

    #[test]
    fn test_empty_best_is_none() {
        let solution = Solution::non_optimal(HashSet::new(), 0, true, vec![]);
        assert!(solution.best().is_none());
        assert!(solution.cancelled());
    }
}
