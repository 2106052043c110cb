//! Error types.
//!
//! Every failure in this crate is a caller error detected synchronously:
//! an out-of-range parameter, a malformed board, or an unknown strategy
//! name. Running out of generations is not an error; see
//! [`Solution::has_found`](crate::queens::Solution::has_found).

use thiserror::Error;

/// Errors raised by the packed encoding, board construction and solver
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueensError {
    /// A solver parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A strategy name did not match any known strategy.
    #[error("unknown {kind} strategy: {name:?}")]
    InvalidStrategy {
        /// Strategy family (`"selection"`, `"crossover"` or `"mutation"`).
        kind: &'static str,
        /// The name that failed to parse.
        name: String,
    },

    /// A board value is not a valid row.
    #[error("row value {value} at column {index} is outside 0..=7")]
    InvalidValue { index: usize, value: u64 },

    /// A board or operand has the wrong number of columns.
    #[error("expected {expected} columns, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A packed-vector slot index is past the end of the backing store.
    #[error("slot index {index} out of range (capacity {capacity})")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// A packed-vector group size does not fit the backing store.
    #[error("group size {0} must be between 1 and 32 bits")]
    InvalidGroupSize(u32),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, QueensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_strategy_message() {
        let err = QueensError::InvalidStrategy {
            kind: "mutation",
            name: "scramble".into(),
        };
        assert_eq!(err.to_string(), "unknown mutation strategy: \"scramble\"");
    }

    #[test]
    fn test_index_out_of_range_message() {
        let err = QueensError::IndexOutOfRange {
            index: 21,
            capacity: 21,
        };
        assert_eq!(
            err.to_string(),
            "slot index 21 out of range (capacity 21)"
        );
    }

    #[test]
    fn test_invalid_value_message() {
        let err = QueensError::InvalidValue { index: 3, value: 9 };
        assert_eq!(err.to_string(), "row value 9 at column 3 is outside 0..=7");
    }
}
