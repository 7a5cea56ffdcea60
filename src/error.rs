//! Error types for board validation and search.

use thiserror::Error;

/// A board that is not a permutation of `0..CELLS`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("expected {expected} tiles, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("tile {tile} is out of range for a board of {cells} cells")]
    OutOfRange { tile: u8, cells: usize },

    #[error("tile {0} appears more than once")]
    Duplicate(u8),

    #[error("invalid tile {token:?}")]
    Parse { token: String },
}

/// Failure reported by `solve`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("invalid board: {0}")]
    InvalidState(#[from] StateError),

    /// No goal node was popped before the iteration budget ran out or the
    /// frontier emptied. Covers both unsolvable boards and budgets that are
    /// too small; the search does not tell them apart.
    #[error("no solution found within {iterations} iterations")]
    Unsolved { iterations: usize },
}
