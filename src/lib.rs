//! Sliding-Tile Puzzle Solver Library
//!
//! Finds shortest solutions to the eight-puzzle (and its 2x2 and 4x4
//! siblings) with A* search guided by the Manhattan-distance heuristic.

pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod moves;
pub mod solver;

use board::{Puzzle, State, EIGHT_PUZZLE, FIFTEEN_PUZZLE, THREE_PUZZLE};

pub use config::SearchConfig;
pub use error::{SolveError, StateError};
pub use moves::Direction;
pub use solver::{solve, SearchStats, Solution};

/// A solved puzzle with the board size erased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub moves: usize,
    /// Direction labels in move order.
    pub path: String,
    /// Every board from start to goal, rendered with its heuristic cost.
    pub boards: Vec<String>,
    pub stats: SearchStats,
}

/// Trait that erases compile-time board parameters for dynamic dispatch.
///
/// `SIDE` and `CELLS` are hidden behind the vtable, so callers can pick a
/// board size at runtime and work with plain tile slices.
pub trait PuzzleOps {
    fn side(&self) -> usize;

    /// Solves from `start` to `goal`, or to this puzzle's own goal if `None`.
    fn solve(
        &self,
        start: &[u8],
        goal: Option<&[u8]>,
        config: &SearchConfig,
    ) -> Result<Report, SolveError>;

    /// Renders `tiles` as a grid with its cost against `goal`.
    fn render(&self, tiles: &[u8], goal: Option<&[u8]>) -> Result<String, SolveError>;
}

impl<const SIDE: usize, const CELLS: usize> Puzzle<SIDE, CELLS> {
    /// This puzzle, or one with the same size and `goal` substituted.
    fn retarget(&self, goal: Option<&[u8]>) -> Result<Self, StateError> {
        match goal {
            Some(tiles) => Ok(Puzzle::with_goal(State::from_slice(tiles)?)),
            None => Ok(*self),
        }
    }
}

impl<const SIDE: usize, const CELLS: usize> PuzzleOps for Puzzle<SIDE, CELLS> {
    fn side(&self) -> usize {
        SIDE
    }

    fn solve(
        &self,
        start: &[u8],
        goal: Option<&[u8]>,
        config: &SearchConfig,
    ) -> Result<Report, SolveError> {
        let puzzle = self.retarget(goal)?;
        let start = State::<CELLS>::from_slice(start)?;
        let solution = Puzzle::solve(&puzzle, &start, config)?;

        Ok(Report {
            moves: solution.moves(),
            path: solution.path(),
            boards: solution
                .steps()
                .iter()
                .map(|step| grid::format_state::<SIDE, CELLS>(&step.state, step.cost))
                .collect(),
            stats: *solution.stats(),
        })
    }

    fn render(&self, tiles: &[u8], goal: Option<&[u8]>) -> Result<String, SolveError> {
        let puzzle = self.retarget(goal)?;
        let state = State::<CELLS>::from_slice(tiles)?;
        Ok(puzzle.render(&state))
    }
}

/// Looks up the prebuilt puzzle for a board side length.
pub fn puzzle_for_side(side: usize) -> Option<&'static dyn PuzzleOps> {
    match side {
        2 => Some(&THREE_PUZZLE),
        3 => Some(&EIGHT_PUZZLE),
        4 => Some(&FIFTEEN_PUZZLE),
        _ => None,
    }
}
