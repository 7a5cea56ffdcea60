//! Manhattan-distance heuristic.
//!
//! Each tile needs at least as many slides as its grid distance to its goal
//! cell, and one slide moves exactly one tile by one cell, so the sum never
//! overestimates the remaining moves.

use crate::board::{Puzzle, State, BLANK};
use crate::grid::distance;

/// Sum over all non-blank tiles of the distance to their goal cell.
///
/// `goal_cells[tile]` gives the goal cell of `tile`. Zero exactly when the
/// state equals the goal.
pub fn manhattan<const SIDE: usize, const CELLS: usize>(
    state: &State<CELLS>,
    goal_cells: &[usize; CELLS],
) -> u32 {
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(|(cell, &tile)| distance::<SIDE>(cell, goal_cells[tile as usize]))
        .sum()
}

impl<const SIDE: usize, const CELLS: usize> Puzzle<SIDE, CELLS> {
    /// Heuristic cost `h` of `state` against this puzzle's goal.
    #[inline]
    pub fn cost(&self, state: &State<CELLS>) -> u32 {
        manhattan::<SIDE, CELLS>(state, self.goal_cells())
    }
}
