//! Move generation.
//!
//! A move slides one tile orthogonally into the blank. Directions are named
//! after the way the tile travels: `Left` slides the tile to the right of the
//! blank leftwards, so the blank itself moves right.

use std::fmt;

use crate::board::{Puzzle, State};
use crate::grid::idx_to_coord;

/// Direction a tile slides into the blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in successor generation order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Single-letter label used in solution strings.
    pub const fn label(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Up => 'U',
            Direction::Down => 'D',
        }
    }

    pub fn from_label(label: char) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.label() == label)
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Cell of the tile that would slide into a blank at `blank`.
    ///
    /// Returns `None` when that tile would have to cross the board edge.
    /// Index arithmetic alone is not enough: `blank + 1` from the last
    /// column lands on the next row, so the coordinates are compared too.
    pub fn source_cell<const SIDE: usize>(self, blank: usize) -> Option<usize> {
        let cells = SIDE * SIDE;
        let candidate = match self {
            Direction::Left => blank.checked_add(1),
            Direction::Right => blank.checked_sub(1),
            Direction::Up => blank.checked_add(SIDE),
            Direction::Down => blank.checked_sub(SIDE),
        }
        .filter(|&cell| cell < cells)?;

        let (blank_x, blank_y) = idx_to_coord::<SIDE>(blank);
        let (tile_x, tile_y) = idx_to_coord::<SIDE>(candidate);
        let in_line = match self {
            Direction::Left => tile_x > blank_x && tile_y == blank_y,
            Direction::Right => tile_x < blank_x && tile_y == blank_y,
            Direction::Up => tile_y > blank_y && tile_x == blank_x,
            Direction::Down => tile_y < blank_y && tile_x == blank_x,
        };

        in_line.then_some(candidate)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A state reachable by one move, tagged with the move and its cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Successor<const CELLS: usize> {
    pub state: State<CELLS>,
    pub direction: Direction,
    /// Heuristic cost of `state`.
    pub cost: u32,
}

/// Applies one move, or returns `None` if it is illegal for this state.
pub fn slide<const SIDE: usize, const CELLS: usize>(
    state: &State<CELLS>,
    direction: Direction,
) -> Option<State<CELLS>> {
    direction
        .source_cell::<SIDE>(state.blank_index())
        .map(|cell| state.with_blank_at(cell))
}

/// Generates every state one legal move away from `state`.
///
/// Yields two successors for a corner blank, three on an edge and four in
/// the interior. `state` itself is never modified.
pub fn expand<'a, const SIDE: usize, const CELLS: usize>(
    puzzle: &'a Puzzle<SIDE, CELLS>,
    state: &State<CELLS>,
) -> impl Iterator<Item = Successor<CELLS>> + 'a {
    let state = *state;
    Direction::ALL.into_iter().filter_map(move |direction| {
        let next = slide::<SIDE, CELLS>(&state, direction)?;
        Some(Successor {
            state: next,
            direction,
            cost: puzzle.cost(&next),
        })
    })
}

impl<const SIDE: usize, const CELLS: usize> Puzzle<SIDE, CELLS> {
    /// Successors of `state`, costed against this puzzle's goal.
    pub fn expand<'a>(
        &'a self,
        state: &State<CELLS>,
    ) -> impl Iterator<Item = Successor<CELLS>> + 'a {
        expand(self, state)
    }
}
