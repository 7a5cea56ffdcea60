//! Coordinate mapping and text rendering for square boards.
//!
//! Cells are stored row-major: cell `i` sits at column `x = i % SIDE` and
//! row `y = i / SIDE`, with `y = 0` as the top row.

use crate::board::{Puzzle, State, BLANK};
use crate::error::StateError;

/// A board coordinate as `(x, y)`: column, then row.
pub type Coord = (usize, usize);

/// Converts a linear cell index to `(x, y)` coordinates.
#[inline(always)]
pub const fn idx_to_coord<const SIDE: usize>(cell_index: usize) -> Coord {
    (cell_index % SIDE, cell_index / SIDE)
}

/// Converts `(x, y)` coordinates to a linear cell index.
#[inline(always)]
pub const fn coord_to_idx<const SIDE: usize>(x: usize, y: usize) -> usize {
    y * SIDE + x
}

/// Manhattan distance between two cells.
#[inline]
pub fn distance<const SIDE: usize>(from: usize, to: usize) -> u32 {
    let (from_x, from_y) = idx_to_coord::<SIDE>(from);
    let (to_x, to_y) = idx_to_coord::<SIDE>(to);
    (from_x.abs_diff(to_x) + from_y.abs_diff(to_y)) as u32
}

/// Formats a state as a grid followed by its heuristic cost.
///
/// Tiles are right-aligned to the widest label; the blank shows as '.'.
pub fn format_state<const SIDE: usize, const CELLS: usize>(
    state: &State<CELLS>,
    cost: u32,
) -> String {
    let width = (CELLS - 1).to_string().len();
    let mut output = String::new();

    for row in state.tiles().chunks(SIDE) {
        for (x, &tile) in row.iter().enumerate() {
            if x > 0 {
                output.push(' ');
            }
            if tile == BLANK {
                output.push_str(&format!("{:>width$}", '.', width = width));
            } else {
                output.push_str(&format!("{:>width$}", tile, width = width));
            }
        }
        output.push('\n');
    }
    output.push_str(&format!("(h = {})\n", cost));

    output
}

/// Parses tile labels separated by commas and/or whitespace.
///
/// Only the syntax is checked here; `State::from_slice` checks the layout.
pub fn parse_tiles(text: &str) -> Result<Vec<u8>, StateError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u8>().map_err(|_| StateError::Parse {
                token: token.to_string(),
            })
        })
        .collect()
}

impl<const SIDE: usize, const CELLS: usize> Puzzle<SIDE, CELLS> {
    /// Renders `state` together with its cost against this puzzle's goal.
    pub fn render(&self, state: &State<CELLS>) -> String {
        format_state::<SIDE, CELLS>(state, self.cost(state))
    }
}
