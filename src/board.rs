//! Board definitions: tile states and puzzle parameters.
//!
//! A state is a flat row-major array of tile labels where `0` is the blank.
//! Side length (`SIDE`) and cell count (`CELLS = SIDE^2`) are compile-time
//! parameters, so the eight-puzzle is `Puzzle<3, 9>`.

use std::fmt;

use crate::error::StateError;

/// Tile label reserved for the blank cell.
pub const BLANK: u8 = 0;

/// One board configuration.
///
/// Always a permutation of `0..CELLS`. States are `Copy`: a successor is a
/// fresh array, never an edit of a state some other node still refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State<const CELLS: usize> {
    tiles: [u8; CELLS],
    /// Cell index of the blank, cached so move generation is O(1).
    blank: u8,
}

impl<const CELLS: usize> State<CELLS> {
    /// Validates `tiles` and wraps them in a state.
    pub fn new(tiles: [u8; CELLS]) -> Result<Self, StateError> {
        let mut seen = [false; CELLS];
        let mut blank = 0;

        for (cell, &tile) in tiles.iter().enumerate() {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(StateError::OutOfRange { tile, cells: CELLS })?;
            if *slot {
                return Err(StateError::Duplicate(tile));
            }
            *slot = true;
            if tile == BLANK {
                blank = cell as u8;
            }
        }

        Ok(Self { tiles, blank })
    }

    /// Builds a state from a slice, checking its length first.
    pub fn from_slice(tiles: &[u8]) -> Result<Self, StateError> {
        let array: [u8; CELLS] = tiles.try_into().map_err(|_| StateError::WrongLength {
            expected: CELLS,
            found: tiles.len(),
        })?;
        Self::new(array)
    }

    /// The canonical solved layout: `1, 2, ..., CELLS - 1`, then the blank.
    pub const fn solved() -> Self {
        let mut tiles = [BLANK; CELLS];
        let mut cell = 0;
        while cell + 1 < CELLS {
            tiles[cell] = (cell + 1) as u8;
            cell += 1;
        }
        Self {
            tiles,
            blank: (CELLS - 1) as u8,
        }
    }

    #[inline]
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    #[inline]
    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    /// Returns a copy with the blank swapped into `cell`.
    ///
    /// Callers are responsible for `cell` being adjacent to the blank.
    pub(crate) fn with_blank_at(&self, cell: usize) -> Self {
        let mut tiles = self.tiles;
        tiles.swap(self.blank as usize, cell);
        Self {
            tiles,
            blank: cell as u8,
        }
    }
}

impl<const CELLS: usize> fmt::Display for State<CELLS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (cell, tile) in self.tiles.iter().enumerate() {
            if cell > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}

/// Puzzle definition with compile-time parameters.
///
/// - `SIDE`: board side length (3 for the eight-puzzle)
/// - `CELLS`: total cells on the board (must equal SIDE^2)
#[derive(Clone, Copy, Debug)]
pub struct Puzzle<const SIDE: usize, const CELLS: usize> {
    goal: State<CELLS>,
    /// `goal_cells[tile]` is the cell `tile` occupies in the goal.
    goal_cells: [usize; CELLS],
}

impl<const SIDE: usize, const CELLS: usize> Puzzle<SIDE, CELLS> {
    /// Puzzle whose goal is the canonical solved layout.
    pub const fn standard() -> Self {
        Self::from_goal(State::solved())
    }

    /// Puzzle with a caller-chosen goal layout.
    ///
    /// A `SIDE`/`CELLS` pair with `CELLS != SIDE^2` fails to compile.
    pub fn with_goal(goal: State<CELLS>) -> Self {
        const { assert!(SIDE * SIDE == CELLS, "CELLS must equal SIDE^2") };
        Self::from_goal(goal)
    }

    const fn from_goal(goal: State<CELLS>) -> Self {
        assert!(SIDE * SIDE == CELLS, "CELLS must equal SIDE^2");
        assert!(SIDE >= 2, "board side must be at least 2");
        assert!(CELLS <= 256, "tile labels must fit in a u8");

        let mut goal_cells = [0usize; CELLS];
        let mut cell = 0;
        while cell < CELLS {
            goal_cells[goal.tiles[cell] as usize] = cell;
            cell += 1;
        }

        Self { goal, goal_cells }
    }

    #[inline]
    pub fn goal(&self) -> &State<CELLS> {
        &self.goal
    }

    /// Cell index of `tile` in the goal layout.
    #[inline]
    pub fn goal_cell(&self, tile: u8) -> usize {
        self.goal_cells[tile as usize]
    }

    #[inline]
    pub fn goal_cells(&self) -> &[usize; CELLS] {
        &self.goal_cells
    }

    pub const fn side(&self) -> usize {
        SIDE
    }
}

/// 2x2 puzzle (three tiles), mostly useful for exhaustive tests.
pub const THREE_PUZZLE: Puzzle<2, 4> = Puzzle::standard();

/// The classic 3x3 eight-puzzle.
pub const EIGHT_PUZZLE: Puzzle<3, 9> = Puzzle::standard();

/// 4x4 fifteen-puzzle.
pub const FIFTEEN_PUZZLE: Puzzle<4, 16> = Puzzle::standard();

/// Start layout solved by the binary when none is given.
pub const EIGHT_PUZZLE_START: [u8; 9] = [6, 4, 8, 1, 5, 7, 0, 3, 2];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_layout_3x3() {
        let solved = State::<9>::solved();
        assert_eq!(solved.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(solved.blank_index(), 8);
    }

    #[test]
    fn test_new_finds_blank() {
        let state = State::new(EIGHT_PUZZLE_START).unwrap();
        assert_eq!(state.blank_index(), 6);
    }

    #[test]
    fn test_rejects_duplicate_tile() {
        let result = State::new([1, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(result, Err(StateError::Duplicate(1)));
    }

    #[test]
    fn test_rejects_out_of_range_tile() {
        let result = State::new([1, 2, 3, 4, 5, 6, 7, 9, 0]);
        assert_eq!(result, Err(StateError::OutOfRange { tile: 9, cells: 9 }));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let result = State::<9>::from_slice(&[1, 2, 3, 0]);
        assert_eq!(
            result,
            Err(StateError::WrongLength {
                expected: 9,
                found: 4
            })
        );
    }

    #[test]
    fn test_with_blank_at_leaves_original_untouched() {
        let state = State::new(EIGHT_PUZZLE_START).unwrap();
        let moved = state.with_blank_at(7);
        assert_eq!(state.tiles(), &EIGHT_PUZZLE_START);
        assert_eq!(moved.tiles(), &[6, 4, 8, 1, 5, 7, 3, 0, 2]);
        assert_eq!(moved.blank_index(), 7);
    }

    #[test]
    fn test_goal_cells_invert_goal() {
        let goal = State::new([8, 7, 6, 5, 4, 3, 2, 1, 0]).unwrap();
        let puzzle = Puzzle::<3, 9>::with_goal(goal);
        for (cell, &tile) in goal.tiles().iter().enumerate() {
            assert_eq!(puzzle.goal_cell(tile), cell);
        }
    }

    #[test]
    fn test_display_is_comma_separated() {
        let state = State::new(EIGHT_PUZZLE_START).unwrap();
        assert_eq!(state.to_string(), "6,4,8,1,5,7,0,3,2");
    }
}
