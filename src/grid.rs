//! Board surface: dimensions, cell states and the 10×10 overlay grids.

use serde::{Deserialize, Serialize};

/// Width and height of the square board.
pub const BOARD_SIZE: i32 = 10;

/// Returns `true` if (`x`, `y`) lies outside the board.
pub fn off_board(x: i32, y: i32) -> bool {
    x < 0 || y < 0 || x >= BOARD_SIZE || y >= BOARD_SIZE
}

/// Visible content of a single grid cell on one of the two per-board maps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldState {
    /// Cell content could not be determined (off-board reads).
    Unknown,
    #[default]
    Empty,
    /// An unharmed ship cell.
    Pin,
    Hit,
    Miss,
}

const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// One 10×10 overlay. Boards keep two of these: their own ship placement
/// and the record of shots fired at the opponent.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[FieldState; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of the cell at (`x`, `y`). Off-board reads yield `Unknown`,
    /// so comparisons against concrete states fail naturally at the edges.
    pub fn get(&self, x: i32, y: i32) -> FieldState {
        if off_board(x, y) {
            FieldState::Unknown
        } else {
            self.cells[x as usize][y as usize]
        }
    }

    /// Set the cell at (`x`, `y`). Off-board writes are dropped; callers
    /// validate coordinates before mutating.
    pub fn set(&mut self, x: i32, y: i32, state: FieldState) {
        if !off_board(x, y) {
            self.cells[x as usize][y as usize] = state;
        }
    }

    /// Any of the four diagonal neighbors of (`x`, `y`) holds `state`.
    pub fn any_diagonal_is(&self, x: i32, y: i32, state: FieldState) -> bool {
        DIAGONALS
            .iter()
            .any(|&(dx, dy)| self.get(x + dx, y + dy) == state)
    }

    /// Any of the eight surrounding neighbors of (`x`, `y`) holds `state`.
    pub fn any_neighbor_is(&self, x: i32, y: i32, state: FieldState) -> bool {
        for i in x - 1..=x + 1 {
            for j in y - 1..=y + 1 {
                if i == x && j == y {
                    continue;
                }
                if self.get(i, j) == state {
                    return true;
                }
            }
        }
        false
    }

    /// Number of cells currently holding `state`.
    pub fn count(&self, state: FieldState) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == state)
            .count()
    }
}
