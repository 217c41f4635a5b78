use serde::{Deserialize, Serialize};

use crate::coords::is_grid_number;
use crate::{to_coord, Cell, Player, Status};

/// The eight lines that win a grid, as grid numbers: rows, then columns, then diagonals.
const LINES: [[u8; 3]; 8] = [
    [1, 2, 3],
    [4, 5, 6],
    [7, 8, 9],
    [1, 4, 7],
    [2, 5, 8],
    [3, 6, 9],
    [1, 5, 9],
    [3, 5, 7],
];

/// A standard tic-tac-toe grid.
///
/// Cells are addressed by grid numbers 1 to 9 (see [`to_coord()`]). Once a cell
/// is taken it never changes again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubBoard {
    /// Indexed as `grid[y][x]`.
    grid: [[Cell; 3]; 3],
}

impl SubBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The content of a cell. Grid numbers outside of 1 to 9 are reported as empty.
    pub fn cell(&self, grid_number: u8) -> Cell {
        if !is_grid_number(grid_number) {
            return Cell::Empty;
        }
        let (x, y) = to_coord(grid_number);
        self.grid[y as usize][x as usize]
    }

    /// The grid numbers of all empty cells, in ascending order.
    pub fn legal_moves(&self) -> Vec<u8> {
        (1..=9).filter(|&n| self.cell(n).is_empty()).collect()
    }

    /// Take the cell `grid_number` for `player`.
    ///
    /// Returns `false` and leaves the grid untouched if the cell is not one of
    /// [`Self::legal_moves()`].
    pub fn apply_move(&mut self, grid_number: u8, player: Player) -> bool {
        if !is_grid_number(grid_number) || !self.cell(grid_number).is_empty() {
            return false;
        }
        let (x, y) = to_coord(grid_number);
        self.grid[y as usize][x as usize] = Cell::from(player);
        true
    }

    /// Computes the status from scratch on every call.
    pub fn status(&self) -> Status {
        for line in LINES {
            let [a, b, c] = line.map(|n| self.cell(n));
            if let Some(player) = a.player() {
                if a == b && b == c {
                    return Status::WonBy(player);
                }
            }
        }
        if self.grid.iter().flatten().any(|cell| cell.is_empty()) {
            Status::Open
        } else {
            Status::Tied
        }
    }
}
