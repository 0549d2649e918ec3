//! Board geometry: pixel arena to a grid of fixed-size cells

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::Direction;

/// Edge length of one cell, in arena pixels
pub const CELL_SIZE: u32 = 20;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing the given pixel coordinate
    pub fn from_pixels(px: u32, py: u32) -> Self {
        Self {
            x: (px / CELL_SIZE) as i32,
            y: (py / CELL_SIZE) as i32,
        }
    }

    /// Top-left pixel of this cell
    pub fn to_pixels(&self) -> (i64, i64) {
        (
            i64::from(self.x) * i64::from(CELL_SIZE),
            i64::from(self.y) * i64::from(CELL_SIZE),
        )
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("arena of {width}x{height} px holds no {cell}px cell", cell = CELL_SIZE)]
    TooSmall { width: u32, height: u32 },
}

/// Grid dimensions derived from the arena size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cols: u32,
    rows: u32,
}

impl Board {
    /// Convert an arena in pixels to a grid; partial cells are dropped
    pub fn from_pixels(width: u32, height: u32) -> Result<Self, BoardError> {
        let cols = width / CELL_SIZE;
        let rows = height / CELL_SIZE;
        if cols == 0 || rows == 0 {
            return Err(BoardError::TooSmall { width, height });
        }
        Ok(Self { cols, rows })
    }

    /// Build a board directly from grid dimensions
    pub fn with_cells(cols: u32, rows: u32) -> Result<Self, BoardError> {
        Self::from_pixels(cols.saturating_mul(CELL_SIZE), rows.saturating_mul(CELL_SIZE))
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && i64::from(cell.x) < i64::from(self.cols)
            && cell.y >= 0
            && i64::from(cell.y) < i64::from(self.rows)
    }

    /// Nearest in-bounds cell
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.clamp(0, self.cols as i32 - 1),
            y: cell.y.clamp(0, self.rows as i32 - 1),
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows as i32).flat_map(move |y| (0..self.cols as i32).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Cell::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Cell::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn test_pixel_conversion() {
        assert_eq!(Cell::from_pixels(0, 0), Cell::new(0, 0));
        assert_eq!(Cell::from_pixels(119, 100), Cell::new(5, 5));
        assert_eq!(Cell::new(5, 5).to_pixels(), (100, 100));
    }

    #[test]
    fn test_grid_from_pixels_drops_partial_cells() {
        let board = Board::from_pixels(410, 395).unwrap();
        assert_eq!(board.cols(), 20);
        assert_eq!(board.rows(), 19);
        assert_eq!(board.cell_count(), 380);
    }

    #[test]
    fn test_degenerate_board_rejected() {
        assert_eq!(
            Board::from_pixels(19, 400),
            Err(BoardError::TooSmall { width: 19, height: 400 })
        );
        assert!(Board::from_pixels(400, 0).is_err());
        assert!(Board::from_pixels(20, 20).is_ok());
    }

    #[test]
    fn test_bounds_checking() {
        let board = Board::with_cells(20, 20).unwrap();

        assert!(board.contains(Cell::new(0, 0)));
        assert!(board.contains(Cell::new(19, 19)));
        assert!(!board.contains(Cell::new(-1, 0)));
        assert!(!board.contains(Cell::new(20, 0)));
        assert!(!board.contains(Cell::new(0, 20)));
    }

    #[test]
    fn test_clamp_and_enumerate() {
        let board = Board::with_cells(3, 2).unwrap();
        assert_eq!(board.clamp(Cell::new(5, 5)), Cell::new(2, 1));
        assert_eq!(board.clamp(Cell::new(-4, 0)), Cell::new(0, 0));

        let cells: Vec<Cell> = board.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[5], Cell::new(2, 1));
    }
}
