use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use super::board::{Board, Cell};

/// Random draws attempted before switching to scanning the free cells
const MAX_RANDOM_DRAWS: usize = 64;

/// Pick a random cell not in `occupied`.
///
/// Draws uniformly from the whole grid and redraws on a hit. On a crowded
/// board the free cells are enumerated instead so placement always
/// terminates. Returns `None` only when the grid is full.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    occupied: &HashSet<Cell>,
    board: &Board,
) -> Option<Cell> {
    if occupied.len() < board.cell_count() {
        for _ in 0..MAX_RANDOM_DRAWS {
            let x = rng.gen_range(0..board.cols()) as i32;
            let y = rng.gen_range(0..board.rows()) as i32;
            let cell = Cell::new(x, y);

            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }
    }

    board.cells().filter(|cell| !occupied.contains(cell)).choose(rng)
}
