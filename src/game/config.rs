use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::board::{Cell, CELL_SIZE};

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the arena in pixels
    pub arena_width: u32,
    /// Height of the arena in pixels
    pub arena_height: u32,
    /// Length the snake grows out to after a start
    pub start_length: usize,
    /// Cell the first head segment is placed on (clamped into the board)
    pub start_cell: Cell,
    /// Heading at the start of a game
    pub start_direction: Direction,

    // Speed policy
    /// Tick interval at the start of a game
    pub initial_interval_ms: u64,
    /// The interval never drops below this
    pub speed_floor_ms: u64,
    /// Milliseconds removed per point of score on each pickup
    pub speedup_step_ms: u64,

    /// Number of entries kept in the highscore ledger
    pub highscore_capacity: usize,
    /// Run one extra tick right away when a turn is accepted
    pub instant_turns: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 400,
            arena_height: 400,
            start_length: 3,
            start_cell: Cell::new(5, 5),
            start_direction: Direction::Right,
            initial_interval_ms: 400,
            speed_floor_ms: 100,
            speedup_step_ms: 2,
            highscore_capacity: 5,
            instant_turns: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom arena size in pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            ..Default::default()
        }
    }

    /// Create a configuration sized in cells rather than pixels
    pub fn with_cells(cols: u32, rows: u32) -> Self {
        Self::new(cols * CELL_SIZE, rows * CELL_SIZE)
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::with_cells(10, 10)
    }
}
