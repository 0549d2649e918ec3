//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies:
//! grid geometry, food placement, the snake itself, the per-tick rules and the
//! speed policy. The session controller wires these together.

pub mod action;
pub mod board;
pub mod clock;
pub mod config;
pub mod food;
pub mod rules;
pub mod snake;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use board::{Board, BoardError, Cell, CELL_SIZE};
pub use clock::GameClock;
pub use config::GameConfig;
pub use food::place_food;
pub use rules::{evaluate, GameOverCause, TickOutcome};
pub use snake::{Segment, SegmentId, Snake};
