//! Arcade Snake - a terminal Snake game with a persisted highscore list
//!
//! This library provides:
//! - Core game logic: board, food, snake, rules and speed (game module)
//! - The session state machine that wires them together (session module)
//! - The ranked highscore ledger and its JSON store (highscore module)
//! - Terminal input, rendering and the async event loop (input, render, app)

pub mod app;
pub mod feedback;
pub mod game;
pub mod highscore;
pub mod input;
pub mod logging;
pub mod render;
pub mod session;
