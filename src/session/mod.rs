//! Session controller: the Idle → Running → Ended state machine
//!
//! A [`Session`] owns the snake, the food, score and speed, and the highscore
//! ledger. It is driven from the outside by ticks and commands and reports
//! back through a [`RenderSink`] and an [`Announcer`].

pub mod controller;
pub mod events;

pub use controller::{GameOver, NameSubmission, Session, SessionState, ANONYMOUS};
pub use events::{Announcement, Announcer, RenderSink};
