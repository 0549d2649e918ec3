//! Persisted top-N highscore list

pub mod ledger;
pub mod store;

pub use ledger::{HighscoreEntry, HighscoreLedger};
pub use store::{HighscoreError, JsonFileStore, LedgerStore};
