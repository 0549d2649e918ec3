//! Highscore persistence
//!
//! The ledger is stored as a pretty-printed JSON array of entries in rank
//! order. A missing file is an empty ledger, not an error.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::ledger::HighscoreEntry;

#[derive(Debug, Error)]
pub enum HighscoreError {
    #[error("failed to access highscores at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("highscores at {path:?} are not valid JSON")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Opaque load/save of the ranked highscore list
pub trait LedgerStore {
    fn load(&self) -> Result<Vec<HighscoreEntry>, HighscoreError>;

    fn save(&self, entries: &[HighscoreEntry]) -> Result<(), HighscoreError>;
}

/// Stores the ledger in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> HighscoreError {
        HighscoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Vec<HighscoreEntry>, HighscoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "no highscore file yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let entries: Vec<HighscoreEntry> =
            serde_json::from_str(&json).map_err(|source| HighscoreError::Format {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = ?self.path, count = entries.len(), "highscores loaded");
        Ok(entries)
    }

    fn save(&self, entries: &[HighscoreEntry]) -> Result<(), HighscoreError> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|source| HighscoreError::Format {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|err| self.io_error(err))?;
        debug!(path = ?self.path, count = entries.len(), "highscores saved");
        Ok(())
    }
}
