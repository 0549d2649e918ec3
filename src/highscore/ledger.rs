use serde::{Deserialize, Serialize};
use tracing::warn;

use super::store::LedgerStore;

/// One line of the highscore list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreEntry {
    pub player_name: String,
    pub score: u32,
}

impl HighscoreEntry {
    pub fn new(player_name: impl Into<String>, score: u32) -> Self {
        Self {
            player_name: player_name.into(),
            score,
        }
    }
}

/// Ranked, size-bounded list of the best scores
///
/// Entries are kept in descending score order. An entry that ties an existing
/// score is ranked below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighscoreLedger {
    entries: Vec<HighscoreEntry>,
    capacity: usize,
}

impl HighscoreLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a ledger from stored entries, restoring rank order and capacity
    pub fn from_entries(mut entries: Vec<HighscoreEntry>, capacity: usize) -> Self {
        // stable: equal scores keep their stored order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Load from `store`; unreadable data yields an empty ledger
    pub fn load(store: &impl LedgerStore, capacity: usize) -> Self {
        match store.load() {
            Ok(entries) => Self::from_entries(entries, capacity),
            Err(err) => {
                warn!(error = %err, "highscores could not be loaded, starting empty");
                Self::new(capacity)
            }
        }
    }

    /// Insert an entry at its rank and return where it landed.
    ///
    /// `None` means the entry ranked past the capacity and was dropped.
    pub fn insert(&mut self, entry: HighscoreEntry) -> Option<usize> {
        let position = self
            .entries
            .iter()
            .position(|existing| existing.score < entry.score)
            .unwrap_or(self.entries.len());

        self.entries.insert(position, entry);
        self.entries.truncate(self.capacity);

        (position < self.entries.len()).then_some(position)
    }

    /// Whether `score` would earn a place in the ledger
    pub fn is_qualifying(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        match self.lowest_score() {
            Some(lowest) if self.is_full() => score > lowest,
            _ => self.capacity > 0,
        }
    }

    pub fn lowest_score(&self) -> Option<u32> {
        self.entries.last().map(|entry| entry.score)
    }

    pub fn entries(&self) -> &[HighscoreEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
}
