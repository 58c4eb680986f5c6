//! Cross-session record store: one `SessionRecord` per finished play-through.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Direction, SessionResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub moves: Vec<Direction>,
    pub result: SessionResult,
    #[serde(rename = "grid")]
    pub grid_size: usize,
    #[serde(default)]
    pub successful_traps: u32,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("history store I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("history store encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Append-only list of finished sessions.
///
/// `load` never fails: an unreadable backing store reads as empty history.
pub trait HistoryStore {
    fn load(&self) -> Vec<SessionRecord>;
    fn append(&mut self, record: SessionRecord) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryHistory {
    records: Vec<SessionRecord>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistoryStore for MemoryHistory {
    fn load(&self) -> Vec<SessionRecord> {
        self.records.clone()
    }

    fn append(&mut self, record: SessionRecord) -> Result<(), StoreError> {
        self.records.push(record);
        Ok(())
    }
}

/// Aggregate figures over a record list, as shown on a statistics screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub quits: usize,
    /// Percentage in `[0, 100]`; zero when there are no records.
    pub win_rate: f64,
    pub avg_moves: f64,
    pub total_traps: u64,
    pub avg_traps: f64,
}

impl HistoryStats {
    pub fn from_records(records: &[SessionRecord]) -> Self {
        let total = records.len();
        let count = |result: SessionResult| {
            records.iter().filter(|record| record.result == result).count()
        };
        let wins = count(SessionResult::Win);
        let losses = count(SessionResult::Loss);
        let quits = count(SessionResult::Quit);
        let total_moves: usize = records.iter().map(|record| record.moves.len()).sum();
        let total_traps: u64 =
            records.iter().map(|record| u64::from(record.successful_traps)).sum();

        let per_game = |value: f64| if total == 0 { 0.0 } else { value / total as f64 };
        Self {
            total,
            wins,
            losses,
            quits,
            win_rate: per_game(wins as f64 * 100.0),
            avg_moves: per_game(total_moves as f64),
            total_traps,
            avg_traps: per_game(total_traps as f64),
        }
    }
}
