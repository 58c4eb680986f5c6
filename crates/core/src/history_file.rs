//! JSON-file backed history store.
//!
//! The file holds a single document, `{"games": [record, ...]}`. Appending
//! rewrites the whole document through a temporary sibling file followed by a
//! rename, so an interrupted write leaves the previous store intact.
//!
//! Loading goes through [`JsonHistoryFile::try_load`], which reports exactly
//! why a store could not be read. The [`HistoryStore`] impl collapses every
//! failure into an empty history and logs it.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::{HistoryStore, SessionRecord, StoreError};

#[derive(Serialize, Deserialize, Debug, Default)]
struct HistoryDocument {
    #[serde(default)]
    games: Vec<SessionRecord>,
}

#[derive(Debug, Error)]
pub enum HistoryLoadError {
    #[error("history file does not exist")]
    Missing,
    #[error("history file could not be read: {0}")]
    Io(io::Error),
    #[error("history file is not a valid record list: {0}")]
    Corrupt(serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<Vec<SessionRecord>, HistoryLoadError> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => HistoryLoadError::Missing,
            _ => HistoryLoadError::Io(e),
        })?;
        let document: HistoryDocument =
            serde_json::from_str(&content).map_err(HistoryLoadError::Corrupt)?;
        Ok(document.games)
    }

    fn write_atomic(&self, games: Vec<SessionRecord>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&HistoryDocument { games })?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl HistoryStore for JsonHistoryFile {
    fn load(&self) -> Vec<SessionRecord> {
        match self.try_load() {
            Ok(games) => {
                tracing::debug!(
                    "Loaded {} session records from {}",
                    games.len(),
                    self.path.display()
                );
                games
            }
            Err(HistoryLoadError::Missing) => {
                tracing::debug!("No history at {}, starting empty", self.path.display());
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Ignoring unreadable history"
                );
                Vec::new()
            }
        }
    }

    fn append(&mut self, record: SessionRecord) -> Result<(), StoreError> {
        let mut games = self.load();
        games.push(record);
        let count = games.len();
        self.write_atomic(games)?;
        tracing::debug!("Appended session record #{} to {}", count, self.path.display());
        Ok(())
    }
}
