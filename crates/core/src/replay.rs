//! Deterministic re-execution of a recorded action list.

use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::game::GameSession;
use crate::history::{MemoryHistory, SessionRecord, StoreError};
use crate::journal::ActionJournal;
use crate::prediction::PredictionModel;
use crate::types::{PlayerAction, SessionStatus};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("action #{index} follows the end of the session")]
    ActionsAfterEnd { index: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReplayResult {
    pub status: SessionStatus,
    pub turn: u32,
    pub snapshot_hash: u64,
    pub record: Option<SessionRecord>,
}

/// Replays `actions` against a fresh session generated from `seed`.
///
/// The session writes into a throwaway in-memory store. Every action must be
/// consumed before or by the terminal transition.
pub fn replay_actions(
    config: &GameConfig,
    seed: u64,
    model: &PredictionModel,
    actions: &[PlayerAction],
) -> Result<ReplayResult, ReplayError> {
    let mut session = GameSession::new(config.clone(), seed, model)?;
    let mut store = MemoryHistory::new();

    for (index, action) in actions.iter().enumerate() {
        if session.status().is_terminal() {
            return Err(ReplayError::ActionsAfterEnd { index });
        }
        session.apply_action(*action, &mut store)?;
    }

    tracing::debug!(seed, actions = actions.len(), status = ?session.status(), "Replay finished");
    Ok(ReplayResult {
        status: session.status(),
        turn: session.turn(),
        snapshot_hash: session.snapshot_hash(),
        record: session.record().cloned(),
    })
}

pub fn replay_journal(
    journal: &ActionJournal,
    model: &PredictionModel,
) -> Result<ReplayResult, ReplayError> {
    replay_actions(&journal.config, journal.seed, model, &journal.actions)
}

#[cfg(test)]
mod tests;
