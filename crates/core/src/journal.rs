//! Recorded action list for one session, sufficient to reproduce it with [`crate::replay`].

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::types::PlayerAction;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionJournal {
    pub format_version: u16,
    pub seed: u64,
    pub config: GameConfig,
    /// How many leading store records the prediction model was built from.
    #[serde(default)]
    pub history_len: usize,
    pub actions: Vec<PlayerAction>,
    #[serde(default)]
    pub final_snapshot_hash: Option<u64>,
}

impl ActionJournal {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            seed,
            config,
            history_len: 0,
            actions: Vec::new(),
            final_snapshot_hash: None,
        }
    }

    pub fn push(&mut self, action: PlayerAction) {
        self.actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn journal_serializes_actions_with_lowercase_directions() {
        let mut journal = ActionJournal::new(42, GameConfig::default());
        journal.push(PlayerAction::Move(Direction::East));
        journal.push(PlayerAction::PlaceTrap);
        journal.push(PlayerAction::Quit);

        let json = serde_json::to_value(&journal).expect("journal serializes");
        assert_eq!(
            json["actions"],
            serde_json::json!([{"move": "east"}, "place_trap", "quit"])
        );
        assert_eq!(json["seed"], 42);

        let parsed: ActionJournal = serde_json::from_value(json).expect("journal parses");
        assert_eq!(parsed, journal);
    }

    #[test]
    fn partial_config_in_journal_uses_defaults() {
        let parsed: ActionJournal = serde_json::from_str(
            r#"{"format_version": 1, "seed": 3, "config": {"grid_size": 5}, "actions": []}"#,
        )
        .expect("journal parses");
        assert_eq!(parsed.config.grid_size, 5);
        assert_eq!(parsed.config.trap_budget, GameConfig::default().trap_budget);
        assert_eq!(parsed.history_len, 0);
        assert_eq!(parsed.final_snapshot_hash, None);
    }
}
