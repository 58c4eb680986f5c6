use super::*;
use crate::types::Direction;

const CYCLE: [PlayerAction; 6] = [
    PlayerAction::Move(Direction::North),
    PlayerAction::Move(Direction::East),
    PlayerAction::PlaceTrap,
    PlayerAction::Move(Direction::South),
    PlayerAction::Move(Direction::West),
    PlayerAction::Move(Direction::East),
];

/// Plays `CYCLE` repeatedly until the session ends or `limit` actions were taken.
fn play_live(
    config: &GameConfig,
    seed: u64,
    limit: usize,
) -> (Vec<PlayerAction>, u64, SessionStatus) {
    let model = PredictionModel::empty();
    let mut session = GameSession::new(config.clone(), seed, &model).unwrap();
    let mut store = MemoryHistory::new();
    let mut actions = Vec::new();
    for action in CYCLE.iter().cycle().take(limit) {
        if session.status().is_terminal() {
            break;
        }
        session.apply_action(*action, &mut store).unwrap();
        actions.push(*action);
    }
    (actions, session.snapshot_hash(), session.status())
}

#[test]
fn replay_matches_the_live_session() {
    let config = GameConfig::default();
    for seed in [1_u64, 7, 99, 4242] {
        let (actions, live_hash, live_status) = play_live(&config, seed, 60);
        let replayed =
            replay_actions(&config, seed, &PredictionModel::empty(), &actions).unwrap();
        assert_eq!(replayed.snapshot_hash, live_hash, "seed {seed}");
        assert_eq!(replayed.status, live_status, "seed {seed}");
    }
}

#[test]
fn replay_is_repeatable() {
    let config = GameConfig { dual_agents: false, ..GameConfig::default() };
    let (actions, _, _) = play_live(&config, 31, 40);
    let model = PredictionModel::empty();
    let first = replay_actions(&config, 31, &model, &actions).unwrap();
    let second = replay_actions(&config, 31, &model, &actions).unwrap();
    assert_eq!(first, second);
}

#[test]
fn quit_ends_the_replay_with_a_record() {
    let config = GameConfig::default();
    let result =
        replay_actions(&config, 5, &PredictionModel::empty(), &[PlayerAction::Quit]).unwrap();
    assert_eq!(result.status, SessionStatus::Quit);
    assert_eq!(result.turn, 1);
    let record = result.record.expect("quit emits a record");
    assert_eq!(record.result, crate::types::SessionResult::Quit);
    assert!(record.moves.is_empty());
}

#[test]
fn actions_after_the_end_are_rejected() {
    let actions = [PlayerAction::Quit, PlayerAction::Move(Direction::North)];
    let err = replay_actions(&GameConfig::default(), 5, &PredictionModel::empty(), &actions)
        .unwrap_err();
    assert!(matches!(err, ReplayError::ActionsAfterEnd { index: 1 }), "got {err:?}");
}

#[test]
fn invalid_config_is_reported() {
    let config = GameConfig { grid_size: 0, ..GameConfig::default() };
    let err = replay_actions(&config, 5, &PredictionModel::empty(), &[]).unwrap_err();
    assert!(matches!(err, ReplayError::Config(ConfigError::EmptyGrid)));
}

#[test]
fn journal_replay_uses_its_own_seed_and_config() {
    let config = GameConfig { grid_size: 7, obstacle_count: 5, ..GameConfig::default() };
    let (actions, live_hash, _) = play_live(&config, 12, 30);
    let mut journal = ActionJournal::new(12, config);
    for action in actions {
        journal.push(action);
    }
    let replayed = replay_journal(&journal, &PredictionModel::empty()).unwrap();
    assert_eq!(replayed.snapshot_hash, live_hash);
}
