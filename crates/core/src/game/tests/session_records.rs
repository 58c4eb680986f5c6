//! Tests for the one-record-per-session guarantee across every terminal path.

use std::io;

use super::support::*;

/// Store whose appends always fail, counting attempts.
#[derive(Default)]
struct BrokenStore {
    attempts: usize,
}

impl HistoryStore for BrokenStore {
    fn load(&self) -> Vec<SessionRecord> {
        Vec::new()
    }

    fn append(&mut self, _record: SessionRecord) -> Result<(), StoreError> {
        self.attempts += 1;
        Err(StoreError::Io(io::Error::other("disk full")))
    }
}

fn finish_and_pound(
    session: &mut GameSession<'_>,
    store: &mut MemoryHistory,
    actions: &[PlayerAction],
) {
    for action in actions {
        step(session, store, *action);
    }
    assert!(session.status().is_terminal());
    for action in [PlayerAction::Quit, PlayerAction::Move(East), PlayerAction::PlaceTrap] {
        step(session, store, action);
    }
}

#[test]
fn win_appends_exactly_one_record() {
    let model = PredictionModel::empty();
    let mut session = open_race_fixture(&model);
    let mut store = MemoryHistory::new();
    finish_and_pound(&mut session, &mut store, &moves(&[East, East, East, East]));

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].result, SessionResult::Win);
}

#[test]
fn loss_appends_exactly_one_record() {
    let model = PredictionModel::empty();
    let mut session = session_on(
        &model,
        config_for(5, false),
        &["....."; 5],
        placement(Pos::new(0, 2), Pos::new(1, 2), None, Pos::new(0, 4)),
    );
    let mut store = MemoryHistory::new();
    finish_and_pound(&mut session, &mut store, &moves(&[North]));

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].result, SessionResult::Loss);
    assert!(store.records()[0].moves.is_empty());
}

#[test]
fn quit_appends_exactly_one_record() {
    let model = PredictionModel::empty();
    let mut session = sealed_agent_fixture(&model);
    let mut store = MemoryHistory::with_records(vec![SessionRecord {
        moves: vec![South],
        result: SessionResult::Loss,
        grid_size: 9,
        successful_traps: 0,
    }]);
    let mut actions = moves(&[East, East]);
    actions.push(PlayerAction::Quit);
    finish_and_pound(&mut session, &mut store, &actions);

    assert_eq!(store.len(), 2, "one prior record plus this session");
    let record = &store.records()[1];
    assert_eq!(record.result, SessionResult::Quit);
    assert_eq!(record.moves, vec![East, East]);
}

#[test]
fn failed_append_surfaces_once_and_keeps_the_record() {
    let model = PredictionModel::empty();
    let mut session = open_race_fixture(&model);
    let mut store = BrokenStore::default();

    let err = session.apply_action(PlayerAction::Quit, &mut store).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
    assert_eq!(session.status(), SessionStatus::Quit);
    assert_eq!(session.record().map(|record| record.result), Some(SessionResult::Quit));

    let report = session.apply_action(PlayerAction::Quit, &mut store).unwrap();
    assert!(report.events.is_empty());
    assert_eq!(store.attempts, 1);
}
