//! Shared fixtures for the `game` test suites.
//! Layouts are spelled out as rows of `.` and `#` so each scenario reads at a glance.

use super::*;
use crate::history::MemoryHistory;

pub(super) fn config_for(size: usize, dual_agents: bool) -> GameConfig {
    GameConfig { grid_size: size, obstacle_count: 0, dual_agents, ..GameConfig::default() }
}

pub(super) fn placement(player: Pos, agent_a: Pos, agent_b: Option<Pos>, goal: Pos) -> Placement {
    Placement { player, agent_a, agent_b, goal }
}

pub(super) fn session_on<'m>(
    model: &'m PredictionModel,
    config: GameConfig,
    rows: &[&str],
    placement: Placement,
) -> GameSession<'m> {
    GameSession::with_layout(config, 7, model, Grid::from_rows(rows), placement)
        .expect("fixture layout is valid")
}

/// Open 5×5 grid, player top-left, goal top-right, single agent in the far corner.
pub(super) fn open_race_fixture(model: &PredictionModel) -> GameSession<'_> {
    session_on(
        model,
        config_for(5, false),
        &["....."; 5],
        placement(Pos::new(0, 0), Pos::new(4, 4), None, Pos::new(0, 4)),
    )
}

/// Player on the top row; the agent is sealed below a wall and can never reach it.
pub(super) fn sealed_agent_fixture(model: &PredictionModel) -> GameSession<'_> {
    session_on(
        model,
        config_for(5, false),
        &[".....", "#####", ".....", ".....", "....."],
        placement(Pos::new(0, 0), Pos::new(4, 4), None, Pos::new(0, 4)),
    )
}

pub(super) fn step(session: &mut GameSession<'_>, store: &mut MemoryHistory, action: PlayerAction) {
    session.apply_action(action, store).expect("memory store never fails");
}

pub(super) fn moves(directions: &[Direction]) -> Vec<PlayerAction> {
    directions.iter().map(|direction| PlayerAction::Move(*direction)).collect()
}
