//! Turn-based session state machine.
//!
//! A `GameSession` owns the grid, entity positions, traps, stun counters, and the
//! player's move history for one play-through. Each call to
//! [`GameSession::apply_action`] resolves the player's action, checks for a
//! terminal outcome, runs the adversaries, and checks again. The first terminal
//! transition appends exactly one [`SessionRecord`] to the history store.

use crate::config::{ConfigError, GameConfig};
use crate::history::{HistoryStore, SessionRecord, StoreError};
use crate::mapgen::{generate, place_entities, try_move};
use crate::prediction::{PredictionModel, PredictionWeights};
use crate::rng::{GameRng, seeded};
use crate::state::{Agent, GameState, Grid, Placement, TrapSet};
use crate::types::*;

pub mod agents;
mod hash;
#[cfg(test)]
mod test_support;

use agents::{AgentTurn, AgentView};

/// Read-only rendering view of a session.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub player: Pos,
    pub agent_a: Pos,
    pub agent_b: Option<Pos>,
    pub goal: Pos,
    pub traps: &'a TrapSet,
    pub traps_remaining: u32,
    pub turn: u32,
    pub last_message: &'a str,
    pub predicted_move: Option<Direction>,
    pub status: SessionStatus,
}

pub struct GameSession<'m> {
    config: GameConfig,
    seed: u64,
    rng: GameRng,
    model: &'m PredictionModel,
    state: GameState,
    status: SessionStatus,
    turn: u32,
    successful_traps: u32,
    last_message: String,
    log: Vec<LogEvent>,
    predicted_move: Option<Direction>,
    record: Option<SessionRecord>,
}

impl<'m> GameSession<'m> {
    /// Generates a grid and entity layout from `seed`.
    pub fn new(
        config: GameConfig,
        seed: u64,
        model: &'m PredictionModel,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = seeded(seed);
        let grid = generate(config.grid_size, config.obstacle_count, &mut rng);
        let placement = place_entities(&grid, config.dual_agents, &mut rng).ok_or_else(|| {
            ConfigError::InvalidLayout("grid has too few empty cells for placement".to_string())
        })?;
        Ok(Self::start(config, seed, rng, model, grid, placement))
    }

    /// Starts from a fixed grid and placement. `seed` still drives prediction sampling.
    pub fn with_layout(
        config: GameConfig,
        seed: u64,
        model: &'m PredictionModel,
        grid: Grid,
        placement: Placement,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.size() != config.grid_size {
            return Err(ConfigError::InvalidLayout(format!(
                "grid is {0}x{0} but config expects {1}x{1}",
                grid.size(),
                config.grid_size
            )));
        }
        if placement.agent_b.is_some() != config.dual_agents {
            return Err(ConfigError::InvalidLayout(
                "second agent must be present exactly when dual_agents is set".to_string(),
            ));
        }
        if let Some(pos) = placement.positions().into_iter().find(|pos| !grid.is_walkable(*pos)) {
            return Err(ConfigError::InvalidLayout(format!(
                "entity at ({}, {}) is not on an empty cell",
                pos.y, pos.x
            )));
        }
        if !placement.is_pairwise_distinct() {
            return Err(ConfigError::InvalidLayout("entities must occupy distinct cells".into()));
        }
        Ok(Self::start(config, seed, seeded(seed), model, grid, placement))
    }

    fn start(
        config: GameConfig,
        seed: u64,
        rng: GameRng,
        model: &'m PredictionModel,
        grid: Grid,
        placement: Placement,
    ) -> Self {
        tracing::info!(seed, dual_agents = config.dual_agents, "Session started");
        let state = GameState::new(grid, placement, config.trap_budget);
        let log = vec![LogEvent::SessionStarted { seed, dual_agents: config.dual_agents }];
        Self {
            config,
            seed,
            rng,
            model,
            state,
            status: SessionStatus::Playing,
            turn: 1,
            successful_traps: 0,
            last_message: String::new(),
            log,
            predicted_move: None,
            record: None,
        }
    }

    /// Resolves one player action and, while still playing, one adversary turn.
    ///
    /// Actions after a terminal state are ignored. A store failure is returned
    /// after the session has already reached its terminal state; the record stays
    /// available through [`Self::record`] and is never appended twice.
    pub fn apply_action(
        &mut self,
        action: PlayerAction,
        store: &mut impl HistoryStore,
    ) -> Result<TurnReport, StoreError> {
        if self.status.is_terminal() {
            tracing::debug!(?action, status = ?self.status, "Ignoring action after session end");
            return Ok(TurnReport { turn: self.turn, status: self.status, events: Vec::new() });
        }

        let turn = self.turn;
        let mut events = Vec::new();
        self.resolve_player(action, &mut events);

        let outcome = if self.state.player == self.state.goal {
            Some(SessionResult::Win)
        } else if action == PlayerAction::Quit {
            Some(SessionResult::Quit)
        } else {
            // Stepping onto an agent is not a loss yet; it may move off again.
            self.run_agents(&mut events);
            self.state.agent_on(self.state.player).map(|_| SessionResult::Loss)
        };

        let pending_record = match outcome {
            Some(result) => Some(self.finish(result, &mut events)),
            None => {
                self.turn += 1;
                None
            }
        };

        self.last_message = events.iter().rev().find_map(LogEvent::message).unwrap_or_default();
        tracing::debug!(turn, status = ?self.status, events = events.len(), "Turn resolved");
        self.log.extend(events.iter().cloned());

        if let Some(record) = pending_record {
            store.append(record)?;
        }
        Ok(TurnReport { turn, status: self.status, events })
    }

    fn resolve_player(&mut self, action: PlayerAction, events: &mut Vec<LogEvent>) {
        match action {
            PlayerAction::Move(direction) => {
                let to = try_move(self.state.player, direction, &self.state.grid);
                if to == self.state.player {
                    events.push(LogEvent::MoveBlocked { direction });
                } else {
                    self.state.player = to;
                    self.state.moves.push(direction);
                    events.push(LogEvent::PlayerMoved { direction, to });
                }
            }
            PlayerAction::PlaceTrap => {
                if self.state.traps_remaining > 0 && self.state.traps.insert(self.state.player) {
                    self.state.traps_remaining -= 1;
                    events.push(LogEvent::TrapPlaced {
                        pos: self.state.player,
                        remaining: self.state.traps_remaining,
                    });
                } else {
                    events.push(LogEvent::TrapUnavailable);
                }
            }
            PlayerAction::Quit => {}
        }
    }

    fn run_agents(&mut self, events: &mut Vec<LogEvent>) {
        let player = self.state.player;
        let goal = self.state.goal;

        self.predicted_move = if self.state.primary.is_stunned() {
            None
        } else {
            let weights = PredictionWeights::from(&self.config);
            let direction = self.model.predict(&self.state.moves, &weights, &mut self.rng);
            events.push(LogEvent::MovePredicted { direction });
            Some(direction)
        };

        let mut view = AgentView {
            other: self.state.secondary.as_ref().map(|agent| agent.pos),
            close_range: self.config.close_range,
            stun_turns: self.config.stun_turns,
            ..AgentView::new(&self.state.grid, player, goal)
        };
        if self.config.predictive_intercept
            && let Some(direction) = self.predicted_move
        {
            view = view.predicting(direction);
        }
        let from = self.state.primary.pos;
        let turn = agents::take_turn(&mut self.state.primary, &mut self.state.traps, &view);
        self.successful_traps += record_agent_turn(&self.state.primary, from, &turn, events);

        let primary_pos = self.state.primary.pos;
        if let Some(secondary) = self.state.secondary.as_mut() {
            let view = AgentView { other: Some(primary_pos), ..view };
            let from = secondary.pos;
            let turn = agents::take_turn(secondary, &mut self.state.traps, &view);
            self.successful_traps += record_agent_turn(secondary, from, &turn, events);
        }
    }

    fn finish(&mut self, result: SessionResult, events: &mut Vec<LogEvent>) -> SessionRecord {
        self.status = match result {
            SessionResult::Win => SessionStatus::Won,
            SessionResult::Loss => SessionStatus::Lost,
            SessionResult::Quit => SessionStatus::Quit,
        };
        let record = SessionRecord {
            moves: self.state.moves.clone(),
            result,
            grid_size: self.state.grid.size(),
            successful_traps: self.successful_traps,
        };
        events.push(LogEvent::SessionEnded { result, turn: self.turn });
        tracing::info!(
            seed = self.seed,
            ?result,
            turn = self.turn,
            moves = record.moves.len(),
            successful_traps = self.successful_traps,
            "Session ended"
        );
        self.record = Some(record.clone());
        record
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn successful_traps(&self) -> u32 {
        self.successful_traps
    }

    /// The record emitted at the terminal transition, if the session has ended.
    pub fn record(&self) -> Option<&SessionRecord> {
        self.record.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.state.grid,
            player: self.state.player,
            agent_a: self.state.primary.pos,
            agent_b: self.state.secondary.as_ref().map(|agent| agent.pos),
            goal: self.state.goal,
            traps: &self.state.traps,
            traps_remaining: self.state.traps_remaining,
            turn: self.turn,
            last_message: &self.last_message,
            predicted_move: self.predicted_move,
            status: self.status,
        }
    }
}

/// Logs one agent's turn and returns 1 if it was freshly stunned by a trap.
fn record_agent_turn(
    agent: &Agent,
    from: Pos,
    turn: &AgentTurn,
    events: &mut Vec<LogEvent>,
) -> u32 {
    let id = agent.id;
    match turn {
        AgentTurn::Stunned { turns_left } => {
            tracing::debug!(agent = id.label(), turns_left, "Agent stunned, skipping move");
            events.push(LogEvent::AgentStunned { agent: id, turns_left: *turns_left });
            0
        }
        AgentTurn::Moved { path } if path.is_empty() => {
            tracing::debug!(agent = id.label(), pos = ?from, "Agent held position");
            events.push(LogEvent::AgentHeld { agent: id });
            0
        }
        AgentTurn::Moved { path } => {
            tracing::debug!(
                agent = id.label(),
                ?from,
                to = ?agent.pos,
                steps = path.len(),
                "Agent moved"
            );
            events.push(LogEvent::AgentMoved { agent: id, from, to: agent.pos });
            0
        }
        AgentTurn::Trapped { .. } => {
            tracing::debug!(agent = id.label(), pos = ?agent.pos, stun = agent.stun, "Trap sprung");
            events.push(LogEvent::AgentMoved { agent: id, from, to: agent.pos });
            events.push(LogEvent::AgentTrapped { agent: id, pos: agent.pos });
            u32::from(agent.is_stunned())
        }
    }
}
