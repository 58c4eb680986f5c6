//! Per-agent turn resolution.
//! This module decides where one adversary steps during its part of a game turn.
//! It does not own win/loss evaluation or event logging; the session does both.

use crate::mapgen::try_move;
use crate::pathfinding::{first_step, manhattan, neighbors};
use crate::state::{Agent, Grid, Pursuit, TrapSet};
use crate::types::{Direction, Pos};

/// What happened to one agent during its part of a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentTurn {
    /// Skipped movement; `turns_left` is the counter after decrementing.
    Stunned { turns_left: u32 },
    /// Cells entered this turn, in order. Empty when the agent held position.
    Moved { path: Vec<Pos> },
    /// Entered an armed trap at the last cell of `path` and stopped there.
    Trapped { path: Vec<Pos> },
}

impl AgentTurn {
    pub fn path(&self) -> &[Pos] {
        match self {
            Self::Stunned { .. } => &[],
            Self::Moved { path } | Self::Trapped { path } => path,
        }
    }
}

/// Read-only view of the board an agent plans against.
#[derive(Clone, Copy, Debug)]
pub struct AgentView<'a> {
    pub grid: &'a Grid,
    pub player: Pos,
    pub goal: Pos,
    /// The other adversary's cell, if there is one. Agents never step onto it.
    pub other: Option<Pos>,
    /// Where the interceptor heads when the player has no route to the goal.
    pub intercept_fallback: Pos,
    pub close_range: u32,
    pub stun_turns: u32,
}

impl<'a> AgentView<'a> {
    pub fn new(grid: &'a Grid, player: Pos, goal: Pos) -> Self {
        Self {
            grid,
            player,
            goal,
            other: None,
            intercept_fallback: player,
            close_range: 2,
            stun_turns: 2,
        }
    }

    /// Steers the interceptor toward the cell the player is expected to enter.
    pub fn predicting(mut self, predicted: Direction) -> Self {
        self.intercept_fallback = try_move(self.player, predicted, self.grid);
        self
    }
}

/// Two steps when farther than `close_range + 2` from the player, otherwise one.
pub fn step_budget(from: Pos, player: Pos, close_range: u32) -> u32 {
    if manhattan(from, player) > close_range.saturating_add(2) { 2 } else { 1 }
}

/// Runs one agent's turn, mutating its position and stun counter and consuming
/// any trap it walks into.
pub fn take_turn(agent: &mut Agent, traps: &mut TrapSet, view: &AgentView<'_>) -> AgentTurn {
    if agent.is_stunned() {
        agent.stun -= 1;
        return AgentTurn::Stunned { turns_left: agent.stun };
    }

    let budget = step_budget(agent.pos, view.player, view.close_range);
    let mut path = Vec::new();
    for _ in 0..budget {
        let next = match agent.pursuit {
            Pursuit::Intercept => intercept_step(agent.pos, view),
            Pursuit::Chase => chase_step(agent.pos, view),
        };
        if next == agent.pos || view.other == Some(next) {
            break;
        }

        agent.pos = next;
        path.push(next);
        if traps.remove(next) {
            agent.stun = view.stun_turns;
            return AgentTurn::Trapped { path };
        }
        if next == view.player {
            break;
        }
    }
    AgentTurn::Moved { path }
}

/// Next cell toward the player's next step on their route to the goal.
pub fn intercept_target(view: &AgentView<'_>) -> Pos {
    first_step(view.player, view.goal, view.grid).unwrap_or(view.intercept_fallback)
}

fn intercept_step(from: Pos, view: &AgentView<'_>) -> Pos {
    let target = intercept_target(view);
    first_step(from, target, view.grid)
        .unwrap_or_else(|| closest_neighbor(from, target, view, false))
}

fn chase_step(from: Pos, view: &AgentView<'_>) -> Pos {
    closest_neighbor(from, view.player, view, true)
}

/// Legal neighbor of `from` nearest to `target` by Manhattan distance, first in
/// direction order on ties. With `must_improve`, only a cell strictly closer than
/// `from` qualifies; otherwise any legal cell beats staying put.
fn closest_neighbor(from: Pos, target: Pos, view: &AgentView<'_>, must_improve: bool) -> Pos {
    let mut best = from;
    let mut best_distance = if must_improve { manhattan(from, target) } else { u32::MAX };
    for candidate in neighbors(from, view.grid) {
        if view.other == Some(candidate) {
            continue;
        }
        let distance = manhattan(candidate, target);
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}
