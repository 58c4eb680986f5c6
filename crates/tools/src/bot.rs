//! Scripted stand-in for a human player.
//!
//! The bot walks the shortest route to the goal, drops a trap when an agent is
//! about to reach it, and occasionally wanders so the recorded histories are not
//! all identical.

use nemesis_core::pathfinding::{first_step, path_length};
use nemesis_core::{Direction, GameState, PlayerAction, Pos};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Chance, in percent, of taking a random direction instead of the planned one.
const WANDER_PERCENT: u64 = 15;
const THREAT_RANGE: u32 = 2;

pub struct Bot {
    rng: ChaCha8Rng,
}

impl Bot {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn choose(&mut self, state: &GameState) -> PlayerAction {
        let threatened = state.agents().any(|agent| {
            !agent.is_stunned()
                && path_length(agent.pos, state.player, &state.grid)
                    .is_some_and(|len| len <= THREAT_RANGE)
        });
        if threatened && state.traps_remaining > 0 && !state.traps.contains(state.player) {
            return PlayerAction::PlaceTrap;
        }

        if self.rng.next_u64() % 100 < WANDER_PERCENT {
            let pick = self.rng.next_u64() as usize % Direction::ALL.len();
            return PlayerAction::Move(Direction::ALL[pick]);
        }

        match first_step(state.player, state.goal, &state.grid) {
            Some(next) => direction_between(state.player, next)
                .map_or(PlayerAction::Quit, PlayerAction::Move),
            None => PlayerAction::Quit,
        }
    }
}

fn direction_between(from: Pos, to: Pos) -> Option<Direction> {
    Direction::ALL.into_iter().find(|direction| from.step(*direction) == to)
}
