//! Stable snapshot hashing for deterministic verification.
//! This module keeps hashing separate from turn resolution.
//! It does not own replay execution or store persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.y);
    hasher.write_i32(pos.x);
}

fn write_agent(hasher: &mut Xxh3, agent: &Agent) {
    write_pos(hasher, agent.pos);
    hasher.write_u32(agent.stun);
}

impl GameSession<'_> {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.turn);
        hasher.write_u8(match self.status {
            SessionStatus::Playing => 0,
            SessionStatus::Won => 1,
            SessionStatus::Lost => 2,
            SessionStatus::Quit => 3,
        });
        hasher.write_u32(self.successful_traps);

        let state = &self.state;
        hasher.write_usize(state.grid.size());
        for pos in state.grid.cells().filter(|pos| !state.grid.is_walkable(*pos)) {
            write_pos(&mut hasher, pos);
        }
        write_pos(&mut hasher, state.player);
        write_pos(&mut hasher, state.goal);
        write_agent(&mut hasher, &state.primary);
        if let Some(secondary) = &state.secondary {
            write_agent(&mut hasher, secondary);
        }

        hasher.write_u32(state.traps_remaining);
        for pos in state.traps.iter() {
            write_pos(&mut hasher, pos);
        }
        for direction in &state.moves {
            hasher.write_u8(direction.index() as u8);
        }
        if let Some(direction) = self.predicted_move {
            hasher.write_u8(direction.index() as u8);
        }
        hasher.finish()
    }
}
