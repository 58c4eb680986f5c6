use std::iter;

use crate::types::*;

/// Row-major slot of `pos` in a `size`×`size` array, or `None` off the grid.
fn slot_of(size: usize, pos: Pos) -> Option<usize> {
    let in_bounds =
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < size && (pos.y as usize) < size;
    in_bounds.then(|| row_major(size, pos))
}

fn row_major(size: usize, pos: Pos) -> usize {
    (pos.y as usize) * size + (pos.x as usize)
}

fn pos_of(size: usize, slot: usize) -> Pos {
    Pos::new((slot / size) as i32, (slot % size) as i32)
}

/// Square tile grid. Out-of-bounds lookups read as walls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size, tiles: vec![TileKind::Empty; size * size] }
    }

    /// Builds a grid from rows of `.` (empty) and `#` (wall). Any other character is empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new(rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(rows.len()).enumerate() {
                if ch == '#' {
                    grid.set_tile(Pos { y: y as i32, x: x as i32 }, TileKind::Wall);
                }
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        slot_of(self.size, pos).map_or(TileKind::Wall, |slot| self.tiles[slot])
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        slot_of(self.size, pos).is_some()
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Empty
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if let Some(slot) = slot_of(self.size, pos) {
            self.tiles[slot] = tile;
        }
    }

    pub fn wall_count(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile == TileKind::Wall).count()
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        (0..self.tiles.len()).map(move |slot| pos_of(size, slot))
    }

    /// Row-major slot of an in-bounds `pos`, for per-cell scratch arrays.
    pub(crate) fn index(&self, pos: Pos) -> usize {
        row_major(self.size, pos)
    }
}

/// Armed trap cells, stored as a per-cell flag so membership and removal are O(1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrapSet {
    size: usize,
    armed: Vec<bool>,
    count: usize,
}

impl TrapSet {
    pub fn new(size: usize) -> Self {
        Self { size, armed: vec![false; size * size], count: 0 }
    }

    fn slot(&self, pos: Pos) -> Option<usize> {
        slot_of(self.size, pos)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.slot(pos).is_some_and(|slot| self.armed[slot])
    }

    /// Arms `pos`. Returns false if it was already armed or lies off the grid.
    pub fn insert(&mut self, pos: Pos) -> bool {
        match self.slot(pos) {
            Some(slot) if !self.armed[slot] => {
                self.armed[slot] = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    /// Disarms `pos`. Returns whether a trap was actually there.
    pub fn remove(&mut self, pos: Pos) -> bool {
        match self.slot(pos) {
            Some(slot) if self.armed[slot] => {
                self.armed[slot] = false;
                self.count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Armed cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        self.armed
            .iter()
            .enumerate()
            .filter(|(_, armed)| **armed)
            .map(move |(slot, _)| pos_of(size, slot))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pursuit {
    /// Cut off the player's shortest route to the goal.
    Intercept,
    /// Close Manhattan distance to the player's current cell.
    Chase,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    pub id: AgentId,
    pub pos: Pos,
    pub stun: u32,
    pub pursuit: Pursuit,
}

impl Agent {
    pub fn new(id: AgentId, pos: Pos) -> Self {
        let pursuit = match id {
            AgentId::Primary => Pursuit::Intercept,
            AgentId::Secondary => Pursuit::Chase,
        };
        Self { id, pos, stun: 0, pursuit }
    }

    pub fn is_stunned(&self) -> bool {
        self.stun > 0
    }
}

/// Entity layout fixed at session start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub player: Pos,
    pub agent_a: Pos,
    pub agent_b: Option<Pos>,
    pub goal: Pos,
}

impl Placement {
    pub fn positions(&self) -> Vec<Pos> {
        let mut positions = vec![self.player, self.agent_a];
        positions.extend(self.agent_b);
        positions.push(self.goal);
        positions
    }

    pub fn is_pairwise_distinct(&self) -> bool {
        let positions = self.positions();
        positions.iter().enumerate().all(|(i, a)| positions[i + 1..].iter().all(|b| a != b))
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub player: Pos,
    pub goal: Pos,
    pub primary: Agent,
    pub secondary: Option<Agent>,
    pub traps: TrapSet,
    pub traps_remaining: u32,
    pub moves: Vec<Direction>,
}

impl GameState {
    pub fn new(grid: Grid, placement: Placement, trap_budget: u32) -> Self {
        let traps = TrapSet::new(grid.size());
        Self {
            grid,
            player: placement.player,
            goal: placement.goal,
            primary: Agent::new(AgentId::Primary, placement.agent_a),
            secondary: placement.agent_b.map(|pos| Agent::new(AgentId::Secondary, pos)),
            traps,
            traps_remaining: trap_budget,
            moves: Vec::new(),
        }
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        iter::once(&self.primary).chain(self.secondary.as_ref())
    }

    pub fn agent_on(&self, pos: Pos) -> Option<AgentId> {
        self.agents().find(|agent| agent.pos == pos).map(|agent| agent.id)
    }
}
