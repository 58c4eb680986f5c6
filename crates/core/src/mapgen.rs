//! Grid generation, entity placement, and the movement legality rule.

use crate::rng::{GameRng, random_index};
use crate::state::{Grid, Placement};
use crate::types::{Direction, Pos, TileKind};

/// Builds a `size`×`size` grid with `obstacle_count` walls on uniformly random cells.
///
/// Connectivity is not guaranteed. The count is capped at the number of cells.
pub fn generate(size: usize, obstacle_count: usize, rng: &mut GameRng) -> Grid {
    let mut grid = Grid::new(size);
    let target = obstacle_count.min(size * size);
    let mut placed = 0;
    while placed < target {
        let pos = random_cell(size, rng);
        if grid.tile_at(pos) == TileKind::Empty {
            grid.set_tile(pos, TileKind::Wall);
            placed += 1;
        }
    }
    grid
}

/// A uniformly random empty cell, or `None` if the grid is solid wall.
pub fn random_empty_cell(grid: &Grid, rng: &mut GameRng) -> Option<Pos> {
    if grid.size() == 0 || grid.wall_count() == grid.size() * grid.size() {
        return None;
    }
    loop {
        let pos = random_cell(grid.size(), rng);
        if grid.is_walkable(pos) {
            return Some(pos);
        }
    }
}

/// Samples pairwise-distinct empty cells for the player, the agents, and the goal.
///
/// The whole set is redrawn whenever two entities coincide. Returns `None` when the
/// grid has too few empty cells to ever succeed.
pub fn place_entities(grid: &Grid, dual_agents: bool, rng: &mut GameRng) -> Option<Placement> {
    let entity_count = if dual_agents { 4 } else { 3 };
    let empty_cells = grid.size() * grid.size() - grid.wall_count();
    if empty_cells < entity_count {
        return None;
    }
    loop {
        let player = random_empty_cell(grid, rng)?;
        let agent_a = random_empty_cell(grid, rng)?;
        let agent_b = if dual_agents { Some(random_empty_cell(grid, rng)?) } else { None };
        let goal = random_empty_cell(grid, rng)?;
        let placement = Placement { player, agent_a, agent_b, goal };
        if placement.is_pairwise_distinct() {
            return Some(placement);
        }
    }
}

/// Applies one step of `direction`. Blocked moves return `pos` unchanged.
pub fn try_move(pos: Pos, direction: Direction, grid: &Grid) -> Pos {
    let next = pos.step(direction);
    if grid.is_walkable(next) { next } else { pos }
}

fn random_cell(size: usize, rng: &mut GameRng) -> Pos {
    let y = random_index(rng, size);
    let x = random_index(rng, size);
    Pos::new(y as i32, x as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn generate_places_exact_wall_count() {
        let mut rng = seeded(3);
        let grid = generate(9, 12, &mut rng);
        assert_eq!(grid.size(), 9);
        assert_eq!(grid.wall_count(), 12);
    }

    #[test]
    fn generate_caps_walls_at_cell_count() {
        let mut rng = seeded(3);
        let grid = generate(2, 10, &mut rng);
        assert_eq!(grid.wall_count(), 4);
        assert_eq!(random_empty_cell(&grid, &mut rng), None);
    }

    #[test]
    fn generation_is_reproducible_from_seed() {
        let left = generate(9, 20, &mut seeded(11));
        let right = generate(9, 20, &mut seeded(11));
        assert_eq!(left, right);
    }

    #[test]
    fn placement_is_distinct_and_on_empty_cells() {
        for seed in 0..50 {
            let mut rng = seeded(seed);
            let grid = generate(5, 18, &mut rng);
            let placement = place_entities(&grid, true, &mut rng).expect("7 cells remain free");
            assert!(placement.is_pairwise_distinct());
            assert!(placement.agent_b.is_some());
            for pos in placement.positions() {
                assert!(grid.is_walkable(pos), "seed {seed}: {pos:?} is not empty");
            }
        }
    }

    #[test]
    fn placement_gives_up_when_grid_is_too_crowded() {
        let grid = Grid::from_rows(&["##", "#."]);
        assert_eq!(place_entities(&grid, false, &mut seeded(1)), None);
    }

    #[test]
    fn single_agent_placement_has_no_second_agent() {
        let grid = Grid::new(4);
        let placement = place_entities(&grid, false, &mut seeded(5)).expect("open grid");
        assert_eq!(placement.agent_b, None);
        assert_eq!(placement.positions().len(), 3);
    }

    #[test]
    fn blocked_moves_leave_position_unchanged_every_time() {
        let grid = Grid::from_rows(&["..", "#."]);
        let start = Pos::new(0, 0);
        assert_eq!(try_move(start, Direction::South, &grid), start, "wall below");
        assert_eq!(try_move(start, Direction::South, &grid), start, "still blocked");
        assert_eq!(try_move(start, Direction::North, &grid), start, "off the grid");
        assert_eq!(try_move(start, Direction::West, &grid), start);
        assert_eq!(try_move(start, Direction::East, &grid), Pos::new(0, 1));
    }
}
