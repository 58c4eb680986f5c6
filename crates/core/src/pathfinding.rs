//! Breadth-first shortest-path queries over a static obstacle grid.
//! Neighbor order is fixed (north, south, west, east) so every query is deterministic.
//! This module does not know about agents, traps, or turn order.

use std::collections::VecDeque;

use crate::state::Grid;
use crate::types::{Direction, Pos};

/// In-bounds, non-wall orthogonal neighbors of `pos` in direction order.
pub fn neighbors(pos: Pos, grid: &Grid) -> Vec<Pos> {
    Direction::ALL
        .iter()
        .map(|direction| pos.step(*direction))
        .filter(|next| grid.is_walkable(*next))
        .collect()
}

/// First cell on a shortest path from `start` to `target`.
///
/// Returns `start` itself when the two coincide and `None` when `target` cannot be
/// reached (a wall target is never reached). Among several shortest paths the one
/// discovered first by the BFS wins.
pub fn first_step(start: Pos, target: Pos, grid: &Grid) -> Option<Pos> {
    if start == target {
        return Some(start);
    }
    let came_from = search(start, target, grid);
    if !grid.in_bounds(target) {
        return None;
    }
    let mut current = target;
    loop {
        let prev = came_from[grid.index(current)]?;
        if prev == start {
            return Some(current);
        }
        current = prev;
    }
}

/// Number of steps on a shortest path, or `None` if unreachable.
pub fn path_length(start: Pos, target: Pos, grid: &Grid) -> Option<u32> {
    if start == target {
        return Some(0);
    }
    let came_from = search(start, target, grid);
    if !grid.in_bounds(target) {
        return None;
    }
    let mut current = target;
    let mut steps = 0;
    while current != start {
        current = came_from[grid.index(current)]?;
        steps += 1;
    }
    Some(steps)
}

/// BFS distance from `start` to every cell, indexed row-major. Unreached cells are `None`.
pub fn distance_map(start: Pos, grid: &Grid) -> Vec<Option<u32>> {
    let mut distances = vec![None; grid.size() * grid.size()];
    if !grid.in_bounds(start) {
        return distances;
    }
    distances[grid.index(start)] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let next_distance = distances[grid.index(current)].map_or(0, |d| d + 1);
        for neighbor in neighbors(current, grid) {
            let slot = grid.index(neighbor);
            if distances[slot].is_none() {
                distances[slot] = Some(next_distance);
                queue.push_back(neighbor);
            }
        }
    }
    distances
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Predecessor table of a BFS from `start`, stopping early once `stop_at` is discovered.
fn search(start: Pos, stop_at: Pos, grid: &Grid) -> Vec<Option<Pos>> {
    let cells = grid.size() * grid.size();
    let mut came_from: Vec<Option<Pos>> = vec![None; cells];
    let mut visited = vec![false; cells];
    if !grid.in_bounds(start) {
        return came_from;
    }
    visited[grid.index(start)] = true;
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for neighbor in neighbors(current, grid) {
            let slot = grid.index(neighbor);
            if visited[slot] {
                continue;
            }
            visited[slot] = true;
            came_from[slot] = Some(current);
            if neighbor == stop_at {
                return came_from;
            }
            queue.push_back(neighbor);
        }
    }
    came_from
}
