//! Per-session tuning knobs passed explicitly into the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_size: usize,
    pub obstacle_count: usize,
    pub trap_budget: u32,
    pub stun_turns: u32,
    pub markov_order: usize,
    pub recency_weight: f64,
    pub predict_fuzz: f64,
    /// Agents farther than `close_range + 2` get a double step.
    pub close_range: u32,
    pub dual_agents: bool,
    /// When the player has no route to the goal, steer toward the predicted move
    /// instead of the player's current cell.
    pub predictive_intercept: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 9,
            obstacle_count: 12,
            trap_budget: 3,
            stun_turns: 2,
            markov_order: 2,
            recency_weight: 2.0,
            predict_fuzz: 0.15,
            close_range: 2,
            dual_agents: true,
            predictive_intercept: false,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("grid size {0} is too large")]
    GridTooLarge(usize),
    #[error("{obstacles} obstacles leave {free} free cells, need at least {required}")]
    TooManyObstacles { obstacles: usize, free: usize, required: usize },
    #[error("markov order must be at least 1")]
    ZeroMarkovOrder,
    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Largest side length accepted; keeps coordinates comfortably inside `i32`.
pub const MAX_GRID_SIZE: usize = 4096;

impl GameConfig {
    pub fn entity_count(&self) -> usize {
        if self.dual_agents { 4 } else { 3 }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }
        let cells = self.grid_size * self.grid_size;
        let required = self.entity_count() + 1;
        let free = cells.saturating_sub(self.obstacle_count);
        if free < required {
            return Err(ConfigError::TooManyObstacles {
                obstacles: self.obstacle_count,
                free,
                required,
            });
        }
        if self.markov_order == 0 {
            return Err(ConfigError::ZeroMarkovOrder);
        }
        for (name, value) in
            [("recency_weight", self.recency_weight), ("predict_fuzz", self.predict_fuzz)]
        {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}
