//! Cross-session Markov model of player movement.
//!
//! The model counts which direction followed every context of 1..=`order` prior
//! moves across all recorded sessions. Queries blend those counts with a weak
//! global prior, a recency histogram of the current session, and a flat floor,
//! then sample a direction proportionally. Sampling rather than taking the
//! argmax keeps the adversary from being perfectly predictable.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::history::SessionRecord;
use crate::rng::{GameRng, random_index, random_unit};
use crate::types::Direction;

/// Weight applied to the all-history direction histogram.
pub const GLOBAL_PRIOR_WEIGHT: f64 = 0.5;
/// How many of the current session's most recent moves feed the recency term.
pub const RECENCY_WINDOW: usize = 8;

/// Per-direction counts indexed by [`Direction::index`].
pub type DirectionCounts = [u32; 4];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictionWeights {
    pub order: usize,
    pub recency_weight: f64,
    pub fuzz: f64,
}

impl Default for PredictionWeights {
    fn default() -> Self {
        Self { order: 2, recency_weight: 2.0, fuzz: 0.15 }
    }
}

impl From<&GameConfig> for PredictionWeights {
    fn from(config: &GameConfig) -> Self {
        Self {
            order: config.markov_order,
            recency_weight: config.recency_weight,
            fuzz: config.predict_fuzz,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredictionModel {
    contexts: BTreeMap<Vec<Direction>, DirectionCounts>,
    global_counts: DirectionCounts,
}

impl PredictionModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn build(records: &[SessionRecord], order: usize) -> Self {
        Self::from_sequences(records.iter().map(|record| record.moves.as_slice()), order)
    }

    pub fn from_sequences<'a>(
        sequences: impl IntoIterator<Item = &'a [Direction]>,
        order: usize,
    ) -> Self {
        let mut model = Self::default();
        for moves in sequences {
            for (i, next) in moves.iter().enumerate() {
                model.global_counts[next.index()] += 1;
                for k in 1..=order.min(i) {
                    let context = moves[i - k..i].to_vec();
                    model.contexts.entry(context).or_insert([0; 4])[next.index()] += 1;
                }
            }
        }
        model
    }

    pub fn context_counts(&self, context: &[Direction]) -> Option<&DirectionCounts> {
        self.contexts.get(context)
    }

    pub fn global_counts(&self) -> &DirectionCounts {
        &self.global_counts
    }

    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Unnormalized score per direction for the move following `current`.
    pub fn scores(&self, current: &[Direction], weights: &PredictionWeights) -> [f64; 4] {
        let mut scores = [0.0; 4];
        for k in (1..=weights.order).rev() {
            if current.len() < k {
                continue;
            }
            if let Some(counts) = self.contexts.get(&current[current.len() - k..]) {
                for (score, count) in scores.iter_mut().zip(counts) {
                    *score += f64::from(*count);
                }
            }
        }

        let mut recent: DirectionCounts = [0; 4];
        for direction in &current[current.len().saturating_sub(RECENCY_WINDOW)..] {
            recent[direction.index()] += 1;
        }

        for direction in Direction::ALL {
            let i = direction.index();
            scores[i] += GLOBAL_PRIOR_WEIGHT * f64::from(self.global_counts[i])
                + weights.recency_weight * f64::from(recent[i]);
            scores[i] += weights.fuzz;
        }
        scores
    }

    /// Samples the player's next direction proportionally to [`Self::scores`].
    pub fn predict(
        &self,
        current: &[Direction],
        weights: &PredictionWeights,
        rng: &mut GameRng,
    ) -> Direction {
        sample_weighted(&self.scores(current, weights), rng)
    }
}

fn sample_weighted(scores: &[f64; 4], rng: &mut GameRng) -> Direction {
    let total: f64 = scores.iter().sum();
    if total <= 0.0 {
        return Direction::ALL[random_index(rng, Direction::ALL.len())];
    }
    let roll = random_unit(rng) * total;
    let mut acc = 0.0;
    for direction in Direction::ALL {
        acc += scores[direction.index()];
        if roll < acc {
            return direction;
        }
    }
    // Float rounding can leave `roll` a hair above the final sum.
    Direction::ALL
        .into_iter()
        .rev()
        .find(|direction| scores[direction.index()] > 0.0)
        .unwrap_or(Direction::East)
}
