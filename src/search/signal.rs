//! Placeholder display signals: a pseudo-random match percentage and a
//! rank-position trending flag. Neither is a measured statistic.

use rand::Rng;

use crate::models::{RankedResult, Repository};

pub const MATCH_PERCENT_MIN: u8 = 70;
pub const MATCH_PERCENT_MAX: u8 = 99;

/// Leading positions of the current ordering flagged as trending.
pub const TRENDING_POSITIONS: usize = 3;

/// Source of the match-percentage draws.
pub trait RandomSource: Send {
    /// Uniform integer in `low..=high`.
    fn pick(&mut self, low: u8, high: u8) -> u8;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, low: u8, high: u8) -> u8 {
        rand::rng().random_range(low..=high)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<u8>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(values: impl Into<Vec<u8>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for FixedSequence {
    fn pick(&mut self, low: u8, _high: u8) -> u8 {
        if self.values.is_empty() {
            return low;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Attach signals to an already ranked sequence. Draws fresh values on every
/// call; callers must not cache the output across re-sorts.
pub fn apply_signals(ranked: Vec<Repository>, random: &mut dyn RandomSource) -> Vec<RankedResult> {
    ranked
        .into_iter()
        .enumerate()
        .map(|(i, repository)| {
            let drawn = random.pick(MATCH_PERCENT_MIN, MATCH_PERCENT_MAX);
            RankedResult {
                repository,
                match_percent: drawn.clamp(MATCH_PERCENT_MIN, MATCH_PERCENT_MAX),
                is_trending: i < TRENDING_POSITIONS,
            }
        })
        .collect()
}
