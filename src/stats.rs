//! End-of-session summary handed to the stats screen

use serde::{Deserialize, Serialize};

use crate::percentage;
use crate::sim::{EndReason, FallingEntity, GameState, Pickups};

/// Final numbers for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    /// Hazards that struck the player
    pub hits: u32,
    /// Hazards that fell past the player
    pub misses: u32,
    pub pickups: Pickups,
    pub ticks: u64,
    pub difficulty: f32,
    pub end_reason: Option<EndReason>,
}

impl SessionSummary {
    pub fn from_state(state: &GameState) -> Self {
        let (hits, misses) = count_outcomes(&state.history);
        Self {
            score: state.score,
            hits,
            misses,
            pickups: state.pickups,
            ticks: state.time_ticks,
            difficulty: state.difficulty.value(),
            end_reason: state.end_reason,
        }
    }

    /// Share of hazards dodged, in percent. 0 when no hazard finished.
    pub fn dodge_accuracy(&self) -> f32 {
        dodge_accuracy(self.hits, self.misses)
    }
}

/// `(hits, misses)` across a retired-entity history
pub fn count_outcomes(history: &[FallingEntity]) -> (u32, u32) {
    history.iter().fold((0, 0), |(hits, misses), e| {
        (hits + e.hit() as u32, misses + e.missed() as u32)
    })
}

/// `misses / (hits + misses) * 100`, or 0 when both are zero
pub fn dodge_accuracy(hits: u32, misses: u32) -> f32 {
    percentage(misses, hits + misses)
}
