//! Idle/demo mode - AI steering for the player
//!
//! Dodges the closest hazard that is about to land on the player and
//! otherwise drifts toward the lowest reachable power-up.

use super::entity::FallingEntity;
use super::sprites::SpriteMetrics;
use super::state::GameState;
use crate::consts::PLAYER_CIRCLE_LIFT;

/// Extra horizontal clearance the AI keeps from hazards
const DODGE_MARGIN: f32 = 30.0;
/// Only hazards this far above the player circle count as threats
const LOOKAHEAD: f32 = 260.0;
/// Close enough to a power-up to stop steering
const SETTLE_DISTANCE: f32 = 4.0;

fn live(state: &GameState) -> impl Iterator<Item = &FallingEntity> {
    state
        .pool
        .released(state.release_count())
        .map(|(_, e)| e)
        .filter(|e| e.is_active())
}

/// Steering direction for this tick: -1 left, 1 right, 0 stay
pub fn steer(state: &GameState, sprites: &dyn SpriteMetrics) -> f32 {
    let (player_center, player_radius) = state.player.circle(PLAYER_CIRCLE_LIFT);
    let divisor = state.tuning.hit_radius_divisor;

    // Most urgent threat: lowest hazard in the danger column
    let threat = live(state)
        .filter(|e| e.kind.is_hazard())
        .map(|e| e.bounding_circle(sprites, divisor))
        .filter(|(c, r)| {
            let above = player_center.y - c.y;
            (c.x - player_center.x).abs() < player_radius + r + DODGE_MARGIN
                && above > -player_radius
                && above < LOOKAHEAD + player_radius
        })
        .max_by(|a, b| a.0.y.total_cmp(&b.0.y));

    if let Some((center, _)) = threat {
        // Run toward the side with more room when directly underneath
        let away = player_center.x - center.x;
        if away.abs() < 1.0 {
            let room_right = state.tuning.screen_width - player_center.x;
            return if room_right > player_center.x { 1.0 } else { -1.0 };
        }
        return away.signum();
    }

    let target = live(state)
        .filter(|e| !e.kind.is_hazard())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.bounding_circle(sprites, divisor).0.x);

    match target {
        Some(x) if (x - player_center.x).abs() > SETTLE_DISTANCE => (x - player_center.x).signum(),
        _ => 0.0,
    }
}
