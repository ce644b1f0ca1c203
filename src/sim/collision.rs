//! Collision detection and outcome resolution
//!
//! Every released, still-falling entity is moved, tested against the
//! player's circle, and retired with a single terminal cause when it
//! touches the player or leaves the screen.

use glam::Vec2;

use super::entity::{EntityKind, Lifecycle};
use super::sprites::SpriteMetrics;
use super::state::{GameEvent, GameState};
use crate::circles_intersect;
use crate::error::SimResult;

/// What happened to one entity this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Touched the player while falling at `fall_speed`
    Player { kind: EntityKind, fall_speed: f32 },
    /// Dropped past the bottom edge
    OffScreen { kind: EntityKind },
}

/// Result of checking one entity against the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub index: usize,
    pub contact: Contact,
}

/// Whether an entity circle overlaps the player circle
#[inline]
pub fn touches_player(entity: (Vec2, f32), player: (Vec2, f32)) -> bool {
    circles_intersect(entity.0, entity.1, player.0, player.1)
}

/// Move every released entity one tick and collect contacts.
///
/// Position advances with the current velocity (scaled while time-slow is
/// active), then the horizontal velocity is reset from the wind.
pub fn step_entities(state: &mut GameState, sprites: &dyn SpriteMetrics) -> Vec<CollisionResult> {
    let release = state.release_count();
    let scale = state.environment.speed_scale();
    let drift = state.environment.drift_velocity();
    let player_circle = state.player.circle(crate::consts::PLAYER_CIRCLE_LIFT);
    let radius_divisor = state.tuning.hit_radius_divisor;
    let screen_height = state.tuning.screen_height;

    let mut contacts = Vec::new();
    for (index, entity) in state.pool.released_mut(release) {
        if !entity.is_active() {
            continue;
        }

        entity.advance(scale);
        entity.vel.x = drift;

        let circle = entity.bounding_circle(sprites, radius_divisor);
        let contact = if touches_player(circle, player_circle) {
            Contact::Player {
                kind: entity.kind,
                fall_speed: entity.vel.y,
            }
        } else if entity.below_screen(sprites, screen_height) {
            Contact::OffScreen { kind: entity.kind }
        } else {
            continue;
        };
        contacts.push(CollisionResult { index, contact });
    }
    contacts
}

/// Apply each contact's effect and retire the entity
pub fn resolve_contacts(
    state: &mut GameState,
    contacts: &[CollisionResult],
) -> SimResult<Vec<GameEvent>> {
    let mut events = Vec::with_capacity(contacts.len());

    for result in contacts {
        let index = result.index;
        let mut entity = state.pool.take(index)?;

        let (cause, event) = match result.contact {
            Contact::Player {
                kind: EntityKind::Hazard,
                fall_speed,
            } => {
                let damage = fall_speed / state.difficulty.rock_softness(&state.tuning);
                state.player.damage(damage);
                (Lifecycle::Hit, GameEvent::HazardHit { index, damage })
            }
            Contact::Player {
                kind: EntityKind::HealthPotion,
                ..
            } => {
                let healed = state.player.heal(state.player.max_health / 8.0);
                state.pickups.potions += 1;
                (Lifecycle::Consumed, GameEvent::PotionCollected { healed })
            }
            Contact::Player {
                kind: EntityKind::TimeSlowBuff,
                ..
            } => {
                state.environment.collect_time_slow();
                state.pickups.time_slows += 1;
                let remaining_ms = state.environment.slow_remaining_ms();
                (Lifecycle::Consumed, GameEvent::TimeSlowCollected { remaining_ms })
            }
            Contact::Player {
                kind: EntityKind::Coin,
                ..
            } => {
                let value = state.difficulty.coin_value();
                state.score = state.score.saturating_add(value);
                state.pickups.coins += 1;
                (Lifecycle::Consumed, GameEvent::CoinCollected { value })
            }
            Contact::OffScreen {
                kind: EntityKind::Hazard,
            } => (Lifecycle::Missed, GameEvent::HazardMissed { index }),
            Contact::OffScreen { kind } => {
                // Uncollected power-ups vanish without a history record
                log::trace!("{} #{} fell off screen", kind.as_str(), index);
                events.push(GameEvent::PowerUpLost { index, kind });
                continue;
            }
        };

        entity.retire(cause);
        log::trace!("{} #{} retired as {:?}", entity.kind.as_str(), index, cause);
        state.history.push(entity);
        events.push(event);
    }

    Ok(events)
}

/// Move, collide and retire all released entities for one tick
pub fn resolve_frame(state: &mut GameState, sprites: &dyn SpriteMetrics) -> SimResult<Vec<GameEvent>> {
    let contacts = step_entities(state, sprites);
    resolve_contacts(state, &contacts)
}
