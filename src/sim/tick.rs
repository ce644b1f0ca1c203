//! Fixed timestep simulation tick
//!
//! One call runs one frame in a fixed order: pool top-up, input,
//! mechanics (release, wind, time-slow, collisions, end check).

use super::autopilot;
use super::collision::resolve_frame;
use super::sprites::SpriteMetrics;
use super::state::{EndReason, GameEvent, GamePhase, GameState};
use crate::error::SimResult;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Quit key or window close
    pub quit: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Log pool/release/history sizes
    pub debug: bool,
    /// Idle/demo mode - AI steers the player
    pub autopilot: bool,
}

/// Grow the pool ahead of the release frontier
fn top_up_pool(state: &mut GameState, sprites: &dyn SpriteMetrics) -> SimResult<usize> {
    let target = state.tuning.pool_target(state.release_count());
    let GameState {
        pool, factory, rng, ..
    } = state;
    pool.top_up(target, || factory.spawn(rng, sprites))
}

/// Advance the game state by one fixed timestep of `dt_ms` milliseconds
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f32,
    sprites: &dyn SpriteMetrics,
) -> SimResult<Vec<GameEvent>> {
    let mut events = Vec::new();
    if state.is_over() {
        return Ok(events);
    }

    // Provision before the scheduler can look at pool size
    if let Err(err) = top_up_pool(state, sprites) {
        log::error!("Aborting session: {}", err);
        state.end(EndReason::Aborted);
        return Err(err);
    }

    // Input: quit short-circuits before anything moves
    if input.quit {
        state.end(EndReason::Quit);
        events.push(GameEvent::Ended(EndReason::Quit));
        return Ok(events);
    }
    if input.pause {
        events.extend(state.toggle_pause());
    }
    if state.phase == GamePhase::Paused {
        return Ok(events);
    }
    if input.debug {
        log::debug!("{}", state.debug_line());
    }

    let direction = if input.autopilot {
        autopilot::steer(state, sprites)
    } else {
        input.right as i32 as f32 - input.left as i32 as f32
    };
    if direction != 0.0 {
        let dx = direction * state.tuning.player_speed;
        state.player.slide(dx, state.tuning.screen_width);
    }

    // Mechanics
    state.time_ticks += 1;
    let pool_len = state.pool.len();
    state.scheduler.advance(dt_ms, pool_len, &mut state.rng);
    state.environment.update(dt_ms, &mut state.rng);
    events.extend(resolve_frame(state, sprites)?);

    if state.player.is_dead() {
        state.end(EndReason::HealthDepleted);
        events.push(GameEvent::Ended(EndReason::HealthDepleted));
    }

    Ok(events)
}
