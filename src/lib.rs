//! Rockfall - A falling-rock dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pool, spawning, collisions, game state)
//! - `render`: Draw-call generation against an external canvas
//! - `session`: Menu → play → stats state machine over a host frontend
//! - `stats`: End-of-session summary
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod render;
pub mod session;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use error::{SimError, SimResult};
pub use stats::SessionSummary;
pub use tuning::{Difficulty, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz, one frame per tick)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1080.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Extra pool entries kept provisioned beyond twice the release count
    pub const POOL_BUFFER: usize = 250;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 50.0;
    /// Player sits this far above the bottom edge
    pub const PLAYER_FLOOR_OFFSET: f32 = 50.0;
    /// The drawn/colliding player circle is lifted by radius + this
    pub const PLAYER_CIRCLE_LIFT: f32 = 10.0;

    /// Wind defaults
    pub const MAX_WIND: i32 = 5;
    pub const WIND_CHANGE_TIME_MS: f32 = 5000.0;

    /// Time-slow power-up defaults
    pub const POWERUP_INCREMENT_MS: f32 = 2000.0;
    pub const POWERUP_MAX_MS: f32 = 8000.0;
}

/// Circle-circle overlap test (touching counts as overlapping)
#[inline]
pub fn circles_intersect(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) <= r * r
}

/// Percentage of `part` in `total`, 0 when `total` is zero
#[inline]
pub fn percentage(part: u32, total: u32) -> f32 {
    if total == 0 {
        0.0
    } else {
        part as f32 / total as f32 * 100.0
    }
}
