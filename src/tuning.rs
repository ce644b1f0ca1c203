//! Game balance and difficulty presets
//!
//! All numbers that shape a session live in [`Tuning`] so they can be
//! loaded from JSON instead of being scattered through the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Difficulty scalar for one session (always positive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty(f32);

impl Difficulty {
    pub const EASY: Difficulty = Difficulty(1.0);
    pub const MEDIUM: Difficulty = Difficulty(2.0);
    pub const HARD: Difficulty = Difficulty(3.0);

    /// Map a menu selector to a difficulty. `0` means quit and yields `None`.
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            0 => None,
            1 => Some(Self::EASY),
            2 => Some(Self::MEDIUM),
            _ => Some(Self::HARD),
        }
    }

    /// Build from a raw scalar. Zero, negative and NaN values mean "no session".
    pub fn new(value: f32) -> Option<Self> {
        if value > 0.0 { Some(Self(value)) } else { None }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn as_str(&self) -> &'static str {
        if self.0 < 1.5 {
            "Easy"
        } else if self.0 < 2.5 {
            "Medium"
        } else {
            "Hard"
        }
    }

    /// Release ramp per released entity
    pub fn acceleration(&self, tuning: &Tuning) -> f32 {
        tuning.base_acceleration * self.0
    }

    /// Divisor applied to a hazard's fall speed to get damage
    pub fn rock_softness(&self, tuning: &Tuning) -> f32 {
        tuning.rock_softness / self.0
    }

    /// Harder sessions start with less health
    pub fn max_health(&self, tuning: &Tuning) -> f32 {
        tuning.base_health * 2.0 / (self.0 + 1.0)
    }

    /// Score awarded per coin
    pub fn coin_value(&self) -> u64 {
        (self.0.round() as u64).max(1)
    }
}

/// Data-driven game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Entity pool ===
    /// Entries provisioned beyond `2 * release_count`
    pub pool_buffer: usize,

    // === Rarity (cumulative in this order, remainder is hazards) ===
    pub potion_rate: f32,
    pub time_slow_rate: f32,
    pub coin_rate: f32,

    // === Spawn geometry ===
    /// Vertical speed roll, divided by 100 (inclusive)
    pub fall_speed_roll: (u32, u32),
    /// Horizontal inset is `sprite_width / spawn_inset_divisor`
    pub spawn_inset_divisor: f32,
    /// Entities start this fraction of their height above the screen
    pub spawn_height_factor: f32,

    // === Release pacing (ms) ===
    pub first_release_ms: f32,
    /// Inclusive roll for the next release delay before acceleration
    pub release_delay_ms: (u32, u32),
    /// Acceleration per difficulty unit
    pub base_acceleration: f32,

    // === Wind ===
    pub max_wind: i32,
    pub wind_change_ms: f32,
    /// Horizontal velocity per unit of wind
    pub wind_drift: f32,

    // === Time-slow power-up ===
    pub slow_motion_factor: f32,
    pub powerup_increment_ms: f32,
    pub powerup_max_ms: f32,

    // === Player ===
    pub base_health: f32,
    pub player_radius: f32,
    /// Horizontal pixels per tick while a movement key is held
    pub player_speed: f32,
    /// Collision circle is `sprite_width / hit_radius_divisor`
    pub hit_radius_divisor: f32,
    /// Numerator of the difficulty-scaled damage divisor
    pub rock_softness: f32,

    // === Presentation ===
    pub sprite_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            pool_buffer: POOL_BUFFER,

            potion_rate: 0.03,
            time_slow_rate: 0.02,
            coin_rate: 0.05,

            fall_speed_roll: (20, 100),
            spawn_inset_divisor: 15.0,
            spawn_height_factor: 0.45,

            first_release_ms: 1000.0,
            release_delay_ms: (500, 1500),
            base_acceleration: 1.0 / 25.0,

            max_wind: MAX_WIND,
            wind_change_ms: WIND_CHANGE_TIME_MS,
            wind_drift: 0.1,

            slow_motion_factor: 0.1,
            powerup_increment_ms: POWERUP_INCREMENT_MS,
            powerup_max_ms: POWERUP_MAX_MS,

            base_health: 100.0,
            player_radius: PLAYER_RADIUS,
            player_speed: 6.0,
            hit_radius_divisor: 25.0,
            rock_softness: 2.0,

            sprite_scale: 0.1,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json_string(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would stall or break a session. NaN and infinite
    /// values are rejected wherever a number feeds a random roll or a timer.
    pub fn validate(&self) -> SimResult<()> {
        let invalid = |msg: &str| Err(SimError::InvalidTuning(msg.to_string()));
        let positive = |x: f32| x.is_finite() && x > 0.0;
        let non_negative = |x: f32| x.is_finite() && x >= 0.0;

        if !positive(self.screen_width) || !positive(self.screen_height) {
            return invalid("screen dimensions must be positive");
        }
        if self.pool_buffer == 0 {
            return invalid("pool_buffer must be at least 1");
        }
        let rates = [self.potion_rate, self.time_slow_rate, self.coin_rate];
        if rates.iter().any(|r| !(0.0..=1.0).contains(r)) {
            return invalid("rarity rates must be within [0, 1]");
        }
        if rates.iter().sum::<f32>() > 1.0 {
            return invalid("rarity rates must not sum past 1");
        }
        if self.fall_speed_roll.0 > self.fall_speed_roll.1 {
            return invalid("fall_speed_roll is reversed");
        }
        if !non_negative(self.first_release_ms) {
            return invalid("first_release_ms must not be negative");
        }
        if self.release_delay_ms.0 > self.release_delay_ms.1 {
            return invalid("release_delay_ms is reversed");
        }
        if !non_negative(self.base_acceleration) {
            return invalid("base_acceleration must not be negative");
        }
        if self.max_wind < 1 {
            return invalid("max_wind must be at least 1");
        }
        if !positive(self.wind_change_ms) {
            return invalid("wind_change_ms must be positive");
        }
        if !non_negative(self.powerup_max_ms) || !non_negative(self.powerup_increment_ms) {
            return invalid("power-up durations must not be negative");
        }
        if !positive(self.base_health) || !positive(self.player_radius) {
            return invalid("player health and radius must be positive");
        }
        if !positive(self.spawn_inset_divisor) || !positive(self.hit_radius_divisor) {
            return invalid("divisors must be positive");
        }
        if !positive(self.rock_softness) {
            return invalid("rock_softness must be positive");
        }
        let finite = [
            self.spawn_height_factor,
            self.wind_drift,
            self.slow_motion_factor,
            self.player_speed,
            self.sprite_scale,
        ];
        if finite.iter().any(|x| !x.is_finite()) {
            return invalid("movement and drawing factors must be finite");
        }
        Ok(())
    }

    /// Pool size that keeps spawning ahead of the release frontier
    #[inline]
    pub fn pool_target(&self, release_count: usize) -> usize {
        release_count.saturating_mul(2).saturating_add(self.pool_buffer)
    }
}
