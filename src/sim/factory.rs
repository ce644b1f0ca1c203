//! Entity factory
//!
//! Rolls kind, sprite, spawn position and fall speed for new entities.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, FallingEntity};
use super::sprites::{SpriteHandle, SpriteMetrics, SpriteTable};
use crate::tuning::Tuning;

/// Cumulative rarity thresholds, checked in a fixed order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rarity {
    pub potion: f32,
    pub time_slow: f32,
    pub coin: f32,
}

impl Rarity {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            potion: tuning.potion_rate,
            time_slow: tuning.time_slow_rate,
            coin: tuning.coin_rate,
        }
    }

    /// Map a uniform draw in [0, 1) to a kind
    pub fn pick(&self, roll: f32) -> EntityKind {
        let potion_end = self.potion;
        let slow_end = potion_end + self.time_slow;
        let coin_end = slow_end + self.coin;

        if roll < potion_end {
            EntityKind::HealthPotion
        } else if roll < slow_end {
            EntityKind::TimeSlowBuff
        } else if roll < coin_end {
            EntityKind::Coin
        } else {
            EntityKind::Hazard
        }
    }
}

/// Produces freshly rolled falling entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityFactory {
    rarity: Rarity,
    hazard_sprites: Vec<SpriteHandle>,
    potion_sprite: SpriteHandle,
    time_slow_sprite: SpriteHandle,
    coin_sprite: SpriteHandle,
    screen_width: f32,
    inset_divisor: f32,
    height_factor: f32,
    speed_roll: (u32, u32),
}

impl EntityFactory {
    pub fn new(tuning: &Tuning, table: &SpriteTable) -> Self {
        Self {
            rarity: Rarity::from_tuning(tuning),
            hazard_sprites: table.hazards.clone(),
            potion_sprite: table.potion,
            time_slow_sprite: table.time_slow,
            coin_sprite: table.coin,
            screen_width: tuning.screen_width,
            inset_divisor: tuning.spawn_inset_divisor,
            height_factor: tuning.spawn_height_factor,
            speed_roll: tuning.fall_speed_roll,
        }
    }

    #[inline]
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    fn sprite_for(&self, kind: EntityKind, rng: &mut impl Rng) -> SpriteHandle {
        match kind {
            EntityKind::Hazard => {
                if self.hazard_sprites.is_empty() {
                    SpriteHandle(0)
                } else {
                    self.hazard_sprites[rng.random_range(0..self.hazard_sprites.len())]
                }
            }
            EntityKind::HealthPotion => self.potion_sprite,
            EntityKind::TimeSlowBuff => self.time_slow_sprite,
            EntityKind::Coin => self.coin_sprite,
        }
    }

    /// Horizontal spawn range for a sprite of width `w`
    pub fn spawn_x_range(&self, w: f32) -> (f32, f32) {
        let inset = w / self.inset_divisor;
        let lo = -w / 2.0 + inset;
        let hi = self.screen_width - w / 2.0 - inset;
        (lo, hi.max(lo))
    }

    /// Roll a new entity, placed just above the visible screen
    pub fn spawn(&self, rng: &mut impl Rng, metrics: &dyn SpriteMetrics) -> FallingEntity {
        let kind = self.rarity.pick(rng.random::<f32>());
        let sprite = self.sprite_for(kind, rng);

        let w = metrics.sprite_width(sprite);
        let h = metrics.sprite_height(sprite);

        let (lo, hi) = self.spawn_x_range(w);
        let x = if hi > lo { rng.random_range(lo..=hi) } else { lo };
        let y = -h * self.height_factor;

        let (slow, fast) = self.speed_roll;
        let vy = rng.random_range(slow..=fast) as f32 / 100.0;

        FallingEntity::new(kind, sprite, Vec2::new(x, y), Vec2::new(0.0, vy))
    }
}
