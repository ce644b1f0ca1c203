//! Falling entities and their lifecycle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprites::{SpriteHandle, SpriteMetrics};

/// What a falling entity does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Damages the player
    Hazard,
    /// Restores an eighth of max health
    HealthPotion,
    /// Slows every falling entity for a while
    TimeSlowBuff,
    /// Adds to the score
    Coin,
}

impl EntityKind {
    #[inline]
    pub fn is_hazard(&self) -> bool {
        *self == EntityKind::Hazard
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Hazard => "hazard",
            EntityKind::HealthPotion => "potion",
            EntityKind::TimeSlowBuff => "time-slow",
            EntityKind::Coin => "coin",
        }
    }
}

/// Where an entity is in its life. Every state except `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Still falling and being drawn
    Active,
    /// Hazard that struck the player
    Hit,
    /// Hazard that left the screen untouched
    Missed,
    /// Power-up or coin picked up by the player
    Consumed,
}

/// A rock, potion, hourglass or coin falling down the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingEntity {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Pixels per tick; `x` is rewritten from the wind every tick
    pub vel: Vec2,
    pub sprite: SpriteHandle,
    pub kind: EntityKind,
    lifecycle: Lifecycle,
}

impl FallingEntity {
    pub fn new(kind: EntityKind, sprite: SpriteHandle, pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            sprite,
            kind,
            lifecycle: Lifecycle::Active,
        }
    }

    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    #[inline]
    pub fn hit(&self) -> bool {
        self.lifecycle == Lifecycle::Hit
    }

    #[inline]
    pub fn missed(&self) -> bool {
        self.lifecycle == Lifecycle::Missed
    }

    /// Move to a terminal state. Returns false (and changes nothing) if the
    /// entity was already retired.
    pub fn retire(&mut self, cause: Lifecycle) -> bool {
        if !self.is_active() || cause == Lifecycle::Active {
            return false;
        }
        self.lifecycle = cause;
        true
    }

    /// Advance one tick, with velocity scaled by `speed_scale`
    #[inline]
    pub fn advance(&mut self, speed_scale: f32) {
        self.pos += self.vel * speed_scale;
    }

    /// Center and radius of the approximate collision circle
    pub fn bounding_circle(&self, sprites: &dyn SpriteMetrics, radius_divisor: f32) -> (Vec2, f32) {
        let w = sprites.sprite_width(self.sprite);
        let h = sprites.sprite_height(self.sprite);
        (self.pos + Vec2::new(w, h) / 2.0, w / radius_divisor)
    }

    /// True once the sprite's vertical middle has reached the bottom edge
    pub fn below_screen(&self, sprites: &dyn SpriteMetrics, screen_height: f32) -> bool {
        self.pos.y + sprites.sprite_height(self.sprite) / 2.0 >= screen_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprites::SpriteTable;

    /// Odd handles are wide, even ones narrow
    struct Striped;

    impl SpriteMetrics for Striped {
        fn sprite_width(&self, handle: SpriteHandle) -> f32 {
            if handle.0 % 2 == 1 { 200.0 } else { 50.0 }
        }

        fn sprite_height(&self, _handle: SpriteHandle) -> f32 {
            40.0
        }
    }

    fn rock() -> FallingEntity {
        FallingEntity::new(
            EntityKind::Hazard,
            SpriteHandle(0),
            Vec2::new(10.0, 20.0),
            Vec2::new(0.0, 0.5),
        )
    }

    #[test]
    fn test_retire_is_one_way() {
        let mut e = rock();
        assert!(e.is_active());
        assert!(e.retire(Lifecycle::Hit));
        assert!(e.hit() && !e.missed() && !e.is_active());

        // Second cause is refused
        assert!(!e.retire(Lifecycle::Missed));
        assert!(e.hit() && !e.missed());
    }

    #[test]
    fn test_cannot_retire_to_active() {
        let mut e = rock();
        assert!(!e.retire(Lifecycle::Active));
        assert!(e.is_active());
    }

    #[test]
    fn test_advance_scaled() {
        let mut e = rock();
        e.advance(0.1);
        assert!((e.pos.y - 20.05).abs() < 1e-5);
        e.advance(1.0);
        assert!((e.pos.y - 20.55).abs() < 1e-5);
    }

    #[test]
    fn test_bounding_circle() {
        let sprites = SpriteTable::uniform(100.0, 60.0);
        let (center, radius) = rock().bounding_circle(&sprites, 25.0);
        assert_eq!(center, Vec2::new(60.0, 50.0));
        assert_eq!(radius, 4.0);
    }

    #[test]
    fn test_below_screen() {
        let sprites = SpriteTable::uniform(100.0, 60.0);
        let mut e = rock();
        e.pos.y = 689.0;
        assert!(!e.below_screen(&sprites, 720.0));
        e.pos.y = 690.0;
        assert!(e.below_screen(&sprites, 720.0));
    }

    #[test]
    fn test_metrics_follow_sprite_handle() {
        let mut e = rock();
        let (_, narrow) = e.bounding_circle(&Striped, 25.0);
        e.sprite = SpriteHandle(1);
        let (center, wide) = e.bounding_circle(&Striped, 25.0);
        assert_eq!(narrow, 2.0);
        assert_eq!(wide, 8.0);
        assert_eq!(center, Vec2::new(110.0, 40.0));
    }
}
