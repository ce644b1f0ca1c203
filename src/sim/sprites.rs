//! Sprite handles and metrics lookup
//!
//! Image loading and drawing belong to the host. The simulation only needs
//! each sprite's pixel size for spawn and collision geometry.

use serde::{Deserialize, Serialize};

/// Opaque handle into the host's image table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

/// Size lookup for sprites. Any handle value must be accepted.
pub trait SpriteMetrics {
    fn sprite_width(&self, handle: SpriteHandle) -> f32;
    fn sprite_height(&self, handle: SpriteHandle) -> f32;
}

/// Read-only sprite table built once before any session starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteTable {
    /// Interchangeable hazard images, picked uniformly
    pub hazards: Vec<SpriteHandle>,
    pub potion: SpriteHandle,
    pub time_slow: SpriteHandle,
    pub coin: SpriteHandle,
    /// `(width, height)` per handle index; missing entries use `fallback_size`
    pub sizes: Vec<(f32, f32)>,
    pub fallback_size: (f32, f32),
}

/// Number of hazard images in the stock table
pub const NUM_HAZARD_SPRITES: u32 = 5;

impl Default for SpriteTable {
    /// Stock layout: hazards 0..5, then potion, time-slow and coin
    fn default() -> Self {
        let hazards = (0..NUM_HAZARD_SPRITES).map(SpriteHandle).collect();
        let mut sizes = vec![(1000.0, 1000.0); NUM_HAZARD_SPRITES as usize];
        sizes.extend([(600.0, 800.0), (700.0, 700.0), (500.0, 500.0)]);
        Self {
            hazards,
            potion: SpriteHandle(NUM_HAZARD_SPRITES),
            time_slow: SpriteHandle(NUM_HAZARD_SPRITES + 1),
            coin: SpriteHandle(NUM_HAZARD_SPRITES + 2),
            sizes,
            fallback_size: (1000.0, 1000.0),
        }
    }
}

impl SpriteTable {
    /// Table where every sprite has the same size (handy for tests)
    pub fn uniform(width: f32, height: f32) -> Self {
        let mut table = Self::default();
        for size in &mut table.sizes {
            *size = (width, height);
        }
        table.fallback_size = (width, height);
        table
    }

    fn size_of(&self, handle: SpriteHandle) -> (f32, f32) {
        self.sizes
            .get(handle.0 as usize)
            .copied()
            .unwrap_or(self.fallback_size)
    }
}

impl SpriteMetrics for SpriteTable {
    fn sprite_width(&self, handle: SpriteHandle) -> f32 {
        self.size_of(handle).0
    }

    fn sprite_height(&self, handle: SpriteHandle) -> f32 {
        self.size_of(handle).1
    }
}
