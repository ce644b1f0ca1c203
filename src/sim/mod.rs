//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod entity;
pub mod environment;
pub mod factory;
pub mod pool;
pub mod scheduler;
pub mod sprites;
pub mod state;
pub mod tick;

pub use clock::{Countdown, Stopwatch};
pub use collision::{CollisionResult, Contact, resolve_frame};
pub use entity::{EntityKind, FallingEntity, Lifecycle};
pub use environment::{Environment, Wind};
pub use factory::{EntityFactory, Rarity};
pub use pool::EntityPool;
pub use scheduler::SpawnScheduler;
pub use sprites::{SpriteHandle, SpriteMetrics, SpriteTable};
pub use state::{EndReason, GameEvent, GamePhase, GameState, Pickups, Player};
pub use tick::{TickInput, tick};
