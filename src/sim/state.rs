//! Session state and core simulation types
//!
//! One `GameState` exists per game session and owns everything the session
//! touches: the player, the entity pool, the retired history and the clocks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, FallingEntity};
use super::environment::Environment;
use super::factory::EntityFactory;
use super::pool::EntityPool;
use super::scheduler::SpawnScheduler;
use super::sprites::SpriteTable;
use crate::consts::PLAYER_FLOOR_OFFSET;
use crate::error::SimResult;
use crate::tuning::{Difficulty, Tuning};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running
    Active,
    /// Frozen by the player; clocks hold their readings
    Paused,
    /// Session finished, see `GameState::end_reason`
    Over,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Health reached zero
    HealthDepleted,
    /// Quit key or window close
    Quit,
    /// Unrecoverable simulation error (pool growth failed)
    Aborted,
}

/// Something that happened during a tick (for sound, HUD flashes, tests)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HazardHit { index: usize, damage: f32 },
    HazardMissed { index: usize },
    PotionCollected { healed: f32 },
    TimeSlowCollected { remaining_ms: f32 },
    CoinCollected { value: u64 },
    /// A power-up fell off the bottom uncollected
    PowerUpLost { index: usize, kind: EntityKind },
    Paused,
    Resumed,
    Ended(EndReason),
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub health: f32,
    pub max_health: f32,
    /// Anchor point; the collision circle sits above it
    pub pos: Vec2,
    pub radius: f32,
}

impl Player {
    /// Centered at the bottom of the playfield
    pub fn new(max_health: f32, tuning: &Tuning) -> Self {
        Self {
            health: max_health,
            max_health,
            pos: Vec2::new(
                tuning.screen_width / 2.0,
                tuning.screen_height - PLAYER_FLOOR_OFFSET,
            ),
            radius: tuning.player_radius,
        }
    }

    /// Heal, never past max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Health may go negative; the session ends the same tick
    pub fn damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Collision (and drawn) circle: lifted above the anchor by radius + `lift`
    pub fn circle(&self, lift: f32) -> (Vec2, f32) {
        (self.pos - Vec2::new(0.0, self.radius + lift), self.radius)
    }

    /// Slide horizontally, kept a radius away from either edge
    pub fn slide(&mut self, dx: f32, screen_width: f32) {
        let max_x = (screen_width - self.radius).max(self.radius);
        self.pos.x = (self.pos.x + dx).clamp(self.radius, max_x);
    }
}

/// Tally of collected power-ups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickups {
    pub potions: u32,
    pub time_slows: u32,
    pub coins: u32,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub difficulty: Difficulty,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
    pub player: Player,
    pub score: u64,
    pub pickups: Pickups,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub pool: EntityPool,
    /// Retired entities in retirement order
    pub history: Vec<FallingEntity>,
    pub scheduler: SpawnScheduler,
    pub environment: Environment,
    pub factory: EntityFactory,
}

impl GameState {
    /// Create a session for the given difficulty. Fails on invalid tuning.
    pub fn new(
        seed: u64,
        difficulty: Difficulty,
        tuning: Tuning,
        sprites: &SpriteTable,
    ) -> SimResult<Self> {
        tuning.validate()?;
        let max_health = difficulty.max_health(&tuning);
        log::info!(
            "New session: difficulty {} ({}), seed {}, max health {:.1}",
            difficulty.as_str(),
            difficulty.value(),
            seed,
            max_health
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            phase: GamePhase::Active,
            end_reason: None,
            player: Player::new(max_health, &tuning),
            score: 0,
            pickups: Pickups::default(),
            time_ticks: 0,
            pool: EntityPool::new(),
            history: Vec::new(),
            scheduler: SpawnScheduler::new(difficulty, &tuning),
            environment: Environment::new(&tuning),
            factory: EntityFactory::new(&tuning, sprites),
            tuning,
        })
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    #[inline]
    pub fn release_count(&self) -> usize {
        self.scheduler.release_count()
    }

    /// Move to `Over`. Only the first reason sticks.
    pub fn end(&mut self, reason: EndReason) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = GamePhase::Over;
        self.end_reason = Some(reason);
        log::info!(
            "Session over ({:?}): score {}, health {:.1}, {} retired",
            reason,
            self.score,
            self.player.health,
            self.history.len()
        );
        true
    }

    /// Toggle between `Active` and `Paused`, freezing or thawing the clocks
    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Active => {
                self.phase = GamePhase::Paused;
                self.scheduler.clock_mut().pause();
                self.environment.pause();
                log::info!("Paused");
                Some(GameEvent::Paused)
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Active;
                self.scheduler.clock_mut().resume();
                self.environment.resume();
                log::info!("Resumed");
                Some(GameEvent::Resumed)
            }
            GamePhase::Over => None,
        }
    }

    /// Hits and misses recorded so far
    pub fn hazard_outcomes(&self) -> (u32, u32) {
        crate::stats::count_outcomes(&self.history)
    }

    /// Release/pool/history sizes in one line
    pub fn debug_line(&self) -> String {
        format!(
            "release {} | pool {} | history {}",
            self.release_count(),
            self.pool.len(),
            self.history.len()
        )
    }
}
