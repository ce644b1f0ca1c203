//! Frame rendering against a host-supplied canvas
//!
//! The host owns windows, images and fonts. This module only decides what
//! goes on screen each frame and in which order.

use glam::Vec2;

use crate::consts::PLAYER_CIRCLE_LIFT;
use crate::sim::{GamePhase, GameState, SpriteHandle};

/// RGBA color, components in 0-1
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const SLOW_TINT: Color = [0.2, 0.4, 1.0, 1.0];

/// HUD text origin and line spacing
const HUD_ORIGIN: Vec2 = Vec2::new(20.0, 20.0);
const HUD_LINE_HEIGHT: f32 = 18.0;

/// Drawing primitives supplied by the host graphics library
pub trait Canvas {
    fn clear(&mut self, color: Color);
    /// Draw a sprite with its top-left corner at `pos`
    fn draw_sprite(&mut self, sprite: SpriteHandle, pos: Vec2, scale: f32);
    fn fill_circle(&mut self, color: Color, center: Vec2, radius: f32);
    fn draw_text(&mut self, text: &str, color: Color, pos: Vec2);
    /// Flip/refresh; the host's vsync wait usually lives here
    fn present(&mut self) {}
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Sprite {
        sprite: SpriteHandle,
        pos: Vec2,
        scale: f32,
    },
    Circle {
        color: Color,
        center: Vec2,
        radius: f32,
    },
    Text {
        text: String,
        color: Color,
        pos: Vec2,
    },
    Present,
}

/// Canvas that records draw calls instead of drawing (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }
}

impl Canvas for CommandBuffer {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_sprite(&mut self, sprite: SpriteHandle, pos: Vec2, scale: f32) {
        self.commands.push(DrawCommand::Sprite { sprite, pos, scale });
    }

    fn fill_circle(&mut self, color: Color, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle {
            color,
            center,
            radius,
        });
    }

    fn draw_text(&mut self, text: &str, color: Color, pos: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            color,
            pos,
        });
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }
}

/// HUD text, top to bottom
pub fn hud_lines(state: &GameState) -> Vec<String> {
    let mut lines = vec![
        format!("Health Remaining : {}", state.player.health.max(0.0) as i32),
        format!("Score : {}", state.score),
        format!("Wind : {:+}", state.environment.wind.value()),
    ];
    if state.environment.slow_active() {
        lines.push(format!(
            "Slow-mo : {:.1}s",
            state.environment.slow_remaining_ms() / 1000.0
        ));
    }
    if state.phase == GamePhase::Paused {
        lines.push("PAUSED".to_string());
    }
    lines
}

/// Draw one frame: background, falling entities, player, HUD
pub fn draw_frame(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.clear(WHITE);

    let scale = state.tuning.sprite_scale;
    for (_, entity) in state.pool.released(state.release_count()) {
        if entity.is_active() {
            canvas.draw_sprite(entity.sprite, entity.pos, scale);
        }
    }

    let (center, radius) = state.player.circle(PLAYER_CIRCLE_LIFT);
    let player_color = if state.environment.slow_active() {
        SLOW_TINT
    } else {
        BLACK
    };
    canvas.fill_circle(player_color, center, radius);

    for (i, line) in hud_lines(state).iter().enumerate() {
        let pos = HUD_ORIGIN + Vec2::new(0.0, i as f32 * HUD_LINE_HEIGHT);
        canvas.draw_text(line, BLACK, pos);
    }

    canvas.present();
}
