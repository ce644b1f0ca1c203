//! Session state machine: menu selection → active play → stats
//!
//! The host implements [`Frontend`] (menu, input polling, frame pacing,
//! canvas, stats screen). [`run_session`] drives one full session over it.

use crate::consts::{MAX_SUBSTEPS, SIM_DT_MS};
use crate::error::SimResult;
use crate::render::{Canvas, draw_frame};
use crate::sim::{
    EndReason, FallingEntity, GameEvent, GameState, SpriteMetrics, SpriteTable, TickInput, tick,
};
use crate::stats::SessionSummary;
use crate::tuning::{Difficulty, Tuning};

/// Longest host frame fed into the simulation (ms)
const MAX_FRAME_MS: f32 = 100.0;

/// Host-side collaborators for one session
pub trait Frontend {
    /// Menu screen. 0 quits, 1-3 pick easy/medium/hard.
    fn select_difficulty(&mut self) -> u8;
    /// Input for the coming frame. Window-close must map to `quit`.
    fn poll_input(&mut self, state: &GameState) -> TickInput;
    /// Wait for the next frame; returns milliseconds since the previous one
    fn wait_frame(&mut self) -> f32;
    fn canvas(&mut self) -> &mut dyn Canvas;
    /// Stats screen: final numbers plus every retired entity in
    /// retirement order
    fn show_summary(&mut self, summary: &SessionSummary, history: &[FallingEntity]);
}

/// How a call to [`run_session`] finished
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Quit from the menu; no session was played
    Quit,
    /// A session was played to the end
    Finished(SessionSummary),
}

/// A running session with fixed-timestep accumulation
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    accumulator: f32,
}

impl Session {
    pub fn new(
        seed: u64,
        difficulty: Difficulty,
        tuning: Tuning,
        sprites: &SpriteTable,
    ) -> SimResult<Self> {
        Ok(Self {
            state: GameState::new(seed, difficulty, tuning, sprites)?,
            accumulator: 0.0,
        })
    }

    /// Start from a menu selector; `Ok(None)` when the selector means quit
    pub fn from_selector(
        selector: u8,
        seed: u64,
        tuning: Tuning,
        sprites: &SpriteTable,
    ) -> SimResult<Option<Self>> {
        Difficulty::from_selector(selector)
            .map(|d| Self::new(seed, d, tuning, sprites))
            .transpose()
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_state(&self.state)
    }

    /// Run as many fixed ticks as `elapsed_ms` covers.
    ///
    /// One-shot inputs (pause, debug) apply to the first tick only.
    pub fn frame(
        &mut self,
        input: &TickInput,
        elapsed_ms: f32,
        sprites: &dyn SpriteMetrics,
    ) -> SimResult<Vec<GameEvent>> {
        self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut input = input.clone();
        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            events.extend(tick(&mut self.state, &input, SIM_DT_MS, sprites)?);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            input.pause = false;
            input.debug = false;

            if self.state.is_over() {
                self.accumulator = 0.0;
                break;
            }
        }

        // Frame too short for a tick: one-shot commands still land
        if substeps == 0 {
            if input.quit {
                if self.state.end(EndReason::Quit) {
                    events.push(GameEvent::Ended(EndReason::Quit));
                }
            } else if input.pause {
                events.extend(self.state.toggle_pause());
            }
        }

        Ok(events)
    }
}

/// Play one session from menu to stats screen
pub fn run_session(
    frontend: &mut dyn Frontend,
    seed: u64,
    tuning: Tuning,
    sprites: &SpriteTable,
) -> SimResult<SessionOutcome> {
    let selector = frontend.select_difficulty();
    let Some(mut session) = Session::from_selector(selector, seed, tuning, sprites)? else {
        log::info!("Quit from menu");
        return Ok(SessionOutcome::Quit);
    };

    while !session.is_over() {
        let elapsed = frontend.wait_frame();
        let input = frontend.poll_input(session.state());
        let result = session.frame(&input, elapsed, sprites);
        draw_frame(session.state(), frontend.canvas());
        if let Err(err) = result {
            log::error!("Session aborted after {} ticks: {}", session.state().time_ticks, err);
            return Err(err);
        }
    }

    let summary = session.summary();
    log::info!(
        "Final score {}, dodge accuracy {:.1}% ({} hits, {} misses)",
        summary.score,
        summary.dodge_accuracy(),
        summary.hits,
        summary.misses
    );
    frontend.show_summary(&summary, &session.state().history);
    Ok(SessionOutcome::Finished(summary))
}
