//! Rockfall headless entry point
//!
//! Plays one session with the autopilot at the controls and a recording
//! canvas, then prints the summary as JSON.
//!
//! Usage: `rockfall [difficulty 0-3] [seed] [max frames]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rockfall::consts::SIM_DT_MS;
    use rockfall::render::{Canvas, CommandBuffer};
    use rockfall::session::Frontend;
    use rockfall::sim::{FallingEntity, GameState, TickInput};
    use rockfall::stats::SessionSummary;

    /// Frontend with no window: autopilot input, recorded draw calls
    pub struct HeadlessFrontend {
        selector: u8,
        max_frames: u64,
        frames: u64,
        canvas: CommandBuffer,
    }

    impl HeadlessFrontend {
        pub fn new(selector: u8, max_frames: u64) -> Self {
            Self {
                selector,
                max_frames,
                frames: 0,
                canvas: CommandBuffer::new(),
            }
        }
    }

    impl Frontend for HeadlessFrontend {
        fn select_difficulty(&mut self) -> u8 {
            self.selector
        }

        fn poll_input(&mut self, state: &GameState) -> TickInput {
            self.frames += 1;
            if self.frames % 600 == 0 {
                log::debug!("{} | health {:.1}", state.debug_line(), state.player.health);
            }
            TickInput {
                quit: self.frames > self.max_frames,
                autopilot: true,
                ..Default::default()
            }
        }

        fn wait_frame(&mut self) -> f32 {
            SIM_DT_MS
        }

        fn canvas(&mut self) -> &mut dyn Canvas {
            // Only the latest frame is kept
            self.canvas.clear_commands();
            &mut self.canvas
        }

        fn show_summary(&mut self, summary: &SessionSummary, history: &[FallingEntity]) {
            log::info!(
                "Stats: {} frames, {} retired, {} potions, {} time-slows, {} coins",
                self.frames,
                history.len(),
                summary.pickups.potions,
                summary.pickups.time_slows,
                summary.pickups.coins
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rockfall::session::{SessionOutcome, run_session};
    use rockfall::sim::SpriteTable;
    use rockfall::tuning::Tuning;

    env_logger::init();
    log::info!("Rockfall (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let selector = args.first().and_then(|s| s.parse().ok()).unwrap_or(1u8);
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(12345u64);
    let max_frames = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(60 * 60 * 5u64);

    let mut frontend = headless::HeadlessFrontend::new(selector, max_frames);
    let sprites = SpriteTable::default();

    match run_session(&mut frontend, seed, Tuning::default(), &sprites) {
        Ok(SessionOutcome::Quit) => println!("Quit from menu"),
        Ok(SessionOutcome::Finished(summary)) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("Failed to serialize summary: {}", err),
        },
        Err(err) => {
            log::error!("Session aborted: {}", err);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web entry point; hosts embed the library directly
}
