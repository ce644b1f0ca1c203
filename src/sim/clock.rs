//! Logical clocks driven by the simulation step
//!
//! Nothing here reads wall time. The tick loop feeds elapsed milliseconds
//! in, which keeps sessions reproducible and tests instant.

use serde::{Deserialize, Serialize};

/// Elapsed-time counter with start/reset/pause/resume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed_ms: f32,
    running: bool,
}

impl Stopwatch {
    /// A stopped stopwatch reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// A running stopwatch reading zero
    pub fn started() -> Self {
        Self {
            elapsed_ms: 0.0,
            running: true,
        }
    }

    /// Zero the reading and run
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.running = true;
    }

    /// Zero the reading, keeping the running state
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Freeze the reading
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Continue from the frozen reading
    pub fn resume(&mut self) {
        self.running = true;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Feed one step of time; ignored while paused
    pub fn advance(&mut self, dt_ms: f32) {
        if self.running {
            self.elapsed_ms += dt_ms;
        }
    }
}

/// Remaining duration of a timed effect. Zero means inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ms: f32,
}

impl Countdown {
    #[inline]
    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    /// Add `amount`, capped at `max`
    pub fn extend(&mut self, amount: f32, max: f32) {
        self.remaining_ms = (self.remaining_ms + amount).min(max).max(0.0);
    }

    /// Burn `dt_ms` off the remaining time. Returns true on the step the
    /// effect runs out.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_ms = (self.remaining_ms - dt_ms).max(0.0);
        !self.is_active()
    }
}
