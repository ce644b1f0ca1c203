//! Wind and the time-slow effect
//!
//! Wind is a global signed drift that changes on a jittered interval. The
//! time-slow effect is a countdown that only burns while the session runs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::{Countdown, Stopwatch};
use crate::tuning::Tuning;

/// Global horizontal drift
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    value: i32,
    max: i32,
    base_change_ms: f32,
    /// Current interval before the next change
    change_ms: f32,
    clock: Stopwatch,
}

impl Wind {
    /// Starts calm; the first change comes after the full base interval
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            value: 0,
            max: tuning.max_wind.max(1),
            base_change_ms: tuning.wind_change_ms,
            change_ms: tuning.wind_change_ms,
            clock: Stopwatch::started(),
        }
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[inline]
    pub fn change_ms(&self) -> f32 {
        self.change_ms
    }

    pub fn clock_mut(&mut self) -> &mut Stopwatch {
        &mut self.clock
    }

    /// Roll a nonzero magnitude and a sign
    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        let magnitude = rng.random_range(1..=self.max);
        if rng.random_bool(0.5) { magnitude } else { -magnitude }
    }

    /// Feed elapsed time. Returns true when the wind changed.
    pub fn update(&mut self, dt_ms: f32, rng: &mut impl Rng) -> bool {
        self.clock.advance(dt_ms);
        if self.clock.elapsed_ms() <= self.change_ms {
            return false;
        }

        self.value = self.roll(rng);
        self.change_ms = rng.random_range(self.base_change_ms / 2.0..=self.base_change_ms);
        self.clock.reset();
        log::debug!("Wind now {} (next change in {:.0} ms)", self.value, self.change_ms);
        true
    }
}

/// Wind plus the active time-slow effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub wind: Wind,
    slow: Countdown,
    slow_increment_ms: f32,
    slow_max_ms: f32,
    slow_factor: f32,
    drift: f32,
}

impl Environment {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            wind: Wind::new(tuning),
            slow: Countdown::default(),
            slow_increment_ms: tuning.powerup_increment_ms,
            slow_max_ms: tuning.powerup_max_ms,
            slow_factor: tuning.slow_motion_factor,
            drift: tuning.wind_drift,
        }
    }

    /// Advance wind and burn the slow effect
    pub fn update(&mut self, dt_ms: f32, rng: &mut impl Rng) {
        self.wind.update(dt_ms, rng);
        if self.slow.tick(dt_ms) {
            log::debug!("Time-slow expired");
        }
    }

    /// Collecting a time-slow item: add the increment, capped
    pub fn collect_time_slow(&mut self) {
        self.slow.extend(self.slow_increment_ms, self.slow_max_ms);
        log::debug!("Time-slow now {:.0} ms", self.slow.remaining_ms());
    }

    #[inline]
    pub fn slow_remaining_ms(&self) -> f32 {
        self.slow.remaining_ms()
    }

    #[inline]
    pub fn slow_active(&self) -> bool {
        self.slow.is_active()
    }

    /// Multiplier on every entity's velocity this tick
    #[inline]
    pub fn speed_scale(&self) -> f32 {
        if self.slow_active() { self.slow_factor } else { 1.0 }
    }

    /// Horizontal velocity every active entity takes this tick
    #[inline]
    pub fn drift_velocity(&self) -> f32 {
        self.wind.value() as f32 * self.drift
    }

    pub fn pause(&mut self) {
        self.wind.clock_mut().pause();
    }

    pub fn resume(&mut self) {
        self.wind.clock_mut().resume();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wind_changes_only_after_interval() {
        let tuning = Tuning::default();
        let mut wind = Wind::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(9);

        assert!(!wind.update(tuning.wind_change_ms, &mut rng));
        assert_eq!(wind.value(), 0);

        assert!(wind.update(1.0, &mut rng));
        assert!(wind.value().abs() >= 1 && wind.value().abs() <= tuning.max_wind);
        assert!(wind.change_ms() >= tuning.wind_change_ms / 2.0);
        assert!(wind.change_ms() <= tuning.wind_change_ms);

        let before = wind.value();
        assert!(!wind.update(wind.change_ms() - 1.0, &mut rng));
        assert_eq!(wind.value(), before);
    }

    #[test]
    fn test_wind_uses_both_signs() {
        let wind = Wind::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(10);
        let rolls: Vec<i32> = (0..200).map(|_| wind.roll(&mut rng)).collect();
        assert!(rolls.iter().any(|w| *w < 0));
        assert!(rolls.iter().any(|w| *w > 0));
        assert!(rolls.iter().all(|w| *w != 0));
    }

    #[test]
    fn test_time_slow_scales_speed() {
        let mut env = Environment::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(11);
        assert_eq!(env.speed_scale(), 1.0);

        env.collect_time_slow();
        assert_eq!(env.slow_remaining_ms(), 2000.0);
        assert!((env.speed_scale() - 0.1).abs() < 1e-6);

        env.update(1999.0, &mut rng);
        assert!(env.slow_active());
        env.update(1.0, &mut rng);
        assert!(!env.slow_active());
        assert_eq!(env.speed_scale(), 1.0);
    }

    #[test]
    fn test_time_slow_stack_cap() {
        let mut env = Environment::new(&Tuning::default());
        for _ in 0..3 {
            env.collect_time_slow();
        }
        let mut rng = Pcg32::seed_from_u64(12);
        env.update(1000.0, &mut rng);
        assert_eq!(env.slow_remaining_ms(), 5000.0);

        env.collect_time_slow();
        assert_eq!(env.slow_remaining_ms(), 7000.0);
        env.collect_time_slow();
        assert_eq!(env.slow_remaining_ms(), 8000.0);
    }

    #[test]
    fn test_paused_wind_holds() {
        let mut env = Environment::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(13);
        env.pause();
        env.update(60_000.0, &mut rng);
        assert_eq!(env.wind.value(), 0);
        env.resume();
        env.update(5001.0, &mut rng);
        assert_ne!(env.wind.value(), 0);
    }
}
