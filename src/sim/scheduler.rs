//! Spawn scheduler
//!
//! Decides how many pool entries are released into play. Each release
//! shortens the mean wait before the next one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::Stopwatch;
use crate::tuning::{Difficulty, Tuning};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    release_count: usize,
    /// Wait before the next release (ms)
    next_release_ms: f32,
    clock: Stopwatch,
    acceleration: f32,
    delay_roll: (u32, u32),
}

impl SpawnScheduler {
    pub fn new(difficulty: Difficulty, tuning: &Tuning) -> Self {
        Self {
            release_count: 0,
            next_release_ms: tuning.first_release_ms,
            clock: Stopwatch::started(),
            acceleration: difficulty.acceleration(tuning),
            delay_roll: tuning.release_delay_ms,
        }
    }

    #[inline]
    pub fn release_count(&self) -> usize {
        self.release_count
    }

    #[inline]
    pub fn next_release_ms(&self) -> f32 {
        self.next_release_ms
    }

    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn clock_mut(&mut self) -> &mut Stopwatch {
        &mut self.clock
    }

    /// Divisor applied to the raw delay roll at a given release count
    #[inline]
    pub fn ramp(&self, release_count: usize) -> f32 {
        1.0 + release_count as f32 * self.acceleration
    }

    /// Roll the wait that follows release number `release_count`
    pub fn roll_delay(&self, release_count: usize, rng: &mut impl Rng) -> f32 {
        let (lo, hi) = self.delay_roll;
        rng.random_range(lo..=hi) as f32 / self.ramp(release_count)
    }

    /// Feed elapsed time and release at most one entity.
    ///
    /// Never releases past `pool_len`. Returns true when a release happened.
    pub fn advance(&mut self, dt_ms: f32, pool_len: usize, rng: &mut impl Rng) -> bool {
        self.clock.advance(dt_ms);

        if self.clock.elapsed_ms() <= self.next_release_ms || self.release_count >= pool_len {
            return false;
        }

        self.release_count += 1;
        self.clock.reset();
        self.next_release_ms = self.roll_delay(self.release_count, rng);
        log::debug!(
            "Released entity #{} (next in {:.0} ms)",
            self.release_count,
            self.next_release_ms
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn scheduler() -> SpawnScheduler {
        SpawnScheduler::new(Difficulty::EASY, &Tuning::default())
    }

    #[test]
    fn test_first_release_after_threshold() {
        let mut s = scheduler();
        let mut rng = Pcg32::seed_from_u64(1);

        assert!(!s.advance(1000.0, 250, &mut rng));
        assert_eq!(s.release_count(), 0);

        assert!(s.advance(1.0, 250, &mut rng));
        assert_eq!(s.release_count(), 1);

        // A single step can release at most one
        assert!(!s.advance(1.0, 250, &mut rng));
        assert_eq!(s.release_count(), 1);
    }

    #[test]
    fn test_never_passes_pool_size() {
        let mut s = scheduler();
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..100 {
            s.advance(5000.0, 3, &mut rng);
        }
        assert_eq!(s.release_count(), 3);

        // Empty pool never releases
        let mut s = scheduler();
        assert!(!s.advance(5000.0, 0, &mut rng));
    }

    #[test]
    fn test_delay_within_ramped_range() {
        let mut s = scheduler();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            s.advance(2000.0, 1000, &mut rng);
            let ramp = s.ramp(s.release_count());
            assert!(s.next_release_ms() >= 500.0 / ramp - 1e-3);
            assert!(s.next_release_ms() <= 1500.0 / ramp + 1e-3);
        }
    }

    #[test]
    fn test_acceleration_scales_with_difficulty() {
        let hard = SpawnScheduler::new(Difficulty::HARD, &Tuning::default());
        assert!((hard.acceleration() - 0.12).abs() < 1e-6);
        assert!((hard.ramp(10) - 2.2).abs() < 1e-5);
    }

    #[test]
    fn test_mean_delay_decreases_with_releases() {
        let s = SpawnScheduler::new(Difficulty::MEDIUM, &Tuning::default());
        let mut rng = Pcg32::seed_from_u64(4);
        let samples = 4000;

        let mean = |n: usize, rng: &mut Pcg32| {
            (0..samples).map(|_| s.roll_delay(n, rng)).sum::<f32>() / samples as f32
        };

        let mut previous = mean(0, &mut rng);
        for n in [1, 5, 20, 100] {
            let m = mean(n, &mut rng);
            assert!(m < previous, "mean at {} ({}) not below {}", n, m, previous);
            previous = m;
        }
    }

    #[test]
    fn test_paused_clock_holds_releases() {
        let mut s = scheduler();
        let mut rng = Pcg32::seed_from_u64(5);
        s.clock_mut().pause();
        assert!(!s.advance(10_000.0, 10, &mut rng));
        s.clock_mut().resume();
        assert!(s.advance(1001.0, 10, &mut rng));
    }
}
