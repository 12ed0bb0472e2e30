//! Animation speed and the frame-rate gate.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-adjustable animation speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed(f64);

impl Speed {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 50.0;
    pub const DEFAULT: f64 = 2.0;
    /// Change applied by one speed-up or slow-down key press.
    pub const INCREMENT: f64 = 0.2;

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn increase(&mut self) {
        *self = Self::new(self.0 + Self::INCREMENT);
    }

    pub fn decrease(&mut self) {
        *self = Self::new(self.0 - Self::INCREMENT);
    }

    /// Ticks per second at this speed, never zero.
    pub fn fps(self, base_fps: u32) -> u32 {
        ((base_fps as f64 * self.0) as u32).max(1)
    }

    /// Minimum wall-clock time between two admitted ticks, truncated to
    /// whole milliseconds.
    pub fn frame_interval(self, base_fps: u32) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps(base_fps)))
    }

    /// Interpolation step scaled relative to the default speed.
    pub fn scale_step(self, base_step: f64) -> f64 {
        (base_step * self.0 / Self::DEFAULT).min(1.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Admits at most one tick per frame interval.
///
/// Timestamps are durations since an arbitrary host epoch, so the gate is
/// independent of any particular clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameGate {
    last: Duration,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records `now` when at least `interval` has passed
    /// since the last admitted tick.
    pub fn ready(&mut self, now: Duration, interval: Duration) -> bool {
        if now.saturating_sub(self.last) < interval {
            return false;
        }
        self.last = now;
        true
    }

    pub fn last(&self) -> Duration {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_is_clamped() {
        assert_eq!(Speed::new(0.0).get(), Speed::MIN);
        assert_eq!(Speed::new(99.0).get(), Speed::MAX);
        assert_eq!(Speed::new(f64::NAN), Speed::default());

        let mut speed = Speed::new(Speed::MIN);
        speed.decrease();
        assert_eq!(speed.get(), Speed::MIN);

        let mut speed = Speed::new(Speed::MAX);
        speed.increase();
        assert_eq!(speed.get(), Speed::MAX);
    }

    #[test]
    fn key_presses_walk_in_increments() {
        let mut speed = Speed::default();
        speed.increase();
        assert!((speed.get() - 2.2).abs() < 1e-9);
        speed.decrease();
        speed.decrease();
        assert!((speed.get() - 1.8).abs() < 1e-9);
    }

    #[test]
    fn default_speed_runs_at_120_fps() {
        let speed = Speed::default();
        assert_eq!(speed.fps(60), 120);
        assert_eq!(speed.frame_interval(60), Duration::from_millis(8));
        assert_eq!(Speed::new(50.0).frame_interval(60), Duration::ZERO);
    }

    #[test]
    fn step_scales_with_speed() {
        assert!((Speed::default().scale_step(0.015) - 0.015).abs() < 1e-12);
        assert!((Speed::new(4.0).scale_step(0.015) - 0.03).abs() < 1e-12);
        assert_eq!(Speed::new(50.0).scale_step(0.5), 1.0);
    }

    #[test]
    fn gate_throttles_to_interval() {
        let mut gate = FrameGate::new();
        let interval = Duration::from_millis(8);
        assert!(!gate.ready(Duration::from_millis(5), interval));
        assert!(gate.ready(Duration::from_millis(8), interval));
        assert!(!gate.ready(Duration::from_millis(15), interval));
        assert!(gate.ready(Duration::from_millis(16), interval));
        assert_eq!(gate.last(), Duration::from_millis(16));
    }

    #[test]
    fn zero_interval_admits_every_poll() {
        let mut gate = FrameGate::new();
        let now = Duration::from_millis(3);
        assert!(gate.ready(now, Duration::ZERO));
        assert!(gate.ready(now, Duration::ZERO));
    }
}
