//! Converts elapsed host time into whole simulation ticks.
//!
//! Stands in for a periodic timer: the host reports elapsed time and the clock
//! says how many ticks are due. Ticks never overlap and a paused clock never
//! fires.

use serde::{Deserialize, Serialize};

/// Lowest simulation speed multiplier.
pub const MIN_SPEED: f32 = 1.0;
/// Highest simulation speed multiplier.
pub const MAX_SPEED: f32 = 10.0;

/// Running or paused tick timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickClock {
    base_interval_ms: f64,
    speed: f32,
    paused: bool,
    accumulated_ms: f64,
}

impl TickClock {
    /// Creates a running clock.
    ///
    /// A base interval that is not a positive number leaves the clock unable
    /// to fire.
    pub fn new(base_interval_ms: f64, speed: f32) -> Self {
        Self {
            base_interval_ms,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            paused: false,
            accumulated_ms: 0.0,
        }
    }

    /// Current tick interval, `base_interval / speed`.
    pub fn interval_ms(&self) -> f64 {
        self.base_interval_ms / f64::from(self.speed)
    }

    /// Host time accumulated toward the next tick, in milliseconds.
    pub fn pending_ms(&self) -> f64 {
        self.accumulated_ms
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Whether ticks are suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Sets the speed, clamped to 1..=10.
    ///
    /// Like tearing down and recreating a timer, this drops any partial
    /// interval already accumulated.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self.accumulated_ms = 0.0;
    }

    /// Flips between running and paused.
    ///
    /// Both directions discard the partial interval, so a resumed clock starts
    /// on a clean boundary.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.accumulated_ms = 0.0;
    }

    /// Reports `elapsed_ms` of host time.
    ///
    /// # Returns
    ///
    /// Number of ticks that became due, always 0 while paused.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let interval = self.interval_ms();
        if self.paused || elapsed_ms <= 0.0 || !(interval > 0.0 && interval.is_finite()) {
            return 0;
        }
        self.accumulated_ms += elapsed_ms;
        let due = (self.accumulated_ms / interval).floor();
        self.accumulated_ms -= due * interval;
        due as u32
    }
}
