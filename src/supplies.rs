//! Food and water pools plus the background drain accumulator.

use serde::{Deserialize, Serialize};

use crate::constants::{
    SUPPLY_CORRECT_GAIN, SUPPLY_DRAIN_INTERVAL_SECS, SUPPLY_DRAIN_UNIT, SUPPLY_MAX,
    SUPPLY_WRONG_LOSS,
};
use crate::numbers::floor_f64_to_u64;

/// Food and water levels, independently clamped to 0..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplies {
    pub food: i32,
    pub water: i32,
}

impl Supplies {
    /// Fresh expedition load-out: both pools full.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            food: SUPPLY_MAX,
            water: SUPPLY_MAX,
        }
    }

    /// Apply a signed delta to both pools, clamping each at both ends.
    pub fn apply_delta(&mut self, delta: i32) {
        self.food = (self.food + delta).clamp(0, SUPPLY_MAX);
        self.water = (self.water + delta).clamp(0, SUPPLY_MAX);
    }

    /// Boost for a correct answer.
    pub fn boost(&mut self) {
        self.apply_delta(SUPPLY_CORRECT_GAIN);
    }

    /// Loss for a wrong answer.
    pub fn penalize(&mut self) {
        self.apply_delta(-SUPPLY_WRONG_LOSS);
    }

    /// Background drain for the given number of whole intervals.
    pub fn drain(&mut self, units: u32) {
        if units == 0 {
            return;
        }
        let drop = SUPPLY_DRAIN_UNIT.saturating_mul(i32::try_from(units).unwrap_or(i32::MAX));
        self.apply_delta(-drop);
    }

    /// Either pool empty forces the rescue termination.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        self.food == 0 || self.water == 0
    }
}

impl Default for Supplies {
    fn default() -> Self {
        Self::full()
    }
}

/// Converts elapsed play time into whole drain units at a fixed interval,
/// carrying the fractional remainder across ticks. Total drain over a span
/// therefore does not depend on how the span was partitioned into ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DrainAccumulator {
    carry_secs: f64,
}

impl DrainAccumulator {
    /// Advance by `delta_secs` of play, returning the whole intervals crossed.
    /// Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, delta_secs: f64) -> u32 {
        if !delta_secs.is_finite() || delta_secs <= 0.0 {
            return 0;
        }
        self.carry_secs += delta_secs;
        let units = floor_f64_to_u64(self.carry_secs / SUPPLY_DRAIN_INTERVAL_SECS);
        if units > 0 {
            #[allow(clippy::cast_precision_loss)]
            {
                self.carry_secs -= units as f64 * SUPPLY_DRAIN_INTERVAL_SECS;
            }
        }
        u32::try_from(units).unwrap_or(u32::MAX)
    }

    /// Seconds currently carried toward the next interval.
    #[must_use]
    pub const fn carry_secs(&self) -> f64 {
        self.carry_secs
    }
}
