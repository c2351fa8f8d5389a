//! Centralized balance and tuning constants for the expedition engine.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control.

// Altitude tuning ----------------------------------------------------------
/// Summit altitude in meters. Reaching it ends the session as a win.
pub const MAX_ALTITUDE_M: i32 = 8_848;
/// Base climb in meters for a correct answer before level/streak bonuses.
pub(crate) const STEP_GAIN_BASE_M: f64 = 260.0;
/// Flat altitude loss in meters for a wrong answer.
pub(crate) const WRONG_PENALTY_M: i32 = 120;
/// Per-level multiplier applied on top of the base climb.
pub(crate) const LEVEL_GAIN_BONUS: f64 = 0.15;
/// Per-consecutive-correct multiplier applied past the first answer in a streak.
pub(crate) const STREAK_GAIN_BONUS: f64 = 0.08;

// Difficulty tuning --------------------------------------------------------
/// Altitude thresholds (meters) at which difficulty levels 0..=4 unlock.
pub(crate) const LEVEL_THRESHOLDS_M: [i32; 5] = [0, 2_000, 4_000, 6_000, 7_800];
/// Highest difficulty level.
pub(crate) const LEVEL_MAX: u8 = 4;
/// Inclusive multiplier ranges per difficulty level.
pub(crate) const MULTIPLIER_RANGES: [(u8, u8); 5] = [(1, 5), (3, 8), (5, 10), (6, 10), (8, 10)];
/// Hard lower bound for the top-level multiplier draw.
pub(crate) const TOP_LEVEL_MULTIPLIER_FLOOR: u8 = 8;

// Supply tuning ------------------------------------------------------------
/// Ceiling for both food and water.
pub const SUPPLY_MAX: i32 = 10;
/// Food and water granted by a correct answer.
pub(crate) const SUPPLY_CORRECT_GAIN: i32 = 2;
/// Food and water lost on a wrong answer.
pub(crate) const SUPPLY_WRONG_LOSS: i32 = 2;
/// Seconds of play per unit of background supply drain.
pub(crate) const SUPPLY_DRAIN_INTERVAL_SECS: f64 = 12.0;
/// Food and water drained per elapsed interval.
pub(crate) const SUPPLY_DRAIN_UNIT: i32 = 1;

// Turn pacing --------------------------------------------------------------
/// Delay before the next question is issued after a correct answer.
pub(crate) const NEXT_QUESTION_DELAY_SECS: f64 = 1.2;
/// Delay between the summit answer and the summary screen.
pub(crate) const SUMMIT_DELAY_SECS: f64 = 1.2;
/// Delay between supply exhaustion and the summary screen.
pub(crate) const RESCUE_DELAY_SECS: f64 = 0.6;

// Camps --------------------------------------------------------------------
/// Tolerance band in meters for "camp reached" flavor text.
pub(crate) const CAMP_TOLERANCE_M: i32 = 60;

// Tables -------------------------------------------------------------------
/// Smallest selectable multiplication table.
pub(crate) const TABLE_MIN: u8 = 1;
/// Largest selectable multiplication table.
pub(crate) const TABLE_MAX: u8 = 10;
