//! Pure progression rules: difficulty scaling, climb math, and camp flavor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    CAMP_TOLERANCE_M, LEVEL_GAIN_BONUS, LEVEL_MAX, LEVEL_THRESHOLDS_M, MAX_ALTITUDE_M,
    MULTIPLIER_RANGES, STEP_GAIN_BASE_M, STREAK_GAIN_BONUS, WRONG_PENALTY_M,
};
use crate::numbers::trunc_f64_to_i32;

/// Difficulty level in 0..=4, a monotonic non-decreasing function of altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    /// Level unlocked at the given altitude: the highest threshold not
    /// exceeding it, capped at 4.
    #[must_use]
    pub fn for_altitude(altitude_m: i32) -> Self {
        let mut level = 0u8;
        for (index, threshold) in LEVEL_THRESHOLDS_M.iter().enumerate() {
            if altitude_m >= *threshold {
                #[allow(clippy::cast_possible_truncation)]
                {
                    level = index as u8;
                }
            }
        }
        Self(level.min(LEVEL_MAX))
    }

    /// Raw level value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Inclusive multiplier range drawn at this level. The top level keeps a
    /// hard floor of 8 even if the configured range were widened below it.
    #[must_use]
    pub fn multiplier_range(self) -> (u8, u8) {
        let (lo, hi) = MULTIPLIER_RANGES[usize::from(self.0.min(LEVEL_MAX))];
        if self.0 >= LEVEL_MAX {
            (lo.max(crate::constants::TOP_LEVEL_MULTIPLIER_FLOOR), hi)
        } else {
            (lo, hi)
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Meters climbed for a correct answer. `streak` is counted after the
/// increment, so the first correct answer of a streak passes 1 and earns no
/// streak bonus. Truncated toward zero.
#[must_use]
pub fn gain_for_correct(level: DifficultyLevel, streak: u32) -> i32 {
    let streak_steps = f64::from(streak.saturating_sub(1));
    let gain = STEP_GAIN_BASE_M
        * (1.0 + LEVEL_GAIN_BONUS * f64::from(level.value()))
        * (1.0 + STREAK_GAIN_BONUS * streak_steps);
    trunc_f64_to_i32(gain)
}

/// Flat altitude penalty for a wrong answer, before the floor at 0.
#[must_use]
pub const fn wrong_penalty() -> i32 {
    WRONG_PENALTY_M
}

/// A named altitude milestone used for narrative feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camp {
    pub altitude_m: i32,
    pub name: &'static str,
}

/// Camps along the route, ascending. Base camp and the summit bracket the
/// intermediate camps used for "camp reached" flavor.
pub const CAMPS: [Camp; 6] = [
    Camp {
        altitude_m: 0,
        name: "Base Camp (5,364 m) — prayer flags flutter. Sherpas smile.",
    },
    Camp {
        altitude_m: 2_000,
        name: "Camp I — crevasses behind you, Khumbu Icefall conquered.",
    },
    Camp {
        altitude_m: 4_000,
        name: "Camp II — Western Cwm blazing bright with sunlight.",
    },
    Camp {
        altitude_m: 6_000,
        name: "Camp III — Lhotse Face looms like a wall of ice.",
    },
    Camp {
        altitude_m: 7_800,
        name: "Camp IV — Death Zone. Calm breath, clear mind.",
    },
    Camp {
        altitude_m: MAX_ALTITUDE_M,
        name: "SUMMIT! Yeti tracks in the snow… did you see that?!",
    },
];

/// The intermediate camp within the tolerance band of the altitude, if any.
/// Base camp and the summit never report as "reached"; flavor only.
#[must_use]
pub fn camp_reached(altitude_m: i32) -> Option<&'static Camp> {
    CAMPS.iter().find(|camp| {
        camp.altitude_m != 0
            && camp.altitude_m != MAX_ALTITUDE_M
            && (altitude_m - camp.altitude_m).abs() <= CAMP_TOLERANCE_M
    })
}

/// The first camp strictly above the altitude, or None at or past the summit.
#[must_use]
pub fn next_camp(altitude_m: i32) -> Option<&'static Camp> {
    CAMPS.iter().find(|camp| altitude_m < camp.altitude_m)
}
