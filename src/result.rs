//! Terminal expedition report.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_ALTITUDE_M;
use crate::numbers::floor_f64_to_u64;
use crate::records::SessionBest;

/// How a session ended. Summit and rescue are defined outcomes of the state
/// machine, not errors; quit is the voluntary exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    /// Altitude reached the summit.
    Summit,
    /// Food or water ran out and the climber was pulled off the mountain.
    Rescue,
    /// The player quit from the play screen.
    Quit,
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summit => write!(f, "summit"),
            Self::Rescue => write!(f, "rescue"),
            Self::Quit => write!(f, "quit"),
        }
    }
}

/// Complete summary of a finished run for the summary screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpeditionSummary {
    pub ending: Ending,
    /// Highest altitude reached this run, meters.
    pub peak_altitude_m: i32,
    /// Game clock at the moment the run ended, seconds.
    pub elapsed_secs: f64,
    /// Process-wide records after this run was folded in.
    pub best: SessionBest,
    /// Altitude-banded closing line.
    pub epilogue: &'static str,
}

impl ExpeditionSummary {
    pub(crate) fn new(
        ending: Ending,
        peak_altitude_m: i32,
        elapsed_secs: f64,
        best: SessionBest,
    ) -> Self {
        Self {
            ending,
            peak_altitude_m,
            elapsed_secs,
            best,
            epilogue: epilogue_for(peak_altitude_m),
        }
    }
}

/// Closing line chosen by how high the run got.
#[must_use]
pub fn epilogue_for(peak_altitude_m: i32) -> &'static str {
    if peak_altitude_m >= MAX_ALTITUDE_M {
        "Summit reached! Legend status."
    } else if peak_altitude_m >= 6_000 {
        "In the Death Zone — heroic effort."
    } else if peak_altitude_m >= 4_000 {
        "High on the Lhotse Face. Solid climbing!"
    } else if peak_altitude_m >= 2_000 {
        "Through the Icefall and into the Cwm. Great progress!"
    } else {
        "Every expedition teaches. Next time: tighter steps, deeper breaths."
    }
}

/// Render a second count as `MM:SS` for HUD and summary lines.
#[must_use]
pub fn format_clock(secs: f64) -> String {
    let whole = floor_f64_to_u64(secs);
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epilogues_follow_altitude_bands() {
        assert!(epilogue_for(MAX_ALTITUDE_M).contains("Legend"));
        assert!(epilogue_for(6_001).contains("Death Zone"));
        assert!(epilogue_for(4_500).contains("Lhotse"));
        assert!(epilogue_for(2_000).contains("Icefall"));
        assert!(epilogue_for(300).contains("teaches"));
    }

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(59.9), "00:59");
        assert_eq!(format_clock(61.0), "01:01");
        assert_eq!(format_clock(754.2), "12:34");
    }

    #[test]
    fn summary_carries_records_and_epilogue() {
        let mut best = SessionBest::default();
        best.record_altitude(5_200);
        let summary = ExpeditionSummary::new(Ending::Rescue, 5_200, 88.0, best);
        assert_eq!(summary.ending, Ending::Rescue);
        assert_eq!(summary.best.best_altitude_m, 5_200);
        assert!(summary.epilogue.contains("Lhotse"));
    }
}
