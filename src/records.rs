//! Process-wide best records surviving across sessions in the same run.
//!
//! Modeled as an explicit value passed into terminal transitions rather than
//! ambient shared state, so tests can exercise the update rules directly.

use serde::{Deserialize, Serialize};

/// Best altitude ever reached and fastest summit ever recorded this process.
/// Altitude updates monotonically by max, summit time by min.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionBest {
    pub best_altitude_m: i32,
    pub fastest_summit_secs: Option<f64>,
}

impl SessionBest {
    /// Fold a run's peak altitude into the record.
    pub fn record_altitude(&mut self, altitude_m: i32) {
        self.best_altitude_m = self.best_altitude_m.max(altitude_m);
    }

    /// Fold a summit time into the record, keeping the fastest.
    pub fn record_summit(&mut self, elapsed_secs: f64) {
        self.fastest_summit_secs = Some(match self.fastest_summit_secs {
            Some(best) => best.min(elapsed_secs),
            None => elapsed_secs,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn altitude_only_moves_up() {
        let mut best = SessionBest::default();
        best.record_altitude(4_200);
        best.record_altitude(1_000);
        assert_eq!(best.best_altitude_m, 4_200);
        best.record_altitude(8_848);
        assert_eq!(best.best_altitude_m, 8_848);
    }

    #[test]
    fn summit_time_only_moves_down() {
        let mut best = SessionBest::default();
        assert!(best.fastest_summit_secs.is_none());
        best.record_summit(182.0);
        best.record_summit(240.0);
        assert_eq!(best.fastest_summit_secs, Some(182.0));
        best.record_summit(90.5);
        assert_eq!(best.fastest_summit_secs, Some(90.5));
    }
}
