//! Multiplication question generation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::progression::DifficultyLevel;
use crate::tables::TableSet;

/// A single multiplication question. Immutable once issued; the session
/// retires it exactly once per submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub table: u8,
    pub multiplier: u8,
}

impl Question {
    /// Draw a fresh question: table uniform over the active set, multiplier
    /// uniform over the level's inclusive range.
    pub fn generate<R: Rng>(tables: &TableSet, level: DifficultyLevel, rng: &mut R) -> Self {
        let choices = tables.as_slice();
        let table = choices[rng.gen_range(0..choices.len())];
        let (lo, hi) = level.multiplier_range();
        let multiplier = rng.gen_range(lo..=hi);
        Self { table, multiplier }
    }

    /// The expected answer.
    #[must_use]
    pub const fn product(self) -> i32 {
        (self.table as i32) * (self.multiplier as i32)
    }

    /// Display text, e.g. `7 × 4 = ?`.
    #[must_use]
    pub fn prompt(self) -> String {
        format!("{} × {} = ?", self.table, self.multiplier)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {} = ?", self.table, self.multiplier)
    }
}
