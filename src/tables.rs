//! Multiplication table selection parsed from free-form player input.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::constants::{TABLE_MAX, TABLE_MIN};

/// Tokens that select every table regardless of the rest of the input.
const ALL_TOKENS: [&str; 3] = ["all", "everything", "any"];

/// Validated, ascending, deduplicated set of multiplication tables in 1..=10.
///
/// Construction never fails: malformed input falls back to the full set so a
/// bad table choice can never block play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSet(SmallVec<[u8; 10]>);

impl TableSet {
    /// The full set {1..=10}.
    #[must_use]
    pub fn full() -> Self {
        Self((TABLE_MIN..=TABLE_MAX).collect())
    }

    /// Parse a free-form table specification.
    ///
    /// Case-insensitive and whitespace-tolerant. Accepts "all"-style tokens,
    /// comma lists, and hyphen ranges in either order ("9-7" means 7..=9).
    /// Values outside 1..=10 and unreadable tokens are silently dropped; if
    /// nothing survives, the full set is returned.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let normalized: String = input
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if ALL_TOKENS.contains(&normalized.as_str()) {
            return Self::full();
        }

        let mut chosen: SmallVec<[u8; 10]> = SmallVec::new();
        for token in normalized.split(',').filter(|t| !t.is_empty()) {
            match token.split_once('-') {
                Some((a, b)) => {
                    if let (Ok(start), Ok(end)) = (a.parse::<i64>(), b.parse::<i64>()) {
                        let lower = start.min(end);
                        let upper = start.max(end);
                        for value in lower..=upper {
                            push_if_valid(&mut chosen, value);
                        }
                    }
                }
                None => {
                    if let Ok(value) = token.parse::<i64>() {
                        push_if_valid(&mut chosen, value);
                    }
                }
            }
        }

        if chosen.is_empty() {
            return Self::full();
        }
        chosen.sort_unstable();
        Self(chosen)
    }

    /// Tables in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of selected tables; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept so the type reads like a collection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the given table is part of the set.
    #[must_use]
    pub fn contains(&self, table: u8) -> bool {
        self.0.binary_search(&table).is_ok()
    }
}

fn push_if_valid(chosen: &mut SmallVec<[u8; 10]>, value: i64) {
    if (i64::from(TABLE_MIN)..=i64::from(TABLE_MAX)).contains(&value) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let table = value as u8;
        if !chosen.contains(&table) {
            chosen.push(table);
        }
    }
}

impl Default for TableSet {
    fn default() -> Self {
        Self::full()
    }
}

impl FromStr for TableSet {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for TableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for table in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{table}")?;
            first = false;
        }
        Ok(())
    }
}
