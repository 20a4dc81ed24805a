//! Severity specs: ordered label → inclusive score range mappings.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SevcountError};
use crate::input::Value;

/// Label returned when no range contains a score.
pub const OUT_OF_RANGE: &str = "Score out of range";

/// An inclusive integer range `[low, high]`.
///
/// Serialized as a two-element array. `low <= high` is not enforced; an
/// inverted range simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct ScoreRange {
    pub low: i64,
    pub high: i64,
}

impl ScoreRange {
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    /// Whether `score` lies within the range, bounds included.
    pub fn contains(&self, score: i64) -> bool {
        self.low <= score && score <= self.high
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }
}

impl From<(i64, i64)> for ScoreRange {
    fn from((low, high): (i64, i64)) -> Self {
        Self { low, high }
    }
}

impl From<ScoreRange> for (i64, i64) {
    fn from(range: ScoreRange) -> Self {
        (range.low, range.high)
    }
}

/// Ordered mapping from severity label to score range.
///
/// Iteration order is insertion order. Inserting an existing label replaces
/// its range but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeveritySpec {
    ranges: IndexMap<String, ScoreRange>,
}

impl SeveritySpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a labeled range, consuming and returning the spec.
    pub fn with_label(mut self, label: impl Into<String>, low: i64, high: i64) -> Self {
        self.insert(label, ScoreRange::new(low, high));
        self
    }

    /// Add or replace a labeled range.
    pub fn insert(&mut self, label: impl Into<String>, range: ScoreRange) {
        self.ranges.insert(label.into(), range);
    }

    /// Labels and ranges in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScoreRange)> {
        self.ranges.iter().map(|(label, range)| (label.as_str(), range))
    }

    /// Labels in iteration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Categorize a score. See [`classify`].
    pub fn classify(&self, score: i64) -> &str {
        classify(score, self)
    }

    /// Parse a spec from a JSON object of `label: [low, high]` entries.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let spec: SeveritySpec = serde_json::from_str(json)?;
        spec.checked()
    }

    /// Load a spec from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| SevcountError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject empty specs and warn about ranges that can never match.
    fn checked(self) -> Result<Self> {
        if self.is_empty() {
            return Err(SevcountError::InvalidSpec(
                "no severity labels defined".to_string(),
            ));
        }
        for (label, range) in self.iter().filter(|(_, r)| r.is_inverted()) {
            tracing::warn!(
                label,
                low = range.low,
                high = range.high,
                "severity range has low > high and will never match"
            );
        }
        Ok(self)
    }
}

/// Parses the inline form `Small=0:9,Medium=10:19,Large=20:39`.
impl FromStr for SeveritySpec {
    type Err = SevcountError;

    fn from_str(s: &str) -> Result<Self> {
        let mut spec = SeveritySpec::new();

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (label, bounds) = entry.split_once('=').ok_or_else(|| {
                SevcountError::InvalidSpec(format!("expected LABEL=LOW:HIGH, got '{entry}'"))
            })?;
            let label = label.trim();
            if label.is_empty() {
                return Err(SevcountError::InvalidSpec(format!(
                    "missing label in '{entry}'"
                )));
            }
            let (low, high) = bounds.split_once(':').ok_or_else(|| {
                SevcountError::InvalidSpec(format!("expected LOW:HIGH bounds in '{entry}'"))
            })?;
            let parse_bound = |b: &str| {
                b.trim().parse::<i64>().map_err(|e| {
                    SevcountError::InvalidSpec(format!("bad bound '{}' in '{entry}': {e}", b.trim()))
                })
            };
            spec.insert(label, ScoreRange::new(parse_bound(low)?, parse_bound(high)?));
        }

        spec.checked()
    }
}

impl<L: Into<String>> FromIterator<(L, ScoreRange)> for SeveritySpec {
    fn from_iter<I: IntoIterator<Item = (L, ScoreRange)>>(iter: I) -> Self {
        let mut spec = SeveritySpec::new();
        for (label, range) in iter {
            spec.insert(label, range);
        }
        spec
    }
}

/// Categorize a score against a severity spec.
///
/// Every entry is checked in order and the last one whose range contains
/// the score wins, so later labels override earlier ones where ranges
/// overlap. Returns [`OUT_OF_RANGE`] when nothing matches.
pub fn classify(score: i64, spec: &SeveritySpec) -> &str {
    let mut category = OUT_OF_RANGE;
    // No early exit: last match wins.
    for (label, range) in spec.iter() {
        if range.contains(score) {
            category = label;
        }
    }
    category
}

/// Categorize a table cell.
///
/// Only cells that hold an exact integer score can match a range.
pub fn classify_value<'a>(value: &Value, spec: &'a SeveritySpec) -> &'a str {
    match value.as_score() {
        Some(score) => classify(score, spec),
        None => OUT_OF_RANGE,
    }
}
