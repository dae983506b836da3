//! Per-test maximum scores used to turn raw averages into percentages.
//!
//! The built-in table can be extended or overridden from a JSON object:
//! ```json
//! {
//!   "EST I - Essay": 8,
//!   "EST II - Geography": 70
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::dataset::Row;
use crate::error::LoadError;

/// Ceiling applied to tests that have no entry.
pub const DEFAULT_MAX_SCORE: f64 = 100.0;

static BUILTIN_MAX_SCORES: &[(&str, f64)] = &[
    ("EST I total", 1600.0),
    ("EST I - Literacy", 800.0),
    ("EST I - Mathematics", 800.0),
    ("EST I - Essay", 8.0),
    ("EST II - Biology", 80.0),
    ("EST II - Physics", 75.0),
    ("EST II - Chemistry", 85.0),
    ("EST II - Math 1", 50.0),
    ("EST II - Math 2", 50.0),
    ("EST II - Literature", 60.0),
    ("EST II - World History", 65.0),
    ("EST II - Economics", 60.0),
];

/// Immutable test name → maximum score mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxScoreTable {
    entries: HashMap<String, f64>,
}

impl Default for MaxScoreTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MaxScoreTable {
    /// The EST I / EST II ceilings.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_MAX_SCORES
                .iter()
                .map(|(test, max)| (test.to_string(), *max))
                .collect(),
        }
    }

    /// Built-in table with the entries of the JSON file at `path` applied on top.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        let overrides: HashMap<String, f64> = serde_json::from_str(&content)
            .map_err(|e| LoadError::MaxScores(format!("{}: {e}", path.display())))?;
        Self::builtin().with_overrides(overrides)
    }

    /// Adds or replaces entries. Every ceiling must be finite and positive.
    pub fn with_overrides<I>(mut self, overrides: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        for (test, max) in overrides {
            if !max.is_finite() || max <= 0.0 {
                return Err(LoadError::MaxScores(format!(
                    "maximum for `{test}` must be a positive number, got {max}"
                )));
            }
            self.entries.insert(test, max);
        }
        Ok(self)
    }

    pub fn max_score(&self, test: &str) -> f64 {
        self.entries.get(test).copied().unwrap_or(DEFAULT_MAX_SCORE)
    }

    /// `average_score * 100 / max_score(test)`, not clamped.
    pub fn percentage(&self, row: &Row) -> f64 {
        row.average_score * 100.0 / self.max_score(&row.test)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
