//! CSV loader for the per-student score averages.
//!
//! The file must carry the columns listed in [`REQUIRED_COLUMNS`]; any
//! other columns are ignored. Rows that fail validation are skipped and
//! recorded as warnings instead of aborting the load.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{LoadError, RowValidationError};

pub const COL_USERNAME: &str = "Username";
pub const COL_TEST: &str = "Test";
pub const COL_SKILL: &str = "Skill/Passage";
pub const COL_COUNTRY: &str = "Country";
pub const COL_VERSION: &str = "Version";
pub const COL_AVERAGE_SCORE: &str = "Average Score";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_USERNAME,
    COL_TEST,
    COL_SKILL,
    COL_COUNTRY,
    COL_VERSION,
    COL_AVERAGE_SCORE,
];

/// One skill/passage average for one student on one test administration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Test")]
    pub test: String,
    #[serde(rename = "Skill/Passage")]
    pub skill_or_passage: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Average Score")]
    pub average_score: f64,
}

/// The loaded score table. Read-only once built.
#[derive(Debug, Default)]
pub struct Dataset {
    rows: Vec<Row>,
    warnings: Vec<RowValidationError>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            warnings: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows skipped during loading, in file order.
    pub fn warnings(&self) -> &[RowValidationError] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn usernames(&self) -> Vec<&str> {
        distinct(&self.rows, |r| r.username.as_str())
    }

    pub fn tests(&self) -> Vec<&str> {
        distinct(&self.rows, |r| r.test.as_str())
    }

    pub fn countries(&self) -> Vec<&str> {
        distinct(&self.rows, |r| r.country.as_str())
    }

    pub fn versions(&self) -> Vec<&str> {
        distinct(&self.rows, |r| r.version.as_str())
    }
}

/// Distinct values in first-appearance order.
fn distinct<'a>(rows: &'a [Row], key: impl Fn(&'a Row) -> &'a str) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(key)
        .filter(|value| seen.insert(*value))
        .collect()
}

/// Loads a dataset from a CSV file on disk.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened, the header row is
/// unreadable, or required columns are absent or repeated.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path)?;
    let dataset = read_dataset(file)?;

    info!(
        rows = dataset.len(),
        skipped = dataset.warnings().len(),
        "Dataset loaded"
    );
    Ok(dataset)
}

/// Reads a dataset from any CSV source.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    check_columns(&headers)?;

    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        // header occupies line 1
        let fallback_line = idx as u64 + 2;

        let outcome = match result {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                parse_row(&record, &headers, line)
            }
            Err(e) => Err(RowValidationError::Unparseable {
                line: e.position().map_or(fallback_line, |p| p.line()),
                message: e.to_string(),
            }),
        };

        match outcome {
            Ok(row) => rows.push(row),
            Err(err) => {
                warn!(line = err.line(), error = %err, "Skipping invalid row");
                warnings.push(err);
            }
        }
    }

    Ok(Dataset { rows, warnings })
}

fn check_columns(headers: &StringRecord) -> Result<(), LoadError> {
    let occurrences = |col: &str| headers.iter().filter(|h| *h == col).count();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| occurrences(**col) == 0)
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let duplicated: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| occurrences(**col) > 1)
        .map(|col| col.to_string())
        .collect();
    if !duplicated.is_empty() {
        return Err(LoadError::DuplicateColumns(duplicated));
    }

    Ok(())
}

fn parse_row(
    record: &StringRecord,
    headers: &StringRecord,
    line: u64,
) -> Result<Row, RowValidationError> {
    let row: Row =
        record
            .deserialize(Some(headers))
            .map_err(|e| RowValidationError::Unparseable {
                line,
                message: e.to_string(),
            })?;

    // percentages are score * 100, which must stay finite too
    if !row.average_score.is_finite() || !(row.average_score * 100.0).is_finite() {
        return Err(RowValidationError::NonFiniteScore { line });
    }

    for (column, value) in [
        (COL_USERNAME, &row.username),
        (COL_TEST, &row.test),
        (COL_SKILL, &row.skill_or_passage),
    ] {
        if value.is_empty() {
            return Err(RowValidationError::MissingValue { line, column });
        }
    }

    Ok(row)
}
