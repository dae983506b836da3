//! Error types for loading the score table and validating its rows.

use thiserror::Error;

/// Fatal errors raised while loading the dataset or the max-score table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("required column(s) appear more than once: {}", .0.join(", "))]
    DuplicateColumns(Vec<String>),

    #[error("invalid max-score table: {0}")]
    MaxScores(String),
}

/// A single data row that could not be used. The row is skipped and the
/// error is kept alongside the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowValidationError {
    #[error("line {line}: unparseable row: {message}")]
    Unparseable { line: u64, message: String },

    #[error("line {line}: average score is not a finite number")]
    NonFiniteScore { line: u64 },

    #[error("line {line}: missing value for column `{column}`")]
    MissingValue { line: u64, column: &'static str },
}

impl RowValidationError {
    /// Line number in the source file (header is line 1).
    pub fn line(&self) -> u64 {
        match self {
            RowValidationError::Unparseable { line, .. }
            | RowValidationError::NonFiniteScore { line }
            | RowValidationError::MissingValue { line, .. } => *line,
        }
    }
}
