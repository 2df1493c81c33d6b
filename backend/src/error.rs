//! Error types for the orders2sql conversion pipeline.
//!
//! - [`CsvError`] - loading and parsing the input file
//! - [`SchemaError`] - inferring module tables from the header
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Loading Errors
// =============================================================================

/// Errors while loading the input CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Input path does not resolve to a file.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the file contents.
    #[error("Failed to decode input: {0}")]
    Encoding(String),

    /// Row does not fit the header.
    #[error("Malformed CSV at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// Delimiter is not a single-byte ASCII character.
    #[error("Unsupported delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),

    /// Header line missing or blank.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// The same column name appears twice in the header.
    #[error("Duplicate column in header: {0}")]
    DuplicateHeader(String),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(e) => CsvError::Io(e),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => CsvError::Malformed {
                line,
                message: format!("expected {} fields, found {}", expected_len, len),
            },
            csv::ErrorKind::Utf8 { err, .. } => CsvError::Encoding(err.to_string()),
            other => CsvError::Malformed {
                line,
                message: format!("{:?}", other),
            },
        }
    }
}

// =============================================================================
// Schema Inference Errors
// =============================================================================

/// Errors while deriving the table layout from the header.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No data rows to infer from.
    #[error("CSV has no data rows")]
    EmptyInput,

    /// The join column is absent from the header.
    #[error("Missing required column: order_id")]
    MissingOrderId,

    /// Prefix cannot be used as a table name.
    #[error("Invalid module name '{name}' in column '{column}'")]
    InvalidModuleName { name: String, column: String },

    /// Prefix is the core table or an SQL keyword.
    #[error("Module name '{0}' is reserved and cannot name a table")]
    ReservedName(String),

    /// Two prefixes name the same table once case is ignored.
    #[error("Module names '{first}' and '{second}' differ only by case")]
    CaseConflict { first: String, second: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by
/// [`crate::transform::pipeline::convert_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV loading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Schema inference error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Failed to write the generated script.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for schema inference.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
