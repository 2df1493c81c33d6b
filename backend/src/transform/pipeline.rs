//! High-level pipeline API for CSV to SQL conversion.
//!
//! Combines all steps: loading, module inference, script generation and
//! writing the result.
//!
//! # Example
//!
//! ```rust,ignore
//! use orders2sql::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = convert_file(
//!         Path::new("orders.csv"),
//!         Path::new("database.sql"),
//!         &ConvertOptions::default(),
//!     )?;
//!
//!     println!("Created {} tables", report.create_tables);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_item, log_stage, log_success, log_warning, LogLevel, Stage};
use crate::models::{ModuleName, DEFAULT_SEPARATOR};
use crate::parser::{parse_bytes, parse_bytes_auto, parse_csv_file, parse_csv_file_auto, ParseResult};
use crate::schema::infer_modules;
use crate::sql::{generate_script, EmitOptions, Script, StatementKind};

/// Name of the script written when no output path is given
pub const DEFAULT_OUTPUT: &str = "database.sql";

/// Options for the conversion pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// CSV delimiter (auto-detected when `None`)
    pub delimiter: Option<char>,

    /// Separator between module prefix and field name
    pub separator: char,

    /// Script generation options
    pub emit: EmitOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            separator: DEFAULT_SEPARATOR,
            emit: EmitOptions::default(),
        }
    }
}

/// CSV file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Summary of one conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    /// CSV parsing metadata
    pub csv_info: CsvInfo,

    /// Module tables, in script order
    pub modules: Vec<ModuleName>,

    /// Header columns that feed no generated column
    pub ignored_columns: Vec<String>,

    pub create_tables: usize,

    pub inserts: usize,

    /// `NULL`s substituted for missing cells
    pub null_values: usize,

    /// Where the script was written, if it was
    pub output: Option<PathBuf>,
}

/// A generated script together with its report
#[derive(Debug, Clone)]
pub struct Conversion {
    pub script: Script,
    pub report: ConvertReport,
}

/// Convert a CSV file and write the script to `output`.
///
/// Nothing is written unless every step before the write succeeds.
pub fn convert_file(input: &Path, output: &Path, options: &ConvertOptions) -> PipelineResult<ConvertReport> {
    let Conversion { script, mut report } = convert_path(input, options)?;

    log_stage(Stage::Write, output.display().to_string());
    std::fs::write(output, script.render()).map_err(|source| PipelineError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    log_success(format!("Script written to {}", output.display()));

    report.output = Some(output.to_path_buf());
    Ok(report)
}

/// Convert a CSV file without writing anything.
pub fn convert_path(input: &Path, options: &ConvertOptions) -> PipelineResult<Conversion> {
    log_stage(Stage::Read, input.display().to_string());
    let parsed = match options.delimiter {
        Some(d) => parse_csv_file(input, d)?,
        None => parse_csv_file_auto(input)?,
    };
    convert_parsed(parsed, options)
}

/// Convert CSV bytes without writing anything.
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> PipelineResult<Conversion> {
    log_stage(Stage::Read, format!("{} bytes", bytes.len()));
    let parsed = match options.delimiter {
        Some(d) => parse_bytes(bytes, d)?,
        None => parse_bytes_auto(bytes)?,
    };
    convert_parsed(parsed, options)
}

/// Internal: infer modules and generate the script for parsed rows
fn convert_parsed(parsed: ParseResult, options: &ConvertOptions) -> PipelineResult<Conversion> {
    log_success(format!("Encoding: {}", parsed.encoding));
    log_success(format!("Delimiter: '{}'", format_delimiter(parsed.delimiter)));
    log_success(format!("Read {} rows", parsed.records.len()));

    let csv_info = CsvInfo {
        encoding: parsed.encoding.clone(),
        delimiter: parsed.delimiter,
        headers: parsed.headers.clone(),
        row_count: parsed.records.len(),
    };

    log_stage(Stage::Infer, "module tables");
    let schema = infer_modules(&parsed, options.separator)?;
    if schema.modules.is_empty() {
        log_warning(format!("No module columns found (separator '{}')", options.separator));
    } else {
        log_success(format!("{} module table(s):", schema.modules.len()));
        for module in &schema.modules {
            log_item(LogLevel::Info, module.as_str());
        }
    }
    if !schema.ignored_columns.is_empty() {
        log_warning(format!("{} column(s) ignored:", schema.ignored_columns.len()));
        for column in &schema.ignored_columns {
            log_item(LogLevel::Warning, column.as_str());
        }
    }

    log_stage(Stage::Generate, "SQL");
    let script = generate_script(&parsed.records, &schema, &options.emit);
    let create_tables = script.count(StatementKind::CreateTable);
    let inserts = script.count(StatementKind::Insert);
    log_success(format!("{} CREATE TABLE, {} INSERT", create_tables, inserts));
    if script.null_values > 0 {
        log_warning(format!("{} missing value(s) written as NULL", script.null_values));
    }

    let report = ConvertReport {
        csv_info,
        modules: schema.modules,
        ignored_columns: schema.ignored_columns,
        create_tables,
        inserts,
        null_values: script.null_values,
        output: None,
    };

    Ok(Conversion { script, report })
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}
