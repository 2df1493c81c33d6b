//! # orders2sql - manufacturing orders CSV to SQL script
//!
//! orders2sql reads a flat CSV of product orders whose sub-assembly costs sit
//! in prefixed columns (`wing-material_cost`, `wing-labor_cost`, ...) and
//! writes one SQL script that creates a `product` table plus one table per
//! module, then fills them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Schema    │────▶│  SQL script │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │  (prefixes) │     │  (DDL+DML)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orders2sql::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! let report = convert_file(
//!     Path::new("orders.csv"),
//!     Path::new("database.sql"),
//!     &ConvertOptions::default(),
//! ).unwrap();
//! println!("{} module tables", report.modules.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Module names and column constants
//! - [`parser`] - CSV loading with auto-detection
//! - [`schema`] - Module table inference
//! - [`sql`] - DDL and DML generation
//! - [`transform`] - End-to-end pipeline
//! - [`logs`] - Progress logging

// Core modules
pub mod error;
pub mod models;

// Loading
pub mod parser;

// Inference
pub mod schema;

// Generation
pub mod sql;

// Pipeline
pub mod transform;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, PipelineError, SchemaError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{ModuleName, DEFAULT_SEPARATOR};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    get_field,
    parse_bytes,
    parse_bytes_auto,
    parse_csv_file,
    parse_csv_file_auto,
    parse_str,
    ParseResult,
    Row,
};

// =============================================================================
// Re-exports - Schema
// =============================================================================

pub use schema::{infer_modules, Schema};

// =============================================================================
// Re-exports - SQL
// =============================================================================

pub use sql::{generate_script, Dialect, EmitOptions, Script, StatementKind};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    convert_bytes,
    convert_file,
    convert_path,
    Conversion,
    ConvertOptions,
    ConvertReport,
    CsvInfo,
    DEFAULT_OUTPUT,
};

// =============================================================================
// Re-exports - Logging
// =============================================================================

pub use logs::{LogFormat, LOGGER};
