//! Module table inference from column-name prefixes.
//!
//! The header of the first row decides the layout for the whole file:
//!
//! ```text
//! id, order_id, material_cost, labor_cost, wing-material_cost, tail-labor_cost
//!                                          ^^^^                ^^^^
//!                                          modules: [wing, tail]
//! ```
//!
//! Modules keep the order in which their prefix first appears, so the
//! generated script is reproducible. Table names are case-insensitive in
//! SQL, so `Wing-` and `wing-` in one header is an error rather than two
//! tables.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{SchemaError, SchemaResult};
use crate::models::{ModuleName, ID, LABOR_COST, MATERIAL_COST, MODULE_FIELDS, ORDER_ID, PRODUCT_TABLE};
use crate::parser::ParseResult;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Keywords reserved by at least one supported dialect. An unquoted table
/// named after one of these is a syntax error.
const RESERVED_WORDS: &[&str] = &[
    "all", "alter", "and", "any", "as", "asc", "between", "by", "case", "check", "column",
    "constraint", "create", "cross", "current_date", "current_time", "current_user", "default",
    "delete", "desc", "distinct", "drop", "else", "end", "except", "exists", "false", "fetch",
    "for", "foreign", "from", "full", "grant", "group", "having", "in", "index", "inner",
    "insert", "intersect", "into", "is", "join", "key", "left", "like", "limit", "natural",
    "not", "null", "offset", "on", "or", "order", "outer", "primary", "references", "right",
    "select", "set", "table", "then", "to", "true", "union", "unique", "update", "user",
    "using", "values", "when", "where", "with",
];

fn is_reserved(name: &str) -> bool {
    name.eq_ignore_ascii_case(PRODUCT_TABLE)
        || RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(name))
}

/// Inferred table layout.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    /// Module tables, in first-seen header order
    pub modules: Vec<ModuleName>,
    /// Separator used to split module columns
    pub separator: char,
    /// Header columns that feed no generated column
    pub ignored_columns: Vec<String>,
}

/// Derive the module tables from the header of the first row.
///
/// Every column containing `separator` is read as `<module><separator><field>`.
/// Prefixes are deduplicated and kept in first-seen order.
pub fn infer_modules(parsed: &ParseResult, separator: char) -> SchemaResult<Schema> {
    if parsed.records.is_empty() {
        return Err(SchemaError::EmptyInput);
    }

    if !parsed.headers.iter().any(|h| h == ORDER_ID) {
        return Err(SchemaError::MissingOrderId);
    }

    let mut modules: Vec<ModuleName> = Vec::new();
    let mut ignored_columns = Vec::new();

    for column in &parsed.headers {
        let Some((prefix, field)) = column.split_once(separator) else {
            if ![ID, ORDER_ID, MATERIAL_COST, LABOR_COST].contains(&column.as_str()) {
                ignored_columns.push(column.clone());
            }
            continue;
        };

        if !IDENTIFIER.is_match(prefix) {
            return Err(SchemaError::InvalidModuleName {
                name: prefix.to_string(),
                column: column.clone(),
            });
        }
        if is_reserved(prefix) {
            return Err(SchemaError::ReservedName(prefix.to_string()));
        }

        match modules.iter().find(|m| m.as_str().eq_ignore_ascii_case(prefix)) {
            Some(seen) if seen.as_str() != prefix => {
                return Err(SchemaError::CaseConflict {
                    first: seen.to_string(),
                    second: prefix.to_string(),
                });
            }
            Some(_) => {}
            None => modules.push(ModuleName::new(prefix)),
        }
        if !MODULE_FIELDS.contains(&field) {
            ignored_columns.push(column.clone());
        }
    }

    Ok(Schema {
        modules,
        separator,
        ignored_columns,
    })
}
