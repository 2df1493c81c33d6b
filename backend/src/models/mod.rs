//! Domain models for the orders2sql pipeline.
//!
//! - [`ModuleName`] - a sub-assembly prefix that becomes its own table
//! - column name constants shared by the schema inferrer and the SQL emitter

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Column names
// =============================================================================

/// Name of the core table.
pub const PRODUCT_TABLE: &str = "product";

/// Product identifier column in the CSV (stored as `prod_id`).
pub const ID: &str = "id";

/// Product identifier column in the generated schema.
pub const PROD_ID: &str = "prod_id";

/// Business key of the product and join key of every module table.
pub const ORDER_ID: &str = "order_id";

pub const MATERIAL_COST: &str = "material_cost";

pub const LABOR_COST: &str = "labor_cost";

/// Fields a module column may carry after its prefix.
pub const MODULE_FIELDS: [&str; 2] = [MATERIAL_COST, LABOR_COST];

/// Default separator between module prefix and field name.
pub const DEFAULT_SEPARATOR: char = '-';

// =============================================================================
// Modules
// =============================================================================

/// A module prefix, e.g. `wing` for the `wing-material_cost` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Wrap a prefix that has already been validated as an identifier.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// CSV column holding `field` for this module.
    pub fn column(&self, field: &str, separator: char) -> String {
        format!("{}{}{}", self.0, separator, field)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_column() {
        let wing = ModuleName::new("wing");
        assert_eq!(wing.column(MATERIAL_COST, '-'), "wing-material_cost");
        assert_eq!(wing.column(LABOR_COST, '.'), "wing.labor_cost");
    }

    #[test]
    fn test_module_serializes_as_string() {
        let json = serde_json::to_string(&ModuleName::new("tail")).unwrap();
        assert_eq!(json, "\"tail\"");
    }
}
