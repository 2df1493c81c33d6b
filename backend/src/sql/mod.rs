//! SQL script generation.
//!
//! - `ddl`: `CREATE TABLE` for `product` and every module
//! - `dml`: one multi-row `INSERT` per table
//! - `value`: literal rendering and escaping
//!
//! ## Script layout
//!
//! ```text
//! -- create product table
//! CREATE TABLE product (...);
//!
//! -- create <module> table          (one per module, schema order)
//! CREATE TABLE <module> (...);
//!
//! -- insert data to product table
//! INSERT INTO product ... VALUES
//!
//! -- insert data to <module> table  (one per module, schema order)
//! INSERT INTO <module> ... VALUES
//! ```
//!
//! DDL always precedes DML. Every statement is preceded by a `--` comment
//! naming what it does. There is no transaction wrapping.

pub mod ddl;
pub mod dml;
pub mod value;

use serde::{Deserialize, Serialize};

use crate::parser::Row;
use crate::schema::Schema;

pub use ddl::{module_table, product_table, ColumnDef, ColumnType, ForeignKey, TableDef};
pub use dml::{module_insert, product_insert, InsertStatement};
pub use value::SqlValue;

/// SQL flavour used for the synthetic identity column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[value(name = "mysql")]
    MySql,
    #[default]
    Postgres,
    Sqlite,
}

/// Options for script generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Identity column syntax
    pub dialect: Dialect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    CreateTable,
    Insert,
}

/// One rendered statement.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub table: String,
    pub sql: String,
}

impl Statement {
    /// Section comment written above the statement.
    pub fn comment(&self) -> String {
        match self.kind {
            StatementKind::CreateTable => format!("-- create {} table", self.table),
            StatementKind::Insert => format!("-- insert data to {} table", self.table),
        }
    }
}

/// The complete generated script.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Script {
    pub statements: Vec<Statement>,
    /// `NULL`s substituted for missing cells across all inserts
    pub null_values: usize,
}

impl Script {
    /// Number of statements of the given kind.
    pub fn count(&self, kind: StatementKind) -> usize {
        self.statements.iter().filter(|s| s.kind == kind).count()
    }

    /// Full script text: commented statements separated by a blank line,
    /// trailing newline.
    pub fn render(&self) -> String {
        let mut out = self
            .statements
            .iter()
            .map(|s| format!("{}\n{}", s.comment(), s.sql))
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }
}

/// Build the script for `rows` using the inferred `schema`.
pub fn generate_script(rows: &[Row], schema: &Schema, options: &EmitOptions) -> Script {
    let mut script = Script::default();

    let tables = std::iter::once(product_table()).chain(schema.modules.iter().map(module_table));
    for table in tables {
        script.statements.push(Statement {
            kind: StatementKind::CreateTable,
            sql: table.to_sql(options.dialect),
            table: table.name,
        });
    }

    let inserts = std::iter::once(product_insert(rows)).chain(
        schema
            .modules
            .iter()
            .map(|m| module_insert(rows, m, schema.separator)),
    );
    for insert in inserts {
        script.null_values += insert.null_count();
        if let Some(sql) = insert.to_sql() {
            script.statements.push(Statement {
                kind: StatementKind::Insert,
                table: insert.table,
                sql,
            });
        }
    }

    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use crate::schema::infer_modules;

    fn script_for(csv: &str) -> Script {
        let parsed = parse_str(csv, ',', "utf-8").unwrap();
        let schema = infer_modules(&parsed, '-').unwrap();
        generate_script(&parsed.records, &schema, &EmitOptions::default())
    }

    #[test]
    fn test_round_trip_single_module() {
        let script = script_for(
            "id,order_id,material_cost,labor_cost,wing-material_cost,wing-labor_cost\nP1,O1,10,5,2,1",
        );
        let sql = script.render();

        let tables: Vec<&str> = script
            .statements
            .iter()
            .filter(|s| s.kind == StatementKind::CreateTable)
            .map(|s| s.table.as_str())
            .collect();
        assert_eq!(tables, vec!["product", "wing"]);
        assert!(sql.contains("\n('P1','O1',10,5);"));
        assert!(sql.contains("\n('O1',2,1);"));
    }

    #[test]
    fn test_statement_counts() {
        let script = script_for(
            "id,order_id,material_cost,labor_cost,a-material_cost,a-labor_cost,b-material_cost,b-labor_cost\n\
             P1,O1,1,2,3,4,5,6\n\
             P2,O2,1,2,3,4,5,6\n\
             P3,O3,1,2,3,4,5,6",
        );
        let sql = script.render();

        assert_eq!(script.count(StatementKind::CreateTable), 3);
        assert_eq!(script.count(StatementKind::Insert), 3);
        assert_eq!(sql.matches("CREATE TABLE").count(), 3);
        assert_eq!(sql.matches("INSERT INTO").count(), 3);
        assert_eq!(sql.matches("REFERENCES product (order_id)").count(), 2);
    }

    #[test]
    fn test_ddl_precedes_dml() {
        let script = script_for("id,order_id,z-labor_cost,y-labor_cost\nP1,O1,1,2");
        let order: Vec<(StatementKind, &str)> = script
            .statements
            .iter()
            .map(|s| (s.kind, s.table.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![
                (StatementKind::CreateTable, "product"),
                (StatementKind::CreateTable, "z"),
                (StatementKind::CreateTable, "y"),
                (StatementKind::Insert, "product"),
                (StatementKind::Insert, "z"),
                (StatementKind::Insert, "y"),
            ]
        );
    }

    #[test]
    fn test_section_comments() {
        let sql = script_for("id,order_id,wing-labor_cost\nP1,O1,1").render();

        assert!(sql.contains("-- create wing table\nCREATE TABLE wing ("));
        assert!(sql.contains("-- insert data to wing table\nINSERT INTO wing"));
        assert_eq!(sql.matches("\n-- ").count() + 1, 4);
    }

    #[test]
    fn test_default_dialect_is_postgres() {
        let sql = script_for("id,order_id\nP1,O1").render();

        assert_eq!(EmitOptions::default().dialect, Dialect::Postgres);
        assert!(sql.contains("id INT PRIMARY KEY GENERATED ALWAYS AS IDENTITY,"));
        assert!(!sql.contains("AUTO_INCREMENT"));
    }

    #[test]
    fn test_two_rows_terminators() {
        let sql = script_for("id,order_id,material_cost,labor_cost\nP1,O1,1,2\nP2,O2,3,4").render();

        assert!(sql.contains("('P1','O1',1,2),\n('P2','O2',3,4);"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let csv = "id,order_id,b-material_cost,a-material_cost,c-labor_cost\nP1,O1,1,2,3\nP2,O2,4,5,6";
        let first = script_for(csv).render();

        for _ in 0..5 {
            assert_eq!(script_for(csv).render(), first);
        }
    }

    #[test]
    fn test_null_values_counted() {
        let script = script_for("id,order_id,material_cost,wing-labor_cost\nP1,O1,,2");

        // product: material_cost empty, labor_cost absent; wing: material_cost absent
        assert_eq!(script.null_values, 3);
    }

    #[test]
    fn test_render_layout() {
        let sql = script_for("id,order_id,material_cost,labor_cost\nP1,O1,1,2").render();

        assert!(sql.starts_with("-- create product table\nCREATE TABLE product (\n"));
        assert!(sql.contains(");\n\n-- insert data to product table\nINSERT INTO product"));
        assert!(sql.ends_with("('P1','O1',1,2);\n"));
    }
}
