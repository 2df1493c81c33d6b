//! `CREATE TABLE` generation.
//!
//! Column types are fixed: identifiers are `VARCHAR(16)`, costs are `INT`.
//! Only the synthetic `id` column differs between dialects.

use super::Dialect;
use crate::models::{ModuleName, LABOR_COST, MATERIAL_COST, ORDER_ID, PRODUCT_TABLE, PROD_ID};

const ID_WIDTH: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    VarChar(u16),
    Int,
}

impl ColumnType {
    fn to_sql(self) -> String {
        match self {
            ColumnType::VarChar(width) => format!("VARCHAR({})", width),
            ColumnType::Int => "INT".to_string(),
        }
    }
}

/// A data column. The synthetic `id` key is implied for every table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub not_null: bool,
    pub unique: bool,
}

impl ColumnDef {
    fn key(name: &'static str, unique: bool) -> Self {
        Self {
            name,
            ty: ColumnType::VarChar(ID_WIDTH),
            not_null: true,
            unique,
        }
    }

    fn cost(name: &'static str) -> Self {
        Self {
            name,
            ty: ColumnType::Int,
            not_null: false,
            unique: false,
        }
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.ty.to_sql());
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        sql
    }
}

/// Named foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub name: String,
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

/// Logical description of one generated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableDef {
    /// Render the `CREATE TABLE` statement, `;` included.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut lines = vec![identity_column(dialect).to_string()];
        lines.extend(self.columns.iter().map(ColumnDef::to_sql));

        if dialect == Dialect::MySql {
            lines.push("PRIMARY KEY (id)".to_string());
        }

        for fk in &self.foreign_keys {
            lines.push(format!(
                "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
                fk.name, fk.column, fk.references_table, fk.references_column
            ));
        }

        format!("CREATE TABLE {} (\n    {}\n);", self.name, lines.join(",\n    "))
    }
}

fn identity_column(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::MySql => "id INT NOT NULL AUTO_INCREMENT",
        Dialect::Postgres => "id INT PRIMARY KEY GENERATED ALWAYS AS IDENTITY",
        Dialect::Sqlite => "id INTEGER PRIMARY KEY AUTOINCREMENT",
    }
}

/// The core table: one row per product order.
pub fn product_table() -> TableDef {
    TableDef {
        name: PRODUCT_TABLE.to_string(),
        columns: vec![
            ColumnDef::key(PROD_ID, true),
            ColumnDef::key(ORDER_ID, true),
            ColumnDef::cost(MATERIAL_COST),
            ColumnDef::cost(LABOR_COST),
        ],
        foreign_keys: Vec::new(),
    }
}

/// A module table joined to `product` through `order_id`.
pub fn module_table(module: &ModuleName) -> TableDef {
    TableDef {
        name: module.to_string(),
        columns: vec![
            ColumnDef::key(ORDER_ID, false),
            ColumnDef::cost(MATERIAL_COST),
            ColumnDef::cost(LABOR_COST),
        ],
        foreign_keys: vec![ForeignKey {
            name: format!("fk_{}_{}", module, ORDER_ID),
            column: ORDER_ID,
            references_table: PRODUCT_TABLE,
            references_column: ORDER_ID,
        }],
    }
}
