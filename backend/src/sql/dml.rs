//! Multi-row `INSERT` generation.
//!
//! One statement per table, one tuple per CSV row, in row order:
//!
//! ```text
//! INSERT INTO product (prod_id, order_id, material_cost, labor_cost) VALUES
//! ('P1','O1',10,5),
//! ('P2','O2',20,8);
//! ```

use super::value::SqlValue;
use crate::models::{ModuleName, ID, LABOR_COST, MATERIAL_COST, ORDER_ID, PRODUCT_TABLE, PROD_ID};
use crate::parser::{get_field, Row};

/// An `INSERT` statement before rendering.
#[derive(Debug, Clone)]
pub struct InsertStatement<'a> {
    pub table: String,
    pub columns: Vec<&'static str>,
    pub tuples: Vec<Vec<SqlValue<'a>>>,
}

impl InsertStatement<'_> {
    /// Number of `NULL` values substituted for missing cells.
    pub fn null_count(&self) -> usize {
        self.tuples
            .iter()
            .flatten()
            .filter(|v| v.is_null())
            .count()
    }

    /// Render the statement, or `None` when there is nothing to insert.
    pub fn to_sql(&self) -> Option<String> {
        if self.tuples.is_empty() {
            return None;
        }

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES",
            self.table,
            self.columns.join(", ")
        );

        let last = self.tuples.len() - 1;
        for (i, tuple) in self.tuples.iter().enumerate() {
            let values: Vec<String> = tuple.iter().map(ToString::to_string).collect();
            let terminator = if i == last { ';' } else { ',' };
            sql.push('\n');
            sql.push('(');
            sql.push_str(&values.join(","));
            sql.push(')');
            sql.push(terminator);
        }

        Some(sql)
    }
}

/// Insert every row into `product`.
pub fn product_insert(rows: &[Row]) -> InsertStatement<'_> {
    let tuples = rows
        .iter()
        .map(|row| {
            vec![
                SqlValue::text(get_field(row, ID)),
                SqlValue::text(get_field(row, ORDER_ID)),
                SqlValue::number(get_field(row, MATERIAL_COST)),
                SqlValue::number(get_field(row, LABOR_COST)),
            ]
        })
        .collect();

    InsertStatement {
        table: PRODUCT_TABLE.to_string(),
        columns: vec![PROD_ID, ORDER_ID, MATERIAL_COST, LABOR_COST],
        tuples,
    }
}

/// Insert every row's costs for one module.
pub fn module_insert<'a>(rows: &'a [Row], module: &ModuleName, separator: char) -> InsertStatement<'a> {
    let material_column = module.column(MATERIAL_COST, separator);
    let labor_column = module.column(LABOR_COST, separator);

    let tuples = rows
        .iter()
        .map(|row| {
            vec![
                SqlValue::text(get_field(row, ORDER_ID)),
                SqlValue::number(get_field(row, &material_column)),
                SqlValue::number(get_field(row, &labor_column)),
            ]
        })
        .collect();

    InsertStatement {
        table: module.to_string(),
        columns: vec![ORDER_ID, MATERIAL_COST, LABOR_COST],
        tuples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn rows(csv: &str) -> Vec<Row> {
        parse_str(csv, ',', "utf-8").unwrap().records
    }

    #[test]
    fn test_single_row_product() {
        let rows = rows("id,order_id,material_cost,labor_cost\nP1,O1,10,5");
        let sql = product_insert(&rows).to_sql().unwrap();

        assert_eq!(
            sql,
            "INSERT INTO product (prod_id, order_id, material_cost, labor_cost) VALUES\n('P1','O1',10,5);"
        );
    }

    #[test]
    fn test_terminators() {
        let rows = rows("id,order_id,material_cost,labor_cost\nP1,O1,10,5\nP2,O2,20,8\nP3,O3,30,9");
        let sql = product_insert(&rows).to_sql().unwrap();
        let tuples: Vec<&str> = sql.lines().skip(1).collect();

        assert_eq!(tuples, vec!["('P1','O1',10,5),", "('P2','O2',20,8),", "('P3','O3',30,9);"]);
    }

    #[test]
    fn test_module_insert() {
        let rows = rows("id,order_id,wing-material_cost,wing-labor_cost\nP1,O1,2,1");
        let sql = module_insert(&rows, &ModuleName::new("wing"), '-').to_sql().unwrap();

        assert_eq!(sql, "INSERT INTO wing (order_id, material_cost, labor_cost) VALUES\n('O1',2,1);");
    }

    #[test]
    fn test_missing_cells_become_null() {
        let rows = rows("id,order_id,material_cost,wing-labor_cost\nP1,O1,,4");
        let product = product_insert(&rows);
        let wing = module_insert(&rows, &ModuleName::new("wing"), '-');

        assert_eq!(product.to_sql().unwrap().lines().last(), Some("('P1','O1',NULL,NULL);"));
        assert_eq!(product.null_count(), 2);
        assert_eq!(wing.to_sql().unwrap().lines().last(), Some("('O1',NULL,4);"));
        assert_eq!(wing.null_count(), 1);
    }

    #[test]
    fn test_empty_id_stays_text() {
        let rows = rows("id,order_id,material_cost,labor_cost\n,O1,1,2");
        let sql = product_insert(&rows).to_sql().unwrap();

        assert!(sql.ends_with("('','O1',1,2);"));
    }

    #[test]
    fn test_quotes_escaped() {
        let rows = rows("id,order_id,material_cost,labor_cost\nP'1,O1,1,1");
        let sql = product_insert(&rows).to_sql().unwrap();

        assert!(sql.ends_with("('P''1','O1',1,1);"));
    }

    #[test]
    fn test_no_rows_renders_nothing() {
        assert!(product_insert(&[]).to_sql().is_none());
    }
}
