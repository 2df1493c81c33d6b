//! SQL literal rendering.

use std::fmt;

/// A single value inside an `INSERT` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlValue<'a> {
    /// Quoted string literal, `'` doubled.
    Text(&'a str),
    /// Unquoted, emitted verbatim.
    Number(&'a str),
    Null,
}

impl<'a> SqlValue<'a> {
    pub fn text(value: Option<&'a str>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Text)
    }

    /// Blank cells count as missing: an empty unquoted token is not SQL.
    pub fn number(value: Option<&'a str>) -> Self {
        value
            .filter(|v| !v.trim().is_empty())
            .map_or(SqlValue::Null, SqlValue::Number)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            SqlValue::Number(n) => f.write_str(n),
            SqlValue::Null => f.write_str("NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_quoted() {
        assert_eq!(SqlValue::Text("P1").to_string(), "'P1'");
    }

    #[test]
    fn test_text_quote_escaped() {
        assert_eq!(SqlValue::Text("O'Brien").to_string(), "'O''Brien'");
        assert_eq!(SqlValue::Text("');DROP TABLE product;--").to_string(), "''');DROP TABLE product;--'");
    }

    #[test]
    fn test_number_verbatim() {
        assert_eq!(SqlValue::Number("12.50").to_string(), "12.50");
    }

    #[test]
    fn test_missing_renders_null() {
        assert_eq!(SqlValue::number(None).to_string(), "NULL");
        assert_eq!(SqlValue::text(None).to_string(), "NULL");
        assert!(SqlValue::text(None).is_null());
        assert!(!SqlValue::number(Some("0")).is_null());
    }

    #[test]
    fn test_blank_number_is_null_blank_text_is_not() {
        assert_eq!(SqlValue::number(Some("")).to_string(), "NULL");
        assert_eq!(SqlValue::number(Some("  ")).to_string(), "NULL");
        assert_eq!(SqlValue::text(Some("")).to_string(), "''");
        assert_eq!(SqlValue::text(Some(" P1 ")).to_string(), "' P1 '");
    }
}
