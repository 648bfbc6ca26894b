//! Tabular result of a Genie query attachment.

use serde_json::Value;

/// Columns, rows and the generated SQL for one attachment.
///
/// Values are kept as raw JSON so that rendering can show them exactly as
/// the warehouse returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Column names in display order (may be empty).
    pub columns: Vec<String>,
    /// Data rows in warehouse order.
    pub rows: Vec<Vec<Value>>,
    /// SQL generated by Genie, when reported.
    pub sql: Option<String>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            sql: None,
        }
    }

    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
