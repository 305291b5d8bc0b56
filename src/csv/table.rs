use serde::{Deserialize, Serialize};

use crate::error::TabioError;

/// An in-memory table: ordered column names plus rows of text cells.
///
/// Column order is significant and duplicate names are legal; name lookup is
/// positional, first match wins. Every row holds exactly one cell per
/// column, which [`Table::push_row`] enforces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, refusing one whose cell count does not match the
    /// column count.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), TabioError> {
        if row.len() != self.columns.len() {
            return Err(TabioError::RowLength {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (`row`, column named `name`), resolved positionally.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}
