//! Minimal named-column table consumed and produced by the FFT engine
//!
//! A table is an ordered sequence of named, equal-length columns. Columns are
//! reference counted so passthrough data can be shared between an input table
//! and the table derived from it.

pub mod column;

pub use column::{Column, ColumnValues};

use crate::error::{Result, TableFftError};
use std::sync::Arc;

/// Ordered collection of named columns
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Arc<Column>>,
}

impl Table {
    /// Create an empty table (no columns, no rows)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Table::add_column`]
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.add_column(column)?;
        Ok(self)
    }

    /// Append a column, checking it against the current row count
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        self.add_shared_column(Arc::new(column))
    }

    /// Append a column that may also be referenced by other tables
    pub fn add_shared_column(&mut self, column: Arc<Column>) -> Result<()> {
        if let Some(first) = self.columns.first() {
            if first.rows() != column.rows() {
                return Err(TableFftError::RowCountMismatch {
                    column: column.name().to_string(),
                    expected: first.rows(),
                    found: column.rows(),
                });
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Append without the row-count check.
    ///
    /// The FFT engine uses this when it reproduces the ragged layout of a
    /// block-averaged, full-spectrum transform.
    pub(crate) fn push_unchecked(&mut self, column: Arc<Column>) {
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Arc<Column>> {
        self.columns.get(index)
    }

    /// Exact, case-sensitive lookup
    pub fn column_by_name(&self, name: &str) -> Option<&Arc<Column>> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// First column whose name matches `name` ignoring ASCII case
    pub fn column_by_name_ci(&self, name: &str) -> Option<&Arc<Column>> {
        self.columns
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Row count of the first column (0 for a table without columns)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.rows())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Drop every column
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count_mismatch_rejected() {
        let mut table = Table::new();
        table.add_column(Column::scalar("a", vec![1.0, 2.0, 3.0])).unwrap();

        let err = table
            .add_column(Column::scalar("b", vec![1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            TableFftError::RowCountMismatch { expected: 3, found: 2, .. }
        ));
        assert_eq!(table.num_columns(), 1);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let table = Table::new()
            .with_column(Column::scalar("Time", vec![0.0, 0.1]))
            .unwrap()
            .with_column(Column::scalar("signal", vec![1.0, 2.0]))
            .unwrap();

        assert_eq!(table.column_by_name_ci("TIME").unwrap().name(), "Time");
        assert!(table.column_by_name("time").is_none());
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names(), vec!["Time", "signal"]);
    }

    #[test]
    fn test_shared_columns() {
        let shared = Arc::new(Column::identifiers("ids", vec![1, 2, 3]));
        let mut a = Table::new();
        let mut b = Table::new();
        a.add_shared_column(Arc::clone(&shared)).unwrap();
        b.add_shared_column(Arc::clone(&shared)).unwrap();

        assert!(Arc::ptr_eq(a.column(0).unwrap(), b.column(0).unwrap()));
        assert_eq!(Arc::strong_count(&shared), 3);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
    }
}
