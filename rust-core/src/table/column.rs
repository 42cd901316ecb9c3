//! Typed column storage

use crate::error::{Result, TableFftError};
use ndarray::{s, Array1, Array2, ArrayView1, Axis};

/// Values held by a column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// Floating point tuples, one row per sample (rows x components)
    Numeric(Array2<f64>),

    /// Identifier-typed values (indices, ids). Never transformed.
    Id(Vec<i64>),

    /// Non-numeric values
    Text(Vec<String>),
}

/// Named column of a [`Table`](super::Table)
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Single-component numeric column
    pub fn scalar(name: impl Into<String>, values: Vec<f64>) -> Self {
        let data = Array1::from(values).insert_axis(Axis(1));
        Self::new(name, ColumnValues::Numeric(data))
    }

    /// Multi-component numeric column from interleaved values
    ///
    /// # Arguments
    /// * `components` - Number of components per tuple
    /// * `values` - Interleaved values, `rows * components` long
    pub fn tuples(name: impl Into<String>, components: usize, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if components == 0 || values.len() % components != 0 {
            return Err(TableFftError::ComponentMismatch {
                column: name,
                len: values.len(),
                components,
            });
        }

        let rows = values.len() / components;
        let len = values.len();
        let data = Array2::from_shape_vec((rows, components), values).map_err(|_| {
            TableFftError::ComponentMismatch {
                column: name.clone(),
                len,
                components,
            }
        })?;

        Ok(Self::new(name, ColumnValues::Numeric(data)))
    }

    pub fn identifiers(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnValues::Id(values))
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, ColumnValues::Text(values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// Number of tuples
    pub fn rows(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(data) => data.nrows(),
            ColumnValues::Id(ids) => ids.len(),
            ColumnValues::Text(text) => text.len(),
        }
    }

    /// Number of components per tuple (1 for identifier and text columns)
    pub fn components(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(data) => data.ncols(),
            _ => 1,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.values, ColumnValues::Numeric(_))
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.values, ColumnValues::Id(_))
    }

    /// First component of every tuple, for numeric columns
    pub fn first_component(&self) -> Option<ArrayView1<'_, f64>> {
        match &self.values {
            ColumnValues::Numeric(data) if data.ncols() > 0 => Some(data.column(0)),
            _ => None,
        }
    }

    /// Numeric value at (`row`, `component`)
    pub fn value(&self, row: usize, component: usize) -> Option<f64> {
        match &self.values {
            ColumnValues::Numeric(data) => data.get((row, component)).copied(),
            _ => None,
        }
    }

    /// Copy of the first `rows` tuples (or all of them if the column is shorter)
    pub fn truncated(&self, rows: usize) -> Column {
        let rows = rows.min(self.rows());
        let values = match &self.values {
            ColumnValues::Numeric(data) => {
                ColumnValues::Numeric(data.slice(s![..rows, ..]).to_owned())
            }
            ColumnValues::Id(ids) => ColumnValues::Id(ids[..rows].to_vec()),
            ColumnValues::Text(text) => ColumnValues::Text(text[..rows].to_vec()),
        };
        Column::new(self.name.clone(), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_column() {
        let col = Column::scalar("x", vec![1.0, 2.0, 3.0]);
        assert_eq!(col.rows(), 3);
        assert_eq!(col.components(), 1);
        assert!(col.is_numeric());
        assert_eq!(col.value(2, 0), Some(3.0));
        assert_eq!(col.value(3, 0), None);
    }

    #[test]
    fn test_tuple_column() {
        let col = Column::tuples("xy", 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(col.rows(), 3);
        assert_eq!(col.components(), 2);
        assert_eq!(col.value(1, 1), Some(4.0));
        assert_eq!(col.first_component().unwrap().to_vec(), vec![1.0, 3.0, 5.0]);

        assert!(Column::tuples("bad", 2, vec![1.0, 2.0, 3.0]).is_err());
        assert!(Column::tuples("bad", 0, vec![]).is_err());
    }

    #[test]
    fn test_truncated() {
        let col = Column::tuples("xy", 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let half = col.truncated(2);
        assert_eq!(half.rows(), 2);
        assert_eq!(half.components(), 2);
        assert_eq!(half.value(1, 1), Some(4.0));

        let text = Column::text("label", vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(text.truncated(1).values(), &ColumnValues::Text(vec!["a".into()]));

        // Never grows
        assert_eq!(Column::identifiers("id", vec![7, 8]).truncated(10).rows(), 2);
    }

    #[test]
    fn test_non_numeric_accessors() {
        let ids = Column::identifiers("id", vec![0, 1]);
        assert!(ids.is_identifier());
        assert!(!ids.is_numeric());
        assert!(ids.first_component().is_none());
        assert_eq!(ids.value(0, 0), None);
    }
}
