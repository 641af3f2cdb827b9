//! Rowset: ordered rows sharing one schema.

use std::ops::Index;
use std::sync::Arc;

use super::row::Row;
use super::schema::Schema;
use crate::errors::RowError;
use crate::shape::TypedRow;

/// Ordered collection of rows sharing one schema. The shape is fixed at
/// creation; rows are only appended by materialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Rowset {
    schema: Arc<Schema>,
    rows: Vec<Row>,
}

impl Rowset {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: Row) {
        debug_assert!(Arc::ptr_eq(row.schema(), &self.schema));
        self.rows.push(row);
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Convert every row into the typed row `T`.
    pub fn to_typed<T: TypedRow>(&self) -> Result<Vec<T>, RowError> {
        self.rows.iter().map(T::from_row).collect()
    }
}

impl Index<usize> for Rowset {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

impl IntoIterator for Rowset {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rowset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
