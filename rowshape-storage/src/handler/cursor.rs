//! Forward-only cursor over `rusqlite::Rows`.

use rowshape_core::traits::RowSource;
use rowshape_core::types::{DataType, Value};
use rusqlite::Rows;

use crate::binder::ConversionTable;

/// Reads each row's columns in backend order, decoding with one type hint
/// per column.
pub struct SqliteCursor<'s> {
    rows: Rows<'s>,
    hints: Vec<DataType>,
    conversion: &'s ConversionTable,
}

impl<'s> SqliteCursor<'s> {
    pub fn new(rows: Rows<'s>, hints: Vec<DataType>, conversion: &'s ConversionTable) -> Self {
        Self {
            rows,
            hints,
            conversion,
        }
    }
}

impl RowSource for SqliteCursor<'_> {
    type Error = rusqlite::Error;

    fn next_row(&mut self, buf: &mut Vec<Value>) -> Result<bool, rusqlite::Error> {
        buf.clear();
        let Some(row) = self.rows.next()? else {
            return Ok(false);
        };
        for (i, hint) in self.hints.iter().enumerate() {
            buf.push(self.conversion.from_sql(row.get_ref(i)?, *hint));
        }
        Ok(true)
    }
}
