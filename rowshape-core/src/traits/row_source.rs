//! Backend row cursor.

use crate::types::Value;

/// A forward-only backend cursor.
///
/// `next_row` reads every column of the next row into `buf` (cleared first)
/// and returns `false` once the cursor is exhausted. Columns are delivered
/// in backend order; dropping unwanted columns is the caller's business.
pub trait RowSource {
    type Error;

    fn next_row(&mut self, buf: &mut Vec<Value>) -> Result<bool, Self::Error>;
}
