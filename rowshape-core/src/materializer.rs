//! Rowset materialization: stream backend rows into rows shaped by a
//! resolved schema.

use std::sync::Arc;

use crate::resolver::ResolvedSchema;
use crate::traits::RowSource;
use crate::types::{BoolCoercion, FieldDef, Row, Rowset};

/// Copies loaded columns from a backend cursor into `Row`s. Boolean fields go
/// through the tri-state coercion table instead of a direct copy.
pub struct RowsetMaterializer<'a> {
    coercion: &'a BoolCoercion,
}

impl<'a> RowsetMaterializer<'a> {
    pub fn new(coercion: &'a BoolCoercion) -> Self {
        Self { coercion }
    }

    /// Drain `cursor` into a rowset. With `one_row` the cursor is not advanced
    /// past the first row. A cursor error abandons the rows gathered so far.
    pub fn populate<S: RowSource>(
        &self,
        cursor: &mut S,
        resolved: &ResolvedSchema,
        one_row: bool,
    ) -> Result<Rowset, S::Error> {
        let schema = Arc::clone(resolved.schema());
        let filter = resolved.load_filter();
        let mut rowset = Rowset::new(Arc::clone(&schema));
        let mut raw = Vec::with_capacity(filter.len());

        while cursor.next_row(&mut raw)? {
            let mut row = Row::with_shape(Arc::clone(&schema), resolved.shape().cloned());

            for (slot, value) in filter.iter().zip(raw.iter_mut()) {
                let Some(order) = *slot else {
                    continue;
                };
                let value = std::mem::take(value);
                let value = if schema.field_at(order).is_some_and(FieldDef::is_boolean) {
                    self.coercion.coerce(&value).into()
                } else {
                    value
                };
                row.set_at(order, value);
            }

            rowset.push(row);
            if one_row {
                break;
            }
        }

        Ok(rowset)
    }
}
