//! Column pragma: per-column type hints and store policies attached to a query source.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::types::{DataType, FieldAttr};

/// Declared metadata for one result column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPragma {
    type_hint: Option<DataType>,
    attrs: SmallVec<[FieldAttr; 2]>,
}

impl ColumnPragma {
    pub fn type_hint(&self) -> Option<DataType> {
        self.type_hint
    }

    pub fn attrs(&self) -> &[FieldAttr] {
        &self.attrs
    }
}

/// Pragma block of a query source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pragma {
    modify_target: Option<String>,
    columns: FxHashMap<String, ColumnPragma>,
}

impl Pragma {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the table modifications are aimed at. Overrides the derived schema name.
    pub fn with_modify_target(mut self, target: impl Into<String>) -> Self {
        self.modify_target = Some(target.into());
        self
    }

    pub fn with_column_type(mut self, column: &str, data_type: DataType) -> Self {
        self.set_column_type(column, data_type);
        self
    }

    pub fn with_column_attr(mut self, column: &str, attr: FieldAttr) -> Self {
        self.add_column_attr(column, attr);
        self
    }

    pub fn set_modify_target(&mut self, target: impl Into<String>) {
        self.modify_target = Some(target.into());
    }

    pub fn set_column_type(&mut self, column: &str, data_type: DataType) {
        self.columns.entry(column.to_lowercase()).or_default().type_hint = Some(data_type);
    }

    pub fn add_column_attr(&mut self, column: &str, attr: FieldAttr) {
        self.columns
            .entry(column.to_lowercase())
            .or_default()
            .attrs
            .push(attr);
    }

    /// The modify target, if declared and not blank.
    pub fn modify_target(&self) -> Option<&str> {
        self.modify_target
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Case-insensitive column lookup.
    pub fn column(&self, name: &str) -> Option<&ColumnPragma> {
        self.columns.get(&name.to_lowercase())
    }
}
