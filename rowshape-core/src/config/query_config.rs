//! Query sources declared inline in the config file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::source::{Pragma, QuerySource};
use crate::types::{DataType, FieldAttr, StoreFlag};

/// Per-column pragma in TOML form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ColumnConfig {
    #[serde(rename = "type")]
    pub data_type: Option<DataType>,
    /// Target name (or `*`) → store flag.
    pub store: BTreeMap<String, StoreFlag>,
}

/// A query source declared in `[[queries]]`.
///
/// ```toml
/// [[queries]]
/// name = "active_patients"
/// statement = "SELECT id, is_active FROM patient WHERE is_active = 1"
/// read_only = true
/// modify_target = "patient"
///
/// [queries.columns.is_active]
/// type = "boolean"
/// store = { sqlite = "only_load" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct QuerySourceConfig {
    pub name: String,
    pub statement: String,
    pub read_only: Option<bool>,
    pub modify_target: Option<String>,
    pub columns: BTreeMap<String, ColumnConfig>,
}

impl QuerySourceConfig {
    pub fn to_source(&self) -> QuerySource {
        let source = QuerySource::new(self.name.clone(), self.statement.trim())
            .with_read_only(self.read_only.unwrap_or(false));

        if self.modify_target.is_none() && self.columns.is_empty() {
            return source;
        }

        let mut pragma = Pragma::new();
        if let Some(target) = &self.modify_target {
            pragma.set_modify_target(target.clone());
        }
        for (column, def) in &self.columns {
            if let Some(data_type) = def.data_type {
                pragma.set_column_type(column, data_type);
            }
            for (target, flag) in &def.store {
                pragma.add_column_attr(column, FieldAttr::new(target.clone(), *flag));
            }
        }
        source.with_pragma(pragma)
    }
}
