//! Result metadata: SQLite declared column types mapped to `DataType`.

use rowshape_core::resolver::BackendColumn;
use rowshape_core::types::DataType;
use rusqlite::Statement;

/// Map a declared column type using SQLite's affinity rules, with the
/// boolean, timestamp and uuid spellings checked first.
pub fn column_type(decl_type: Option<&str>) -> DataType {
    let Some(decl) = decl_type else {
        return DataType::Any;
    };
    let decl = decl.to_ascii_uppercase();
    let has = |needle: &str| decl.contains(needle);

    if has("BOOL") {
        DataType::Boolean
    } else if has("UUID") || has("GUID") {
        DataType::Uuid
    } else if has("DATE") || has("TIME") {
        DataType::Timestamp
    } else if has("INT") {
        DataType::Integer
    } else if has("CHAR") || has("CLOB") || has("TEXT") {
        DataType::Text
    } else if has("BLOB") {
        DataType::Blob
    } else if has("REAL") || has("FLOA") || has("DOUB") {
        DataType::Real
    } else {
        DataType::Any
    }
}

/// Result columns of a prepared statement, in backend order.
/// Reads metadata only; the statement is not stepped.
pub fn backend_columns(stmt: &Statement<'_>) -> Vec<BackendColumn> {
    stmt.columns()
        .iter()
        .map(|col| BackendColumn::new(col.name(), column_type(col.decl_type())))
        .collect()
}
