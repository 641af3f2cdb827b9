//! Value, schema and row model.

pub mod coercion;
pub mod row;
pub mod rowset;
pub mod schema;
pub mod value;

pub use coercion::{BoolCoercion, NumericBoolRule};
pub use row::{FromValue, Row};
pub use rowset::Rowset;
pub use schema::{FieldAttr, FieldDef, Schema, StoreFlag};
pub use value::{DataType, Tristate, Value};
