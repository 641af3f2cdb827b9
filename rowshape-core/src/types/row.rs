//! Materialized rows and typed value extraction.

use std::ops::Index;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::schema::Schema;
use super::value::{Tristate, Value};
use crate::errors::RowError;

/// One materialized record. Values are positional, keyed by `FieldDef::order`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<Schema>,
    shape: Option<Arc<str>>,
    values: Vec<Value>,
}

impl Row {
    /// Allocate a row shaped by `schema` with every value `Null`.
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = vec![Value::Null; schema.len()];
        Self {
            schema,
            shape: None,
            values,
        }
    }

    /// Allocate a row tagged with the static row shape it was declared by.
    pub fn with_shape(schema: Arc<Schema>, shape: Option<Arc<str>>) -> Self {
        let mut row = Self::new(schema);
        row.shape = shape;
        row
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Identity of the static row shape this row was built for, if any.
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get_at(&self, order: usize) -> Option<&Value> {
        self.values.get(order)
    }

    /// Case-insensitive lookup by field name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .field(name)
            .and_then(|def| self.values.get(def.order()))
    }

    /// Set the value at a field order. Returns false when the order is out of range.
    pub fn set_at(&mut self, order: usize, value: Value) -> bool {
        match self.values.get_mut(order) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), RowError> {
        let order = self.order_of(name)?;
        self.values[order] = value.into();
        Ok(())
    }

    /// Extract a field converted to `T`.
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<T, RowError> {
        let order = self.order_of(name)?;
        T::from_value(name, &self.values[order])
    }

    /// Read a boolean field as a tri-state value; `Null` is `Unknown`.
    pub fn tristate(&self, name: &str) -> Result<Tristate, RowError> {
        self.get_as::<Tristate>(name)
    }

    fn order_of(&self, name: &str) -> Result<usize, RowError> {
        self.schema
            .field(name)
            .map(|def| def.order())
            .ok_or_else(|| RowError::MissingField {
                schema: self.schema.name().to_string(),
                field: name.to_string(),
            })
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, order: usize) -> &Value {
        &self.values[order]
    }
}

/// Conversion from a row value into a concrete Rust type.
pub trait FromValue: Sized {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError>;
}

fn mismatch(field: &str, expected: &'static str, value: &Value) -> RowError {
    if value.is_null() {
        RowError::NullValue {
            field: field.to_string(),
        }
    } else {
        RowError::TypeMismatch {
            field: field.to_string(),
            expected,
            actual: value.type_name(),
        }
    }
}

impl FromValue for i64 {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError> {
        value.as_i64().ok_or_else(|| mismatch(field, "integer", value))
    }
}

impl FromValue for f64 {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError> {
        value.as_f64().ok_or_else(|| mismatch(field, "real", value))
    }
}

impl FromValue for bool {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError> {
        value.as_bool().ok_or_else(|| mismatch(field, "boolean", value))
    }
}

impl FromValue for String {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch(field, "text", value))
    }
}

impl FromValue for Vec<u8> {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError> {
        value
            .as_blob()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| mismatch(field, "blob", value))
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError> {
        value
            .as_timestamp()
            .ok_or_else(|| mismatch(field, "timestamp", value))
    }
}

impl FromValue for Uuid {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError> {
        value.as_uuid().ok_or_else(|| mismatch(field, "uuid", value))
    }
}

impl FromValue for Tristate {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError> {
        match value {
            Value::Null => Ok(Tristate::Unknown),
            Value::Bool(b) => Ok(Tristate::from(*b)),
            other => Err(mismatch(field, "boolean", other)),
        }
    }
}

impl FromValue for Value {
    fn from_value(_field: &str, value: &Value) -> Result<Self, RowError> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(field: &str, value: &Value) -> Result<Self, RowError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(field, other).map(Some),
        }
    }
}
