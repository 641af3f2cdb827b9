//! Conversion table between rowshape values and SQLite storage classes.
//!
//! Parameters are converted by their semantic type (declared, else the
//! value's own). Result values are read back using the field's declared type
//! as a hint, so a timestamp written as RFC 3339 text or unix time comes back
//! as `Value::Timestamp`.

use chrono::{DateTime, NaiveDateTime, Utc};
use rowshape_core::config::{ConversionConfig, TimestampFormat, UuidFormat};
use rowshape_core::errors::BindingError;
use rowshape_core::query::BoundParameter;
use rowshape_core::types::{DataType, Value};
use rusqlite::types::{Value as SqlValue, ValueRef};
use uuid::Uuid;

const SQLITE_DATETIME: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Explicit per-type conversion rules for one store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionTable {
    timestamps: TimestampFormat,
    uuids: UuidFormat,
}

impl ConversionTable {
    pub fn new(timestamps: TimestampFormat, uuids: UuidFormat) -> Self {
        Self { timestamps, uuids }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(
            config.effective_timestamp_format(),
            config.effective_uuid_format(),
        )
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        self.timestamps
    }

    pub fn uuid_format(&self) -> UuidFormat {
        self.uuids
    }

    /// Convert a bound parameter into its SQLite value.
    pub fn to_sql(&self, param: &BoundParameter) -> Result<SqlValue, BindingError> {
        self.convert(&param.name, &param.value, param.semantic_type())
    }

    fn convert(&self, name: &str, value: &Value, to: DataType) -> Result<SqlValue, BindingError> {
        let fail = |message: &str| BindingError::Conversion {
            name: name.to_string(),
            from: value.type_name().to_string(),
            to: to.name().to_string(),
            message: message.to_string(),
        };

        let converted = match (to, value) {
            (_, Value::Null) => SqlValue::Null,
            (DataType::Any, other) => return self.convert(name, other, other.data_type()),

            (DataType::Boolean, Value::Bool(b)) => SqlValue::Integer(i64::from(*b)),
            (DataType::Boolean, Value::Integer(i)) => SqlValue::Integer(i64::from(*i != 0)),
            (DataType::Boolean, _) => return Err(fail("not a boolean")),

            (DataType::Integer, Value::Integer(i)) => SqlValue::Integer(*i),
            (DataType::Integer, Value::Bool(b)) => SqlValue::Integer(i64::from(*b)),
            (DataType::Integer, Value::Real(r)) if r.fract() == 0.0 && r.abs() < 9.0e18 => {
                SqlValue::Integer(*r as i64)
            }
            (DataType::Integer, Value::Text(s)) => s
                .trim()
                .parse::<i64>()
                .map(SqlValue::Integer)
                .map_err(|e| fail(&e.to_string()))?,
            (DataType::Integer, _) => return Err(fail("not an integer")),

            (DataType::Real, Value::Real(r)) => SqlValue::Real(*r),
            (DataType::Real, Value::Integer(i)) => SqlValue::Real(*i as f64),
            (DataType::Real, Value::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(SqlValue::Real)
                .map_err(|e| fail(&e.to_string()))?,
            (DataType::Real, _) => return Err(fail("not a number")),

            (DataType::Text | DataType::Enum, Value::Text(s) | Value::Enum(s)) => {
                SqlValue::Text(s.clone())
            }
            (DataType::Text, Value::Integer(i)) => SqlValue::Text(i.to_string()),
            (DataType::Text, Value::Real(r)) => SqlValue::Text(r.to_string()),
            (DataType::Text, Value::Uuid(u)) => SqlValue::Text(u.hyphenated().to_string()),
            (DataType::Text, Value::Timestamp(t)) => SqlValue::Text(t.to_rfc3339()),
            (DataType::Text | DataType::Enum, _) => return Err(fail("no text representation")),

            (DataType::Blob, Value::Blob(b)) => SqlValue::Blob(b.clone()),
            (DataType::Blob, Value::Text(s)) => SqlValue::Blob(s.as_bytes().to_vec()),
            (DataType::Blob, Value::Uuid(u)) => SqlValue::Blob(u.as_bytes().to_vec()),
            (DataType::Blob, _) => return Err(fail("not binary")),

            (DataType::Timestamp, Value::Timestamp(t)) => self.timestamp(*t),
            (DataType::Timestamp, Value::Text(s)) => {
                self.timestamp(parse_timestamp(s).ok_or_else(|| fail("not an RFC 3339 timestamp"))?)
            }
            (DataType::Timestamp, _) => return Err(fail("not a timestamp")),

            (DataType::Uuid, Value::Uuid(u)) => self.uuid(*u),
            (DataType::Uuid, Value::Text(s)) => {
                self.uuid(Uuid::parse_str(s.trim()).map_err(|e| fail(&e.to_string()))?)
            }
            (DataType::Uuid, Value::Blob(b)) => {
                self.uuid(Uuid::from_slice(b).map_err(|e| fail(&e.to_string()))?)
            }
            (DataType::Uuid, _) => return Err(fail("not a uuid")),
        };
        Ok(converted)
    }

    fn timestamp(&self, t: DateTime<Utc>) -> SqlValue {
        match self.timestamps {
            TimestampFormat::Rfc3339 => SqlValue::Text(t.to_rfc3339()),
            TimestampFormat::UnixSeconds => SqlValue::Integer(t.timestamp()),
            TimestampFormat::UnixMillis => SqlValue::Integer(t.timestamp_millis()),
        }
    }

    fn uuid(&self, u: Uuid) -> SqlValue {
        match self.uuids {
            UuidFormat::Text => SqlValue::Text(u.hyphenated().to_string()),
            UuidFormat::Blob => SqlValue::Blob(u.as_bytes().to_vec()),
        }
    }

    /// Read one SQLite value, using `hint` to recover richer types.
    /// Values that do not parse as the hinted type are kept as stored.
    pub fn from_sql(&self, raw: ValueRef<'_>, hint: DataType) -> Value {
        match (raw, hint) {
            (ValueRef::Null, _) => Value::Null,
            (ValueRef::Integer(i), DataType::Timestamp) => {
                let t = match self.timestamps {
                    TimestampFormat::UnixMillis => DateTime::from_timestamp_millis(i),
                    _ => DateTime::from_timestamp(i, 0),
                };
                t.map_or(Value::Integer(i), Value::Timestamp)
            }
            (ValueRef::Integer(i), _) => Value::Integer(i),
            (ValueRef::Real(r), _) => Value::Real(r),
            // Invalid UTF-8 in a TEXT cell is returned as its raw bytes.
            (ValueRef::Text(t), _) => match std::str::from_utf8(t) {
                Ok(text) => match hint {
                    DataType::Timestamp => parse_timestamp(text)
                        .map_or_else(|| Value::Text(text.to_string()), Value::Timestamp),
                    DataType::Uuid => Uuid::parse_str(text.trim())
                        .map_or_else(|_| Value::Text(text.to_string()), Value::Uuid),
                    DataType::Enum => Value::Enum(text.to_string()),
                    _ => Value::Text(text.to_string()),
                },
                Err(_) => Value::Blob(t.to_vec()),
            },
            (ValueRef::Blob(b), DataType::Uuid) if b.len() == 16 => {
                Uuid::from_slice(b).map_or_else(|_| Value::Blob(b.to_vec()), Value::Uuid)
            }
            (ValueRef::Blob(b), _) => Value::Blob(b.to_vec()),
        }
    }
}

/// RFC 3339, or SQLite's own `YYYY-MM-DD HH:MM:SS[.fff]` (taken as UTC).
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, SQLITE_DATETIME)
                .ok()
                .map(|t| t.and_utc())
        })
}
