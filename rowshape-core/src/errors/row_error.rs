//! Typed row conversion errors.

use super::error_code::{self, ErrorCode};

/// Errors raised while converting a dynamic `Row` into a typed row.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("Field {field} is not part of schema {schema}")]
    MissingField { schema: String, field: String },

    #[error("Field {field} holds {actual}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Field {field} is null")]
    NullValue { field: String },
}

impl ErrorCode for RowError {
    fn error_code(&self) -> &'static str {
        error_code::ROW_ERROR
    }
}
