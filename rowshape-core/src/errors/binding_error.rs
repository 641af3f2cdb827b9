//! Parameter and key binding errors.

use super::error_code::{self, ErrorCode};

/// Errors raised while turning query parameters and keys into backend parameters.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("Duplicate parameter {name}")]
    DuplicateParameter { name: String },

    #[error("Invalid parameter name {name:?}")]
    InvalidParameterName { name: String },

    #[error("Composite key has no fields")]
    EmptyKey,

    #[error("Cannot convert parameter {name} from {from} to {to}: {message}")]
    Conversion {
        name: String,
        from: String,
        to: String,
        message: String,
    },
}

impl ErrorCode for BindingError {
    fn error_code(&self) -> &'static str {
        error_code::BINDING_ERROR
    }
}
