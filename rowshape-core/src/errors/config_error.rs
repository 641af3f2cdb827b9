//! Configuration errors.

use super::error_code::{self, ErrorCode};

/// Errors raised while loading configuration, query sources or row shapes.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Query source not found: {name}")]
    SourceNotFound { name: String },

    #[error("Malformed pragma in query source {source_name} at line {line}: {message}")]
    MalformedPragma {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("Row shape not registered: {shape}")]
    ShapeNotFound { shape: String },

    #[error("Invalid schema {schema}: {message}")]
    InvalidSchema { schema: String, message: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => error_code::SOURCE_NOT_FOUND,
            Self::ShapeNotFound { .. } => error_code::SHAPE_NOT_FOUND,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
