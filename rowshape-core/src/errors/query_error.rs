//! Query handling errors and the non-fatal schema mismatch report.

use std::error::Error as StdError;

use super::error_code::{self, ErrorCode};
use super::{BindingError, ConfigError, RowError};

type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// A failure raised by the backend while preparing, binding or executing a
/// statement. Display and `source()` are forwarded to the original error,
/// which stays reachable through `downcast_ref` and `into_inner`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct BackendError(BoxedError);

impl BackendError {
    /// Wrap an original backend error.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Box::new(error))
    }

    /// Borrow the original error.
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }

    /// Borrow the original error as a concrete backend type.
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Recover the original error.
    pub fn into_inner(self) -> BoxedError {
        self.0
    }
}

impl ErrorCode for BackendError {
    fn error_code(&self) -> &'static str {
        error_code::BACKEND_ERROR
    }
}

/// A declared row shape shared no column with the backend result.
/// Non-fatal: the schema is still returned with an empty load-filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Row shape {shape} matched none of the backend columns [{}]", .columns.join(", "))]
pub struct SchemaMismatch {
    pub shape: String,
    pub columns: Vec<String>,
}

impl ErrorCode for SchemaMismatch {
    fn error_code(&self) -> &'static str {
        error_code::SCHEMA_MISMATCH
    }
}

/// Errors surfaced by query handlers.
/// Aggregates the per-concern errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Binding error: {0}")]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Row conversion error: {0}")]
    Row(#[from] RowError),
}

impl QueryError {
    /// Wrap an original backend error.
    pub fn backend<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Backend(BackendError::new(error))
    }

    /// Borrow the original backend error, if this is a backend failure of type `T`.
    pub fn backend_source<T: StdError + 'static>(&self) -> Option<&T> {
        match self {
            Self::Backend(e) => e.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl ErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Binding(e) => e.error_code(),
            Self::Backend(e) => e.error_code(),
            Self::Row(e) => e.error_code(),
        }
    }
}

/// Result alias used throughout query handling.
pub type QueryResult<T> = Result<T, QueryError>;
