//! Error handling for rowshape.
//! One error enum per concern, `thiserror` only.

pub mod binding_error;
pub mod config_error;
pub mod error_code;
pub mod query_error;
pub mod row_error;

pub use binding_error::BindingError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use query_error::{BackendError, QueryError, QueryResult, SchemaMismatch};
pub use row_error::RowError;
