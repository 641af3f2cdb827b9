//! ErrorCode trait giving every error a stable code string.

/// Trait for attaching a stable, machine-readable code to an error.
/// Every error enum implements this so callers can branch on the code
/// without matching on variants from several crates.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "BINDING_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted tagged string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SOURCE_NOT_FOUND: &str = "SOURCE_NOT_FOUND";
pub const SHAPE_NOT_FOUND: &str = "SHAPE_NOT_FOUND";
pub const BINDING_ERROR: &str = "BINDING_ERROR";
pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
pub const SCHEMA_MISMATCH: &str = "SCHEMA_MISMATCH";
pub const ROW_ERROR: &str = "ROW_ERROR";
