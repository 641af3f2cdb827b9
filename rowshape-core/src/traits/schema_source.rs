//! Row-shape schema lookup.

use std::sync::Arc;

use crate::errors::ConfigError;
use crate::types::Schema;

/// Returns the schema of a declared static row shape, by lookup or construction.
pub trait SchemaSource: Send + Sync {
    fn schema_for(&self, shape: &str) -> Result<Arc<Schema>, ConfigError>;
}
