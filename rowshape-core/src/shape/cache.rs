//! Shape-identity → schema cache.

use std::sync::{Arc, PoisonError, RwLock};

use moka::sync::Cache;
use rustc_hash::FxHashMap;

use super::TypedRow;
use crate::constants::DEFAULT_SHAPE_CACHE_CAPACITY;
use crate::errors::ConfigError;
use crate::traits::SchemaSource;
use crate::types::Schema;

#[derive(Clone)]
enum Declaration {
    Factory(fn() -> Schema),
    Fixed(Arc<Schema>),
}

/// Registry of row-shape declarations with a bounded cache of built schemas.
/// Repeated lookups of a cached shape return the same `Arc<Schema>`.
pub struct ShapeCache {
    declarations: RwLock<FxHashMap<String, Declaration>>,
    schemas: Cache<String, Arc<Schema>>,
}

impl ShapeCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            declarations: RwLock::new(FxHashMap::default()),
            schemas: Cache::new(capacity),
        }
    }

    /// Register a typed row declaration under `T::SHAPE`.
    pub fn register<T: TypedRow>(&self) {
        self.insert(T::SHAPE, Declaration::Factory(T::declare));
    }

    /// Register an explicit schema under a shape identity.
    pub fn register_schema(&self, shape: &str, schema: Schema) {
        self.insert(shape, Declaration::Fixed(Arc::new(schema)));
    }

    pub fn is_registered(&self, shape: &str) -> bool {
        self.declarations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(shape)
    }

    fn insert(&self, shape: &str, declaration: Declaration) {
        self.declarations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(shape.to_string(), declaration);
        self.schemas.invalidate(shape);
        tracing::debug!(shape, "registered row shape");
    }
}

impl Default for ShapeCache {
    fn default() -> Self {
        Self::new(DEFAULT_SHAPE_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for ShapeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeCache")
            .field("cached", &self.schemas.entry_count())
            .finish_non_exhaustive()
    }
}

impl SchemaSource for ShapeCache {
    fn schema_for(&self, shape: &str) -> Result<Arc<Schema>, ConfigError> {
        if let Some(schema) = self.schemas.get(shape) {
            return Ok(schema);
        }

        let declaration = self
            .declarations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(shape)
            .cloned()
            .ok_or_else(|| ConfigError::ShapeNotFound {
                shape: shape.to_string(),
            })?;

        Ok(self.schemas.get_with(shape.to_string(), || match declaration {
            Declaration::Factory(declare) => Arc::new(declare()),
            Declaration::Fixed(schema) => schema,
        }))
    }
}
