//! # rowshape-core
//!
//! Foundation crate for rowshape.
//! Defines the value and schema model, query sources, queries, errors, config,
//! tracing, and the backend-independent halves of query handling: schema
//! resolution and rowset materialization. Backends depend on this crate.

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod errors;
pub mod materializer;
pub mod query;
pub mod resolver;
pub mod shape;
pub mod source;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::RowshapeConfig;
pub use errors::{BindingError, ConfigError, QueryError, QueryResult};
pub use materializer::RowsetMaterializer;
pub use query::{Parameter, Query, StoreKey};
pub use resolver::{ResolvedSchema, SchemaResolver};
pub use shape::{ShapeCache, TypedRow};
pub use source::{QuerySource, QuerySourceRegistry};
pub use types::{DataType, FieldAttr, FieldDef, Row, Rowset, Schema, StoreFlag, Tristate, Value};
