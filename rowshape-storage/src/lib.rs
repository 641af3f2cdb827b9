//! # rowshape-storage
//!
//! SQLite backend for rowshape.
//! Data stores, execution contexts, parameter binding (conversion table and
//! key predicates) and the script query handler that prepares, binds, runs
//! and materializes queries over `rusqlite`.

pub mod binder;
pub mod connection;
pub mod context;
pub mod handler;
pub mod store;

pub use binder::{BoundStatement, ColumnEqualityPredicate, ConversionTable, ParameterBinder};
pub use context::ExecutionContext;
pub use handler::{QueryHandler, ScriptQueryHandler};
pub use store::{DataStore, DataStoreBuilder};
