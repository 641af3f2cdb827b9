//! Query sources: statement templates, pragmas and the source registry.

pub mod pragma;
pub mod query_source;
pub mod registry;

pub use pragma::{ColumnPragma, Pragma};
pub use query_source::QuerySource;
pub use registry::QuerySourceRegistry;
