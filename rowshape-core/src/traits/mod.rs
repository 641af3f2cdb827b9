//! Collaborator seams: schema lookup, key predicates, backend row cursors.

pub mod key_predicate;
pub mod row_source;
pub mod schema_source;

pub use key_predicate::KeyPredicateGenerator;
pub use row_source::RowSource;
pub use schema_source::SchemaSource;
