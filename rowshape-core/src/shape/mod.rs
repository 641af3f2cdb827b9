//! Static row shapes: typed row declarations and the schema cache keyed by shape identity.

pub mod cache;

pub use cache::ShapeCache;

use crate::errors::RowError;
use crate::types::{Row, Schema};

/// A statically declared row type.
///
/// The declaration is explicit: `SHAPE` is the stable identity used by
/// queries and the shape cache, `declare` builds the schema once at
/// registration, and `from_row` converts a materialized row.
pub trait TypedRow: Sized {
    const SHAPE: &'static str;

    fn declare() -> Schema;

    fn from_row(row: &Row) -> Result<Self, RowError>;
}
