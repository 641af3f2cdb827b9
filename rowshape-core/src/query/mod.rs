//! Queries, parameters, composite keys and bound parameters.

pub mod bound;
pub mod key;
#[allow(clippy::module_inception)]
pub mod query;

pub use bound::{BoundParameter, BoundParameters};
pub use key::{KeyPart, StoreKey};
pub use query::{Parameter, Query};
