//! Key-to-predicate generation.

use crate::errors::BindingError;
use crate::query::{BoundParameters, StoreKey};

/// Turns a composite key into predicate text plus matching parameters.
///
/// Implementations add exactly one parameter per key part, in key order, and
/// must pick names that do not collide with parameters already in `params`.
pub trait KeyPredicateGenerator: Send + Sync {
    fn key_to_predicate(
        &self,
        key: &StoreKey,
        params: &mut BoundParameters,
    ) -> Result<String, BindingError>;
}
