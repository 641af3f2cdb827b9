//! Column-equality key predicates for SQLite.

use rowshape_core::constants::KEY_PARAM_PREFIX;
use rowshape_core::errors::BindingError;
use rowshape_core::query::{BoundParameters, StoreKey};
use rowshape_core::traits::KeyPredicateGenerator;

/// Emits `"col" = :__key_col AND ...` in key order.
///
/// Parameter names are derived from the column name; when a name is already
/// taken (by a query parameter or an earlier key part) it is suffixed `_1`,
/// `_2`, ... until free.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnEqualityPredicate;

impl KeyPredicateGenerator for ColumnEqualityPredicate {
    fn key_to_predicate(
        &self,
        key: &StoreKey,
        params: &mut BoundParameters,
    ) -> Result<String, BindingError> {
        if key.is_empty() {
            return Err(BindingError::EmptyKey);
        }

        let mut clauses = Vec::with_capacity(key.len());
        for part in key.iter() {
            let name = params.unique_name(&format!(
                ":{KEY_PARAM_PREFIX}{}",
                parameter_stem(&part.column)
            ));
            clauses.push(format!("{} = {name}", quote_identifier(&part.column)));
            params.push(name, part.value.clone(), None)?;
        }
        Ok(clauses.join(" AND "))
    }
}

/// Double-quote an identifier, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn parameter_stem(column: &str) -> String {
    column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
