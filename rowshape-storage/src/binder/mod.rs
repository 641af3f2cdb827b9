//! Parameter binding: query parameters and composite keys become named
//! SQLite parameters plus an optional appended predicate.

pub mod conversion;
pub mod predicate;

use std::sync::Arc;

use rowshape_core::errors::BindingError;
use rowshape_core::query::{BoundParameter, BoundParameters, Query};
use rowshape_core::source::QuerySource;
use rowshape_core::traits::KeyPredicateGenerator;
use rusqlite::types::Value as SqlValue;

pub use conversion::ConversionTable;
pub use predicate::{quote_identifier, ColumnEqualityPredicate};

/// Statement text and parameters ready to prepare and bind.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    pub text: String,
    pub params: BoundParameters,
    native: Vec<SqlValue>,
}

impl BoundStatement {
    /// Each parameter paired with its converted SQLite value.
    pub fn native(&self) -> impl Iterator<Item = (&BoundParameter, &SqlValue)> {
        self.params.iter().zip(self.native.iter())
    }

    pub fn native_value(&self, name: &str) -> Option<&SqlValue> {
        self.native()
            .find(|(p, _)| p.name.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

/// Builds bound statements for one store.
#[derive(Clone)]
pub struct ParameterBinder {
    keys: Arc<dyn KeyPredicateGenerator>,
    conversion: ConversionTable,
}

impl ParameterBinder {
    pub fn new(keys: Arc<dyn KeyPredicateGenerator>, conversion: ConversionTable) -> Self {
        Self { keys, conversion }
    }

    pub fn conversion(&self) -> &ConversionTable {
        &self.conversion
    }

    /// Bind `query` against `source`.
    ///
    /// Every parameter with a value becomes one named parameter. A composite
    /// key adds its own parameters and appends `\n WHERE \n <predicate>` to
    /// the statement; the statement must not already end in a predicate.
    pub fn bind(&self, source: &QuerySource, query: &Query) -> Result<BoundStatement, BindingError> {
        let mut params = BoundParameters::new();
        for param in query.bound_params() {
            let name = normalize_name(param.name())?;
            let value = param.value().cloned().unwrap_or_default();
            params.push(name, value, param.declared_type())?;
        }

        let mut text = source.statement().to_string();
        if let Some(key) = query.key() {
            let predicate = self.keys.key_to_predicate(key, &mut params)?;
            text = format!("{}\n WHERE \n {predicate}", trim_statement_end(&text));
        }

        let native = params
            .iter()
            .map(|p| self.conversion.to_sql(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BoundStatement {
            text,
            params,
            native,
        })
    }
}

impl Default for ParameterBinder {
    fn default() -> Self {
        Self::new(Arc::new(ColumnEqualityPredicate), ConversionTable::default())
    }
}

impl std::fmt::Debug for ParameterBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterBinder")
            .field("conversion", &self.conversion)
            .finish_non_exhaustive()
    }
}

/// Normalize a parameter name to its SQLite placeholder form.
/// `:`, `@` and `$` prefixes are kept; bare names get `:`.
pub fn normalize_name(name: &str) -> Result<String, BindingError> {
    let name = name.trim();
    let (prefix, ident) = match name.chars().next() {
        Some(c @ (':' | '@' | '$')) => (c, &name[1..]),
        _ => (':', name),
    };
    let valid = !ident.is_empty()
        && ident
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_');
    if !valid {
        return Err(BindingError::InvalidParameterName {
            name: name.to_string(),
        });
    }
    Ok(format!("{prefix}{ident}"))
}

fn trim_statement_end(text: &str) -> &str {
    text.trim_end_matches(|c: char| c.is_whitespace() || c == ';')
}
