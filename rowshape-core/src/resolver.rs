//! Schema resolution: reconcile a declared row shape (or live result
//! metadata) with the backend's columns and decide which columns load.

use std::sync::Arc;

use crate::errors::{ConfigError, SchemaMismatch};
use crate::query::Query;
use crate::source::QuerySource;
use crate::traits::SchemaSource;
use crate::types::{DataType, FieldDef, Schema};

/// Name and type of one backend result column, in backend order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendColumn {
    pub name: String,
    pub data_type: DataType,
}

impl BackendColumn {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Output of schema resolution for one execution.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    schema: Arc<Schema>,
    shape: Option<Arc<str>>,
    load_filter: Vec<Option<usize>>,
    mismatch: Option<SchemaMismatch>,
}

impl ResolvedSchema {
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn into_schema(self) -> Arc<Schema> {
        self.schema
    }

    /// Static row shape the schema came from, if any.
    pub fn shape(&self) -> Option<&Arc<str>> {
        self.shape.as_ref()
    }

    /// One slot per backend column: the order of the field it loads into,
    /// or `None` when the column is read and dropped.
    pub fn load_filter(&self) -> &[Option<usize>] {
        &self.load_filter
    }

    /// The field backend column `column` loads into.
    pub fn loaded_field(&self, column: usize) -> Option<&FieldDef> {
        self.load_filter
            .get(column)
            .copied()
            .flatten()
            .and_then(|order| self.schema.field_at(order))
    }

    pub fn loaded_count(&self) -> usize {
        self.load_filter.iter().filter(|slot| slot.is_some()).count()
    }

    /// Set when a static shape matched none of the backend columns.
    pub fn mismatch(&self) -> Option<&SchemaMismatch> {
        self.mismatch.as_ref()
    }
}

/// Derives the schema of a result and its load-filter for a target backend.
pub struct SchemaResolver<'a> {
    shapes: &'a dyn SchemaSource,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(shapes: &'a dyn SchemaSource) -> Self {
        Self { shapes }
    }

    /// Resolve the schema for `query` against `columns`.
    ///
    /// With a static row shape the schema comes from the shape cache and
    /// columns are matched by case-insensitive name; otherwise a schema is
    /// derived from the columns themselves and matched by position.
    pub fn resolve(
        &self,
        target: &str,
        query: &Query,
        source: Option<&QuerySource>,
        columns: &[BackendColumn],
    ) -> Result<ResolvedSchema, ConfigError> {
        let Some(shape) = query.row_shape() else {
            let schema = Arc::new(derive_schema(query.name(), source, columns));
            let load_filter = (0..columns.len())
                .map(|i| {
                    schema
                        .field_at(i)
                        .filter(|def| def.loads_for(target))
                        .map(FieldDef::order)
                })
                .collect();
            return Ok(ResolvedSchema {
                schema,
                shape: None,
                load_filter,
                mismatch: None,
            });
        };

        let schema = self.shapes.schema_for(shape)?;
        let mut matched = 0;
        let load_filter = columns
            .iter()
            .map(|col| {
                let def = schema.field(&col.name)?;
                matched += 1;
                def.loads_for(target).then(|| def.order())
            })
            .collect();

        let mismatch = (matched == 0 && !schema.is_empty()).then(|| SchemaMismatch {
            shape: shape.to_string(),
            columns: columns.iter().map(|c| c.name.clone()).collect(),
        });
        if let Some(m) = &mismatch {
            tracing::warn!(query = query.name(), backend_target = target, "{m}");
        }

        Ok(ResolvedSchema {
            schema,
            shape: Some(Arc::clone(shape)),
            load_filter,
            mismatch,
        })
    }
}

/// Build a schema straight from backend columns, in backend order.
///
/// Name chain: the query name, overridden by the source's modify target;
/// a blank result becomes a fresh UUID. Field types prefer the pragma's
/// type hint over the backend's column type.
pub fn derive_schema(
    name: &str,
    source: Option<&QuerySource>,
    columns: &[BackendColumn],
) -> Schema {
    let mut table = name.trim().to_string();
    if let Some(target) = source.and_then(QuerySource::modify_target) {
        table = target.to_string();
    }
    if table.is_empty() {
        table = uuid::Uuid::new_v4().to_string();
    }

    let fields = columns.iter().map(|col| {
        let pragma = source.and_then(|s| s.column(&col.name));
        let data_type = pragma
            .and_then(|p| p.type_hint())
            .unwrap_or(col.data_type);
        FieldDef::new(col.name.clone(), data_type)
            .with_attrs(pragma.map(|p| p.attrs().to_vec()).unwrap_or_default())
    });

    Schema::new(table, source.map_or(true, QuerySource::read_only), fields)
}
