//! Script query handler: prepare, bind, run, resolve, materialize, log.

use std::error::Error as StdError;
use std::sync::Arc;

use rowshape_core::constants::{LOG_TAG_ERROR, LOG_TAG_OK};
use rowshape_core::diagnostics::{log_command, CommandEvent};
use rowshape_core::errors::{QueryError, QueryResult};
use rowshape_core::query::{BoundParameters, Query};
use rowshape_core::resolver::{BackendColumn, ResolvedSchema, SchemaResolver};
use rowshape_core::source::QuerySource;
use rowshape_core::types::{FieldDef, Rowset, Schema};
use rowshape_core::RowsetMaterializer;
use rusqlite::{Connection, Statement};

use super::cursor::SqliteCursor;
use super::metadata::backend_columns;
use super::QueryHandler;
use crate::binder::BoundStatement;
use crate::context::ExecutionContext;

/// Runs the statement text of a query source as written.
#[derive(Debug, Clone)]
pub struct ScriptQueryHandler {
    source: Arc<QuerySource>,
}

impl ScriptQueryHandler {
    pub fn new(source: Arc<QuerySource>) -> Self {
        Self { source }
    }

    /// Bind, run `op`, then log exactly one outcome entry for the call.
    fn logged<T>(
        &self,
        ctx: &ExecutionContext<'_>,
        query: &Query,
        op: impl FnOnce(&BoundStatement) -> QueryResult<T>,
    ) -> QueryResult<T> {
        let store = ctx.store();
        let (result, statement, params) = match store.binder().bind(&self.source, query) {
            Ok(bound) => {
                let result = op(&bound);
                (result, bound.text, bound.params)
            }
            Err(e) => (
                Err(QueryError::from(e)),
                self.source.statement().to_string(),
                BoundParameters::new(),
            ),
        };

        let (tag, error) = match &result {
            Ok(_) => (LOG_TAG_OK, None),
            Err(e) => (LOG_TAG_ERROR, Some(e as &(dyn StdError + 'static))),
        };
        log_command(
            store.log_level(),
            store.sink(),
            &CommandEvent {
                tag,
                target: store.target_name(),
                query: query.name(),
                statement: &statement,
                params: &params,
                error,
            },
        );
        result
    }

    fn resolve(
        &self,
        ctx: &ExecutionContext<'_>,
        query: &Query,
        columns: &[BackendColumn],
    ) -> QueryResult<ResolvedSchema> {
        let store = ctx.store();
        let resolved = SchemaResolver::new(store.shapes()).resolve(
            store.target_name(),
            query,
            Some(&self.source),
            columns,
        )?;
        Ok(resolved)
    }
}

impl QueryHandler for ScriptQueryHandler {
    fn name(&self) -> &str {
        self.source.name()
    }

    fn source(&self) -> &Arc<QuerySource> {
        &self.source
    }

    fn get_schema(&self, ctx: &ExecutionContext<'_>, query: &Query) -> QueryResult<Arc<Schema>> {
        self.logged(ctx, query, |bound| {
            let stmt = prepare_bound(ctx.conn(), bound)?;
            let columns = backend_columns(&stmt);
            Ok(self.resolve(ctx, query, &columns)?.into_schema())
        })
    }

    fn execute(
        &self,
        ctx: &ExecutionContext<'_>,
        query: &Query,
        one_row: bool,
    ) -> QueryResult<Rowset> {
        self.logged(ctx, query, |bound| {
            let mut stmt = prepare_bound(ctx.conn(), bound)?;
            let columns = backend_columns(&stmt);
            let resolved = self.resolve(ctx, query, &columns)?;

            let hints = columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    resolved
                        .loaded_field(i)
                        .map_or(col.data_type, FieldDef::data_type)
                })
                .collect();
            let store = ctx.store();
            let mut cursor =
                SqliteCursor::new(stmt.raw_query(), hints, store.binder().conversion());

            let materializer = RowsetMaterializer::new(store.coercion());
            materializer
                .populate(&mut cursor, &resolved, one_row)
                .map_err(QueryError::backend)
        })
    }

    fn execute_without_fetch(
        &self,
        ctx: &ExecutionContext<'_>,
        query: &Query,
    ) -> QueryResult<usize> {
        self.logged(ctx, query, |bound| {
            let conn = ctx.conn();
            let mut stmt = prepare_bound(conn, bound)?;
            let before = conn.total_changes();
            let changed = stmt.raw_execute().map_err(QueryError::backend)?;
            // The change counter keeps the previous statement's count across DDL.
            Ok(if conn.total_changes() == before { 0 } else { changed })
        })
    }
}

/// Prepare `bound.text` and bind its parameters by name. Parameters the
/// statement does not mention are skipped.
fn prepare_bound<'c>(conn: &'c Connection, bound: &BoundStatement) -> QueryResult<Statement<'c>> {
    let mut stmt = conn.prepare(&bound.text).map_err(QueryError::backend)?;
    for (param, value) in bound.native() {
        match placeholder_index(&stmt, &param.name)? {
            Some(index) => stmt
                .raw_bind_parameter(index, value)
                .map_err(QueryError::backend)?,
            None => tracing::debug!(parameter = %param.name, "statement has no such parameter; skipped"),
        }
    }
    Ok(stmt)
}

/// Index of the placeholder named `name`. An exact match wins; otherwise
/// names are compared case-insensitively, as bound parameters are.
fn placeholder_index(stmt: &Statement<'_>, name: &str) -> QueryResult<Option<usize>> {
    if let Some(index) = stmt.parameter_index(name).map_err(QueryError::backend)? {
        return Ok(Some(index));
    }
    Ok((1..=stmt.parameter_count()).find(|&i| {
        stmt.parameter_name(i)
            .is_some_and(|placeholder| placeholder.eq_ignore_ascii_case(name))
    }))
}
