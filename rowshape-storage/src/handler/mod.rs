//! Query handlers: the per-source executors a store dispatches to.

pub mod cursor;
pub mod metadata;
pub mod script;

use std::future::{ready, Ready};
use std::sync::Arc;

use rowshape_core::errors::QueryResult;
use rowshape_core::query::Query;
use rowshape_core::source::QuerySource;
use rowshape_core::types::{Rowset, Schema};

use crate::context::ExecutionContext;

pub use script::ScriptQueryHandler;

/// Executes queries for one query source.
///
/// Handlers hold no connection state and are reusable across contexts.
/// The `_async` variants complete on the caller's task: the returned future
/// is already resolved when it is handed back. Running two operations on the
/// same context concurrently is not supported.
pub trait QueryHandler: Send + Sync {
    /// Name of the query source this handler runs.
    fn name(&self) -> &str;

    fn source(&self) -> &Arc<QuerySource>;

    /// Resolve the result schema without stepping the statement.
    fn get_schema(&self, ctx: &ExecutionContext<'_>, query: &Query) -> QueryResult<Arc<Schema>>;

    /// Run the statement and materialize its rows. With `one_row` at most
    /// one backend row is consumed.
    fn execute(
        &self,
        ctx: &ExecutionContext<'_>,
        query: &Query,
        one_row: bool,
    ) -> QueryResult<Rowset>;

    /// Run a statement that returns no rows; yields the affected-row count.
    fn execute_without_fetch(&self, ctx: &ExecutionContext<'_>, query: &Query)
        -> QueryResult<usize>;

    fn get_schema_async(
        &self,
        ctx: &ExecutionContext<'_>,
        query: &Query,
    ) -> Ready<QueryResult<Arc<Schema>>> {
        ready(self.get_schema(ctx, query))
    }

    fn execute_async(
        &self,
        ctx: &ExecutionContext<'_>,
        query: &Query,
        one_row: bool,
    ) -> Ready<QueryResult<Rowset>> {
        ready(self.execute(ctx, query, one_row))
    }

    fn execute_without_fetch_async(
        &self,
        ctx: &ExecutionContext<'_>,
        query: &Query,
    ) -> Ready<QueryResult<usize>> {
        ready(self.execute_without_fetch(ctx, query))
    }
}
