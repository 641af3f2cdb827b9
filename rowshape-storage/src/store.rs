//! DataStore: the explicit, cloneable context object a caller runs queries through.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use rowshape_core::config::{RowshapeConfig, SqliteConfig};
use rowshape_core::constants::DEFAULT_TARGET_NAME;
use rowshape_core::diagnostics::{DiagnosticSink, StoreLogLevel, TracingSink};
use rowshape_core::errors::{ConfigError, QueryError, QueryResult};
use rowshape_core::query::Query;
use rowshape_core::shape::ShapeCache;
use rowshape_core::source::{QuerySource, QuerySourceRegistry};
use rowshape_core::traits::KeyPredicateGenerator;
use rowshape_core::types::{BoolCoercion, Row, Rowset, Schema};
use rusqlite::Connection;
use rustc_hash::FxHashMap;

use crate::binder::{ColumnEqualityPredicate, ConversionTable, ParameterBinder};
use crate::connection::open_connection;
use crate::context::ExecutionContext;
use crate::handler::{QueryHandler, ScriptQueryHandler};

struct StoreInner {
    target_name: String,
    log_level: StoreLogLevel,
    sink: Arc<dyn DiagnosticSink>,
    sources: QuerySourceRegistry,
    shapes: Arc<ShapeCache>,
    binder: ParameterBinder,
    coercion: BoolCoercion,
    sqlite: SqliteConfig,
    handlers: RwLock<FxHashMap<String, Arc<dyn QueryHandler>>>,
}

/// One backend target: its name, command logging, query sources, row
/// shapes, binding rules and connection settings. Clones share state.
#[derive(Clone)]
pub struct DataStore {
    inner: Arc<StoreInner>,
}

impl DataStore {
    pub fn builder() -> DataStoreBuilder {
        DataStoreBuilder::default()
    }

    /// Build a store from loaded configuration. Scripts are read from the
    /// configured script directory under `root` (skipped when the default
    /// directory does not exist); inline `[[queries]]` override scripts of
    /// the same name. A relative SQLite path is resolved against `root`.
    pub fn from_config(root: &Path, config: &RowshapeConfig) -> Result<Self, ConfigError> {
        let mut sources = QuerySourceRegistry::new();
        let script_dir = root.join(config.store.effective_script_dir());
        if script_dir.is_dir() {
            sources.load_dir(&script_dir)?;
        } else if config.store.script_dir.is_some() {
            return Err(ConfigError::FileNotFound {
                path: script_dir.display().to_string(),
            });
        }
        for source in config.query_sources() {
            sources.register(source);
        }

        let mut sqlite = config.sqlite.clone();
        if let Some(path) = sqlite.path.as_deref() {
            if Path::new(path).is_relative() {
                sqlite.path = Some(root.join(path).display().to_string());
            }
        }

        Ok(Self::builder()
            .target_name(config.store.effective_target_name())
            .log_level(config.store.effective_log_level())
            .sources(sources)
            .conversion(ConversionTable::from_config(&config.conversion))
            .coercion(config.boolean.to_coercion())
            .sqlite(sqlite)
            .build())
    }

    pub fn target_name(&self) -> &str {
        &self.inner.target_name
    }

    pub fn log_level(&self) -> StoreLogLevel {
        self.inner.log_level
    }

    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.inner.sink.as_ref()
    }

    pub fn sources(&self) -> &QuerySourceRegistry {
        &self.inner.sources
    }

    /// Row-shape registrations may be added at any time.
    pub fn shapes(&self) -> &ShapeCache {
        &self.inner.shapes
    }

    pub fn binder(&self) -> &ParameterBinder {
        &self.inner.binder
    }

    pub fn coercion(&self) -> &BoolCoercion {
        &self.inner.coercion
    }

    pub fn sqlite_config(&self) -> &SqliteConfig {
        &self.inner.sqlite
    }

    /// Open a new connection with the store's pragmas applied.
    pub fn open_connection(&self) -> QueryResult<Connection> {
        open_connection(&self.inner.sqlite)
    }

    pub fn context<'c>(&'c self, conn: &'c Connection) -> ExecutionContext<'c> {
        ExecutionContext::new(conn, self)
    }

    /// Run `f` in a transaction on `conn`. Commits when `f` succeeds; any
    /// error rolls the transaction back.
    pub fn with_transaction<T>(
        &self,
        conn: &mut Connection,
        f: impl FnOnce(&ExecutionContext<'_>) -> QueryResult<T>,
    ) -> QueryResult<T> {
        let tx = conn.transaction().map_err(QueryError::backend)?;
        let result = f(&ExecutionContext::in_transaction(&tx, self))?;
        tx.commit().map_err(QueryError::backend)?;
        Ok(result)
    }

    /// Register a handler under its source name, replacing any cached one.
    pub fn register_handler(&self, handler: Arc<dyn QueryHandler>) {
        let key = handler.name().to_lowercase();
        self.inner
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, handler);
    }

    /// The handler for query source `name`. Script handlers are created on
    /// first use and cached per name.
    pub fn handler(&self, name: &str) -> QueryResult<Arc<dyn QueryHandler>> {
        let key = name.to_lowercase();
        if let Some(handler) = self
            .inner
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(handler));
        }

        let handler: Arc<dyn QueryHandler> =
            Arc::new(ScriptQueryHandler::new(self.inner.sources.get(name)?));
        let mut handlers = self
            .inner
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(handlers.entry(key).or_insert(handler)))
    }

    /// Run `query` on a fresh connection and return every row.
    pub fn load(&self, query: &Query) -> QueryResult<Rowset> {
        let handler = self.handler(query.name())?;
        let conn = self.open_connection()?;
        let ctx = self.context(&conn);
        handler.execute(&ctx, query, false)
    }

    /// Run `query` on a fresh connection and return its first row, if any.
    pub fn load_one_row(&self, query: &Query) -> QueryResult<Option<Row>> {
        let handler = self.handler(query.name())?;
        let conn = self.open_connection()?;
        let ctx = self.context(&conn);
        let rowset = handler.execute(&ctx, query, true)?;
        Ok(rowset.into_rows().into_iter().next())
    }

    pub fn get_schema(&self, query: &Query) -> QueryResult<Arc<Schema>> {
        let handler = self.handler(query.name())?;
        let conn = self.open_connection()?;
        let ctx = self.context(&conn);
        handler.get_schema(&ctx, query)
    }

    pub fn execute_without_fetch(&self, query: &Query) -> QueryResult<usize> {
        let handler = self.handler(query.name())?;
        let conn = self.open_connection()?;
        let ctx = self.context(&conn);
        handler.execute_without_fetch(&ctx, query)
    }
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore")
            .field("target_name", &self.inner.target_name)
            .field("log_level", &self.inner.log_level)
            .field("sources", &self.inner.sources.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`DataStore`]. Unset parts take their defaults: target
/// `sqlite`, failures-only logging to `tracing`, column-equality keys.
#[derive(Default)]
pub struct DataStoreBuilder {
    target_name: Option<String>,
    log_level: StoreLogLevel,
    sink: Option<Arc<dyn DiagnosticSink>>,
    sources: QuerySourceRegistry,
    shapes: Option<Arc<ShapeCache>>,
    keys: Option<Arc<dyn KeyPredicateGenerator>>,
    conversion: ConversionTable,
    coercion: BoolCoercion,
    sqlite: SqliteConfig,
}

impl DataStoreBuilder {
    pub fn target_name(mut self, name: impl Into<String>) -> Self {
        self.target_name = Some(name.into());
        self
    }

    pub fn log_level(mut self, level: StoreLogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn source(mut self, source: QuerySource) -> Self {
        self.sources.register(source);
        self
    }

    pub fn sources(mut self, sources: QuerySourceRegistry) -> Self {
        self.sources = sources;
        self
    }

    pub fn shapes(mut self, shapes: Arc<ShapeCache>) -> Self {
        self.shapes = Some(shapes);
        self
    }

    pub fn key_generator(mut self, keys: Arc<dyn KeyPredicateGenerator>) -> Self {
        self.keys = Some(keys);
        self
    }

    pub fn conversion(mut self, conversion: ConversionTable) -> Self {
        self.conversion = conversion;
        self
    }

    pub fn coercion(mut self, coercion: BoolCoercion) -> Self {
        self.coercion = coercion;
        self
    }

    pub fn sqlite(mut self, sqlite: SqliteConfig) -> Self {
        self.sqlite = sqlite;
        self
    }

    pub fn build(self) -> DataStore {
        let keys = self
            .keys
            .unwrap_or_else(|| Arc::new(ColumnEqualityPredicate));
        let inner = StoreInner {
            target_name: self
                .target_name
                .unwrap_or_else(|| DEFAULT_TARGET_NAME.to_string()),
            log_level: self.log_level,
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
            sources: self.sources,
            shapes: self.shapes.unwrap_or_default(),
            binder: ParameterBinder::new(keys, self.conversion),
            coercion: self.coercion,
            sqlite: self.sqlite,
            handlers: RwLock::new(FxHashMap::default()),
        };
        tracing::debug!(
            target_name = %inner.target_name,
            sources = inner.sources.len(),
            "data store ready"
        );
        DataStore {
            inner: Arc::new(inner),
        }
    }
}
