//! Connection management: open SQLite connections with store pragmas applied.

pub mod pragmas;

use std::path::Path;

use rowshape_core::config::SqliteConfig;
use rowshape_core::errors::{QueryError, QueryResult};
use rusqlite::Connection;

use self::pragmas::apply_pragmas;

/// Open the connection described by `config`: a file database when a path
/// is configured, otherwise a private in-memory database.
pub fn open_connection(config: &SqliteConfig) -> QueryResult<Connection> {
    match config.path.as_deref() {
        Some(path) => open_file(Path::new(path), config),
        None => open_in_memory(config),
    }
}

/// Open a file database and apply pragmas.
pub fn open_file(path: &Path, config: &SqliteConfig) -> QueryResult<Connection> {
    let conn = Connection::open(path).map_err(QueryError::backend)?;
    apply_pragmas(&conn, config, false).map_err(QueryError::backend)?;
    tracing::debug!(path = %path.display(), "opened sqlite connection");
    Ok(conn)
}

/// Open an in-memory database (for testing).
pub fn open_in_memory(config: &SqliteConfig) -> QueryResult<Connection> {
    let conn = Connection::open_in_memory().map_err(QueryError::backend)?;
    apply_pragmas(&conn, config, true).map_err(QueryError::backend)?;
    Ok(conn)
}
