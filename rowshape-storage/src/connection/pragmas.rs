//! PRAGMA configuration applied to every connection a store opens.

use std::time::Duration;

use rowshape_core::config::SqliteConfig;
use rusqlite::Connection;

/// Apply busy timeout, foreign key enforcement and, for file databases,
/// the configured journal mode.
pub fn apply_pragmas(
    conn: &Connection,
    config: &SqliteConfig,
    in_memory: bool,
) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(config.effective_busy_timeout_ms()))?;

    let foreign_keys = if config.effective_foreign_keys() { "ON" } else { "OFF" };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {foreign_keys};"))?;

    if !in_memory {
        conn.execute_batch(&format!(
            "PRAGMA journal_mode = {};",
            config.effective_journal_mode().pragma_value()
        ))?;
    }
    Ok(())
}

/// Read back the active journal mode.
pub fn journal_mode(conn: &Connection) -> rusqlite::Result<String> {
    conn.pragma_query_value(None, "journal_mode", |row| row.get(0))
}
