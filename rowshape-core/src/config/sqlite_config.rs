//! SQLite connection configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BUSY_TIMEOUT_MS;

/// SQLite journal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
    Memory,
}

impl JournalMode {
    /// Returns the SQLite pragma value.
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "WAL",
            Self::Delete => "DELETE",
            Self::Memory => "MEMORY",
        }
    }
}

/// Configuration for SQLite connections opened by a data store.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SqliteConfig {
    /// Database file. `None` opens an in-memory database.
    pub path: Option<String>,
    /// Busy timeout in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u64>,
    /// Enforce foreign keys. Default: true.
    pub foreign_keys: Option<bool>,
    /// Journal mode for file databases. Default: WAL.
    pub journal_mode: Option<JournalMode>,
}

impl SqliteConfig {
    pub fn effective_busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS)
    }

    pub fn effective_foreign_keys(&self) -> bool {
        self.foreign_keys.unwrap_or(true)
    }

    pub fn effective_journal_mode(&self) -> JournalMode {
        self.journal_mode.unwrap_or_default()
    }
}
