//! Shared constants for rowshape.

/// rowshape version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target name that matches every backend in a field attribute.
pub const ANY_TARGET: &str = "*";

/// Default target name used for store-policy lookups.
pub const DEFAULT_TARGET_NAME: &str = "sqlite";

/// Default SQLite busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Default directory (relative to the project root) holding `.sql` scripts.
pub const DEFAULT_SCRIPT_DIR: &str = "queries";

/// File extension of query source scripts.
pub const SCRIPT_EXTENSION: &str = "sql";

/// First line of a query source pragma header.
pub const PRAGMA_HEADER: &str = "#pragma";

/// Prefix of generated key predicate parameter names.
pub const KEY_PARAM_PREFIX: &str = "__key_";

/// Log tag for successful command execution.
pub const LOG_TAG_OK: &str = "queryhandler-ok";

/// Log tag for failed command execution.
pub const LOG_TAG_ERROR: &str = "queryhandler-error";

/// Default capacity of the row-shape schema cache.
pub const DEFAULT_SHAPE_CACHE_CAPACITY: u64 = 1_024;

/// Project config file name.
pub const CONFIG_FILE_NAME: &str = "rowshape.toml";
