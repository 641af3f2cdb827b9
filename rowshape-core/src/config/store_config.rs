//! Data store configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SCRIPT_DIR, DEFAULT_TARGET_NAME};
use crate::diagnostics::StoreLogLevel;

/// Configuration for one data store.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Target name matched against field store policies. Default: "sqlite".
    pub target_name: Option<String>,
    /// Command log verbosity. Default: debug (failures only).
    pub log_level: Option<StoreLogLevel>,
    /// Directory of `.sql` query sources, relative to the project root.
    pub script_dir: Option<String>,
}

impl StoreConfig {
    pub fn effective_target_name(&self) -> &str {
        self.target_name.as_deref().unwrap_or(DEFAULT_TARGET_NAME)
    }

    pub fn effective_log_level(&self) -> StoreLogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn effective_script_dir(&self) -> &str {
        self.script_dir.as_deref().unwrap_or(DEFAULT_SCRIPT_DIR)
    }
}
