//! Top-level rowshape configuration with layered resolution.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{BooleanConfig, ConversionConfig, QuerySourceConfig, SqliteConfig, StoreConfig};
use crate::constants::CONFIG_FILE_NAME;
use crate::diagnostics::StoreLogLevel;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ROWSHAPE_*`)
/// 2. Project config (`rowshape.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RowshapeConfig {
    pub store: StoreConfig,
    pub sqlite: SqliteConfig,
    pub conversion: ConversionConfig,
    pub boolean: BooleanConfig,
    pub queries: Vec<QuerySourceConfig>,
}

impl RowshapeConfig {
    /// Load configuration with layered resolution from `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RowshapeConfig) -> Result<(), ConfigError> {
        if let Some(target) = &config.store.target_name {
            if target.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "store.target_name".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
        }
        if let Some(timeout) = config.sqlite.busy_timeout_ms {
            if timeout > 600_000 {
                return Err(ConfigError::ValidationFailed {
                    field: "sqlite.busy_timeout_ms".to_string(),
                    message: "must be at most 600000".to_string(),
                });
            }
        }

        let truthy = config.boolean.effective_truthy();
        let falsy = config.boolean.effective_falsy();
        if let Some(both) = truthy
            .iter()
            .find(|t| falsy.iter().any(|f| f.eq_ignore_ascii_case(t)))
        {
            return Err(ConfigError::ValidationFailed {
                field: "boolean".to_string(),
                message: format!("{both:?} is both truthy and falsy"),
            });
        }

        let mut names = FxHashSet::default();
        for (i, query) in config.queries.iter().enumerate() {
            if query.name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("queries[{i}].name"),
                    message: "must not be blank".to_string(),
                });
            }
            if query.statement.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("queries[{i}].statement"),
                    message: "must not be blank".to_string(),
                });
            }
            if !names.insert(query.name.to_lowercase()) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("queries[{i}].name"),
                    message: format!("duplicate query name {}", query.name),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RowshapeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RowshapeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut RowshapeConfig, other: RowshapeConfig) {
        // Store
        if other.store.target_name.is_some() {
            base.store.target_name = other.store.target_name;
        }
        if other.store.log_level.is_some() {
            base.store.log_level = other.store.log_level;
        }
        if other.store.script_dir.is_some() {
            base.store.script_dir = other.store.script_dir;
        }

        // SQLite
        if other.sqlite.path.is_some() {
            base.sqlite.path = other.sqlite.path;
        }
        if other.sqlite.busy_timeout_ms.is_some() {
            base.sqlite.busy_timeout_ms = other.sqlite.busy_timeout_ms;
        }
        if other.sqlite.foreign_keys.is_some() {
            base.sqlite.foreign_keys = other.sqlite.foreign_keys;
        }
        if other.sqlite.journal_mode.is_some() {
            base.sqlite.journal_mode = other.sqlite.journal_mode;
        }

        // Conversion
        if other.conversion.timestamp_format.is_some() {
            base.conversion.timestamp_format = other.conversion.timestamp_format;
        }
        if other.conversion.uuid_format.is_some() {
            base.conversion.uuid_format = other.conversion.uuid_format;
        }

        // Boolean
        if other.boolean.truthy.is_some() {
            base.boolean.truthy = other.boolean.truthy;
        }
        if other.boolean.falsy.is_some() {
            base.boolean.falsy = other.boolean.falsy;
        }
        if other.boolean.numeric.is_some() {
            base.boolean.numeric = other.boolean.numeric;
        }

        base.queries.extend(other.queries);
    }

    /// Apply `ROWSHAPE_*` environment variable overrides.
    fn apply_env_overrides(config: &mut RowshapeConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("ROWSHAPE_TARGET_NAME") {
            config.store.target_name = Some(val);
        }
        if let Ok(val) = std::env::var("ROWSHAPE_LOG_LEVEL") {
            let level = match val.trim().to_ascii_lowercase().as_str() {
                "none" => StoreLogLevel::None,
                "debug" => StoreLogLevel::Debug,
                "trace" => StoreLogLevel::Trace,
                other => {
                    return Err(ConfigError::ValidationFailed {
                        field: "ROWSHAPE_LOG_LEVEL".to_string(),
                        message: format!("unknown log level {other}"),
                    })
                }
            };
            config.store.log_level = Some(level);
        }
        if let Ok(val) = std::env::var("ROWSHAPE_SCRIPT_DIR") {
            config.store.script_dir = Some(val);
        }
        if let Ok(val) = std::env::var("ROWSHAPE_SQLITE_PATH") {
            config.sqlite.path = Some(val);
        }
        if let Ok(val) = std::env::var("ROWSHAPE_SQLITE_BUSY_TIMEOUT_MS") {
            let timeout = val.trim().parse::<u64>().map_err(|e| ConfigError::ValidationFailed {
                field: "ROWSHAPE_SQLITE_BUSY_TIMEOUT_MS".to_string(),
                message: format!("invalid timeout {val:?}: {e}"),
            })?;
            config.sqlite.busy_timeout_ms = Some(timeout);
        }
        Ok(())
    }

    /// Query sources declared inline, as registry entries.
    pub fn query_sources(&self) -> impl Iterator<Item = crate::source::QuerySource> + '_ {
        self.queries.iter().map(QuerySourceConfig::to_source)
    }
}
