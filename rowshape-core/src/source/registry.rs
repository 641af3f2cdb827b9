//! Registry of named query sources.

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::QuerySource;
use crate::constants::SCRIPT_EXTENSION;
use crate::errors::ConfigError;

/// Name → query source lookup, case-insensitive. Sources are immutable and
/// shared by every handler built from them.
#[derive(Debug, Clone, Default)]
pub struct QuerySourceRegistry {
    sources: FxHashMap<String, Arc<QuerySource>>,
}

impl QuerySourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source, replacing any source with the same name.
    pub fn register(&mut self, source: QuerySource) -> Arc<QuerySource> {
        let source = Arc::new(source);
        self.sources
            .insert(source.name().to_lowercase(), Arc::clone(&source));
        source
    }

    pub fn get(&self, name: &str) -> Result<Arc<QuerySource>, ConfigError> {
        self.sources
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| ConfigError::SourceNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.values().map(|s| s.name())
    }

    /// Load every `*.sql` script in `dir`; the file stem is the source name.
    /// Returns the number of sources loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, ConfigError> {
        let entries = std::fs::read_dir(dir).map_err(|_| ConfigError::FileNotFound {
            path: dir.display().to_string(),
        })?;

        let mut loaded = 0;
        for entry in entries {
            let path = entry
                .map_err(|e| ConfigError::ParseError {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })?
                .path();
            let is_script = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION));
            if !path.is_file() || !is_script {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            self.register(QuerySource::parse(name, &text)?);
            loaded += 1;
        }

        tracing::debug!(dir = %dir.display(), loaded, "loaded query sources");
        Ok(loaded)
    }
}
