//! Configuration system for rowshape.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod boolean_config;
pub mod conversion_config;
pub mod query_config;
pub mod rowshape_config;
pub mod sqlite_config;
pub mod store_config;

pub use boolean_config::BooleanConfig;
pub use conversion_config::{ConversionConfig, TimestampFormat, UuidFormat};
pub use query_config::{ColumnConfig, QuerySourceConfig};
pub use rowshape_config::RowshapeConfig;
pub use sqlite_config::{JournalMode, SqliteConfig};
pub use store_config::StoreConfig;
