//! Parameter conversion configuration.

use serde::{Deserialize, Serialize};

/// Backend representation of timestamp parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    #[default]
    Rfc3339,
    UnixSeconds,
    UnixMillis,
}

/// Backend representation of UUID parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UuidFormat {
    /// Hyphenated lowercase text.
    #[default]
    Text,
    /// 16 raw bytes.
    Blob,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConversionConfig {
    pub timestamp_format: Option<TimestampFormat>,
    pub uuid_format: Option<UuidFormat>,
}

impl ConversionConfig {
    pub fn effective_timestamp_format(&self) -> TimestampFormat {
        self.timestamp_format.unwrap_or_default()
    }

    pub fn effective_uuid_format(&self) -> UuidFormat {
        self.uuid_format.unwrap_or_default()
    }
}
