//! QuerySource: immutable statement template bound to one backend.

use crate::constants::PRAGMA_HEADER;
use crate::errors::ConfigError;
use crate::types::{DataType, FieldAttr, StoreFlag};

use super::pragma::{ColumnPragma, Pragma};

/// Reusable named statement template.
///
/// Text form accepted by [`QuerySource::parse`]:
///
/// ```text
/// #pragma
/// modify=patient
/// readonly
/// .is_active=boolean
/// .is_active@sqlite=only_load
///
/// SELECT id, is_active FROM patient
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySource {
    name: String,
    statement: String,
    pragma: Option<Pragma>,
    read_only: bool,
}

impl QuerySource {
    pub fn new(name: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statement: statement.into(),
            pragma: None,
            read_only: false,
        }
    }

    pub fn with_pragma(mut self, pragma: Pragma) -> Self {
        self.pragma = Some(pragma);
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Parse script text with an optional leading `#pragma` header.
    /// The header ends at the first blank line; the rest is the statement.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, ConfigError> {
        let name = name.into();
        let mut lines = text.lines().enumerate().peekable();

        while lines.peek().is_some_and(|(_, l)| l.trim().is_empty()) {
            lines.next();
        }

        let has_header = lines
            .peek()
            .is_some_and(|(_, l)| l.trim().eq_ignore_ascii_case(PRAGMA_HEADER));

        let mut pragma = None;
        let mut read_only = false;

        if has_header {
            lines.next();
            let mut block = Pragma::new();
            for (idx, line) in lines.by_ref() {
                let line = line.trim();
                if line.is_empty() {
                    break;
                }
                if line.starts_with("--") {
                    continue;
                }
                if let Some(ro) = parse_directive(&name, idx + 1, line, &mut block)? {
                    read_only = ro;
                }
            }
            pragma = Some(block);
        }

        let statement = lines.map(|(_, l)| l).collect::<Vec<_>>().join("\n");
        let statement = statement.trim();
        if statement.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: format!("{name}.statement"),
                message: "query source has no statement text".to_string(),
            });
        }

        Ok(Self {
            name,
            statement: statement.to_string(),
            pragma,
            read_only,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn pragma(&self) -> Option<&Pragma> {
        self.pragma.as_ref()
    }

    pub fn has_pragma(&self) -> bool {
        self.pragma.is_some()
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn modify_target(&self) -> Option<&str> {
        self.pragma.as_ref().and_then(Pragma::modify_target)
    }

    /// Pragma metadata for a result column, if declared.
    pub fn column(&self, name: &str) -> Option<&ColumnPragma> {
        self.pragma.as_ref().and_then(|p| p.column(name))
    }
}

/// Apply one header directive. Returns `Some(flag)` for read-only directives.
fn parse_directive(
    source: &str,
    line_no: usize,
    line: &str,
    pragma: &mut Pragma,
) -> Result<Option<bool>, ConfigError> {
    let malformed = |message: String| ConfigError::MalformedPragma {
        source_name: source.to_string(),
        line: line_no,
        message,
    };

    let (key, value) = match line.split_once('=') {
        Some((k, v)) => (k.trim(), Some(v.trim())),
        None => (line, None),
    };

    if let Some(column) = key.strip_prefix('.') {
        let value = value.ok_or_else(|| malformed(format!("column directive {key} has no value")))?;
        return match column.split_once('@') {
            Some((column, target)) => {
                let (column, target) = (column.trim(), target.trim());
                if column.is_empty() || target.is_empty() {
                    return Err(malformed(format!("incomplete column policy {key}")));
                }
                let flag = StoreFlag::from_name(value)
                    .ok_or_else(|| malformed(format!("unknown store flag {value}")))?;
                pragma.add_column_attr(column, FieldAttr::new(target, flag));
                Ok(None)
            }
            None => {
                if column.trim().is_empty() {
                    return Err(malformed("column directive without a column name".to_string()));
                }
                let data_type = DataType::from_name(value)
                    .ok_or_else(|| malformed(format!("unknown type {value}")))?;
                pragma.set_column_type(column.trim(), data_type);
                Ok(None)
            }
        };
    }

    match (key.to_ascii_lowercase().as_str(), value) {
        ("modify", Some(target)) if !target.is_empty() => {
            pragma.set_modify_target(target);
            Ok(None)
        }
        ("readonly" | "read-only" | "read_only", None) => Ok(Some(true)),
        ("readonly" | "read-only" | "read_only", Some(flag)) => match flag.to_ascii_lowercase().as_str() {
            "true" | "yes" => Ok(Some(true)),
            "false" | "no" => Ok(Some(false)),
            other => Err(malformed(format!("invalid read-only flag {other}"))),
        },
        _ => Err(malformed(format!("unknown directive {line}"))),
    }
}
