//! In-memory sink that keeps every command it receives.

use std::sync::{Mutex, PoisonError};

use super::sink::{CommandEvent, DiagnosticSink};

/// Owned copy of one logged command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedCommand {
    pub tag: String,
    pub query: String,
    pub statement: String,
    pub params: String,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<LoggedCommand>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LoggedCommand> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count_tagged(&self, tag: &str) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.tag == tag)
            .count()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn log_command(&self, event: &CommandEvent<'_>) {
        let entry = LoggedCommand {
            tag: event.tag.to_string(),
            query: event.query.to_string(),
            statement: event.statement.to_string(),
            params: event.render_params(),
            error: event.error.map(|e| e.to_string()),
        };
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}
