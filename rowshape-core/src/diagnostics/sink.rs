//! DiagnosticSink trait, store verbosity and the default `tracing` sink.

use std::error::Error as StdError;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::constants::LOG_TAG_ERROR;
use crate::query::BoundParameters;

/// Verbosity of command logging for one data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreLogLevel {
    /// Nothing is logged.
    None,
    /// Failed commands only.
    #[default]
    Debug,
    /// Failed and successful commands.
    Trace,
}

/// One executed (or failed) command with its full context.
#[derive(Debug, Clone, Copy)]
pub struct CommandEvent<'a> {
    pub tag: &'static str,
    pub target: &'a str,
    pub query: &'a str,
    pub statement: &'a str,
    pub params: &'a BoundParameters,
    pub error: Option<&'a (dyn StdError + 'static)>,
}

impl CommandEvent<'_> {
    pub fn is_error(&self) -> bool {
        self.error.is_some() || self.tag == LOG_TAG_ERROR
    }

    /// `name=value` pairs separated by `, `.
    pub fn render_params(&self) -> String {
        let mut out = String::new();
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={}", p.name, p.value);
        }
        out
    }
}

/// Receives command diagnostics from query handlers.
pub trait DiagnosticSink: Send + Sync {
    fn log_command(&self, event: &CommandEvent<'_>);
}

/// Forward `event` to `sink` if `level` admits it.
pub fn log_command(level: StoreLogLevel, sink: &dyn DiagnosticSink, event: &CommandEvent<'_>) {
    let admitted = match level {
        StoreLogLevel::None => false,
        StoreLogLevel::Debug => event.is_error(),
        StoreLogLevel::Trace => true,
    };
    if admitted {
        sink.log_command(event);
    }
}

/// Default sink: emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log_command(&self, event: &CommandEvent<'_>) {
        let params = event.render_params();
        match event.error {
            Some(error) => tracing::error!(
                tag = event.tag,
                backend_target = event.target,
                query = event.query,
                statement = event.statement,
                params = %params,
                error = %error,
                "command failed"
            ),
            None => tracing::trace!(
                tag = event.tag,
                backend_target = event.target,
                query = event.query,
                statement = event.statement,
                params = %params,
                "command executed"
            ),
        }
    }
}
