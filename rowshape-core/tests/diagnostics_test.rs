//! Tests for command diagnostics: verbosity gating and the recording sink.

use rowshape_core::constants::{LOG_TAG_ERROR, LOG_TAG_OK};
use rowshape_core::diagnostics::{
    log_command, CommandEvent, DiagnosticSink, RecordingSink, StoreLogLevel, TracingSink,
};
use rowshape_core::errors::BindingError;
use rowshape_core::query::BoundParameters;
use rowshape_core::types::Value;

fn params() -> BoundParameters {
    let mut params = BoundParameters::new();
    params.push(":ward", Value::from("A1"), None).unwrap();
    params.push(":limit", Value::Integer(10), None).unwrap();
    params
}

fn ok_event(params: &BoundParameters) -> CommandEvent<'_> {
    CommandEvent {
        tag: LOG_TAG_OK,
        target: "sqlite",
        query: "patients",
        statement: "SELECT * FROM patient WHERE ward = :ward LIMIT :limit",
        params,
        error: None,
    }
}

#[test]
fn test_render_params() {
    let params = params();
    assert_eq!(ok_event(&params).render_params(), ":ward='A1', :limit=10");
}

#[test]
fn test_debug_level_logs_failures_only() {
    let sink = RecordingSink::new();
    let params = params();
    let failure = BindingError::EmptyKey;
    let error_event = CommandEvent {
        tag: LOG_TAG_ERROR,
        error: Some(&failure),
        ..ok_event(&params)
    };

    log_command(StoreLogLevel::Debug, &sink, &ok_event(&params));
    log_command(StoreLogLevel::Debug, &sink, &error_event);

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].tag, LOG_TAG_ERROR);
    assert_eq!(entries[0].query, "patients");
    assert_eq!(entries[0].error.as_deref(), Some("Composite key has no fields"));
}

#[test]
fn test_trace_level_logs_everything_and_none_logs_nothing() {
    let sink = RecordingSink::new();
    let params = params();

    log_command(StoreLogLevel::None, &sink, &ok_event(&params));
    assert!(sink.entries().is_empty());

    log_command(StoreLogLevel::Trace, &sink, &ok_event(&params));
    assert_eq!(sink.count_tagged(LOG_TAG_OK), 1);
    assert_eq!(sink.count_tagged(LOG_TAG_ERROR), 0);

    sink.clear();
    assert!(sink.entries().is_empty());
}

#[test]
fn test_tracing_sink_accepts_events() {
    rowshape_core::tracing::init_tracing();
    let params = params();
    TracingSink.log_command(&ok_event(&params));
}
