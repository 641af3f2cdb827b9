//! Shared fixtures: an in-memory patient table and a recording store.

#![allow(dead_code)]

use std::sync::Arc;

use rowshape_core::diagnostics::{RecordingSink, StoreLogLevel};
use rowshape_core::source::QuerySource;
use rowshape_storage::DataStore;
use rusqlite::Connection;

pub const PATIENT_DDL: &str = "
    CREATE TABLE patient (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        is_active BOOLEAN,
        admitted_at TIMESTAMP,
        notes TEXT
    );
    INSERT INTO patient VALUES (1, 'Ada', 1, '2024-05-01T08:30:00Z', 'first');
    INSERT INTO patient VALUES (2, 'Grace', 0, '2024-05-02 09:00:00', NULL);
    INSERT INTO patient VALUES (3, 'Linus', NULL, NULL, 'third');
";

pub fn patient_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(PATIENT_DDL).unwrap();
    conn
}

pub fn recording_store(
    level: StoreLogLevel,
    sources: impl IntoIterator<Item = QuerySource>,
) -> (DataStore, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let builder = sources.into_iter().fold(
        DataStore::builder().log_level(level).sink(sink.clone()),
        |builder, source| builder.source(source),
    );
    (builder.build(), sink)
}
