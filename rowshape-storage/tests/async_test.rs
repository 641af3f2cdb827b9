//! Async variants complete on the caller's task with the sync contracts.

mod common;

use rowshape_core::constants::{LOG_TAG_ERROR, LOG_TAG_OK};
use rowshape_core::diagnostics::StoreLogLevel;
use rowshape_core::source::QuerySource;
use rowshape_core::Query;
use rowshape_storage::QueryHandler;

use common::{patient_db, recording_store};

#[tokio::test]
async fn test_execute_async_matches_execute() {
    let conn = patient_db();
    let (store, sink) = recording_store(
        StoreLogLevel::Trace,
        [QuerySource::new("patients", "SELECT id, name FROM patient ORDER BY id")],
    );
    let ctx = store.context(&conn);
    let handler = store.handler("patients").unwrap();
    let query = Query::new("patients");

    let sync_rows = handler.execute(&ctx, &query, false).unwrap();
    let async_rows = handler.execute_async(&ctx, &query, false).await.unwrap();
    assert_eq!(sync_rows.len(), async_rows.len());
    assert_eq!(sync_rows[2].values(), async_rows[2].values());

    let first = handler.execute_async(&ctx, &query, true).await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(sink.count_tagged(LOG_TAG_OK), 3);
}

#[tokio::test]
async fn test_get_schema_async() {
    let conn = patient_db();
    let (store, _sink) = recording_store(
        StoreLogLevel::Debug,
        [QuerySource::new("patients", "SELECT id, name FROM patient")],
    );
    let ctx = store.context(&conn);

    let schema = store
        .handler("patients")
        .unwrap()
        .get_schema_async(&ctx, &Query::new("patients"))
        .await
        .unwrap();
    assert_eq!(schema.field_names().collect::<Vec<_>>(), ["id", "name"]);
}

#[tokio::test]
async fn test_execute_without_fetch_async_reports_failure_once() {
    let conn = patient_db();
    let (store, sink) = recording_store(
        StoreLogLevel::Debug,
        [
            QuerySource::new("discharge", "DELETE FROM patient WHERE id = :id"),
            QuerySource::new("bad", "DELETE FROM nowhere"),
        ],
    );
    let ctx = store.context(&conn);

    let deleted = store
        .handler("discharge")
        .unwrap()
        .execute_without_fetch_async(&ctx, &Query::new("discharge").with_param("id", 3_i64))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let result = store
        .handler("bad")
        .unwrap()
        .execute_without_fetch_async(&ctx, &Query::new("bad"))
        .await;
    assert!(result.is_err());
    assert_eq!(sink.count_tagged(LOG_TAG_ERROR), 1);
}
