//! Tests for error codes and backend error preservation.

use std::error::Error as _;
use std::io;

use rowshape_core::errors::{
    BackendError, BindingError, ConfigError, ErrorCode, QueryError, RowError, SchemaMismatch,
};

#[test]
fn test_error_codes() {
    let missing = ConfigError::SourceNotFound {
        name: "q".to_string(),
    };
    assert_eq!(missing.error_code(), "SOURCE_NOT_FOUND");
    assert_eq!(missing.tagged_string(), "[SOURCE_NOT_FOUND] Query source not found: q");

    let invalid = ConfigError::ValidationFailed {
        field: "f".to_string(),
        message: "m".to_string(),
    };
    assert_eq!(invalid.error_code(), "CONFIG_ERROR");
    assert_eq!(BindingError::EmptyKey.error_code(), "BINDING_ERROR");
    assert_eq!(
        RowError::NullValue {
            field: "x".to_string()
        }
        .error_code(),
        "ROW_ERROR"
    );
}

#[test]
fn test_query_error_delegates_code() {
    let err: QueryError = BindingError::DuplicateParameter {
        name: ":id".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "BINDING_ERROR");

    let err: QueryError = ConfigError::ShapeNotFound {
        shape: "s".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "SHAPE_NOT_FOUND");
}

#[test]
fn test_backend_error_keeps_original() {
    let err = QueryError::backend(io::Error::new(io::ErrorKind::Other, "disk gone"));

    assert_eq!(err.error_code(), "BACKEND_ERROR");
    assert_eq!(err.to_string(), "disk gone");
    let original = err.backend_source::<io::Error>().unwrap();
    assert_eq!(original.kind(), io::ErrorKind::Other);
    assert!(err.backend_source::<std::fmt::Error>().is_none());

    let QueryError::Backend(backend) = err else {
        panic!("expected a backend error");
    };
    let inner = backend.into_inner();
    assert!(inner.downcast_ref::<io::Error>().is_some());
}

#[test]
fn test_backend_error_forwards_source() {
    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] io::Error);

    let backend = BackendError::new(Outer(io::Error::new(io::ErrorKind::Other, "inner")));
    assert_eq!(backend.to_string(), "outer");
    assert_eq!(backend.source().unwrap().to_string(), "inner");
    assert!(backend.get_ref().is::<Outer>());
}

#[test]
fn test_non_backend_error_has_no_backend_source() {
    let err: QueryError = BindingError::EmptyKey.into();
    assert!(err.backend_source::<io::Error>().is_none());
}

#[test]
fn test_schema_mismatch_display() {
    let mismatch = SchemaMismatch {
        shape: "ab".to_string(),
        columns: vec!["x".to_string(), "y".to_string()],
    };
    assert_eq!(
        mismatch.to_string(),
        "Row shape ab matched none of the backend columns [x, y]"
    );
    assert_eq!(mismatch.error_code(), "SCHEMA_MISMATCH");
}
