//! Tests for schema resolution and load-filter computation.

use rowshape_core::errors::ConfigError;
use rowshape_core::resolver::{derive_schema, BackendColumn, SchemaResolver};
use rowshape_core::shape::ShapeCache;
use rowshape_core::source::{Pragma, QuerySource};
use rowshape_core::types::{DataType, FieldAttr, FieldDef, Schema, StoreFlag};
use rowshape_core::Query;

fn columns(names: &[(&str, DataType)]) -> Vec<BackendColumn> {
    names
        .iter()
        .map(|(name, ty)| BackendColumn::new(*name, *ty))
        .collect()
}

fn ab_shape() -> ShapeCache {
    let cache = ShapeCache::default();
    cache.register_schema(
        "ab",
        Schema::new(
            "ab",
            false,
            [
                FieldDef::new("A", DataType::Integer),
                FieldDef::new("B", DataType::Text),
            ],
        ),
    );
    cache
}

#[test]
fn test_static_shape_filters_unknown_columns() {
    let shapes = ab_shape();
    let resolver = SchemaResolver::new(&shapes);
    let query = Query::new("q").with_row_shape("ab");
    let cols = columns(&[
        ("a", DataType::Integer),
        ("b", DataType::Text),
        ("C", DataType::Real),
    ]);

    let resolved = resolver.resolve("sqlite", &query, None, &cols).unwrap();

    assert_eq!(resolved.schema().len(), 2);
    assert_eq!(resolved.load_filter(), [Some(0), Some(1), None]);
    assert_eq!(resolved.loaded_count(), 2);
    assert_eq!(resolved.loaded_field(1).unwrap().name(), "B");
    assert!(resolved.loaded_field(2).is_none());
    assert_eq!(resolved.shape().map(|s| &**s), Some("ab"));
    assert!(resolved.mismatch().is_none());
}

#[test]
fn test_static_shape_matches_by_name_not_position() {
    let shapes = ab_shape();
    let resolver = SchemaResolver::new(&shapes);
    let query = Query::new("q").with_row_shape("ab");
    let cols = columns(&[("B", DataType::Text), ("A", DataType::Integer)]);

    let resolved = resolver.resolve("sqlite", &query, None, &cols).unwrap();
    assert_eq!(resolved.load_filter(), [Some(1), Some(0)]);
}

#[test]
fn test_static_shape_without_common_columns_reports_mismatch() {
    let shapes = ab_shape();
    let resolver = SchemaResolver::new(&shapes);
    let query = Query::new("q").with_row_shape("ab");
    let cols = columns(&[("x", DataType::Integer), ("y", DataType::Integer)]);

    let resolved = resolver.resolve("sqlite", &query, None, &cols).unwrap();

    assert_eq!(resolved.load_filter(), [None, None]);
    let mismatch = resolved.mismatch().unwrap();
    assert_eq!(mismatch.shape, "ab");
    assert_eq!(mismatch.columns, ["x", "y"]);
    assert_eq!(resolved.schema().len(), 2);
}

#[test]
fn test_unregistered_shape_is_config_error() {
    let shapes = ShapeCache::default();
    let resolver = SchemaResolver::new(&shapes);
    let query = Query::new("q").with_row_shape("missing");

    let err = resolver.resolve("sqlite", &query, None, &[]).unwrap_err();
    assert!(matches!(err, ConfigError::ShapeNotFound { shape } if shape == "missing"));
}

#[test]
fn test_static_shape_store_policy() {
    let shapes = ShapeCache::default();
    shapes.register_schema(
        "audited",
        Schema::new(
            "audited",
            false,
            [
                FieldDef::new("id", DataType::Integer),
                FieldDef::new("hash", DataType::Blob)
                    .with_attr(FieldAttr::new("sqlite", StoreFlag::OnlyStore)),
            ],
        ),
    );
    let resolver = SchemaResolver::new(&shapes);
    let query = Query::new("q").with_row_shape("audited");
    let cols = columns(&[("id", DataType::Integer), ("hash", DataType::Blob)]);

    let on_sqlite = resolver.resolve("sqlite", &query, None, &cols).unwrap();
    assert_eq!(on_sqlite.load_filter(), [Some(0), None]);

    let elsewhere = resolver.resolve("archive", &query, None, &cols).unwrap();
    assert_eq!(elsewhere.load_filter(), [Some(0), Some(1)]);
}

#[test]
fn test_derived_schema_follows_column_order() {
    let shapes = ShapeCache::default();
    let resolver = SchemaResolver::new(&shapes);
    let query = Query::new("visits");
    let cols = columns(&[("X", DataType::Integer), ("Y", DataType::Text)]);

    let resolved = resolver.resolve("sqlite", &query, None, &cols).unwrap();
    let schema = resolved.schema();

    assert_eq!(schema.name(), "visits");
    assert_eq!(schema.field_names().collect::<Vec<_>>(), ["X", "Y"]);
    assert_eq!(schema.field_at(1).unwrap().data_type(), DataType::Text);
    assert!(schema.read_only());
    assert_eq!(resolved.load_filter(), [Some(0), Some(1)]);
    assert!(resolved.shape().is_none());
}

#[test]
fn test_derived_schema_keeps_duplicate_column_names_apart() {
    let cols = columns(&[("id", DataType::Integer), ("id", DataType::Integer)]);
    let shapes = ShapeCache::default();
    let resolver = SchemaResolver::new(&shapes);

    let resolved = resolver
        .resolve("sqlite", &Query::new("join"), None, &cols)
        .unwrap();
    assert_eq!(resolved.load_filter(), [Some(0), Some(1)]);
}

#[test]
fn test_modify_target_overrides_query_name() {
    let source = QuerySource::new("visits", "SELECT 1")
        .with_pragma(Pragma::new().with_modify_target("visit"));
    let schema = derive_schema("visits", Some(&source), &columns(&[("X", DataType::Integer)]));
    assert_eq!(schema.name(), "visit");
    assert!(!schema.read_only());
}

#[test]
fn test_blank_name_gets_uuid() {
    let first = derive_schema("  ", None, &columns(&[("X", DataType::Integer)]));
    let second = derive_schema("", None, &columns(&[("X", DataType::Integer)]));

    assert!(uuid::Uuid::parse_str(first.name()).is_ok());
    assert!(uuid::Uuid::parse_str(second.name()).is_ok());
    assert_ne!(first.name(), second.name());
}

#[test]
fn test_pragma_type_hint_and_policy_apply_to_derived_schema() {
    let source = QuerySource::new("patients", "SELECT id, is_active, notes FROM patient").with_pragma(
        Pragma::new()
            .with_column_type("is_active", DataType::Boolean)
            .with_column_attr("NOTES", FieldAttr::any_target(StoreFlag::None)),
    );
    let cols = columns(&[
        ("id", DataType::Integer),
        ("is_active", DataType::Integer),
        ("notes", DataType::Text),
    ]);
    let shapes = ShapeCache::default();
    let resolver = SchemaResolver::new(&shapes);

    let resolved = resolver
        .resolve("sqlite", &Query::new("patients"), Some(&source), &cols)
        .unwrap();

    assert_eq!(
        resolved.schema().field("is_active").unwrap().data_type(),
        DataType::Boolean
    );
    assert_eq!(resolved.load_filter(), [Some(0), Some(1), None]);
}
