//! Tests for the value, schema and row model.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rowshape_core::errors::RowError;
use rowshape_core::types::{
    BoolCoercion, DataType, FieldAttr, FieldDef, NumericBoolRule, Row, Schema, StoreFlag, Tristate,
    Value,
};

fn patient_schema() -> Arc<Schema> {
    Arc::new(Schema::new(
        "patient",
        false,
        [
            FieldDef::new("Id", DataType::Integer),
            FieldDef::new("Name", DataType::Text),
            FieldDef::new("IsActive", DataType::Boolean),
        ],
    ))
}

#[test]
fn test_schema_assigns_contiguous_orders() {
    let schema = Schema::new(
        "s",
        true,
        [
            FieldDef::new("a", DataType::Integer),
            FieldDef::new("b", DataType::Text),
            FieldDef::new("c", DataType::Real),
        ],
    );
    let orders: Vec<_> = schema.fields().iter().map(FieldDef::order).collect();
    assert_eq!(orders, [0, 1, 2]);
    assert!(schema.read_only());
    assert_eq!(schema.field_names().collect::<Vec<_>>(), ["a", "b", "c"]);
}

#[test]
fn test_schema_lookup_is_case_insensitive_and_first_wins() {
    let schema = Schema::new(
        "s",
        false,
        [
            FieldDef::new("Total", DataType::Integer),
            FieldDef::new("total", DataType::Real),
        ],
    );
    assert_eq!(schema.len(), 2);
    let def = schema.field("TOTAL").unwrap();
    assert_eq!(def.order(), 0);
    assert_eq!(def.data_type(), DataType::Integer);
    assert!(schema.field("missing").is_none());
}

#[test]
fn test_attr_for_prefers_exact_target_over_wildcard() {
    let def = FieldDef::new("notes", DataType::Text).with_attrs([
        FieldAttr::any_target(StoreFlag::None),
        FieldAttr::new("SQLite", StoreFlag::OnlyLoad),
    ]);

    assert_eq!(def.attr_for("sqlite").unwrap().store_flag(), StoreFlag::OnlyLoad);
    assert_eq!(def.attr_for("archive").unwrap().store_flag(), StoreFlag::None);
    assert!(def.loads_for("sqlite"));
    assert!(!def.loads_for("archive"));
}

#[test]
fn test_loads_for_without_policy() {
    let def = FieldDef::new("id", DataType::Integer);
    assert!(def.attr_for("sqlite").is_none());
    assert!(def.loads_for("sqlite"));

    let write_only = FieldDef::new("hash", DataType::Blob)
        .with_attr(FieldAttr::new("sqlite", StoreFlag::OnlyStore));
    assert!(!write_only.loads_for("sqlite"));
}

#[test]
fn test_store_flag_names() {
    assert_eq!(StoreFlag::from_name("Only-Load"), Some(StoreFlag::OnlyLoad));
    assert_eq!(StoreFlag::from_name("loadandstore"), Some(StoreFlag::LoadAndStore));
    assert_eq!(StoreFlag::from_name("none"), Some(StoreFlag::None));
    assert_eq!(StoreFlag::from_name("maybe"), None);
    assert!(StoreFlag::OnlyLoad.loads() && !StoreFlag::OnlyLoad.stores());
    assert!(!StoreFlag::None.loads() && !StoreFlag::None.stores());
}

#[test]
fn test_row_get_and_set() {
    let mut row = Row::new(patient_schema());
    assert!(row.values().iter().all(Value::is_null));

    row.set("id", 7_i64).unwrap();
    row.set("NAME", "Ada").unwrap();
    assert!(row.set_at(2, Value::Bool(true)));
    assert!(!row.set_at(3, Value::Bool(true)));

    assert_eq!(row.get_as::<i64>("Id").unwrap(), 7);
    assert_eq!(row.get_as::<String>("name").unwrap(), "Ada");
    assert_eq!(row.tristate("isactive").unwrap(), Tristate::True);
    assert_eq!(row[0], Value::Integer(7));
}

#[test]
fn test_row_conversion_errors() {
    let mut row = Row::new(patient_schema());
    row.set("name", "Ada").unwrap();

    assert!(matches!(
        row.get_as::<i64>("name"),
        Err(RowError::TypeMismatch {
            expected: "integer",
            actual: "text",
            ..
        })
    ));
    assert!(matches!(row.get_as::<i64>("id"), Err(RowError::NullValue { .. })));
    assert_eq!(row.get_as::<Option<i64>>("id").unwrap(), None);
    assert!(matches!(
        row.set("ward", 3_i64),
        Err(RowError::MissingField { .. })
    ));
}

#[test]
fn test_unknown_boolean_is_distinct_from_false() {
    let mut row = Row::new(patient_schema());
    assert_eq!(row.tristate("IsActive").unwrap(), Tristate::Unknown);
    assert_eq!(row.get_as::<Option<bool>>("IsActive").unwrap(), None);

    row.set("IsActive", Tristate::False).unwrap();
    assert_eq!(row.tristate("IsActive").unwrap(), Tristate::False);
    assert_eq!(row.get("IsActive"), Some(&Value::Bool(false)));
}

#[test]
fn test_value_conversions() {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    assert_eq!(Value::from(ts).data_type(), DataType::Timestamp);
    assert_eq!(Value::from(Some(3_i32)), Value::Integer(3));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Tristate::Unknown), Value::Null);
    assert_eq!(Value::Integer(2).as_f64(), Some(2.0));
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::from("x").to_string(), "'x'");
}

#[test]
fn test_data_type_names() {
    assert_eq!(DataType::from_name("GUID"), Some(DataType::Uuid));
    assert_eq!(DataType::from_name("datetime"), Some(DataType::Timestamp));
    assert_eq!(DataType::from_name("decimal"), None);
}

#[test]
fn test_default_bool_coercion() {
    let coercion = BoolCoercion::default();

    assert_eq!(coercion.coerce(&Value::Integer(1)), Tristate::True);
    assert_eq!(coercion.coerce(&Value::Integer(0)), Tristate::False);
    assert_eq!(coercion.coerce(&Value::Integer(-4)), Tristate::True);
    assert_eq!(coercion.coerce(&Value::Real(0.0)), Tristate::False);
    assert_eq!(coercion.coerce(&Value::Null), Tristate::Unknown);
    assert_eq!(coercion.coerce(&Value::from(" Yes ")), Tristate::True);
    assert_eq!(coercion.coerce(&Value::from("N")), Tristate::False);
    assert_eq!(coercion.coerce(&Value::from("maybe")), Tristate::Unknown);
    assert_eq!(coercion.coerce(&Value::Blob(vec![1])), Tristate::True);
    assert_eq!(coercion.coerce(&Value::Blob(vec![1, 0])), Tristate::Unknown);
    assert_eq!(coercion.coerce(&Value::Real(f64::NAN)), Tristate::Unknown);
}

#[test]
fn test_strict_numeric_bool_coercion() {
    let coercion = BoolCoercion::new(["Y"], ["N"], NumericBoolRule::Strict);
    assert_eq!(coercion.coerce(&Value::Integer(1)), Tristate::True);
    assert_eq!(coercion.coerce(&Value::Integer(0)), Tristate::False);
    assert_eq!(coercion.coerce(&Value::Integer(2)), Tristate::Unknown);
    assert_eq!(coercion.coerce(&Value::from("y")), Tristate::True);
    assert_eq!(coercion.coerce(&Value::from("true")), Tristate::Unknown);
}
