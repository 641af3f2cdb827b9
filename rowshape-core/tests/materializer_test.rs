//! Tests for rowset materialization over an in-memory cursor.

use std::sync::Arc;

use rowshape_core::errors::RowError;
use rowshape_core::resolver::{BackendColumn, SchemaResolver};
use rowshape_core::shape::{ShapeCache, TypedRow};
use rowshape_core::traits::RowSource;
use rowshape_core::types::{
    BoolCoercion, DataType, FieldDef, NumericBoolRule, Row, Schema, Tristate, Value,
};
use rowshape_core::{Query, RowsetMaterializer};

/// Cursor over canned rows that counts how many it handed out.
struct VecCursor {
    rows: Vec<Vec<Value>>,
    next: usize,
    fail_at: Option<usize>,
}

impl VecCursor {
    fn new(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows,
            next: 0,
            fail_at: None,
        }
    }
}

#[derive(Debug, PartialEq)]
struct CursorFailed;

impl RowSource for VecCursor {
    type Error = CursorFailed;

    fn next_row(&mut self, buf: &mut Vec<Value>) -> Result<bool, CursorFailed> {
        if self.fail_at == Some(self.next) {
            return Err(CursorFailed);
        }
        buf.clear();
        let Some(row) = self.rows.get(self.next) else {
            return Ok(false);
        };
        buf.extend(row.iter().cloned());
        self.next += 1;
        Ok(true)
    }
}

fn three_rows() -> Vec<Vec<Value>> {
    vec![
        vec![Value::Integer(1), Value::from("first"), Value::Integer(1)],
        vec![Value::Integer(2), Value::from("second"), Value::Integer(0)],
        vec![Value::Integer(3), Value::from("third"), Value::Null],
    ]
}

fn columns() -> Vec<BackendColumn> {
    vec![
        BackendColumn::new("id", DataType::Integer),
        BackendColumn::new("name", DataType::Text),
        BackendColumn::new("is_active", DataType::Boolean),
    ]
}

#[test]
fn test_populate_all_rows_with_boolean_coercion() {
    let shapes = ShapeCache::default();
    let resolved = SchemaResolver::new(&shapes)
        .resolve("sqlite", &Query::new("patients"), None, &columns())
        .unwrap();
    let coercion = BoolCoercion::default();
    let mut cursor = VecCursor::new(three_rows());

    let rowset = RowsetMaterializer::new(&coercion)
        .populate(&mut cursor, &resolved, false)
        .unwrap();

    assert_eq!(rowset.len(), 3);
    assert!(Arc::ptr_eq(rowset.schema(), resolved.schema()));
    assert_eq!(rowset[0].get("is_active"), Some(&Value::Bool(true)));
    assert_eq!(rowset[1].get("is_active"), Some(&Value::Bool(false)));
    assert_eq!(rowset[2].get("is_active"), Some(&Value::Null));
    assert_eq!(rowset[2].tristate("is_active").unwrap(), Tristate::Unknown);
    assert_eq!(rowset[1].get_as::<String>("name").unwrap(), "second");
}

#[test]
fn test_one_row_stops_after_first() {
    let shapes = ShapeCache::default();
    let resolved = SchemaResolver::new(&shapes)
        .resolve("sqlite", &Query::new("patients"), None, &columns())
        .unwrap();
    let coercion = BoolCoercion::default();
    let mut cursor = VecCursor::new(three_rows());

    let rowset = RowsetMaterializer::new(&coercion)
        .populate(&mut cursor, &resolved, true)
        .unwrap();

    assert_eq!(rowset.len(), 1);
    assert_eq!(rowset[0].get_as::<i64>("id").unwrap(), 1);
    assert_eq!(cursor.next, 1);
}

#[test]
fn test_empty_cursor_yields_empty_rowset() {
    let shapes = ShapeCache::default();
    let resolved = SchemaResolver::new(&shapes)
        .resolve("sqlite", &Query::new("patients"), None, &columns())
        .unwrap();
    let coercion = BoolCoercion::default();
    let mut cursor = VecCursor::new(Vec::new());

    let rowset = RowsetMaterializer::new(&coercion)
        .populate(&mut cursor, &resolved, true)
        .unwrap();
    assert!(rowset.is_empty());
    assert_eq!(rowset.schema().len(), 3);
}

#[test]
fn test_cursor_error_abandons_rowset() {
    let shapes = ShapeCache::default();
    let resolved = SchemaResolver::new(&shapes)
        .resolve("sqlite", &Query::new("patients"), None, &columns())
        .unwrap();
    let coercion = BoolCoercion::default();
    let mut cursor = VecCursor::new(three_rows());
    cursor.fail_at = Some(2);

    let result = RowsetMaterializer::new(&coercion).populate(&mut cursor, &resolved, false);
    assert_eq!(result.unwrap_err(), CursorFailed);
}

#[test]
fn test_strict_table_leaves_out_of_range_unknown() {
    let shapes = ShapeCache::default();
    let resolved = SchemaResolver::new(&shapes)
        .resolve("sqlite", &Query::new("flags"), None, &columns())
        .unwrap();
    let coercion = BoolCoercion::new(["Y"], ["N"], NumericBoolRule::Strict);
    let mut cursor = VecCursor::new(vec![vec![
        Value::Integer(1),
        Value::from("x"),
        Value::Integer(5),
    ]]);

    let rowset = RowsetMaterializer::new(&coercion)
        .populate(&mut cursor, &resolved, false)
        .unwrap();
    assert_eq!(rowset[0].tristate("is_active").unwrap(), Tristate::Unknown);
}

#[derive(Debug, PartialEq)]
struct Patient {
    id: i64,
    name: String,
    active: Tristate,
}

impl TypedRow for Patient {
    const SHAPE: &'static str = "patient";

    fn declare() -> Schema {
        Schema::new(
            "patient",
            false,
            [
                FieldDef::new("Name", DataType::Text),
                FieldDef::new("Id", DataType::Integer),
                FieldDef::new("Is_Active", DataType::Boolean),
            ],
        )
    }

    fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Self {
            id: row.get_as("id")?,
            name: row.get_as("name")?,
            active: row.tristate("is_active")?,
        })
    }
}

#[test]
fn test_static_shape_populates_typed_rows() {
    let shapes = ShapeCache::default();
    shapes.register::<Patient>();
    let query = Query::new("patients").with_typed_row::<Patient>();
    let resolved = SchemaResolver::new(&shapes)
        .resolve("sqlite", &query, None, &columns())
        .unwrap();
    let coercion = BoolCoercion::default();
    let mut cursor = VecCursor::new(three_rows());

    let rowset = RowsetMaterializer::new(&coercion)
        .populate(&mut cursor, &resolved, false)
        .unwrap();

    assert_eq!(rowset[0].shape(), Some("patient"));
    // Schema order, not backend order.
    assert_eq!(rowset[0][0], Value::from("first"));

    let patients = rowset.to_typed::<Patient>().unwrap();
    assert_eq!(
        patients[0],
        Patient {
            id: 1,
            name: "first".to_string(),
            active: Tristate::True,
        }
    );
    assert_eq!(patients[2].active, Tristate::Unknown);
}
