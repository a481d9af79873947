//! Tests for the `#[derive(Tuple)]` macro output.
//!
//! These tests verify that the derive macro generates a `Tuple` impl with:
//! - `COLUMNS` listing mapped column names in field order
//! - `value_of` reading fields by column name
//! - `assign` storing converted values and reporting unmapped columns

mod common;

use chrono::NaiveDate;
use common::person;
use quill_sql_core::builder::{Bindable, SqlValue, ValueError};
use quill_sql_core::schema::{check_mapping, Tuple};
use quill_sql_core::Error;
use quill_sql_derive::Tuple;

#[derive(Debug, Default, Clone, PartialEq, Tuple)]
pub struct PersonRow {
    #[column(name = "Name")]
    pub name: String,
    #[column(name = "Surname")]
    pub surname: String,
    #[column(name = "Age")]
    pub age: Option<i32>,
    #[column(name = "Born")]
    pub born: Option<chrono::NaiveDateTime>,
    #[column(skip)]
    pub nickname: String,
}

#[derive(Debug, Default, Tuple)]
pub struct Partial {
    #[column(name = "Name")]
    pub name: String,
}

#[derive(Debug, Default, Tuple)]
pub struct DefaultNames {
    pub id: i64,
    pub label: Option<String>,
}

fn ann() -> PersonRow {
    PersonRow {
        name: String::from("Ann"),
        surname: String::from("Lee"),
        age: Some(34),
        born: NaiveDate::from_ymd_opt(1990, 4, 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        nickname: String::from("annie"),
    }
}

#[test]
fn test_columns_in_field_order_without_skipped() {
    assert_eq!(PersonRow::COLUMNS, &["Name", "Surname", "Age", "Born"]);
    assert_eq!(DefaultNames::COLUMNS, &["id", "label"]);
}

#[test]
fn test_value_of() {
    let row = ann();
    assert_eq!(row.value_of("Name"), Some(SqlValue::Text(String::from("Ann"))));
    assert_eq!(row.value_of("Age"), Some(SqlValue::Int(34)));
    assert_eq!(row.value_of("nickname"), None);
    assert_eq!(PersonRow::default().value_of("Age"), Some(SqlValue::Null));
}

#[test]
fn test_assign() {
    let mut row = PersonRow::default();
    assert_eq!(row.assign("Age", SqlValue::Int(50)), Ok(true));
    assert_eq!(row.age, Some(50));
    assert_eq!(row.assign("Age", SqlValue::Null), Ok(true));
    assert_eq!(row.age, None);
    assert_eq!(row.assign("Unknown", SqlValue::Int(1)), Ok(false));
}

#[test]
fn test_assign_null_to_required_field_fails() {
    let mut row = PersonRow::default();
    assert_eq!(
        row.assign("Name", SqlValue::Null),
        Err(ValueError::UnexpectedNull)
    );
}

#[test]
fn test_assignments_skip_null() {
    let row = PersonRow {
        age: None,
        ..ann()
    };
    let columns: Vec<&str> = row.assignments(true).into_iter().map(|(c, _)| c).collect();
    assert_eq!(columns, vec!["Name", "Surname", "Born"]);
    assert_eq!(row.assignments(false).len(), 4);
}

#[test]
fn test_insert_from_tuple() {
    let p = person();
    let insert = p.table.insert().values_from_tuple(&ann()).unwrap();
    assert_eq!(insert.to_sql(), "INSERT INTO Person VALUES (?, ?, ?, ?)");
    assert_eq!(insert.bind_values()[2], SqlValue::Int(34));
}

#[test]
fn test_insert_from_partial_tuple_fails() {
    let p = person();
    assert!(check_mapping::<PersonRow>(&p.table).is_ok());
    let err = p
        .table
        .insert()
        .values_from_tuples([&Partial::default()])
        .unwrap_err();
    match err {
        Error::MissingColumnMapping { table, column, .. } => {
            assert_eq!(table, "Person");
            assert_eq!(column, "Surname");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_update_from_tuple() {
    let p = person();
    let row = PersonRow {
        born: None,
        ..ann()
    };
    let update = p
        .table
        .update()
        .set_from_tuple(&row, true)
        .where_clause(p.name.eq("Ann"));
    assert_eq!(
        update.to_sql(),
        "UPDATE Person SET Name = ?, Surname = ?, Age = ? WHERE (Person.Name = ?)"
    );
    assert_eq!(update.bind_values().len(), 4);
}
