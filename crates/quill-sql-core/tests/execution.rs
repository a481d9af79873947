//! Integration tests for statement execution through a recording driver.
//!
//! These tests verify:
//! - 1-based positional binding in bind-value order
//! - statement reuse by SQL text and by id
//! - recompilation of closed handles
//! - generated key retrieval and row mapping
//! - rejection of incomplete statements before they reach the driver

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{person, row, Event, MockConnection};
use quill_sql_core::builder::{CreateDatabase, SqlValue, ValueError};
use quill_sql_core::exec::{ExecMode, Executor, Outcome, StatementCache};
use quill_sql_core::Error;
use quill_sql_derive::Tuple;

#[derive(Debug, Default, PartialEq, Tuple)]
struct NameAge {
    #[column(name = "Name")]
    name: String,
    #[column(name = "Age")]
    age: Option<i32>,
}

fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

#[test]
fn test_binds_are_one_based_and_ordered() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();

    let update = p
        .table
        .update()
        .set("Age", 20)
        .where_clause(p.name.eq("John").and(p.surname.eq("White")));
    conn.driver.affected.store(1, Ordering::SeqCst);
    assert_eq!(exec.update(&update).unwrap(), 1);

    assert_eq!(
        conn.driver.events(),
        vec![
            Event::Prepare {
                sql: String::from(
                    "UPDATE Person SET Age = ? WHERE ((Person.Name = ?) AND (Person.Surname = ?))"
                ),
                generated_keys: false,
            },
            Event::Bind {
                index: 1,
                value: SqlValue::Int(20)
            },
            Event::Bind {
                index: 2,
                value: text("John")
            },
            Event::Bind {
                index: 3,
                value: text("White")
            },
            Event::Update(String::from(
                "UPDATE Person SET Age = ? WHERE ((Person.Name = ?) AND (Person.Surname = ?))"
            )),
        ]
    );
}

#[test]
fn test_same_sql_reuses_compiled_statement() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();

    for age in [18, 30, 65] {
        exec.update(&p.table.delete().where_clause(p.age.eq(age)))
            .unwrap();
    }
    assert_eq!(conn.driver.prepared_count(), 1);
    assert_eq!(cache.len(), 1);
    let bound: Vec<SqlValue> = conn.driver.binds().into_iter().map(|(_, v)| v).collect();
    assert_eq!(
        bound,
        vec![SqlValue::Int(18), SqlValue::Int(30), SqlValue::Int(65)]
    );
}

#[test]
fn test_cached_by_id_compiles_once() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    let query = p.table.select(["Name"]).where_clause(p.age.gt(18));

    exec.query_cached(&query, 7).unwrap();
    exec.query_cached(&query, 7).unwrap();
    exec.query(&query).unwrap();

    // The id entry and the SQL entry are distinct.
    assert_eq!(conn.driver.prepared_count(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_closed_statement_is_recompiled() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    let delete = p.table.delete().where_clause(p.age.lt(0));

    exec.update(&delete).unwrap();
    conn.driver.close_all();
    exec.update(&delete).unwrap();
    exec.update(&delete).unwrap();

    assert_eq!(conn.driver.prepared_count(), 2);
    assert_eq!(cache.len(), 1);
    let prepares = conn
        .driver
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Prepare { .. }))
        .count();
    assert_eq!(prepares, 2);
}

#[test]
fn test_update_returning_generated_key() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    let insert = p
        .table
        .insert()
        .values([text("Ann"), text("Lee"), SqlValue::Int(34), SqlValue::Null]);

    *conn.driver.generated_key.lock() = Some(SqlValue::Int(42));
    let outcome = exec.update_returning_key(&insert).unwrap();
    assert_eq!(outcome.generated_key(), Some(&SqlValue::Int(42)));
    assert!(matches!(
        conn.driver.events().first(),
        Some(Event::Prepare {
            generated_keys: true,
            ..
        })
    ));
}

#[test]
fn test_update_returning_key_falls_back_to_count() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    conn.driver.affected.store(3, Ordering::SeqCst);

    let outcome = exec
        .execute(
            &p.table.update().set("Age", 1),
            ExecMode::UpdateReturningKey,
            None,
        )
        .unwrap();
    assert_eq!(outcome.rows_affected(), Some(3));
}

#[test]
fn test_fetch_maps_rows() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    conn.driver.serve(vec![
        row(&[("Person.Name", text("Ann")), ("Person.Age", SqlValue::Int(34))]),
        row(&[("Person.Name", text("Bob")), ("Person.Age", SqlValue::Null)]),
    ]);

    let people: Vec<NameAge> = exec
        .fetch(&p.table.select(["Name", "Age"]).where_clause(p.age.ge(0)))
        .unwrap();
    assert_eq!(
        people,
        vec![
            NameAge {
                name: String::from("Ann"),
                age: Some(34),
            },
            NameAge {
                name: String::from("Bob"),
                age: None,
            },
        ]
    );
}

#[test]
fn test_for_each_visits_every_row() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    conn.driver.serve(vec![
        row(&[("Person.Name", text("Ann"))]),
        row(&[("Person.Name", text("Bob"))]),
        row(&[("Person.Name", text("Cid"))]),
    ]);

    let mut names = Vec::new();
    exec.for_each(&p.table.select(["Name"]), |row: NameAge| {
        names.push(row.name);
        Ok(())
    })
    .unwrap();
    assert_eq!(names, vec!["Ann", "Bob", "Cid"]);
}

#[test]
fn test_for_each_stops_at_visitor_error() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    conn.driver.serve(vec![
        row(&[("Person.Name", text("Ann"))]),
        row(&[("Person.Name", text("Bob"))]),
        row(&[("Person.Name", text("Cid"))]),
    ]);

    let mut visited = Vec::new();
    let err = exec
        .for_each(&p.table.select(["Name"]), |row: NameAge| {
            visited.push(row.name);
            if visited.len() == 2 {
                return Err(Error::backend("enough rows"));
            }
            Ok(())
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "enough rows");
    assert_eq!(visited, vec!["Ann", "Bob"]);
}

#[test]
fn test_null_in_required_field_is_a_conversion_error() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    conn.driver
        .serve(vec![row(&[("Person.Name", SqlValue::Null)])]);

    let err = exec
        .fetch::<NameAge, _>(&p.table.select(["Name"]))
        .unwrap_err();
    match err {
        Error::Conversion { column, source } => {
            assert_eq!(column, "Person.Name");
            assert_eq!(source, ValueError::UnexpectedNull);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_raw_output_column_cannot_be_mapped() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    conn.driver
        .serve(vec![row(&[("COUNT(*)", SqlValue::Int(2))])]);

    let err = exec
        .fetch::<NameAge, _>(&p.table.select(["COUNT(*)"]))
        .unwrap_err();
    assert!(matches!(err, Error::IllDefinedColumn { .. }));
}

#[test]
fn test_execute_query_mode_returns_rows() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    conn.driver.serve(vec![row(&[("Person.Name", text("Ann"))])]);

    let outcome = exec
        .execute(&p.table.select(["Name"]), ExecMode::Query, Some(1))
        .unwrap();
    assert!(matches!(outcome, Outcome::Rows(_)));
    assert!(outcome.into_rows().is_some());
}

#[test]
fn test_run_once_bypasses_cache() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);

    exec.run_once(&CreateDatabase::new("shop")).unwrap();
    exec.run_once(&CreateDatabase::new("shop")).unwrap();
    assert_eq!(conn.driver.prepared_count(), 2);
    assert!(cache.is_empty());
}

#[test]
fn test_incomplete_statements_never_reach_the_driver() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();

    let err = exec.update(&p.table.insert()).unwrap_err();
    assert!(matches!(
        err,
        Error::EmptyStatement {
            statement: "INSERT",
            missing: "rows"
        }
    ));
    assert!(err.is_construction());

    let err = exec.update_cached(&p.table.update().where_clause(p.age.is_null()), 9).unwrap_err();
    assert!(matches!(err, Error::EmptyStatement { statement: "UPDATE", .. }));
    let err = exec.update_returning_key(&p.table.replace()).unwrap_err();
    assert!(matches!(err, Error::EmptyStatement { statement: "REPLACE", .. }));

    assert_eq!(conn.driver.prepared_count(), 0);
    assert!(conn.driver.events().is_empty());
    assert!(cache.is_empty());
}

#[test]
fn test_driver_error_is_propagated() {
    let conn = MockConnection::new();
    let cache = StatementCache::new();
    let exec = Executor::new(&conn, &cache);
    let p = person();
    conn.driver.serve(vec![row(&[("Other.Column", text("x"))])]);

    let err = exec
        .fetch::<NameAge, _>(&p.table.select(["Name"]))
        .unwrap_err();
    assert!(matches!(err, Error::Backend(_)));
    assert!(!err.is_construction());
}

#[test]
fn test_concurrent_callers_share_one_handle() {
    let conn = MockConnection::new();
    let cache = Arc::new(StatementCache::new());
    let p = person();
    let update = p.table.update().set("Age", 1).where_clause(p.age.is_null());

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let (conn, cache, update) = (&conn, &cache, &update);
            scope.spawn(move || {
                let exec = Executor::new(conn, cache.as_ref());
                for _ in 0..25 {
                    exec.update(update).unwrap();
                }
            });
        }
    });

    assert_eq!(cache.len(), 1);
    let updates = conn
        .driver
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Update(_)))
        .count();
    assert_eq!(updates, 200);
    assert!(conn.driver.prepared_count() >= 1);
}
