#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use quill_sql_core::exec::{Connection, PreparedStatement, RowCursor};
use quill_sql_core::schema::{Column, SqlType, Table};
use quill_sql_core::{Error, Result, SqlValue};

// =============================================================================
// Schema fixture
// =============================================================================

pub struct Person {
    pub table: Table,
    pub name: Column<String>,
    pub surname: Column<String>,
    pub age: Column<i32>,
    pub born: Column<NaiveDateTime>,
}

pub fn person() -> Person {
    let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64)).not_null();
    let surname = Column::<String>::new("Person", "Surname", SqlType::Varchar(64)).not_null();
    let age = Column::<i32>::new("Person", "Age", SqlType::Integer(None));
    let born = Column::<NaiveDateTime>::new("Person", "Born", SqlType::Datetime);
    let table = Table::new("Person")
        .columns_extend([&name, &surname])
        .column(&age)
        .column(&born)
        .primary_key([&name, &surname]);
    Person {
        table,
        name,
        surname,
        age,
        born,
    }
}

// =============================================================================
// Recording driver
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Prepare { sql: String, generated_keys: bool },
    Bind { index: usize, value: SqlValue },
    Query(String),
    Update(String),
}

pub type Row = Vec<(String, SqlValue)>;

/// Driver double that records every call and serves canned rows.
#[derive(Default)]
pub struct Driver {
    pub events: Mutex<Vec<Event>>,
    pub prepared: AtomicUsize,
    pub closed: AtomicBool,
    pub affected: AtomicU64,
    pub rows: Mutex<Vec<Row>>,
    pub generated_key: Mutex<Option<SqlValue>>,
}

impl Driver {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn clear_events(&self) {
        self.events.lock().clear();
    }

    pub fn binds(&self) -> Vec<(usize, SqlValue)> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::Bind { index, value } => Some((*index, value.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn prepared_count(&self) -> usize {
        self.prepared.load(Ordering::SeqCst)
    }

    pub fn close_all(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn reopen(&self) {
        self.closed.store(false, Ordering::SeqCst);
    }

    pub fn serve(&self, rows: Vec<Row>) {
        *self.rows.lock() = rows;
    }
}

#[derive(Clone, Default)]
pub struct MockConnection {
    pub driver: Arc<Driver>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Connection for MockConnection {
    type Statement = MockStatement;

    fn prepare(&self, sql: &str, generated_keys: bool) -> Result<MockStatement> {
        if sql.is_empty() {
            return Err(Error::backend("empty statement"));
        }
        self.driver.prepared.fetch_add(1, Ordering::SeqCst);
        self.driver.events.lock().push(Event::Prepare {
            sql: String::from(sql),
            generated_keys,
        });
        Ok(MockStatement {
            sql: String::from(sql),
            generated_keys,
            prepared_after_close: self.driver.closed.load(Ordering::SeqCst),
            driver: Arc::clone(&self.driver),
        })
    }
}

pub struct MockStatement {
    pub sql: String,
    pub generated_keys: bool,
    prepared_after_close: bool,
    driver: Arc<Driver>,
}

impl PreparedStatement for MockStatement {
    type Rows = MockRows;

    fn bind(&mut self, index: usize, value: &SqlValue) -> Result<()> {
        self.driver.events.lock().push(Event::Bind {
            index,
            value: value.clone(),
        });
        Ok(())
    }

    fn execute_query(&mut self) -> Result<MockRows> {
        self.driver
            .events
            .lock()
            .push(Event::Query(self.sql.clone()));
        Ok(MockRows::new(self.driver.rows.lock().clone()))
    }

    fn execute_update(&mut self) -> Result<u64> {
        self.driver
            .events
            .lock()
            .push(Event::Update(self.sql.clone()));
        Ok(self.driver.affected.load(Ordering::SeqCst))
    }

    fn generated_keys(&mut self) -> Result<Option<MockRows>> {
        if !self.generated_keys {
            return Ok(None);
        }
        let key = self.driver.generated_key.lock().clone();
        Ok(key.map(|key| MockRows::new(vec![vec![(String::from("GENERATED_KEY"), key)]])))
    }

    fn is_closed(&self) -> bool {
        // Handles prepared before `close_all` report closed; those prepared
        // after it stay open.
        !self.prepared_after_close && self.driver.closed.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct MockRows {
    rows: Vec<Row>,
    current: Option<usize>,
}

impl MockRows {
    pub const fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            current: None,
        }
    }

    fn row(&self) -> Result<&Row> {
        self.current
            .and_then(|index| self.rows.get(index))
            .ok_or_else(|| Error::backend("cursor is not on a row"))
    }
}

impl RowCursor for MockRows {
    fn next_row(&mut self) -> Result<bool> {
        let next = self.current.map_or(0, |index| index + 1);
        self.current = Some(next);
        Ok(next < self.rows.len())
    }

    fn value(&self, label: &str) -> Result<SqlValue> {
        self.row()?
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| Error::backend(format!("unknown column label {label}")))
    }

    fn value_at(&self, index: usize) -> Result<SqlValue> {
        index
            .checked_sub(1)
            .and_then(|position| self.row().ok()?.get(position).cloned())
            .map(|(_, value)| value)
            .ok_or_else(|| Error::backend(format!("no column at position {index}")))
    }
}

pub fn row(values: &[(&str, SqlValue)]) -> Row {
    values
        .iter()
        .map(|(label, value)| (String::from(*label), value.clone()))
        .collect()
}
