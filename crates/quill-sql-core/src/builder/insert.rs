//! INSERT and REPLACE statement builder.

use tracing::trace;

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::schema::{check_mapping, Table, Tuple};

use super::bindable::{placeholder_group, Bindable};
use super::value::{SqlValue, ToSqlValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Insert { ignore: bool },
    Replace,
}

impl Verb {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Insert { ignore: false } => "INSERT",
            Self::Insert { ignore: true } => "INSERT IGNORE",
            Self::Replace => "REPLACE",
        }
    }
}

/// An INSERT (or REPLACE) of one or more rows.
///
/// Each row renders as a parenthesized group of placeholders, and the bind
/// values are all rows flattened in order. Rows are expected to hold one
/// value per table column. An insert without rows still renders, but fails
/// [`Bindable::validate`] and is never sent to a connection.
///
/// ```rust
/// use quill_sql_core::builder::{Bindable, Insert, ToSqlValue};
/// use quill_sql_core::schema::{Column, SqlType, Table};
///
/// let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64));
/// let age = Column::<i32>::new("Person", "Age", SqlType::Integer(None));
/// let person = Table::new("Person").column(&name).column(&age);
///
/// let insert = Insert::new(&person)
///     .values(vec!["Ann".to_sql_value(), 31.to_sql_value()])
///     .values(vec!["Bob".to_sql_value(), 42.to_sql_value()]);
/// assert_eq!(insert.to_sql(), "INSERT INTO Person VALUES (?, ?), (?, ?)");
/// assert_eq!(insert.bind_values().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Insert {
    verb: Verb,
    table: Table,
    rows: Vec<Vec<SqlValue>>,
}

impl Insert {
    /// Creates an `INSERT INTO table`.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            verb: Verb::Insert { ignore: false },
            table: table.clone(),
            rows: vec![],
        }
    }

    /// Creates a `REPLACE INTO table`.
    #[must_use]
    pub fn replace(table: &Table) -> Self {
        Self {
            verb: Verb::Replace,
            table: table.clone(),
            rows: vec![],
        }
    }

    /// Creates a `REPLACE INTO table` after checking that `dialect` has it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] if the dialect lacks `REPLACE`.
    pub fn replace_with<D: Dialect + ?Sized>(dialect: &D, table: &Table) -> Result<Self> {
        require_extension(dialect, Verb::Replace)?;
        Ok(Self::replace(table))
    }

    /// Turns an INSERT into `INSERT IGNORE`. Has no effect on REPLACE.
    ///
    /// No dialect is consulted; see [`Insert::ignore_with`].
    #[must_use]
    pub const fn ignore(mut self) -> Self {
        if let Verb::Insert { .. } = self.verb {
            self.verb = Verb::Insert { ignore: true };
        }
        self
    }

    /// Like [`Insert::ignore`], after checking that `dialect` has
    /// `INSERT IGNORE`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] if the dialect lacks it.
    pub fn ignore_with<D: Dialect + ?Sized>(self, dialect: &D) -> Result<Self> {
        require_extension(dialect, Verb::Insert { ignore: true })?;
        Ok(self.ignore())
    }

    /// Appends a row of values.
    #[must_use]
    pub fn values<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        self.rows
            .push(row.into_iter().map(ToSqlValue::to_sql_value).collect());
        self
    }

    /// Appends one row taken from a row object, in table column order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumnMapping`](crate::Error::MissingColumnMapping)
    /// if `T` does not map every column of the table.
    pub fn values_from_tuple<T: Tuple>(mut self, tuple: &T) -> Result<Self> {
        let row = tuple.values_for(&self.table)?;
        self.rows.push(row);
        Ok(self)
    }

    /// Appends one row per row object.
    ///
    /// The mapping is checked even when `tuples` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumnMapping`](crate::Error::MissingColumnMapping)
    /// if `T` does not map every column of the table.
    pub fn values_from_tuples<'a, T, I>(mut self, tuples: I) -> Result<Self>
    where
        T: Tuple + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        check_mapping::<T>(&self.table)?;
        for tuple in tuples {
            self.rows.push(tuple.values_for(&self.table)?);
        }
        Ok(self)
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Returns the rows added so far.
    #[must_use]
    pub fn rows(&self) -> &[Vec<SqlValue>] {
        &self.rows
    }
}

fn require_extension<D: Dialect + ?Sized>(dialect: &D, verb: Verb) -> Result<()> {
    if dialect.supports_insert_ignore() {
        return Ok(());
    }
    Err(Error::UnsupportedOperator {
        operator: verb.keyword(),
        dialect: dialect.name(),
    })
}

impl Bindable for Insert {
    fn to_sql(&self) -> String {
        let mut sql = String::from(self.verb.keyword());
        sql.push_str(" INTO ");
        sql.push_str(self.table.name());
        sql.push_str(" VALUES ");
        let groups: Vec<String> = self.rows.iter().map(|row| placeholder_group(row.len())).collect();
        sql.push_str(&groups.join(", "));
        trace!(sql = %sql, rows = self.rows.len(), "rendered INSERT");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        self.rows.iter().flatten().cloned().collect()
    }

    fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(Error::EmptyStatement {
                statement: self.verb.keyword(),
                missing: "rows",
            });
        }
        Ok(())
    }
}
