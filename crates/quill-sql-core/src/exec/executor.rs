//! Binding and executing statements through a connection.

use tracing::{debug, trace};

use super::cache::{CacheKey, StatementCache};
use super::{
    Connection, PreparedStatement, QueryStatement, RowCursor, SingleShotStatement, UpdateStatement,
};
use crate::builder::{Bindable, SqlValue};
use crate::error::Result;
use crate::schema::{Column, Tuple};

type Rows<C> = <<C as Connection>::Statement as PreparedStatement>::Rows;

/// How [`Executor::execute`] runs a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Run as a query and return the rows.
    Query,
    /// Run as an update and return the affected row count.
    Update,
    /// Run as an update and return the first generated key when the driver
    /// reports one, the affected row count otherwise.
    UpdateReturningKey,
}

/// Result of [`Executor::execute`].
#[derive(Debug)]
pub enum Outcome<R> {
    /// Rows returned by a query.
    Rows(R),
    /// Number of rows changed by an update.
    RowsAffected(u64),
    /// First key generated by an insert.
    GeneratedKey(SqlValue),
}

impl<R> Outcome<R> {
    /// Returns the rows of a query outcome.
    #[must_use]
    pub fn into_rows(self) -> Option<R> {
        match self {
            Self::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// Returns the affected row count of an update outcome.
    #[must_use]
    pub const fn rows_affected(&self) -> Option<u64> {
        match self {
            Self::RowsAffected(count) => Some(*count),
            _ => None,
        }
    }

    /// Returns the generated key of an insert outcome.
    #[must_use]
    pub const fn generated_key(&self) -> Option<&SqlValue> {
        match self {
            Self::GeneratedKey(key) => Some(key),
            _ => None,
        }
    }
}

/// Executes statements on a connection, reusing compiled handles from a
/// shared [`StatementCache`].
///
/// Statements are cached under their SQL text, or under a caller-chosen id
/// with the `*_cached` methods. Bind values are bound at 1-based positions
/// in the order the statement reports them. A statement failing
/// [`Bindable::validate`] is rejected before anything is compiled.
pub struct Executor<'a, C: Connection> {
    connection: &'a C,
    cache: &'a StatementCache<C::Statement>,
}

impl<'a, C: Connection> Executor<'a, C> {
    /// Creates an executor over `connection` using `cache`.
    #[must_use]
    pub const fn new(connection: &'a C, cache: &'a StatementCache<C::Statement>) -> Self {
        Self { connection, cache }
    }

    /// Returns the statement cache.
    #[must_use]
    pub const fn cache(&self) -> &'a StatementCache<C::Statement> {
        self.cache
    }

    /// Runs `statement` in the given mode, caching it under `id` when given
    /// and under its SQL text otherwise.
    ///
    /// # Errors
    ///
    /// Returns compilation, binding and execution errors of the driver.
    pub fn execute<B: Bindable + ?Sized>(
        &self,
        statement: &B,
        mode: ExecMode,
        id: Option<u32>,
    ) -> Result<Outcome<Rows<C>>> {
        match mode {
            ExecMode::Query => self
                .with_bound(statement, id, false, PreparedStatement::execute_query)
                .map(Outcome::Rows),
            ExecMode::Update => self
                .with_bound(statement, id, false, PreparedStatement::execute_update)
                .map(Outcome::RowsAffected),
            ExecMode::UpdateReturningKey => self.with_bound(statement, id, true, |prepared| {
                let affected = prepared.execute_update()?;
                Ok(first_generated_key(prepared)?
                    .map_or(Outcome::RowsAffected(affected), Outcome::GeneratedKey))
            }),
        }
    }

    /// Runs a query and returns its rows.
    ///
    /// # Errors
    ///
    /// Returns the driver's errors.
    pub fn query<Q: QueryStatement + ?Sized>(&self, query: &Q) -> Result<Rows<C>> {
        self.with_bound(query, None, false, PreparedStatement::execute_query)
    }

    /// Runs a query cached under `id`.
    ///
    /// # Errors
    ///
    /// Returns the driver's errors.
    pub fn query_cached<Q: QueryStatement + ?Sized>(&self, query: &Q, id: u32) -> Result<Rows<C>> {
        self.with_bound(query, Some(id), false, PreparedStatement::execute_query)
    }

    /// Runs a query and reads every row into a `T`.
    ///
    /// # Errors
    ///
    /// Returns the driver's errors and the errors of [`Tuple::from_row`].
    pub fn fetch<T: Tuple, Q: QueryStatement + ?Sized>(&self, query: &Q) -> Result<Vec<T>> {
        let mut rows = Vec::new();
        self.for_each(query, |tuple| {
            rows.push(tuple);
            Ok(())
        })?;
        Ok(rows)
    }

    /// Runs a query cached under `id` and reads every row into a `T`.
    ///
    /// # Errors
    ///
    /// See [`Executor::fetch`].
    pub fn fetch_cached<T: Tuple, Q: QueryStatement + ?Sized>(
        &self,
        query: &Q,
        id: u32,
    ) -> Result<Vec<T>> {
        let cursor = self.query_cached(query, id)?;
        let mut rows = Vec::new();
        read_rows(cursor, &query.output_columns(), |tuple| {
            rows.push(tuple);
            Ok(())
        })?;
        Ok(rows)
    }

    /// Runs a query and hands each row, read into a `T`, to `visit`.
    ///
    /// Iteration stops at the first error `visit` returns; no further rows
    /// are read.
    ///
    /// # Errors
    ///
    /// See [`Executor::fetch`], plus the error returned by `visit`. Rows
    /// read before an error have already been visited.
    pub fn for_each<T, Q, F>(&self, query: &Q, visit: F) -> Result<()>
    where
        T: Tuple,
        Q: QueryStatement + ?Sized,
        F: FnMut(T) -> Result<()>,
    {
        let cursor = self.query(query)?;
        read_rows(cursor, &query.output_columns(), visit)
    }

    /// Runs an update and returns the affected row count.
    ///
    /// # Errors
    ///
    /// Returns the driver's errors.
    pub fn update<U: UpdateStatement + ?Sized>(&self, update: &U) -> Result<u64> {
        self.with_bound(update, None, false, PreparedStatement::execute_update)
    }

    /// Runs an update cached under `id`.
    ///
    /// # Errors
    ///
    /// Returns the driver's errors.
    pub fn update_cached<U: UpdateStatement + ?Sized>(&self, update: &U, id: u32) -> Result<u64> {
        self.with_bound(update, Some(id), false, PreparedStatement::execute_update)
    }

    /// Runs an update on a handle compiled to report generated keys.
    ///
    /// Returns [`Outcome::GeneratedKey`] with the first generated key, or
    /// [`Outcome::RowsAffected`] when the driver reports none.
    ///
    /// # Errors
    ///
    /// Returns the driver's errors.
    pub fn update_returning_key<U: UpdateStatement + ?Sized>(
        &self,
        update: &U,
    ) -> Result<Outcome<Rows<C>>> {
        self.execute(update, ExecMode::UpdateReturningKey, None)
    }

    /// Compiles and runs a statement once, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns the driver's errors.
    pub fn run_once<S: SingleShotStatement + ?Sized>(&self, statement: &S) -> Result<u64> {
        statement.validate()?;
        let sql = statement.to_sql();
        debug!(sql = %sql, "running statement once");
        let mut prepared = self.connection.prepare(&sql, false)?;
        bind_all(&mut prepared, &statement.bind_values())?;
        prepared.execute_update()
    }

    fn with_bound<B, T, F>(&self, statement: &B, id: Option<u32>, generated_keys: bool, run: F) -> Result<T>
    where
        B: Bindable + ?Sized,
        F: FnOnce(&mut C::Statement) -> Result<T>,
    {
        statement.validate()?;
        let handle = match id {
            Some(id) => self.cache.get_or_prepare(
                self.connection,
                CacheKey::Id(id),
                generated_keys,
                || statement.to_sql(),
            )?,
            None => {
                let sql = statement.to_sql();
                self.cache.get_or_prepare(
                    self.connection,
                    CacheKey::Sql(sql.clone()),
                    generated_keys,
                    move || sql,
                )?
            }
        };
        let mut prepared = handle.lock();
        bind_all(&mut *prepared, &statement.bind_values())?;
        run(&mut *prepared)
    }
}

fn bind_all<S: PreparedStatement + ?Sized>(statement: &mut S, values: &[SqlValue]) -> Result<()> {
    for (position, value) in values.iter().enumerate() {
        let index = position + 1;
        trace!(index, ?value, "binding value");
        statement.bind(index, value)?;
    }
    Ok(())
}

fn first_generated_key<S: PreparedStatement + ?Sized>(statement: &mut S) -> Result<Option<SqlValue>> {
    let Some(mut keys) = statement.generated_keys()? else {
        return Ok(None);
    };
    if !keys.next_row()? {
        return Ok(None);
    }
    let key = keys.value_at(1)?;
    Ok((!key.is_null()).then_some(key))
}

fn read_rows<T, R, F>(mut cursor: R, columns: &[Column], mut visit: F) -> Result<()>
where
    T: Tuple,
    R: RowCursor,
    F: FnMut(T) -> Result<()>,
{
    while cursor.next_row()? {
        visit(T::from_row(&cursor, columns)?)?;
    }
    Ok(())
}
