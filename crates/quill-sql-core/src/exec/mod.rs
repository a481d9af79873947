//! Execution of statements against a database driver.
//!
//! The driver is reached through three small traits: a [`Connection`]
//! compiles SQL into a [`PreparedStatement`], which binds values by position
//! and executes, handing rows back through a [`RowCursor`]. Compiled handles
//! are reused through a [`StatementCache`], and [`Executor`] ties the pieces
//! together.

mod cache;
mod executor;

pub use cache::{CacheKey, StatementCache};
pub use executor::{ExecMode, Executor, Outcome};

use crate::builder::{
    AlterTable, Bindable, CreateDatabase, CreateTable, Delete, DropDatabase, DropTable, Insert,
    Query, Select, SetOperation, SqlValue, Update,
};
use crate::error::Result;
use crate::schema::Column;

/// A cursor over the rows returned by a query.
///
/// Implementations report driver failures as
/// [`Error::Backend`](crate::Error::Backend).
pub trait RowCursor {
    /// Advances to the next row. Returns `false` once the rows are exhausted.
    ///
    /// # Errors
    ///
    /// Returns the driver's error.
    fn next_row(&mut self) -> Result<bool>;

    /// Reads the value labelled `label` (`table.column`) in the current row.
    ///
    /// # Errors
    ///
    /// Returns the driver's error, including unknown labels.
    fn value(&self, label: &str) -> Result<SqlValue>;

    /// Reads the value at the 1-based position `index` in the current row.
    ///
    /// # Errors
    ///
    /// Returns the driver's error, including out-of-range positions.
    fn value_at(&self, index: usize) -> Result<SqlValue>;
}

/// A compiled statement handle.
pub trait PreparedStatement {
    /// Cursor type returned by queries.
    type Rows: RowCursor;

    /// Binds `value` to the 1-based placeholder `index`.
    ///
    /// # Errors
    ///
    /// Returns the driver's error.
    fn bind(&mut self, index: usize, value: &SqlValue) -> Result<()>;

    /// Executes a statement that returns rows.
    ///
    /// # Errors
    ///
    /// Returns the driver's error.
    fn execute_query(&mut self) -> Result<Self::Rows>;

    /// Executes a statement that changes data and returns the affected row
    /// count.
    ///
    /// # Errors
    ///
    /// Returns the driver's error.
    fn execute_update(&mut self) -> Result<u64>;

    /// Returns the keys generated by the last update, if the driver has any.
    ///
    /// # Errors
    ///
    /// Returns the driver's error.
    fn generated_keys(&mut self) -> Result<Option<Self::Rows>>;

    /// Whether the backend has closed this handle.
    fn is_closed(&self) -> bool;
}

/// A database connection able to compile SQL.
pub trait Connection {
    /// Compiled statement type.
    type Statement: PreparedStatement;

    /// Compiles `sql`. With `generated_keys`, the statement is asked to
    /// report keys generated by inserts.
    ///
    /// # Errors
    ///
    /// Returns the driver's error.
    fn prepare(&self, sql: &str, generated_keys: bool) -> Result<Self::Statement>;
}

/// A statement that returns rows.
pub trait QueryStatement: Bindable {
    /// Returns the projected columns, used to read rows into row objects.
    fn output_columns(&self) -> Vec<Column>;
}

/// A statement that changes data or schema and reports affected rows.
pub trait UpdateStatement: Bindable {}

/// A statement run once without going through the statement cache.
pub trait SingleShotStatement: Bindable {}

impl QueryStatement for Select {
    fn output_columns(&self) -> Vec<Column> {
        Self::output_columns(self)
    }
}

impl QueryStatement for SetOperation {
    fn output_columns(&self) -> Vec<Column> {
        Self::output_columns(self).to_vec()
    }
}

impl QueryStatement for Query {
    fn output_columns(&self) -> Vec<Column> {
        Self::output_columns(self)
    }
}

impl UpdateStatement for Insert {}
impl UpdateStatement for Update {}
impl UpdateStatement for Delete {}
impl UpdateStatement for CreateTable {}
impl UpdateStatement for AlterTable {}
impl UpdateStatement for DropTable {}

impl SingleShotStatement for CreateDatabase {}
impl SingleShotStatement for DropDatabase {}
