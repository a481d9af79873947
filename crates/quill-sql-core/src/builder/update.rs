//! UPDATE statement builder.

use tracing::trace;

use crate::error::{Error, Result};
use crate::schema::{Column, Table, Tuple};

use super::bindable::{comma_list, Bindable};
use super::expr::Expression;
use super::value::{LiteralOf, SqlValue, ToSqlValue};

/// An assignment in the SET clause.
#[derive(Debug, Clone)]
struct Assignment {
    column: String,
    value: SqlValue,
}

/// An UPDATE statement builder.
///
/// Bind values are the SET values in declaration order followed by the
/// WHERE values. An update without assignments fails
/// [`Bindable::validate`].
#[derive(Debug, Clone)]
pub struct Update {
    table: Table,
    assignments: Vec<Assignment>,
    where_clause: Option<Expression>,
}

impl Update {
    /// Creates an UPDATE of `table`.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.clone(),
            assignments: vec![],
            where_clause: None,
        }
    }

    /// Adds a SET assignment by column name.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.assignments.push(Assignment {
            column: String::from(column),
            value: value.to_sql_value(),
        });
        self
    }

    /// Adds a SET assignment for a column; `value` must fit the column type.
    #[must_use]
    pub fn set_column<T>(self, column: &Column<T>, value: impl LiteralOf<T>) -> Self {
        let name = String::from(column.name());
        self.set(&name, value)
    }

    /// Adds one SET assignment per mapped field of `tuple`.
    ///
    /// With `skip_null`, fields holding NULL are left out and their columns
    /// stay untouched; otherwise they are set to NULL.
    #[must_use]
    pub fn set_from_tuple<T: Tuple>(mut self, tuple: &T, skip_null: bool) -> Self {
        self.assignments.extend(
            tuple
                .assignments(skip_null)
                .into_iter()
                .map(|(column, value)| Assignment {
                    column: String::from(column),
                    value,
                }),
        );
        self
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn where_clause(mut self, condition: Expression) -> Self {
        self.where_clause = Some(condition);
        self
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }
}

impl Bindable for Update {
    fn to_sql(&self) -> String {
        let mut sql = String::from("UPDATE ");
        sql.push_str(self.table.name());
        sql.push_str(" SET ");
        sql.push_str(&comma_list(&self.assignments, |a| {
            format!("{} = {}", a.column, SqlValue::placeholder())
        }));

        if let Some(ref condition) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&condition.to_sql());
        }

        trace!(sql = %sql, "rendered UPDATE");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        let mut values: Vec<SqlValue> = self.assignments.iter().map(|a| a.value.clone()).collect();
        if let Some(condition) = &self.where_clause {
            values.extend(condition.bind_values());
        }
        values
    }

    fn validate(&self) -> Result<()> {
        if self.assignments.is_empty() {
            return Err(Error::EmptyStatement {
                statement: "UPDATE",
                missing: "assignments",
            });
        }
        Ok(())
    }
}
