//! DELETE statement builder.

use tracing::trace;

use crate::schema::Table;

use super::bindable::Bindable;
use super::expr::Expression;
use super::value::SqlValue;

/// A DELETE statement builder.
///
/// Without a WHERE condition every row of the table is deleted.
#[derive(Debug, Clone)]
pub struct Delete {
    table: Table,
    where_clause: Option<Expression>,
}

impl Delete {
    /// Creates a DELETE from `table`.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.clone(),
            where_clause: None,
        }
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn where_clause(mut self, condition: Expression) -> Self {
        self.where_clause = Some(condition);
        self
    }
}

impl Bindable for Delete {
    fn to_sql(&self) -> String {
        let mut sql = String::from("DELETE FROM ");
        sql.push_str(self.table.name());

        if let Some(ref condition) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&condition.to_sql());
        }

        trace!(sql = %sql, "rendered DELETE");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        self.where_clause
            .as_ref()
            .map(Bindable::bind_values)
            .unwrap_or_default()
    }
}
