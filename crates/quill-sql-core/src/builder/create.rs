//! CREATE TABLE statement builder.

use tracing::trace;

use crate::schema::{Column, Table};

use super::bindable::Bindable;
use super::value::SqlValue;

/// A `CREATE TABLE` statement for a table definition.
///
/// Column definitions come first, then the table-level `PRIMARY KEY`, the
/// foreign keys and the `CHECK` constraint. `DEFAULT` values are inlined;
/// the only bind values are those of the `CHECK` expression.
#[derive(Debug, Clone)]
pub struct CreateTable {
    table: Table,
    if_not_exists: bool,
}

impl CreateTable {
    /// Creates the statement for `table`.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.clone(),
            if_not_exists: false,
        }
    }

    /// Adds `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }
}

impl Bindable for CreateTable {
    fn to_sql(&self) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(self.table.name());
        sql.push_str(" (");

        let mut parts: Vec<String> = self.table.columns().iter().map(Column::definition).collect();

        let primary_key = self.table.primary_key_names();
        if !primary_key.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", primary_key.join(", ")));
        }

        parts.extend(self.table.foreign_keys().iter().map(|fk| fk.to_sql()));

        if let Some(check) = self.table.check_constraint() {
            let condition = check.to_sql();
            if check.is_enclosing() {
                parts.push(format!("CHECK {condition}"));
            } else {
                parts.push(format!("CHECK ({condition})"));
            }
        }

        sql.push_str(&parts.join(", "));
        sql.push(')');
        trace!(sql = %sql, "rendered CREATE TABLE");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        self.table
            .check_constraint()
            .map(Bindable::bind_values)
            .unwrap_or_default()
    }
}
