//! ALTER TABLE statement builder.

use tracing::trace;

use crate::error::{Error, Result};
use crate::schema::{Column, Table};

use super::bindable::Bindable;
use super::value::SqlValue;

/// An `ALTER TABLE` adding and dropping columns.
///
/// Additions render before drops: `ALTER TABLE t ADD COLUMN a ..., DROP COLUMN b`.
/// With neither, [`Bindable::validate`] fails.
#[derive(Debug, Clone)]
pub struct AlterTable {
    table: Table,
    added: Vec<Column>,
    dropped: Vec<String>,
}

impl AlterTable {
    /// Creates an ALTER TABLE for `table`.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.clone(),
            added: vec![],
            dropped: vec![],
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn add_column<T>(mut self, column: &Column<T>) -> Self {
        self.added.push(column.erased());
        self
    }

    /// Drops a column.
    #[must_use]
    pub fn drop_column<T>(mut self, column: &Column<T>) -> Self {
        self.dropped.push(String::from(column.name()));
        self
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Returns the columns to add.
    #[must_use]
    pub fn added_columns(&self) -> &[Column] {
        &self.added
    }

    /// Returns the names of the columns to drop.
    #[must_use]
    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped
    }
}

impl Bindable for AlterTable {
    fn to_sql(&self) -> String {
        let mut sql = String::from("ALTER TABLE ");
        sql.push_str(self.table.name());

        let clauses: Vec<String> = self
            .added
            .iter()
            .map(|c| format!("ADD COLUMN {}", c.definition()))
            .chain(self.dropped.iter().map(|name| format!("DROP COLUMN {name}")))
            .collect();
        if !clauses.is_empty() {
            sql.push(' ');
            sql.push_str(&clauses.join(", "));
        }

        trace!(sql = %sql, "rendered ALTER TABLE");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![]
    }

    fn validate(&self) -> Result<()> {
        if self.added.is_empty() && self.dropped.is_empty() {
            return Err(Error::EmptyStatement {
                statement: "ALTER TABLE",
                missing: "column changes",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SqlType;

    #[test]
    fn test_alter_add_and_drop() {
        let email = Column::<String>::new("Person", "Email", SqlType::Varchar(128)).not_null();
        let nick = Column::<String>::new("Person", "Nick", SqlType::Varchar(16));
        let legacy = Column::<String>::new("Person", "Legacy", SqlType::Text);
        let alter = AlterTable::new(&Table::new("Person"))
            .add_column(&email)
            .drop_column(&legacy)
            .add_column(&nick);
        assert_eq!(
            alter.to_sql(),
            "ALTER TABLE Person ADD COLUMN Email VARCHAR(128) NOT NULL, \
             ADD COLUMN Nick VARCHAR(16), DROP COLUMN Legacy"
        );
        assert!(alter.bind_values().is_empty());
        assert!(alter.validate().is_ok());
    }

    #[test]
    fn test_alter_without_changes_fails_validation() {
        let alter = AlterTable::new(&Table::new("Person"));
        assert_eq!(alter.to_sql(), "ALTER TABLE Person");
        assert!(matches!(
            alter.validate(),
            Err(Error::EmptyStatement {
                statement: "ALTER TABLE",
                ..
            })
        ));
    }
}
