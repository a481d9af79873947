//! MySQL `ALTER TABLE` with column placement.

use quill_sql_core::builder::{Bindable, SqlValue};
use quill_sql_core::config::BuilderConfig;
use quill_sql_core::dialect::DialectKind;
use quill_sql_core::exec::UpdateStatement;
use quill_sql_core::{Column, Error, Result, Table};
use tracing::trace;

/// Where an added column is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPosition {
    /// `FIRST`
    First,
    /// `AFTER column`
    After(String),
}

impl ColumnPosition {
    /// Places the column after `column`.
    #[must_use]
    pub fn after<T>(column: &Column<T>) -> Self {
        Self::After(String::from(column.name()))
    }

    fn to_sql(&self) -> String {
        match self {
            Self::First => String::from("FIRST"),
            Self::After(column) => format!("AFTER {column}"),
        }
    }
}

/// `ALTER TABLE` whose added columns may carry a `FIRST` or `AFTER`
/// placement.
///
/// Additions render in declaration order, each followed by its placement,
/// then drops.
#[derive(Debug, Clone)]
pub struct AlterMySql {
    table: Table,
    added: Vec<(Column, Option<ColumnPosition>)>,
    dropped: Vec<String>,
}

impl AlterMySql {
    /// Creates an ALTER TABLE for `table`.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not select MySQL.
    pub fn new(config: &BuilderConfig, table: &Table) -> Result<Self> {
        config.require(DialectKind::MySql)?;
        Ok(Self {
            table: table.clone(),
            added: vec![],
            dropped: vec![],
        })
    }

    /// Adds a column at the end of the table.
    #[must_use]
    pub fn add_column<T>(mut self, column: &Column<T>) -> Self {
        self.added.push((column.erased(), None));
        self
    }

    /// Adds a column at the given position.
    #[must_use]
    pub fn add_column_at<T>(mut self, column: &Column<T>, position: ColumnPosition) -> Self {
        self.added.push((column.erased(), Some(position)));
        self
    }

    /// Adds a column as the first column.
    #[must_use]
    pub fn add_first<T>(self, column: &Column<T>) -> Self {
        self.add_column_at(column, ColumnPosition::First)
    }

    /// Adds a column right after `previous`.
    #[must_use]
    pub fn add_after<T, U>(self, column: &Column<T>, previous: &Column<U>) -> Self {
        self.add_column_at(column, ColumnPosition::after(previous))
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

    /// Returns the columns to add with their placements.
    #[must_use]
    pub fn added_columns(&self) -> &[(Column, Option<ColumnPosition>)] {
        &self.added
    }

    /// Returns the names of the columns to drop.
    #[must_use]
    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped
    }
}

impl Bindable for AlterMySql {
    fn to_sql(&self) -> String {
        let mut sql = String::from("ALTER TABLE ");
        sql.push_str(self.table.name());

        let clauses: Vec<String> = self
            .added
            .iter()
            .map(|(column, position)| match position {
                Some(position) => {
                    format!("ADD COLUMN {} {}", column.definition(), position.to_sql())
                }
                None => format!("ADD COLUMN {}", column.definition()),
            })
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

impl UpdateStatement for AlterMySql {}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_sql_core::SqlType;

    #[test]
    fn test_alter_with_placement() {
        let config = BuilderConfig::with_dialect(DialectKind::MySql);
        let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64));
        let id = Column::<i32>::new("Person", "Id", SqlType::Integer(None)).not_null();
        let nick = Column::<String>::new("Person", "Nick", SqlType::Varchar(16));
        let legacy = Column::<String>::new("Person", "Legacy", SqlType::Text);
        let person = Table::new("Person").column(&name).column(&legacy);

        let alter = AlterMySql::new(&config, &person)
            .unwrap()
            .add_first(&id)
            .add_after(&nick, &name)
            .drop_column(&legacy);
        assert_eq!(
            alter.to_sql(),
            "ALTER TABLE Person ADD COLUMN Id INTEGER NOT NULL FIRST, \
             ADD COLUMN Nick VARCHAR(16) AFTER Name, DROP COLUMN Legacy"
        );
        assert!(alter.bind_values().is_empty());
    }

    #[test]
    fn test_alter_without_placement_matches_plain_alter() {
        let config = BuilderConfig::with_dialect(DialectKind::MySql);
        let email = Column::<String>::new("Person", "Email", SqlType::Varchar(128));
        let person = Table::new("Person");
        let alter = AlterMySql::new(&config, &person).unwrap().add_column(&email);
        assert_eq!(alter.to_sql(), person.alter().add_column(&email).to_sql());
    }

    #[test]
    fn test_placements_are_kept_with_their_columns() {
        let config = BuilderConfig::with_dialect(DialectKind::MySql);
        let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64));
        let id = Column::<i32>::new("Person", "Id", SqlType::Integer(None));
        let nick = Column::<String>::new("Person", "Nick", SqlType::Varchar(16));
        let email = Column::<String>::new("Person", "Email", SqlType::Varchar(128));
        let alter = AlterMySql::new(&config, &Table::new("Person").column(&name))
            .unwrap()
            .add_column(&email)
            .drop_column(&name)
            .add_after(&nick, &id)
            .add_first(&id);

        let placements: Vec<(&str, Option<&ColumnPosition>)> = alter
            .added_columns()
            .iter()
            .map(|(column, position)| (column.name(), position.as_ref()))
            .collect();
        assert_eq!(
            placements,
            [
                ("Email", None),
                ("Nick", Some(&ColumnPosition::After(String::from("Id")))),
                ("Id", Some(&ColumnPosition::First)),
            ]
        );
        assert_eq!(alter.dropped_columns(), ["Name"]);
        assert_eq!(alter.table().name(), "Person");
        assert_eq!(
            alter.to_sql(),
            "ALTER TABLE Person ADD COLUMN Email VARCHAR(128), \
             ADD COLUMN Nick VARCHAR(16) AFTER Id, ADD COLUMN Id INTEGER FIRST, \
             DROP COLUMN Name"
        );
    }

    #[test]
    fn test_alter_requires_mysql() {
        let config = BuilderConfig::with_dialect(DialectKind::PostgreSql);
        assert!(AlterMySql::new(&config, &Table::new("Person")).is_err());
    }

    #[test]
    fn test_alter_without_changes_fails_validation() {
        let config = BuilderConfig::with_dialect(DialectKind::MySql);
        let alter = AlterMySql::new(&config, &Table::new("Person")).unwrap();
        assert!(matches!(
            alter.validate(),
            Err(Error::EmptyStatement {
                statement: "ALTER TABLE",
                ..
            })
        ));
    }
}
