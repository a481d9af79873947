//! Table metadata: columns, keys and constraints.

use crate::builder::{
    AlterTable, CreateTable, Delete, DropTable, Expression, Insert, Select, Update,
};

use super::column::Column;

/// Action taken on referencing rows when the referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceAction {
    /// `NO ACTION`.
    NoAction,
    /// `RESTRICT`.
    Restrict,
    /// `CASCADE`.
    Cascade,
    /// `SET NULL`.
    SetNull,
    /// `SET DEFAULT`.
    SetDefault,
}

impl ReferenceAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A `FOREIGN KEY` link from a column of this table to another table.
///
/// Both ends must hold the same value type.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    internal: Column,
    external: Column,
    on_delete: Option<ReferenceAction>,
    on_update: Option<ReferenceAction>,
}

impl ForeignKey {
    /// Creates a foreign key from `internal` to `external`.
    #[must_use]
    pub fn new<T>(internal: &Column<T>, external: &Column<T>) -> Self {
        Self {
            internal: internal.erased(),
            external: external.erased(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the `ON DELETE` action.
    #[must_use]
    pub const fn on_delete(mut self, action: ReferenceAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the `ON UPDATE` action.
    #[must_use]
    pub const fn on_update(mut self, action: ReferenceAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Returns the referencing column.
    #[must_use]
    pub const fn internal(&self) -> &Column {
        &self.internal
    }

    /// Returns the referenced column.
    #[must_use]
    pub const fn external(&self) -> &Column {
        &self.external
    }

    /// Returns the constraint clause used inside `CREATE TABLE`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = format!(
            "FOREIGN KEY ({}) REFERENCES {}({})",
            self.internal.name(),
            self.external.table().unwrap_or_default(),
            self.external.name()
        );
        if let Some(action) = self.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = self.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        sql
    }
}

/// A table definition.
///
/// Built incrementally, then handed to statement builders which take a
/// snapshot of it.
///
/// ```rust
/// use quill_sql_core::schema::{Column, SqlType, Table};
///
/// let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64)).not_null();
/// let age = Column::<i32>::new("Person", "Age", SqlType::Integer(None));
/// let person = Table::new("Person").column(&name).column(&age);
///
/// assert_eq!(person.columns().len(), 2);
/// assert_eq!(person.find("Age").map(Column::to_sql), Some(String::from("Person.Age")));
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    primary_key: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
    check: Option<Expression>,
}

impl Table {
    /// Creates an empty table definition.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            columns: vec![],
            primary_key: vec![],
            foreign_keys: vec![],
            check: None,
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn column<T>(mut self, column: &Column<T>) -> Self {
        self.columns.push(column.erased());
        self
    }

    /// Appends several columns of one value type.
    #[must_use]
    pub fn columns_extend<'a, T: 'a, I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = &'a Column<T>>,
    {
        self.columns.extend(columns.into_iter().map(Column::erased));
        self
    }

    /// Declares a table-level `PRIMARY KEY (...)` over the given columns.
    #[must_use]
    pub fn primary_key<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.primary_key.extend(
            columns
                .into_iter()
                .map(Into::<Column>::into)
                .map(|c| String::from(c.name())),
        );
        self
    }

    /// Appends a foreign key.
    #[must_use]
    pub fn foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Sets the `CHECK` constraint.
    #[must_use]
    pub fn check(mut self, expression: Expression) -> Self {
        self.check = Some(expression);
        self
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the names of the table-level primary key columns.
    #[must_use]
    pub fn primary_key_names(&self) -> &[String] {
        &self.primary_key
    }

    /// Returns the foreign keys.
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Returns the `CHECK` constraint, if any.
    #[must_use]
    pub const fn check_constraint(&self) -> Option<&Expression> {
        self.check.as_ref()
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Starts a `SELECT` of `columns` from this table.
    #[must_use]
    pub fn select<I, C>(&self, columns: I) -> Select
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        Select::new(columns).from(self)
    }

    /// Starts an `INSERT` into this table.
    #[must_use]
    pub fn insert(&self) -> Insert {
        Insert::new(self)
    }

    /// Starts a `REPLACE` into this table.
    #[must_use]
    pub fn replace(&self) -> Insert {
        Insert::replace(self)
    }

    /// Starts an `UPDATE` of this table.
    #[must_use]
    pub fn update(&self) -> Update {
        Update::new(self)
    }

    /// Starts a `DELETE` from this table.
    #[must_use]
    pub fn delete(&self) -> Delete {
        Delete::new(self)
    }

    /// Returns the `CREATE TABLE` statement for this table.
    #[must_use]
    pub fn create(&self) -> CreateTable {
        CreateTable::new(self)
    }

    /// Starts an `ALTER TABLE` of this table.
    #[must_use]
    pub fn alter(&self) -> AlterTable {
        AlterTable::new(self)
    }

    /// Returns the `DROP TABLE` statement for this table.
    #[must_use]
    pub fn drop_table(&self) -> DropTable {
        DropTable::new(self)
    }
}
