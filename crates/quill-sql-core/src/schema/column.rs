//! Column metadata.

use std::fmt;
use std::marker::PhantomData;

use crate::builder::value::{LiteralOf, SqlValue};

use super::types::SqlType;

/// A column of a table, or a raw SQL fragment used in a column position.
///
/// `T` is the Rust type of the column's values. Comparison operands and the
/// `DEFAULT` value are checked against it at compile time:
///
/// ```rust
/// use quill_sql_core::schema::{Column, SqlType};
///
/// let age: Column<i32> = Column::new("Person", "Age", SqlType::Integer(None)).default_value(18);
/// assert_eq!(age.definition(), "Age INTEGER DEFAULT 18");
/// ```
///
/// ```compile_fail
/// use quill_sql_core::schema::{Column, SqlType};
///
/// let age: Column<i32> = Column::new("Person", "Age", SqlType::Integer(None));
/// let _ = age.eq("John");
/// ```
///
/// A column built with [`Column::new`] carries its table and type and is
/// *well defined*: it can be used to read values back from a row. A column
/// built with [`Column::raw`] (for `*` or `COUNT(*)`) only renders and is
/// untyped (`Column<SqlValue>`), as are the erased copies tables and
/// statements keep.
pub struct Column<T = SqlValue> {
    table: Option<String>,
    name: String,
    sql_type: Option<SqlType>,
    primary_key: bool,
    not_null: bool,
    auto_increment: bool,
    default: Option<SqlValue>,
    value: PhantomData<fn() -> T>,
}

impl Column {
    /// Creates an untyped column that renders `sql` verbatim.
    #[must_use]
    pub fn raw(sql: &str) -> Self {
        Self {
            table: None,
            name: String::from(sql),
            sql_type: None,
            primary_key: false,
            not_null: false,
            auto_increment: false,
            default: None,
            value: PhantomData,
        }
    }
}

impl<T> Column<T> {
    /// Creates a well-defined column of `table` holding `T` values.
    #[must_use]
    pub fn new(table: &str, name: &str, sql_type: SqlType) -> Self {
        Self {
            table: Some(String::from(table)),
            name: String::from(name),
            sql_type: Some(sql_type),
            primary_key: false,
            not_null: false,
            auto_increment: false,
            default: None,
            value: PhantomData,
        }
    }

    /// Returns an untyped copy of the column.
    #[must_use]
    pub fn erased(&self) -> Column {
        Column {
            table: self.table.clone(),
            name: self.name.clone(),
            sql_type: self.sql_type.clone(),
            primary_key: self.primary_key,
            not_null: self.not_null,
            auto_increment: self.auto_increment,
            default: self.default.clone(),
            value: PhantomData,
        }
    }

    /// Marks the column as `PRIMARY KEY`.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks the column as `NOT NULL`.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Marks the column as `AUTO_INCREMENT`.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the `DEFAULT` value.
    #[must_use]
    pub fn default_value(mut self, value: impl LiteralOf<T>) -> Self {
        self.default = Some(value.to_sql_value());
        self
    }

    /// Returns the table name, if any.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column type, if any.
    #[must_use]
    pub const fn sql_type(&self) -> Option<&SqlType> {
        self.sql_type.as_ref()
    }

    /// Returns the `DEFAULT` value, if any.
    #[must_use]
    pub const fn default_literal(&self) -> Option<&SqlValue> {
        self.default.as_ref()
    }

    /// Whether the column is flagged as `PRIMARY KEY`.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Whether the column is flagged as `NOT NULL`.
    ///
    /// The `IS NOT NULL` predicate is [`Column::is_not_null`].
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.not_null
    }

    /// Whether the column is flagged as `AUTO_INCREMENT`.
    #[must_use]
    pub const fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Returns `true` when table, name and type are all present.
    #[must_use]
    pub fn is_well_defined(&self) -> bool {
        self.table.is_some() && !self.name.is_empty() && self.sql_type.is_some()
    }

    /// Returns the column reference: `table.name`, or `name` alone.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match &self.table {
            Some(t) => format!("{t}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Returns the column definition used by `CREATE TABLE` and
    /// `ALTER TABLE ... ADD COLUMN`.
    #[must_use]
    pub fn definition(&self) -> String {
        let mut sql = self.name.clone();
        if let Some(ty) = &self.sql_type {
            sql.push(' ');
            sql.push_str(&ty.to_sql());
        }
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if self.auto_increment {
            sql.push_str(" AUTO_INCREMENT");
        }
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql_inline());
        }
        sql
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            name: self.name.clone(),
            sql_type: self.sql_type.clone(),
            primary_key: self.primary_key,
            not_null: self.not_null,
            auto_increment: self.auto_increment,
            default: self.default.clone(),
            value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("table", &self.table)
            .field("name", &self.name)
            .field("sql_type", &self.sql_type)
            .field("primary_key", &self.primary_key)
            .field("not_null", &self.not_null)
            .field("auto_increment", &self.auto_increment)
            .field("default", &self.default)
            .finish()
    }
}

impl From<&str> for Column {
    fn from(sql: &str) -> Self {
        Self::raw(sql)
    }
}

impl From<String> for Column {
    fn from(sql: String) -> Self {
        Self::raw(&sql)
    }
}

impl<T> From<&Column<T>> for Column {
    fn from(column: &Column<T>) -> Self {
        column.erased()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Bindable;

    #[test]
    fn test_column_reference() {
        let age: Column<i32> = Column::new("Person", "Age", SqlType::Integer(None));
        assert_eq!(age.to_sql(), "Person.Age");
        assert!(age.is_well_defined());

        let star = Column::raw("COUNT(*)");
        assert_eq!(star.to_sql(), "COUNT(*)");
        assert!(!star.is_well_defined());
    }

    #[test]
    fn test_column_definition_flags() {
        let id = Column::<i64>::new("Person", "Id", SqlType::Integer(Some(11)))
            .primary_key()
            .not_null()
            .auto_increment();
        assert_eq!(id.definition(), "Id INTEGER(11) PRIMARY KEY NOT NULL AUTO_INCREMENT");
    }

    #[test]
    fn test_column_definition_inlines_default() {
        let name = Column::<String>::new("Person", "Name", SqlType::Varchar(32))
            .not_null()
            .default_value("O'Neil");
        assert_eq!(name.definition(), "Name VARCHAR(32) NOT NULL DEFAULT 'O''Neil'");
        let active = Column::<bool>::new("Person", "Active", SqlType::Bool).default_value(true);
        assert_eq!(active.definition(), "Active TINYINT(1) DEFAULT TRUE");
    }

    #[test]
    fn test_typed_default_renders_value_of_column_type() {
        let seats = Column::<i32>::new("Car", "Seats", SqlType::Integer(None)).default_value(5);
        assert_eq!(seats.definition(), "Seats INTEGER DEFAULT 5");
        assert_eq!(seats.default_literal(), Some(&SqlValue::Int(5)));

        let nick = Column::<String>::new("Person", "Nick", SqlType::Varchar(16)).default_value(None::<String>);
        assert_eq!(nick.definition(), "Nick VARCHAR(16) DEFAULT NULL");
    }

    #[test]
    fn test_not_null_flag_and_predicate_coexist() {
        let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64)).not_null();
        assert!(name.is_required());
        assert!(!Column::<String>::new("Person", "Nick", SqlType::Varchar(16)).is_required());

        let predicate = name.is_not_null();
        assert_eq!(predicate.to_sql(), "(Person.Name IS NOT NULL)");
        assert!(predicate.bind_values().is_empty());
    }

    #[test]
    fn test_erased_copy_keeps_metadata() {
        let age = Column::<i32>::new("Person", "Age", SqlType::Integer(None))
            .not_null()
            .default_value(18);
        let untyped: Column = Column::from(&age);
        assert_eq!(untyped.to_sql(), "Person.Age");
        assert_eq!(untyped.definition(), age.definition());
        assert!(untyped.is_well_defined());
    }
}
