//! Row objects mapped to table columns.

use tracing::trace;

use crate::builder::value::{SqlValue, ValueError};
use crate::error::{Error, Result};
use crate::exec::RowCursor;

use super::column::Column;
use super::table::Table;

/// A record whose fields are mapped to columns by name.
///
/// Usually implemented with `#[derive(Tuple)]` from `quill-sql-derive`:
///
/// ```rust,ignore
/// #[derive(Debug, Default, Tuple)]
/// struct Person {
///     #[column(name = "Name")]
///     name: String,
///     #[column(name = "Age")]
///     age: Option<i32>,
/// }
/// ```
pub trait Tuple: Default {
    /// Mapped column names, in field declaration order.
    const COLUMNS: &'static [&'static str];

    /// Returns the value of the field mapped to `column`, or `None` when no
    /// field is mapped to it.
    fn value_of(&self, column: &str) -> Option<SqlValue>;

    /// Stores `value` in the field mapped to `column`.
    ///
    /// Returns `Ok(false)` when no field is mapped to `column`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if the value does not convert to the field's
    /// type.
    fn assign(&mut self, column: &str, value: SqlValue) -> std::result::Result<bool, ValueError>;

    /// Returns one value per column of `table`, in the table's column order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumnMapping`] if a column of `table` has no
    /// mapped field.
    fn values_for(&self, table: &Table) -> Result<Vec<SqlValue>> {
        table
            .columns()
            .iter()
            .map(|column| {
                self.value_of(column.name())
                    .ok_or_else(|| missing_mapping::<Self>(table, column))
            })
            .collect()
    }

    /// Returns `(column, value)` pairs for every mapped field, in field order.
    ///
    /// With `skip_null`, fields holding NULL are left out.
    fn assignments(&self, skip_null: bool) -> Vec<(&'static str, SqlValue)> {
        Self::COLUMNS
            .iter()
            .filter_map(|&column| {
                let value = self.value_of(column)?;
                (!skip_null || !value.is_null()).then_some((column, value))
            })
            .collect()
    }

    /// Builds a row object from the cursor's current row.
    ///
    /// Each output column is read through its type descriptor and assigned to
    /// the field mapped to its name; columns with no mapped field are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllDefinedColumn`] for a column lacking table, name
    /// or type, [`Error::Conversion`] when a value does not fit its field,
    /// and propagates cursor errors.
    fn from_row<R: RowCursor + ?Sized>(row: &R, columns: &[Column]) -> Result<Self> {
        let mut tuple = Self::default();
        for column in columns {
            let Some(sql_type) = column.sql_type().filter(|_| column.is_well_defined()) else {
                return Err(Error::IllDefinedColumn {
                    column: column.to_sql(),
                });
            };
            if !Self::COLUMNS.contains(&column.name()) {
                continue;
            }
            let value = sql_type.extract(row, &column.to_sql())?;
            trace!(column = %column.to_sql(), ?value, "assigning fetched value");
            tuple
                .assign(column.name(), value)
                .map_err(|source| Error::Conversion {
                    column: column.to_sql(),
                    source,
                })?;
        }
        Ok(tuple)
    }
}

fn missing_mapping<T>(table: &Table, column: &Column) -> Error {
    Error::MissingColumnMapping {
        tuple: std::any::type_name::<T>(),
        table: String::from(table.name()),
        column: String::from(column.name()),
    }
}

/// Checks that `T` maps every column of `table`.
///
/// # Errors
///
/// Returns [`Error::MissingColumnMapping`] naming the first unmapped column.
pub fn check_mapping<T: Tuple>(table: &Table) -> Result<()> {
    match table
        .columns()
        .iter()
        .find(|column| !T::COLUMNS.contains(&column.name()))
    {
        Some(column) => Err(missing_mapping::<T>(table, column)),
        None => Ok(()),
    }
}
