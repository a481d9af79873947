//! The capability shared by everything that renders to SQL with placeholders.

use crate::error::Result;

use super::value::SqlValue;

/// Anything that renders to SQL text and yields the values for its
/// placeholders.
///
/// The values come back in exactly the order their `?` placeholders appear
/// in [`Bindable::to_sql`], because they are bound by position only.
pub trait Bindable {
    /// Renders the SQL text.
    fn to_sql(&self) -> String;

    /// Returns the values to bind, in placeholder order.
    fn bind_values(&self) -> Vec<SqlValue>;

    /// Returns the SQL text together with its bind values.
    fn build(&self) -> (String, Vec<SqlValue>) {
        (self.to_sql(), self.bind_values())
    }

    /// Checks that the rendered text is a complete statement.
    ///
    /// Executors call this before compiling anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStatement`](crate::Error::EmptyStatement) when
    /// a clause the statement cannot do without is empty.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl<B: Bindable + ?Sized> Bindable for &B {
    fn to_sql(&self) -> String {
        (**self).to_sql()
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        (**self).bind_values()
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

/// Joins rendered items with `", "`.
pub(crate) fn comma_list<T, F>(items: &[T], render: F) -> String
where
    F: Fn(&T) -> String,
{
    items.iter().map(render).collect::<Vec<_>>().join(", ")
}

/// Returns `"(?, ?, ...)"` with `count` placeholders.
pub(crate) fn placeholder_group(count: usize) -> String {
    let marks = vec![SqlValue::placeholder(); count];
    format!("({})", marks.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_group() {
        assert_eq!(placeholder_group(0), "()");
        assert_eq!(placeholder_group(1), "(?)");
        assert_eq!(placeholder_group(3), "(?, ?, ?)");
    }

    #[test]
    fn test_comma_list() {
        assert_eq!(comma_list(&[1, 2, 3], |n| format!("c{n}")), "c1, c2, c3");
        assert_eq!(comma_list::<i32, _>(&[], |n| n.to_string()), "");
    }
}
