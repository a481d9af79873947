//! DROP TABLE statement builder.

use tracing::trace;

use crate::schema::Table;

use super::bindable::Bindable;
use super::value::SqlValue;

/// A `DROP TABLE` statement.
#[derive(Debug, Clone)]
pub struct DropTable {
    name: String,
    if_exists: bool,
}

impl DropTable {
    /// Creates a DROP TABLE for `table`.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            name: String::from(table.name()),
            if_exists: false,
        }
    }

    /// Adds `IF EXISTS`.
    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }
}

impl Bindable for DropTable {
    fn to_sql(&self) -> String {
        let mut sql = String::from("DROP TABLE ");
        if self.if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&self.name);
        trace!(sql = %sql, "rendered DROP TABLE");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_table() {
        let person = Table::new("Person");
        assert_eq!(DropTable::new(&person).to_sql(), "DROP TABLE Person");
        assert_eq!(
            DropTable::new(&person).if_exists().to_sql(),
            "DROP TABLE IF EXISTS Person"
        );
    }
}
