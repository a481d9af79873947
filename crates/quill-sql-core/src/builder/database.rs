//! CREATE DATABASE and DROP DATABASE statements.

use tracing::trace;

use super::bindable::Bindable;
use super::value::SqlValue;

/// `CREATE DATABASE name`.
#[derive(Debug, Clone)]
pub struct CreateDatabase {
    name: String,
}

impl CreateDatabase {
    /// Creates the statement.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
        }
    }

    /// Returns the database name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Bindable for CreateDatabase {
    fn to_sql(&self) -> String {
        let sql = format!("CREATE DATABASE {}", self.name);
        trace!(sql = %sql, "rendered CREATE DATABASE");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![]
    }
}

/// `DROP DATABASE [IF EXISTS] name`.
#[derive(Debug, Clone)]
pub struct DropDatabase {
    name: String,
    if_exists: bool,
}

impl DropDatabase {
    /// Creates the statement.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
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

impl Bindable for DropDatabase {
    fn to_sql(&self) -> String {
        let mut sql = String::from("DROP DATABASE ");
        if self.if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&self.name);
        trace!(sql = %sql, "rendered DROP DATABASE");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![]
    }
}
