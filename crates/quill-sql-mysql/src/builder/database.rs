//! MySQL `CREATE DATABASE IF NOT EXISTS`.

use quill_sql_core::builder::{Bindable, CreateDatabase, SqlValue};
use quill_sql_core::config::BuilderConfig;
use quill_sql_core::dialect::DialectKind;
use quill_sql_core::exec::SingleShotStatement;
use quill_sql_core::Result;
use tracing::trace;

/// `CREATE DATABASE [IF NOT EXISTS] name`
#[derive(Debug, Clone)]
pub struct CreateDatabaseMySql {
    inner: CreateDatabase,
    if_not_exists: bool,
}

impl CreateDatabaseMySql {
    /// Creates the statement.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not select MySQL.
    pub fn new(config: &BuilderConfig, name: &str) -> Result<Self> {
        config.require(DialectKind::MySql)?;
        Ok(Self {
            inner: CreateDatabase::new(name),
            if_not_exists: false,
        })
    }

    /// Adds `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }
}

impl Bindable for CreateDatabaseMySql {
    fn to_sql(&self) -> String {
        if !self.if_not_exists {
            return self.inner.to_sql();
        }
        let sql = format!("CREATE DATABASE IF NOT EXISTS {}", self.inner.name());
        trace!(sql = %sql, "rendered CREATE DATABASE");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![]
    }
}

impl SingleShotStatement for CreateDatabaseMySql {}
