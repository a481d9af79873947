//! MySQL `CREATE TRIGGER` and `DROP TRIGGER`.

use quill_sql_core::builder::{Bindable, SqlValue};
use quill_sql_core::config::BuilderConfig;
use quill_sql_core::dialect::DialectKind;
use quill_sql_core::exec::SingleShotStatement;
use quill_sql_core::{Result, Table};
use tracing::trace;

/// When a trigger fires relative to the triggering statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionTime {
    /// `BEFORE`
    Before,
    /// `AFTER`
    After,
}

impl ActionTime {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
        }
    }
}

/// The statement that fires a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// `INSERT`
    Insert,
    /// `UPDATE`
    Update,
    /// `DELETE`
    Delete,
}

impl ActionType {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

/// `CREATE TRIGGER name time event ON table FOR EACH ROW BEGIN body END;`
///
/// The body is inserted verbatim.
#[derive(Debug, Clone)]
pub struct CreateTriggerMySql {
    name: String,
    time: ActionTime,
    event: ActionType,
    table: String,
    body: String,
}

impl CreateTriggerMySql {
    /// Creates the statement.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not select MySQL.
    pub fn new(
        config: &BuilderConfig,
        name: &str,
        time: ActionTime,
        event: ActionType,
        table: &Table,
        body: &str,
    ) -> Result<Self> {
        config.require(DialectKind::MySql)?;
        Ok(Self {
            name: String::from(name),
            time,
            event,
            table: String::from(table.name()),
            body: String::from(body),
        })
    }

    /// Returns the trigger name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns when the trigger fires.
    #[must_use]
    pub const fn action_time(&self) -> ActionTime {
        self.time
    }

    /// Returns the statement that fires the trigger.
    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        self.event
    }
}

impl Bindable for CreateTriggerMySql {
    fn to_sql(&self) -> String {
        let sql = format!(
            "CREATE TRIGGER {} {} {} ON {} FOR EACH ROW BEGIN {} END;",
            self.name,
            self.time.as_sql(),
            self.event.as_sql(),
            self.table,
            self.body
        );
        trace!(sql = %sql, "rendered CREATE TRIGGER");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![]
    }
}

impl SingleShotStatement for CreateTriggerMySql {}

/// `DROP TRIGGER [IF EXISTS] name`
#[derive(Debug, Clone)]
pub struct DropTriggerMySql {
    name: String,
    if_exists: bool,
}

impl DropTriggerMySql {
    /// Creates the statement.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not select MySQL.
    pub fn new(config: &BuilderConfig, name: &str) -> Result<Self> {
        config.require(DialectKind::MySql)?;
        Ok(Self {
            name: String::from(name),
            if_exists: false,
        })
    }

    /// Adds `IF EXISTS`.
    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Returns the trigger name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Bindable for DropTriggerMySql {
    fn to_sql(&self) -> String {
        let mut sql = String::from("DROP TRIGGER ");
        if self.if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&self.name);
        trace!(sql = %sql, "rendered DROP TRIGGER");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![]
    }
}

impl SingleShotStatement for DropTriggerMySql {}
