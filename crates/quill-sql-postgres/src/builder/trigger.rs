//! PostgreSQL `CREATE TRIGGER` and `DROP TRIGGER`.

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
    /// `INSTEAD OF`, for triggers on views.
    InsteadOf,
}

impl ActionTime {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::InsteadOf => "INSTEAD OF",
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
    /// `TRUNCATE`
    Truncate,
}

impl ActionType {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Truncate => "TRUNCATE",
        }
    }
}

/// `CREATE TRIGGER name time event ON table body;`
///
/// The body holds everything after the table, typically
/// `FOR EACH ROW EXECUTE FUNCTION f()`, and is inserted verbatim.
#[derive(Debug, Clone)]
pub struct CreateTriggerPostgres {
    name: String,
    time: ActionTime,
    event: ActionType,
    table: String,
    body: String,
}

impl CreateTriggerPostgres {
    /// Creates the statement.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not select PostgreSQL.
    pub fn new(
        config: &BuilderConfig,
        name: &str,
        time: ActionTime,
        event: ActionType,
        table: &Table,
        body: &str,
    ) -> Result<Self> {
        config.require(DialectKind::PostgreSql)?;
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

impl Bindable for CreateTriggerPostgres {
    fn to_sql(&self) -> String {
        let sql = format!(
            "CREATE TRIGGER {} {} {} ON {} {};",
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

impl SingleShotStatement for CreateTriggerPostgres {}

/// What happens to objects depending on a dropped trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropOption {
    /// `CASCADE`
    Cascade,
    /// `RESTRICT`
    Restrict,
}

impl DropOption {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
        }
    }
}

/// `DROP TRIGGER [IF EXISTS] name ON table [CASCADE | RESTRICT]`
#[derive(Debug, Clone)]
pub struct DropTriggerPostgres {
    name: String,
    table: String,
    if_exists: bool,
    option: Option<DropOption>,
}

impl DropTriggerPostgres {
    /// Creates the statement.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not select PostgreSQL.
    pub fn new(config: &BuilderConfig, name: &str, table: &Table) -> Result<Self> {
        config.require(DialectKind::PostgreSql)?;
        Ok(Self {
            name: String::from(name),
            table: String::from(table.name()),
            if_exists: false,
            option: None,
        })
    }

    /// Adds `IF EXISTS`.
    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Sets the drop behavior.
    #[must_use]
    pub const fn option(mut self, option: DropOption) -> Self {
        self.option = Some(option);
        self
    }

    /// Adds `CASCADE`.
    #[must_use]
    pub const fn cascade(self) -> Self {
        self.option(DropOption::Cascade)
    }

    /// Adds `RESTRICT`.
    #[must_use]
    pub const fn restrict(self) -> Self {
        self.option(DropOption::Restrict)
    }

    /// Returns the drop behavior.
    #[must_use]
    pub const fn drop_option(&self) -> Option<DropOption> {
        self.option
    }
}

impl Bindable for DropTriggerPostgres {
    fn to_sql(&self) -> String {
        let mut sql = String::from("DROP TRIGGER ");
        if self.if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&self.name);
        sql.push_str(" ON ");
        sql.push_str(&self.table);
        if let Some(option) = self.option {
            sql.push(' ');
            sql.push_str(option.as_sql());
        }
        trace!(sql = %sql, "rendered DROP TRIGGER");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![]
    }
}

impl SingleShotStatement for DropTriggerPostgres {}
