//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. This module provides
//! a trait for dialect-specific capabilities and the [`DialectKind`] tag used
//! by [`BuilderConfig`](crate::config::BuilderConfig) to gate statements that
//! only exist in one dialect.

mod generic;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use generic::GenericDialect;

use crate::builder::SetOperator;

/// The SQL dialects that have dialect-specific statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// MySQL and MariaDB.
    MySql,
    /// PostgreSQL.
    PostgreSql,
}

impl DialectKind {
    /// Returns the display name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::PostgreSql => "PostgreSQL",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the dialect tag, if this dialect has one.
    ///
    /// [`BuilderConfig::for_dialect`](crate::config::BuilderConfig::for_dialect)
    /// reads it to select dialect-specific statements.
    fn kind(&self) -> Option<DialectKind> {
        None
    }

    /// Returns whether the dialect implements a set operator.
    fn supports_set_operator(&self, _op: SetOperator) -> bool {
        true
    }

    /// Returns whether the dialect supports `INSERT IGNORE` and `REPLACE`.
    ///
    /// Checked by [`Insert::ignore_with`](crate::builder::Insert::ignore_with)
    /// and [`Insert::replace_with`](crate::builder::Insert::replace_with).
    fn supports_insert_ignore(&self) -> bool {
        false
    }
}
