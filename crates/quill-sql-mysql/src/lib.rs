//! # quill-sql-mysql
//!
//! MySQL-specific extensions for `quill-sql-core`.
//!
//! Every statement here is gated on the configured dialect: its constructor
//! takes a [`BuilderConfig`](quill_sql_core::BuilderConfig) and fails unless
//! it selects MySQL, so a mismatch is caught while building rather than when
//! the database rejects the SQL.
//!
//! # How MySQL differs from other dialects
//!
//! - **[Triggers]**: the body is wrapped in `FOR EACH ROW BEGIN ... END;`.
//!   Triggers fire `BEFORE` or `AFTER` an `INSERT`, `UPDATE` or `DELETE`.
//! - **[Column placement]**: `ALTER TABLE ... ADD COLUMN` accepts `FIRST`
//!   and `AFTER column`.
//! - **`INSERT IGNORE` and `REPLACE`**: accepted by [`MySqlDialect`]
//!   through `Insert::ignore_with` and `Insert::replace_with`.
//! - **[Set operators]**: only `UNION` before 8.0.31.
//!
//! [Triggers]: https://dev.mysql.com/doc/refman/8.0/en/create-trigger.html
//! [Column placement]: https://dev.mysql.com/doc/refman/8.0/en/alter-table.html
//! [Set operators]: https://dev.mysql.com/doc/refman/8.0/en/set-operations.html
//!
//! ## Example
//!
//! ```rust
//! use quill_sql_core::builder::Bindable;
//! use quill_sql_core::dialect::DialectKind;
//! use quill_sql_core::{BuilderConfig, Table};
//! use quill_sql_mysql::{ActionTime, ActionType, CreateTriggerMySql};
//!
//! let config = BuilderConfig::with_dialect(DialectKind::MySql);
//! let trigger = CreateTriggerMySql::new(
//!     &config,
//!     "StampPerson",
//!     ActionTime::Before,
//!     ActionType::Insert,
//!     &Table::new("Person"),
//!     "SET NEW.Born = NOW();",
//! )
//! .unwrap();
//! assert_eq!(
//!     trigger.to_sql(),
//!     "CREATE TRIGGER StampPerson BEFORE INSERT ON Person \
//!      FOR EACH ROW BEGIN SET NEW.Born = NOW(); END;"
//! );
//! ```

pub mod builder;
mod dialect;

pub use builder::{
    ActionTime, ActionType, AlterMySql, ColumnPosition, CreateDatabaseMySql, CreateTriggerMySql,
    DropTriggerMySql,
};
pub use dialect::MySqlDialect;
