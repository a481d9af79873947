//! # quill-sql-postgres
//!
//! PostgreSQL-specific extensions for `quill-sql-core`.
//!
//! Statement constructors take a
//! [`BuilderConfig`](quill_sql_core::BuilderConfig) and fail unless it
//! selects PostgreSQL.
//!
//! # How PostgreSQL differs from other dialects
//!
//! - **[Triggers]**: a trigger runs a function instead of an inline body,
//!   can fire `INSTEAD OF` a statement on a view and on `TRUNCATE`.
//! - **[DROP TRIGGER]**: triggers are scoped to a table, so dropping one
//!   names the table and takes `CASCADE` or `RESTRICT`.
//!
//! [Triggers]: https://www.postgresql.org/docs/current/sql-createtrigger.html
//! [DROP TRIGGER]: https://www.postgresql.org/docs/current/sql-droptrigger.html
//!
//! ## Example
//!
//! ```rust
//! use quill_sql_core::builder::Bindable;
//! use quill_sql_core::dialect::DialectKind;
//! use quill_sql_core::{BuilderConfig, Table};
//! use quill_sql_postgres::DropTriggerPostgres;
//!
//! let config = BuilderConfig::with_dialect(DialectKind::PostgreSql);
//! let drop = DropTriggerPostgres::new(&config, "person_audit", &Table::new("Person"))
//!     .unwrap()
//!     .if_exists()
//!     .cascade();
//! assert_eq!(
//!     drop.to_sql(),
//!     "DROP TRIGGER IF EXISTS person_audit ON Person CASCADE"
//! );
//!
//! // Built under another dialect, construction fails.
//! let mysql = BuilderConfig::with_dialect(DialectKind::MySql);
//! assert!(DropTriggerPostgres::new(&mysql, "person_audit", &Table::new("Person")).is_err());
//! ```

pub mod builder;
mod dialect;

pub use builder::{
    ActionTime, ActionType, CreateTriggerPostgres, DropOption, DropTriggerPostgres,
};
pub use dialect::PostgresDialect;
