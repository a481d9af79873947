//! # quill-sql-core
//!
//! Typed SQL generation from a schema model.
//!
//! This crate provides:
//! - A schema model of typed columns, tables and foreign keys
//! - An expression tree of operators over columns, values, functions and
//!   subqueries, rendered with `?` placeholders
//! - Statement builders for `SELECT`, `INSERT`, `REPLACE`, `UPDATE`,
//!   `DELETE`, `CREATE`, `ALTER` and `DROP`
//! - An execution layer binding values positionally and caching compiled
//!   statements
//!
//! ## Building statements
//!
//! ```rust
//! use quill_sql_core::builder::{Bindable, Order, SqlValue};
//! use quill_sql_core::schema::{Column, SqlType, Table};
//!
//! let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64));
//! let age = Column::<i32>::new("Person", "Age", SqlType::Integer(None));
//! let person = Table::new("Person").column(&name).column(&age);
//!
//! let (sql, params) = person
//!     .select(["Name"])
//!     .where_clause(age.ge(18))
//!     .order_by(&name, Order::Asc)
//!     .build();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT Person.Name FROM Person WHERE (Person.Age >= ?) ORDER BY Person.Name ASC"
//! );
//! assert_eq!(params, vec![SqlValue::Int(18)]);
//! ```
//!
//! ## Injection safety
//!
//! Values never appear in the SQL text; they are returned separately and
//! bound by the driver:
//!
//! ```rust
//! use quill_sql_core::builder::{Bindable, SqlValue};
//! use quill_sql_core::schema::{Column, SqlType, Table};
//!
//! let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64));
//! let person = Table::new("Person").column(&name);
//!
//! let (sql, params) = person
//!     .delete()
//!     .where_clause(name.eq("'; DROP TABLE Person; --"))
//!     .build();
//!
//! assert_eq!(sql, "DELETE FROM Person WHERE (Person.Name = ?)");
//! assert_eq!(
//!     params,
//!     vec![SqlValue::Text(String::from("'; DROP TABLE Person; --"))]
//! );
//! ```

pub mod builder;
pub mod config;
pub mod dialect;
mod error;
pub mod exec;
pub mod schema;

pub use builder::{Bindable, Expression, SqlValue};
pub use config::BuilderConfig;
pub use error::{BackendError, Error, Result};
pub use schema::{Column, SqlType, Table, Tuple};
