//! SQL statement builders.
//!
//! Every builder implements [`Bindable`]: it renders SQL text with `?`
//! placeholders and returns the values for those placeholders in order.
//!
//! # Example
//!
//! ```rust
//! use quill_sql_core::builder::{Bindable, SqlValue, Update};
//! use quill_sql_core::schema::{Column, SqlType, Table};
//!
//! let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64));
//! let surname = Column::<String>::new("Person", "Surname", SqlType::Varchar(64));
//! let person = Table::new("Person").column(&name).column(&surname);
//!
//! let (sql, params) = Update::new(&person)
//!     .set("Age", 20)
//!     .where_clause(name.eq("John").and(surname.eq("White")))
//!     .build();
//!
//! assert_eq!(
//!     sql,
//!     "UPDATE Person SET Age = ? WHERE ((Person.Name = ?) AND (Person.Surname = ?))"
//! );
//! assert_eq!(params[0], SqlValue::Int(20));
//! ```

mod alter;
mod bindable;
mod create;
mod database;
mod delete;
mod drop;
pub mod expr;
mod function;
mod insert;
mod query;
mod select;
mod update;
pub mod value;

pub use alter::AlterTable;
pub use bindable::Bindable;
pub use create::CreateTable;
pub use database::{CreateDatabase, DropDatabase};
pub use delete::Delete;
pub use drop::DropTable;
pub use expr::{Expression, IntoOperand, Operand, Operator};
pub use function::Function;
pub use insert::Insert;
pub use query::{Query, SetOperation, SetOperator};
pub use select::{JoinType, Order, Select, UNBOUNDED_LIMIT};
pub use update::Update;
pub use value::{FromSqlValue, SqlValue, ToSqlValue, ValueError};
