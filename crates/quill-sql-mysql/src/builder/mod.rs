//! MySQL-specific statement builders.

mod alter;
mod database;
mod trigger;

pub use alter::{AlterMySql, ColumnPosition};
pub use database::CreateDatabaseMySql;
pub use trigger::{ActionTime, ActionType, CreateTriggerMySql, DropTriggerMySql};
