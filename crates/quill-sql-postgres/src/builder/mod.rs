//! PostgreSQL-specific statement builders.

mod trigger;

pub use trigger::{ActionTime, ActionType, CreateTriggerPostgres, DropOption, DropTriggerPostgres};
