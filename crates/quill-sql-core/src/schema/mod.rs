//! Schema metadata for tables, columns and row objects.
//!
//! Statement builders read table and column definitions from here. Columns
//! also serve as operands in expressions (see [`crate::builder::expr`]).

mod column;
mod table;
mod tuple;
mod types;

pub use column::Column;
pub use table::{ForeignKey, ReferenceAction, Table};
pub use tuple::{check_mapping, Tuple};
pub use types::SqlType;
