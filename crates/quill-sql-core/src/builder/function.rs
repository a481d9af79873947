//! SQL function calls.

use super::bindable::{comma_list, Bindable};
use super::expr::{IntoOperand, Operand};
use super::value::SqlValue;

/// A function call such as `ADDTIME(Person.Born, ?)`.
///
/// Arguments are ordinary operands; their bind values are collected in
/// argument order.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    args: Vec<Operand>,
}

impl Function {
    /// Creates a call to `name` with no arguments.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            args: vec![],
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl IntoOperand) -> Self {
        self.args.push(arg.into_operand());
        self
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Bindable for Function {
    fn to_sql(&self) -> String {
        format!("{}({})", self.name, comma_list(&self.args, Bindable::to_sql))
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        self.args.iter().flat_map(Bindable::bind_values).collect()
    }
}
