//! Queries and set operations over them.

use tracing::trace;

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::schema::Column;

use super::bindable::Bindable;
use super::expr::{Expression, Operator};
use super::select::Select;
use super::value::SqlValue;

/// Operators combining the rows of two queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    /// `UNION`
    Union,
    /// `INTERSECT`
    Intersect,
    /// `EXCEPT`
    Except,
}

impl SetOperator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// A statement that returns rows: a `SELECT` or a set operation.
#[derive(Debug, Clone)]
pub enum Query {
    /// A plain `SELECT`.
    Select(Box<Select>),
    /// `UNION`, `INTERSECT` or `EXCEPT` of two queries.
    Compound(Box<SetOperation>),
}

impl Query {
    /// Returns the projected columns.
    #[must_use]
    pub fn output_columns(&self) -> Vec<Column> {
        match self {
            Self::Select(select) => select.output_columns(),
            Self::Compound(compound) => compound.output_columns().to_vec(),
        }
    }

    /// Returns the number of projected columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        match self {
            Self::Select(select) => select.column_count(),
            Self::Compound(compound) => compound.output_columns().len(),
        }
    }
}

impl From<Select> for Query {
    fn from(select: Select) -> Self {
        Self::Select(Box::new(select))
    }
}

impl From<SetOperation> for Query {
    fn from(compound: SetOperation) -> Self {
        Self::Compound(Box::new(compound))
    }
}

impl Bindable for Query {
    fn to_sql(&self) -> String {
        match self {
            Self::Select(select) => select.to_sql(),
            Self::Compound(compound) => compound.to_sql(),
        }
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        match self {
            Self::Select(select) => select.bind_values(),
            Self::Compound(compound) => compound.bind_values(),
        }
    }
}

/// Two queries combined by a [`SetOperator`]: `(q1) UNION (q2)`.
///
/// Both queries must project the same number of columns; the output columns
/// are those of the left query.
#[derive(Debug, Clone)]
pub struct SetOperation {
    expression: Expression,
    columns: Vec<Column>,
}

impl SetOperation {
    /// Combines `left` and `right`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnCountMismatch`] if the queries project a
    /// different number of columns.
    pub fn new(operator: SetOperator, left: impl Into<Query>, right: impl Into<Query>) -> Result<Self> {
        let left: Query = left.into();
        let right: Query = right.into();
        let (left_count, right_count) = (left.column_count(), right.column_count());
        if left_count != right_count {
            return Err(Error::ColumnCountMismatch {
                left: left_count,
                right: right_count,
            });
        }
        let columns = left.output_columns();
        let expression = Expression::binary(left, Operator::Set(operator), right)
            .parentheses(false, true, true);
        Ok(Self {
            expression,
            columns,
        })
    }

    /// Combines `left` and `right` after checking that `dialect` implements
    /// `operator`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] if the dialect lacks the
    /// operator, otherwise the errors of [`SetOperation::new`].
    pub fn with_dialect<D: Dialect + ?Sized>(
        dialect: &D,
        operator: SetOperator,
        left: impl Into<Query>,
        right: impl Into<Query>,
    ) -> Result<Self> {
        if !dialect.supports_set_operator(operator) {
            return Err(Error::UnsupportedOperator {
                operator: operator.keyword(),
                dialect: dialect.name(),
            });
        }
        Self::new(operator, left, right)
    }

    /// Returns the set operator.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.expression.operator()
    }

    /// Returns the projected columns, taken from the left query.
    #[must_use]
    pub fn output_columns(&self) -> &[Column] {
        &self.columns
    }

    /// Combines this operation with another query.
    ///
    /// # Errors
    ///
    /// See [`SetOperation::new`].
    pub fn union(self, other: impl Into<Query>) -> Result<Self> {
        Self::new(SetOperator::Union, self, other)
    }

    /// Intersects this operation with another query.
    ///
    /// # Errors
    ///
    /// See [`SetOperation::new`].
    pub fn intersect(self, other: impl Into<Query>) -> Result<Self> {
        Self::new(SetOperator::Intersect, self, other)
    }

    /// Subtracts another query from this operation.
    ///
    /// # Errors
    ///
    /// See [`SetOperation::new`].
    pub fn except(self, other: impl Into<Query>) -> Result<Self> {
        Self::new(SetOperator::Except, self, other)
    }
}

impl Bindable for SetOperation {
    fn to_sql(&self) -> String {
        let sql = self.expression.to_sql();
        trace!(sql = %sql, "rendered set operation");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        self.expression.bind_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::schema::{SqlType, Table};

    struct NoIntersect;

    impl Dialect for NoIntersect {
        fn name(&self) -> &'static str {
            "no-intersect"
        }

        fn supports_set_operator(&self, op: SetOperator) -> bool {
            op == SetOperator::Union
        }
    }

    fn people() -> (Table, Column<String>, Column<i32>) {
        let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64));
        let age = Column::<i32>::new("Person", "Age", SqlType::Integer(None));
        let table = Table::new("Person").column(&name).column(&age);
        (table, name, age)
    }

    #[test]
    fn test_union_renders_both_sides_in_parentheses() {
        let (person, _, age) = people();
        let young = person.select(["Name"]).where_clause(age.lt(18));
        let old = person.select(["Name"]).where_clause(age.gt(65));
        let union = young.union(old).unwrap();
        assert_eq!(
            union.to_sql(),
            "(SELECT Person.Name FROM Person WHERE (Person.Age < ?)) UNION \
             (SELECT Person.Name FROM Person WHERE (Person.Age > ?))"
        );
        assert_eq!(union.bind_values(), vec![SqlValue::Int(18), SqlValue::Int(65)]);
        assert_eq!(union.output_columns().len(), 1);
        assert_eq!(union.operator(), Operator::Set(SetOperator::Union));
    }

    #[test]
    fn test_column_count_mismatch() {
        let (person, _, _) = people();
        let err = person
            .select(["Name"])
            .except(person.select(["Name", "Age"]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnCountMismatch { left: 1, right: 2 }
        ));
    }

    #[test]
    fn test_dialect_rejects_operator() {
        let (person, _, _) = people();
        let err = SetOperation::with_dialect(
            &NoIntersect,
            SetOperator::Intersect,
            person.select(["Name"]),
            person.select(["Name"]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedOperator {
                operator: "INTERSECT",
                dialect: "no-intersect"
            }
        ));
        assert!(SetOperation::with_dialect(
            &GenericDialect::new(),
            SetOperator::Intersect,
            person.select(["Name"]),
            person.select(["Name"]),
        )
        .is_ok());
    }

    #[test]
    fn test_chained_set_operations() {
        let (person, _, _) = people();
        let chained = person
            .select(["Age"])
            .union(person.select(["Age"]))
            .and_then(|u| u.intersect(person.select(["Age"])))
            .unwrap();
        assert_eq!(
            chained.to_sql(),
            "((SELECT Person.Age FROM Person) UNION (SELECT Person.Age FROM Person)) \
             INTERSECT (SELECT Person.Age FROM Person)"
        );
    }
}
