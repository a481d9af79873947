//! SELECT statement builder.

use tracing::trace;

use crate::error::Result;
use crate::schema::{Column, Table};

use super::bindable::{comma_list, Bindable};
use super::expr::{self, Expression};
use super::query::{Query, SetOperation, SetOperator};
use super::value::SqlValue;

/// The kind of a `JOIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// `INNER JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
    /// `RIGHT JOIN`
    Right,
    /// `FULL JOIN`
    Full,
}

impl JoinType {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }
}

/// A join against the table of `external` on `external = internal`.
#[derive(Debug, Clone)]
struct Join {
    kind: JoinType,
    external: Column,
    internal: Column,
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl Order {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Row count used when only an offset is given.
pub const UNBOUNDED_LIMIT: u64 = u64::MAX;

/// A SELECT statement builder.
///
/// ```rust
/// use quill_sql_core::builder::{Bindable, Select};
/// use quill_sql_core::schema::{Column, SqlType, Table};
///
/// let name = Column::<String>::new("Person", "Name", SqlType::Varchar(64));
/// let age = Column::<i32>::new("Person", "Age", SqlType::Integer(None));
/// let person = Table::new("Person").column(&name).column(&age);
///
/// let select = Select::new(["Name"])
///     .from(&person)
///     .where_clause(age.le(18))
///     .distinct();
/// assert_eq!(
///     select.to_sql(),
///     "SELECT DISTINCT Person.Name FROM Person WHERE (Person.Age <= ?)"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Select {
    distinct: bool,
    columns: Vec<Column>,
    table: Option<Table>,
    joins: Vec<Join>,
    where_clause: Option<Expression>,
    group_by: Vec<Column>,
    having: Option<Expression>,
    order_by: Vec<(Column, Order)>,
    offset: Option<u64>,
    limit: Option<u64>,
}

impl Select {
    /// Creates a SELECT of the given columns.
    ///
    /// Strings naming a column of the `FROM` table resolve to that column;
    /// other strings (`*`, `COUNT(*)`) render verbatim.
    #[must_use]
    pub fn new<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        Self {
            distinct: false,
            columns: columns.into_iter().map(Into::into).collect(),
            table: None,
            joins: vec![],
            where_clause: None,
            group_by: vec![],
            having: None,
            order_by: vec![],
            offset: None,
            limit: None,
        }
    }

    /// Adds DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Sets the source table.
    #[must_use]
    pub fn from(mut self, table: &Table) -> Self {
        self.table = Some(table.clone());
        self
    }

    /// Adds `{kind} JOIN external_table ON external = internal`.
    #[must_use]
    pub fn join<T>(mut self, kind: JoinType, external: &Column<T>, internal: &Column<T>) -> Self {
        self.joins.push(Join {
            kind,
            external: external.erased(),
            internal: internal.erased(),
        });
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn inner_join<T>(self, external: &Column<T>, internal: &Column<T>) -> Self {
        self.join(JoinType::Inner, external, internal)
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join<T>(self, external: &Column<T>, internal: &Column<T>) -> Self {
        self.join(JoinType::Left, external, internal)
    }

    /// Adds a RIGHT JOIN.
    #[must_use]
    pub fn right_join<T>(self, external: &Column<T>, internal: &Column<T>) -> Self {
        self.join(JoinType::Right, external, internal)
    }

    /// Adds a FULL JOIN.
    #[must_use]
    pub fn full_join<T>(self, external: &Column<T>, internal: &Column<T>) -> Self {
        self.join(JoinType::Full, external, internal)
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn where_clause(mut self, condition: Expression) -> Self {
        self.where_clause = Some(condition);
        self
    }

    /// Adds GROUP BY columns.
    #[must_use]
    pub fn group_by<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Sets the HAVING condition.
    #[must_use]
    pub fn having(mut self, condition: Expression) -> Self {
        self.having = Some(condition);
        self
    }

    /// Adds an ORDER BY column.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<Column>, order: Order) -> Self {
        self.order_by.push((column.into(), order));
        self
    }

    /// Sets the maximum number of rows.
    #[must_use]
    pub const fn limit(mut self, count: u64) -> Self {
        self.limit = Some(count);
        self
    }

    /// Sets the number of rows to skip.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets both bounds of `LIMIT offset, count`.
    #[must_use]
    pub const fn limit_range(self, offset: u64, count: u64) -> Self {
        self.offset(offset).limit(count)
    }

    /// Returns the source table.
    #[must_use]
    pub const fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Returns the projected columns, resolved against the source table.
    #[must_use]
    pub fn output_columns(&self) -> Vec<Column> {
        self.columns.iter().map(|c| self.resolve(c).clone()).collect()
    }

    /// Returns the number of projected columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn resolve<'a>(&'a self, column: &'a Column) -> &'a Column {
        if column.table().is_some() {
            return column;
        }
        self.table
            .as_ref()
            .and_then(|table| table.find(column.name()))
            .unwrap_or(column)
    }

    /// `(self) UNION (other)`
    ///
    /// # Errors
    ///
    /// Returns an error if the projections differ in width.
    pub fn union(self, other: impl Into<Query>) -> Result<SetOperation> {
        SetOperation::new(SetOperator::Union, self, other)
    }

    /// `(self) INTERSECT (other)`
    ///
    /// # Errors
    ///
    /// Returns an error if the projections differ in width.
    pub fn intersect(self, other: impl Into<Query>) -> Result<SetOperation> {
        SetOperation::new(SetOperator::Intersect, self, other)
    }

    /// `(self) EXCEPT (other)`
    ///
    /// # Errors
    ///
    /// Returns an error if the projections differ in width.
    pub fn except(self, other: impl Into<Query>) -> Result<SetOperation> {
        SetOperation::new(SetOperator::Except, self, other)
    }

    /// `EXISTS (self)`
    #[must_use]
    pub fn exists(self) -> Expression {
        expr::exists(self)
    }

    /// `NOT EXISTS (self)`
    #[must_use]
    pub fn not_exists(self) -> Expression {
        expr::not_exists(self)
    }

    /// `SOME (self)`
    #[must_use]
    pub fn some(self) -> Expression {
        expr::some(self)
    }

    /// `ANY (self)`
    #[must_use]
    pub fn any(self) -> Expression {
        expr::any(self)
    }

    /// `ALL (self)`
    #[must_use]
    pub fn all(self) -> Expression {
        expr::all(self)
    }
}

impl Bindable for Select {
    fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");

        if self.distinct {
            sql.push_str("DISTINCT ");
        }

        sql.push_str(&comma_list(&self.columns, |c| self.resolve(c).to_sql()));

        if let Some(table) = &self.table {
            sql.push_str(" FROM ");
            sql.push_str(table.name());
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join.kind.as_sql());
            sql.push(' ');
            sql.push_str(join.external.table().unwrap_or_default());
            sql.push_str(" ON ");
            sql.push_str(&join.external.to_sql());
            sql.push_str(" = ");
            sql.push_str(&join.internal.to_sql());
        }

        if let Some(ref condition) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&condition.to_sql());
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&comma_list(&self.group_by, |c| self.resolve(c).to_sql()));
        }

        if let Some(ref condition) = self.having {
            sql.push_str(" HAVING ");
            sql.push_str(&condition.to_sql());
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&comma_list(&self.order_by, |(c, order)| {
                format!("{} {}", self.resolve(c).to_sql(), order.as_sql())
            }));
        }

        if self.offset.is_some() || self.limit.is_some() {
            sql.push_str(&format!(
                " LIMIT {}, {}",
                self.offset.unwrap_or(0),
                self.limit.unwrap_or(UNBOUNDED_LIMIT)
            ));
        }

        trace!(sql = %sql, "rendered SELECT");
        sql
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        let mut values = self
            .where_clause
            .as_ref()
            .map(Bindable::bind_values)
            .unwrap_or_default();
        if let Some(having) = &self.having {
            values.extend(having.bind_values());
        }
        values
    }
}
