//! Expression trees over columns, literals, functions and subqueries.
//!
//! An [`Expression`] is a single node type tagged with an [`Operator`]. It
//! renders as `L OP R`, where each side is wrapped in parentheses when its
//! flag is set and the whole node is wrapped when `enclosing` is set
//! (the default). Bind values are collected left side first, so they always
//! line up with the placeholders in the rendered text.
//!
//! ```rust
//! use quill_sql_core::builder::{Bindable, SqlValue};
//! use quill_sql_core::schema::{Column, SqlType};
//!
//! let name: Column<String> = Column::new("Person", "Name", SqlType::Varchar(64));
//! let age: Column<i32> = Column::new("Person", "Age", SqlType::Integer(None));
//!
//! let expr = name.eq("John").and(age.gt(18));
//! assert_eq!(expr.to_sql(), "((Person.Name = ?) AND (Person.Age > ?))");
//! assert_eq!(
//!     expr.bind_values(),
//!     vec![SqlValue::Text(String::from("John")), SqlValue::Int(18)]
//! );
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::schema::Column;

use super::bindable::{placeholder_group, Bindable};
use super::function::Function;
use super::query::{Query, SetOperation, SetOperator};
use super::select::Select;
use super::value::{LiteralOf, SqlValue, ToSqlValue};

/// Operator tag of an [`Expression`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `=`
    Eq,
    /// `<>`
    Neq,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `XOR`
    Xor,
    /// `LIKE`
    Like,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `BETWEEN`
    Between,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull,
    /// `EXISTS`
    Exists,
    /// `NOT EXISTS`
    NotExists,
    /// `SOME`
    SomeOf,
    /// `ANY`
    AnyOf,
    /// `ALL`
    AllOf,
    /// `UNION`, `INTERSECT` or `EXCEPT`.
    Set(SetOperator),
}

impl Operator {
    /// Returns the SQL keyword of the operator.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::Neq => "<>",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Like => "LIKE",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Between => "BETWEEN",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::Exists => "EXISTS",
            Self::NotExists => "NOT EXISTS",
            Self::SomeOf => "SOME",
            Self::AnyOf => "ANY",
            Self::AllOf => "ALL",
            Self::Set(op) => op.keyword(),
        }
    }
}

/// One side of an expression.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A column reference; binds nothing.
    Column(Column),
    /// A literal, rendered as a single placeholder.
    Value(SqlValue),
    /// A list of literals, rendered as `(?, ?, ...)`.
    List(Vec<SqlValue>),
    /// A nested expression.
    Expr(Box<Expression>),
    /// A function call.
    Function(Box<Function>),
    /// A subquery.
    Query(Box<Query>),
}

impl Operand {
    /// Returns `true` for subquery operands.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    /// Creates a list operand for `IN` / `NOT IN`.
    #[must_use]
    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToSqlValue,
    {
        Self::List(values.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}

impl Bindable for Operand {
    fn to_sql(&self) -> String {
        match self {
            Self::Column(column) => column.to_sql(),
            Self::Value(_) => String::from(SqlValue::placeholder()),
            Self::List(values) => placeholder_group(values.len()),
            Self::Expr(expr) => expr.to_sql(),
            Self::Function(function) => function.to_sql(),
            Self::Query(query) => query.to_sql(),
        }
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        match self {
            Self::Column(_) => vec![],
            Self::Value(value) => vec![value.clone()],
            Self::List(values) => values.clone(),
            Self::Expr(expr) => expr.bind_values(),
            Self::Function(function) => function.bind_values(),
            Self::Query(query) => query.bind_values(),
        }
    }
}

/// Conversion into an [`Operand`].
///
/// Implemented for expressions, columns, functions, queries and every
/// literal type; `None` becomes a literal NULL.
pub trait IntoOperand {
    /// Converts `self` into an operand.
    fn into_operand(self) -> Operand;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> Operand {
        self
    }
}

impl IntoOperand for Expression {
    fn into_operand(self) -> Operand {
        Operand::Expr(Box::new(self))
    }
}

impl<T> IntoOperand for Column<T> {
    fn into_operand(self) -> Operand {
        Operand::Column(self.erased())
    }
}

impl<T> IntoOperand for &Column<T> {
    fn into_operand(self) -> Operand {
        Operand::Column(self.erased())
    }
}

impl IntoOperand for Function {
    fn into_operand(self) -> Operand {
        Operand::Function(Box::new(self))
    }
}

impl IntoOperand for Query {
    fn into_operand(self) -> Operand {
        Operand::Query(Box::new(self))
    }
}

impl IntoOperand for Select {
    fn into_operand(self) -> Operand {
        Query::from(self).into_operand()
    }
}

impl IntoOperand for SetOperation {
    fn into_operand(self) -> Operand {
        Query::from(self).into_operand()
    }
}

impl<T: ToSqlValue> IntoOperand for Option<T> {
    fn into_operand(self) -> Operand {
        Operand::Value(self.to_sql_value())
    }
}

macro_rules! impl_into_operand_for_values {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoOperand for $ty {
                fn into_operand(self) -> Operand {
                    Operand::Value(self.to_sql_value())
                }
            }
        )+
    };
}

impl_into_operand_for_values!(
    SqlValue,
    &SqlValue,
    bool,
    i64,
    i32,
    i16,
    i8,
    u32,
    u16,
    u8,
    f64,
    f32,
    String,
    &str,
    &String,
    Vec<u8>,
    &[u8],
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
);

/// An operand that may stand next to a `Column<T>`.
///
/// Expressions, functions, subqueries and prebuilt [`Operand`]s fit every
/// column type. Columns fit columns of the same value type, and literals
/// fit as described on [`LiteralOf`].
pub trait OperandOf<T>: IntoOperand {}

impl<T> OperandOf<T> for Operand {}
impl<T> OperandOf<T> for Expression {}
impl<T> OperandOf<T> for Function {}
impl<T> OperandOf<T> for Query {}
impl<T> OperandOf<T> for Select {}
impl<T> OperandOf<T> for SetOperation {}
impl<T> OperandOf<T> for Column<T> {}
impl<T> OperandOf<T> for &Column<T> {}
impl<T: ToSqlValue> OperandOf<T> for Option<T> {}

macro_rules! literals_of {
    ($column:ty => $($literal:ty),+ $(,)?) => {
        $(
            impl LiteralOf<$column> for $literal {}
            impl OperandOf<$column> for $literal {}
        )+
    };
}

literals_of!(bool => bool);
literals_of!(i64 => i64);
literals_of!(i32 => i32);
literals_of!(i16 => i16);
literals_of!(i8 => i8);
literals_of!(u32 => u32);
literals_of!(u16 => u16);
literals_of!(u8 => u8);
literals_of!(f64 => f64);
literals_of!(f32 => f32);
literals_of!(String => String, &str, &String, Option<&str>);
literals_of!(Vec<u8> => Vec<u8>, &[u8]);
literals_of!(NaiveDate => NaiveDate);
literals_of!(NaiveTime => NaiveTime);
literals_of!(NaiveDateTime => NaiveDateTime);
literals_of!(SqlValue =>
    SqlValue, &SqlValue, bool, i64, i32, i16, i8, u32, u16, u8, f64, f32,
    String, &str, &String, Vec<u8>, &[u8], NaiveDate, NaiveTime, NaiveDateTime,
    Option<bool>, Option<i64>, Option<i32>, Option<i16>, Option<i8>, Option<u32>,
    Option<u16>, Option<u8>, Option<f64>, Option<f32>, Option<String>, Option<&str>,
    Option<Vec<u8>>, Option<NaiveDate>, Option<NaiveTime>, Option<NaiveDateTime>,
);

/// An operator node.
#[derive(Debug, Clone)]
pub struct Expression {
    operator: Operator,
    left: Option<Operand>,
    right: Option<Operand>,
    enclosing: bool,
    left_parens: bool,
    right_parens: bool,
}

impl Expression {
    /// Creates `left OP right`.
    ///
    /// A subquery on either side gets that side's parentheses flag.
    #[must_use]
    pub fn binary(left: impl IntoOperand, operator: Operator, right: impl IntoOperand) -> Self {
        let left = left.into_operand();
        let right = right.into_operand();
        Self {
            operator,
            left_parens: left.is_query(),
            right_parens: right.is_query(),
            left: Some(left),
            right: Some(right),
            enclosing: true,
        }
    }

    /// Creates `OP right`.
    #[must_use]
    pub fn prefix(operator: Operator, right: impl IntoOperand) -> Self {
        let right = right.into_operand();
        Self {
            operator,
            left: None,
            right_parens: right.is_query(),
            right: Some(right),
            enclosing: true,
            left_parens: false,
        }
    }

    /// Creates `left OP`.
    #[must_use]
    pub fn postfix(left: impl IntoOperand, operator: Operator) -> Self {
        let left = left.into_operand();
        Self {
            operator,
            left_parens: left.is_query(),
            left: Some(left),
            right: None,
            enclosing: true,
            right_parens: false,
        }
    }

    /// Overrides the three parenthesization flags.
    #[must_use]
    pub const fn parentheses(mut self, enclosing: bool, left: bool, right: bool) -> Self {
        self.enclosing = enclosing;
        self.left_parens = left;
        self.right_parens = right;
        self
    }

    /// Returns the operator.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the left operand.
    #[must_use]
    pub const fn left(&self) -> Option<&Operand> {
        self.left.as_ref()
    }

    /// Returns the right operand.
    #[must_use]
    pub const fn right(&self) -> Option<&Operand> {
        self.right.as_ref()
    }

    /// Whether the whole node renders inside parentheses.
    #[must_use]
    pub const fn is_enclosing(&self) -> bool {
        self.enclosing
    }

    /// Returns `(enclosing, left, right)`.
    #[must_use]
    pub const fn parentheses_flags(&self) -> (bool, bool, bool) {
        (self.enclosing, self.left_parens, self.right_parens)
    }
}

fn render_side(operand: &Operand, parens: bool) -> String {
    let sql = operand.to_sql();
    if parens {
        format!("({sql})")
    } else {
        sql
    }
}

impl Bindable for Expression {
    fn to_sql(&self) -> String {
        let keyword = self.operator.keyword();
        let body = match (&self.left, &self.right) {
            (Some(l), Some(r)) => format!(
                "{} {keyword} {}",
                render_side(l, self.left_parens),
                render_side(r, self.right_parens)
            ),
            (Some(l), None) => format!("{} {keyword}", render_side(l, self.left_parens)),
            (None, Some(r)) => format!("{keyword} {}", render_side(r, self.right_parens)),
            (None, None) => String::from(keyword),
        };
        if self.enclosing {
            format!("({body})")
        } else {
            body
        }
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        let mut values = self.left.as_ref().map(Bindable::bind_values).unwrap_or_default();
        if let Some(right) = &self.right {
            values.extend(right.bind_values());
        }
        values
    }
}

macro_rules! binary_factories {
    ($($(#[$doc:meta])* $name:ident => $op:ident;)+) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(left: impl IntoOperand, right: impl IntoOperand) -> Expression {
                Expression::binary(left, Operator::$op, right)
            }
        )+
    };
}

binary_factories! {
    /// `left + right`
    add => Add;
    /// `left - right`
    sub => Sub;
    /// `left * right`
    mul => Mul;
    /// `left / right`
    div => Div;
    /// `left % right`
    modulo => Mod;
    /// `left = right`
    eq => Eq;
    /// `left <> right`
    neq => Neq;
    /// `left > right`
    gt => Gt;
    /// `left >= right`
    ge => Ge;
    /// `left < right`
    lt => Lt;
    /// `left <= right`
    le => Le;
    /// `left AND right`
    and => And;
    /// `left OR right`
    or => Or;
    /// `left XOR right`
    xor => Xor;
    /// `left LIKE right`
    like => Like;
    /// `left & right`
    bit_and => BitAnd;
    /// `left | right`
    bit_or => BitOr;
    /// `left ^ right`
    bit_xor => BitXor;
}

/// `value BETWEEN (low AND high)`.
///
/// Neither the outer node nor the inner `AND` is enclosing; the range is
/// grouped by the right-side parentheses only.
#[must_use]
pub fn between(value: impl IntoOperand, low: impl IntoOperand, high: impl IntoOperand) -> Expression {
    let range = Expression::binary(low, Operator::And, high).parentheses(false, false, false);
    let value = value.into_operand();
    let left_parens = value.is_query();
    Expression::binary(value, Operator::Between, range).parentheses(false, left_parens, true)
}

fn membership(value: impl IntoOperand, operator: Operator, set: impl IntoOperand) -> Expression {
    let set = set.into_operand();
    let wrap_set = !matches!(set, Operand::List(_));
    let value = value.into_operand();
    let left_parens = value.is_query();
    Expression::binary(value, operator, set).parentheses(true, left_parens, wrap_set)
}

/// `value IN (set)`, where `set` is a subquery, a list or a single operand.
#[must_use]
pub fn is_in(value: impl IntoOperand, set: impl IntoOperand) -> Expression {
    membership(value, Operator::In, set)
}

/// `value NOT IN (set)`, where `set` is a subquery, a list or a single operand.
#[must_use]
pub fn not_in(value: impl IntoOperand, set: impl IntoOperand) -> Expression {
    membership(value, Operator::NotIn, set)
}

/// `operand IS NULL`
#[must_use]
pub fn is_null(operand: impl IntoOperand) -> Expression {
    Expression::postfix(operand, Operator::IsNull)
}

/// `operand IS NOT NULL`
#[must_use]
pub fn is_not_null(operand: impl IntoOperand) -> Expression {
    Expression::postfix(operand, Operator::IsNotNull)
}

fn subquery(operator: Operator, query: impl Into<Query>) -> Expression {
    let query: Query = query.into();
    Expression::prefix(operator, query).parentheses(false, false, true)
}

/// `EXISTS (query)`
#[must_use]
pub fn exists(query: impl Into<Query>) -> Expression {
    subquery(Operator::Exists, query)
}

/// `NOT EXISTS (query)`
#[must_use]
pub fn not_exists(query: impl Into<Query>) -> Expression {
    subquery(Operator::NotExists, query)
}

/// `SOME (query)`
#[must_use]
pub fn some(query: impl Into<Query>) -> Expression {
    subquery(Operator::SomeOf, query)
}

/// `ANY (query)`
#[must_use]
pub fn any(query: impl Into<Query>) -> Expression {
    subquery(Operator::AnyOf, query)
}

/// `ALL (query)`
#[must_use]
pub fn all(query: impl Into<Query>) -> Expression {
    subquery(Operator::AllOf, query)
}

// Method forms of the factories. Columns are taken by reference so they
// stay reusable.

#[allow(clippy::should_implement_trait)]
impl Expression {
    /// `self + rhs`
    #[must_use]
    pub fn add(self, rhs: impl IntoOperand) -> Self {
        add(self, rhs)
    }

    /// `self - rhs`
    #[must_use]
    pub fn sub(self, rhs: impl IntoOperand) -> Self {
        sub(self, rhs)
    }

    /// `self * rhs`
    #[must_use]
    pub fn mul(self, rhs: impl IntoOperand) -> Self {
        mul(self, rhs)
    }

    /// `self / rhs`
    #[must_use]
    pub fn div(self, rhs: impl IntoOperand) -> Self {
        div(self, rhs)
    }

    /// `self % rhs`
    #[must_use]
    pub fn modulo(self, rhs: impl IntoOperand) -> Self {
        modulo(self, rhs)
    }

    /// `self = rhs`
    #[must_use]
    pub fn eq(self, rhs: impl IntoOperand) -> Self {
        eq(self, rhs)
    }

    /// `self <> rhs`
    #[must_use]
    pub fn neq(self, rhs: impl IntoOperand) -> Self {
        neq(self, rhs)
    }

    /// `self > rhs`
    #[must_use]
    pub fn gt(self, rhs: impl IntoOperand) -> Self {
        gt(self, rhs)
    }

    /// `self >= rhs`
    #[must_use]
    pub fn ge(self, rhs: impl IntoOperand) -> Self {
        ge(self, rhs)
    }

    /// `self < rhs`
    #[must_use]
    pub fn lt(self, rhs: impl IntoOperand) -> Self {
        lt(self, rhs)
    }

    /// `self <= rhs`
    #[must_use]
    pub fn le(self, rhs: impl IntoOperand) -> Self {
        le(self, rhs)
    }

    /// `self AND rhs`
    #[must_use]
    pub fn and(self, rhs: impl IntoOperand) -> Self {
        and(self, rhs)
    }

    /// `self OR rhs`
    #[must_use]
    pub fn or(self, rhs: impl IntoOperand) -> Self {
        or(self, rhs)
    }

    /// `self XOR rhs`
    #[must_use]
    pub fn xor(self, rhs: impl IntoOperand) -> Self {
        xor(self, rhs)
    }

    /// `self LIKE rhs`
    #[must_use]
    pub fn like(self, rhs: impl IntoOperand) -> Self {
        like(self, rhs)
    }

    /// `self & rhs`
    #[must_use]
    pub fn bit_and(self, rhs: impl IntoOperand) -> Self {
        bit_and(self, rhs)
    }

    /// `self | rhs`
    #[must_use]
    pub fn bit_or(self, rhs: impl IntoOperand) -> Self {
        bit_or(self, rhs)
    }

    /// `self ^ rhs`
    #[must_use]
    pub fn bit_xor(self, rhs: impl IntoOperand) -> Self {
        bit_xor(self, rhs)
    }

    /// `self BETWEEN (low AND high)`
    #[must_use]
    pub fn between(self, low: impl IntoOperand, high: impl IntoOperand) -> Self {
        between(self, low, high)
    }

    /// `self IN (set)`
    #[must_use]
    pub fn is_in(self, set: impl IntoOperand) -> Self {
        is_in(self, set)
    }

    /// `self NOT IN (set)`
    #[must_use]
    pub fn not_in(self, set: impl IntoOperand) -> Self {
        not_in(self, set)
    }

    /// `self IS NULL`
    #[must_use]
    pub fn is_null(self) -> Self {
        is_null(self)
    }

    /// `self IS NOT NULL`
    #[must_use]
    pub fn is_not_null(self) -> Self {
        is_not_null(self)
    }
}

#[allow(clippy::should_implement_trait)]
impl<T> Column<T> {
    /// `self + rhs`
    #[must_use]
    pub fn add(&self, rhs: impl OperandOf<T>) -> Expression {
        add(self, rhs)
    }

    /// `self - rhs`
    #[must_use]
    pub fn sub(&self, rhs: impl OperandOf<T>) -> Expression {
        sub(self, rhs)
    }

    /// `self * rhs`
    #[must_use]
    pub fn mul(&self, rhs: impl OperandOf<T>) -> Expression {
        mul(self, rhs)
    }

    /// `self / rhs`
    #[must_use]
    pub fn div(&self, rhs: impl OperandOf<T>) -> Expression {
        div(self, rhs)
    }

    /// `self % rhs`
    #[must_use]
    pub fn modulo(&self, rhs: impl OperandOf<T>) -> Expression {
        modulo(self, rhs)
    }

    /// `self = rhs`
    #[must_use]
    pub fn eq(&self, rhs: impl OperandOf<T>) -> Expression {
        eq(self, rhs)
    }

    /// `self <> rhs`
    #[must_use]
    pub fn neq(&self, rhs: impl OperandOf<T>) -> Expression {
        neq(self, rhs)
    }

    /// `self > rhs`
    #[must_use]
    pub fn gt(&self, rhs: impl OperandOf<T>) -> Expression {
        gt(self, rhs)
    }

    /// `self >= rhs`
    #[must_use]
    pub fn ge(&self, rhs: impl OperandOf<T>) -> Expression {
        ge(self, rhs)
    }

    /// `self < rhs`
    #[must_use]
    pub fn lt(&self, rhs: impl OperandOf<T>) -> Expression {
        lt(self, rhs)
    }

    /// `self <= rhs`
    #[must_use]
    pub fn le(&self, rhs: impl OperandOf<T>) -> Expression {
        le(self, rhs)
    }

    /// `self LIKE pattern`
    #[must_use]
    pub fn like(&self, pattern: impl OperandOf<T>) -> Expression {
        like(self, pattern)
    }

    /// `self & rhs`
    #[must_use]
    pub fn bit_and(&self, rhs: impl OperandOf<T>) -> Expression {
        bit_and(self, rhs)
    }

    /// `self | rhs`
    #[must_use]
    pub fn bit_or(&self, rhs: impl OperandOf<T>) -> Expression {
        bit_or(self, rhs)
    }

    /// `self ^ rhs`
    #[must_use]
    pub fn bit_xor(&self, rhs: impl OperandOf<T>) -> Expression {
        bit_xor(self, rhs)
    }

    /// `self BETWEEN (low AND high)`
    #[must_use]
    pub fn between(&self, low: impl OperandOf<T>, high: impl OperandOf<T>) -> Expression {
        between(self, low, high)
    }

    /// `self IN (set)`
    #[must_use]
    pub fn is_in(&self, set: impl OperandOf<T>) -> Expression {
        is_in(self, set)
    }

    /// `self NOT IN (set)`
    #[must_use]
    pub fn not_in(&self, set: impl OperandOf<T>) -> Expression {
        not_in(self, set)
    }

    /// `self IS NULL`
    #[must_use]
    pub fn is_null(&self) -> Expression {
        is_null(self)
    }

    /// `self IS NOT NULL`
    #[must_use]
    pub fn is_not_null(&self) -> Expression {
        is_not_null(self)
    }
}
