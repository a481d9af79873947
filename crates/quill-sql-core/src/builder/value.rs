//! SQL values and parameter handling.
//!
//! Every literal that reaches a statement is carried as a [`SqlValue`] and
//! bound positionally, so user input never ends up inside the SQL text.
//! The only exception is [`SqlValue::to_sql_inline`], used for `DEFAULT`
//! clauses that most backends refuse to parameterize.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A SQL value that can be used as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Date and time without time zone.
    DateTime(NaiveDateTime),
}

impl SqlValue {
    /// Returns the SQL representation for inline use (escaped).
    ///
    /// **Warning**: Prefer using parameterized queries instead.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Int(n) => format!("{n}"),
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => quote_text(s),
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
            Self::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Self::Time(t) => format!("'{}'", t.format("%H:%M:%S")),
            Self::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }

    /// Returns the parameter placeholder.
    #[must_use]
    pub const fn placeholder() -> &'static str {
        "?"
    }

    /// Returns `true` for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in conversion errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) => "datetime",
        }
    }
}

/// Quotes a string literal, doubling embedded single quotes.
pub(crate) fn quote_text(s: &str) -> String {
    let escaped = s.replace('\'', "''");
    format!("'{escaped}'")
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for &SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self.clone()
    }
}

macro_rules! impl_to_sql_value {
    ($($ty:ty => |$v:ident| $body:expr;)+) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    let $v = self;
                    $body
                }
            }
        )+
    };
}

impl_to_sql_value! {
    bool => |v| SqlValue::Bool(v);
    i64 => |v| SqlValue::Int(v);
    i32 => |v| SqlValue::Int(i64::from(v));
    i16 => |v| SqlValue::Int(i64::from(v));
    i8 => |v| SqlValue::Int(i64::from(v));
    u32 => |v| SqlValue::Int(i64::from(v));
    u16 => |v| SqlValue::Int(i64::from(v));
    u8 => |v| SqlValue::Int(i64::from(v));
    f64 => |v| SqlValue::Float(v);
    f32 => |v| SqlValue::Float(f64::from(v));
    String => |v| SqlValue::Text(v);
    &str => |v| SqlValue::Text(String::from(v));
    &String => |v| SqlValue::Text(v.clone());
    Vec<u8> => |v| SqlValue::Blob(v);
    &[u8] => |v| SqlValue::Blob(v.to_vec());
    NaiveDate => |v| SqlValue::Date(v);
    NaiveTime => |v| SqlValue::Time(v);
    NaiveDateTime => |v| SqlValue::DateTime(v);
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

/// A literal that fits a column holding `T` values.
///
/// `T` itself and `Option<T>` always qualify; `&str` fits `String`
/// columns and byte slices fit `Vec<u8>` columns. Untyped columns
/// (`T = SqlValue`) take any literal.
pub trait LiteralOf<T>: ToSqlValue {}

impl<T: ToSqlValue> LiteralOf<T> for Option<T> {}

/// Failure to turn a [`SqlValue`] into a Rust value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// SQL NULL reached a field that cannot hold it.
    #[error("unexpected NULL for a non-optional field")]
    UnexpectedNull,
    /// The value has the wrong shape for the target type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Target type.
        expected: &'static str,
        /// Variant actually received.
        found: &'static str,
    },
    /// The value does not fit in the target type.
    #[error("value {value} does not fit in {target}")]
    OutOfRange {
        /// Target type.
        target: &'static str,
        /// Offending value.
        value: i64,
    },
}

/// Trait for types that can be read back from SQL values.
///
/// SQL NULL converts to `None` for `Option<T>` and is an error for every
/// other target.
pub trait FromSqlValue: Sized {
    /// Converts a `SqlValue` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when the value is NULL, of another type, or
    /// out of range for `Self`.
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError>;
}

const fn mismatch(expected: &'static str, found: &SqlValue) -> ValueError {
    if found.is_null() {
        ValueError::UnexpectedNull
    } else {
        ValueError::TypeMismatch {
            expected,
            found: found.kind(),
        }
    }
}

impl FromSqlValue for SqlValue {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql_value(other).map(Some),
        }
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Bool(b) => Ok(b),
            SqlValue::Int(n) => Ok(n != 0),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Int(n) => Ok(n),
            SqlValue::Bool(b) => Ok(Self::from(b)),
            other => Err(mismatch("i64", &other)),
        }
    }
}

macro_rules! impl_from_sql_value_int {
    ($($ty:ty),+) => {
        $(
            impl FromSqlValue for $ty {
                fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
                    let n = i64::from_sql_value(value).map_err(|err| match err {
                        ValueError::TypeMismatch { found, .. } => ValueError::TypeMismatch {
                            expected: stringify!($ty),
                            found,
                        },
                        other => other,
                    })?;
                    <$ty>::try_from(n).map_err(|_| ValueError::OutOfRange {
                        target: stringify!($ty),
                        value: n,
                    })
                }
            }
        )+
    };
}

impl_from_sql_value_int!(i32, i16, i8, u64, u32, u16, u8);

impl FromSqlValue for f64 {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Float(f) => Ok(f),
            #[allow(clippy::cast_precision_loss)]
            SqlValue::Int(n) => Ok(n as Self),
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl FromSqlValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        f64::from_sql_value(value).map(|f| f as Self)
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Text(s) => Ok(s),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl FromSqlValue for Vec<u8> {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Blob(b) => Ok(b),
            SqlValue::Text(s) => Ok(s.into_bytes()),
            other => Err(mismatch("blob", &other)),
        }
    }
}

impl FromSqlValue for NaiveDate {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Date(d) => Ok(d),
            SqlValue::DateTime(dt) => Ok(dt.date()),
            other => Err(mismatch("date", &other)),
        }
    }
}

impl FromSqlValue for NaiveTime {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Time(t) => Ok(t),
            SqlValue::DateTime(dt) => Ok(dt.time()),
            other => Err(mismatch("time", &other)),
        }
    }
}

impl FromSqlValue for NaiveDateTime {
    fn from_sql_value(value: SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::DateTime(dt) => Ok(dt),
            other => Err(mismatch("datetime", &other)),
        }
    }
}
