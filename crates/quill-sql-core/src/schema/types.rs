//! Column type descriptors.
//!
//! A [`SqlType`] knows the keyword used in `CREATE TABLE` and how to read a
//! value of its type back from a row cursor.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::builder::value::{quote_text, SqlValue};
use crate::error::Result;
use crate::exec::RowCursor;

/// The logical type of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    /// `INTEGER`, optionally with a display width.
    Integer(Option<u32>),
    /// `TINYINT(n)`.
    TinyInt(u32),
    /// Boolean stored as `TINYINT(1)`.
    Bool,
    /// Fixed-width `CHAR(n)`.
    Char(u32),
    /// Variable-width `VARCHAR(n)`.
    Varchar(u32),
    /// `ENUM ('a', 'b', ...)`.
    Enum(Vec<String>),
    /// `DATE`.
    Date,
    /// `TIME`.
    Time,
    /// `DATETIME`.
    Datetime,
    /// `TIMESTAMP`.
    Timestamp,
    /// `TEXT`.
    Text,
    /// `DOUBLE`.
    Double,
    /// `BLOB`.
    Blob,
}

impl SqlType {
    /// Creates an `ENUM` type from its variants.
    #[must_use]
    pub fn enumeration<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(variants.into_iter().map(Into::into).collect())
    }

    /// Returns the SQL type keyword.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Integer(None) => String::from("INTEGER"),
            Self::Integer(Some(n)) => format!("INTEGER({n})"),
            Self::TinyInt(n) => format!("TINYINT({n})"),
            Self::Bool => String::from("TINYINT(1)"),
            Self::Char(n) => format!("CHAR({n})"),
            Self::Varchar(n) => format!("VARCHAR({n})"),
            Self::Enum(variants) => {
                let quoted: Vec<String> = variants.iter().map(|v| quote_text(v)).collect();
                format!("ENUM ({})", quoted.join(", "))
            }
            Self::Date => String::from("DATE"),
            Self::Time => String::from("TIME"),
            Self::Datetime => String::from("DATETIME"),
            Self::Timestamp => String::from("TIMESTAMP"),
            Self::Text => String::from("TEXT"),
            Self::Double => String::from("DOUBLE"),
            Self::Blob => String::from("BLOB"),
        }
    }

    /// Reads the value labelled `label` from the current row and normalizes
    /// it to this type.
    ///
    /// SQL NULL is always returned as [`SqlValue::Null`]. Values that cannot
    /// be normalized are returned unchanged and rejected later by the field
    /// conversion.
    ///
    /// # Errors
    ///
    /// Propagates the cursor's error.
    pub fn extract<R: RowCursor + ?Sized>(&self, row: &R, label: &str) -> Result<SqlValue> {
        Ok(self.normalize(row.value(label)?))
    }

    /// Normalizes a raw driver value to this type.
    #[must_use]
    pub fn normalize(&self, raw: SqlValue) -> SqlValue {
        match (self, raw) {
            (_, SqlValue::Null) => SqlValue::Null,
            (Self::Integer(_) | Self::TinyInt(_), SqlValue::Bool(b)) => SqlValue::Int(i64::from(b)),
            (Self::Bool, SqlValue::Int(n)) => SqlValue::Bool(n != 0),
            (Self::Double, SqlValue::Int(n)) => {
                #[allow(clippy::cast_precision_loss)]
                let f = n as f64;
                SqlValue::Float(f)
            }
            (Self::Char(_) | Self::Varchar(_) | Self::Enum(_) | Self::Text, SqlValue::Blob(b)) => {
                match String::from_utf8(b) {
                    Ok(s) => SqlValue::Text(s),
                    Err(err) => SqlValue::Blob(err.into_bytes()),
                }
            }
            (Self::Blob, SqlValue::Text(s)) => SqlValue::Blob(s.into_bytes()),
            (Self::Date, SqlValue::Text(s)) => parse_date(&s).map_or(SqlValue::Text(s), SqlValue::Date),
            (Self::Date, SqlValue::DateTime(dt)) => SqlValue::Date(dt.date()),
            (Self::Time, SqlValue::Text(s)) => parse_time(&s).map_or(SqlValue::Text(s), SqlValue::Time),
            (Self::Datetime | Self::Timestamp, SqlValue::Text(s)) => {
                parse_datetime(&s).map_or(SqlValue::Text(s), SqlValue::DateTime)
            }
            (Self::Datetime | Self::Timestamp, SqlValue::Date(d)) => d
                .and_hms_opt(0, 0, 0)
                .map_or(SqlValue::Date(d), SqlValue::DateTime),
            (_, other) => other,
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f").ok()
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}
