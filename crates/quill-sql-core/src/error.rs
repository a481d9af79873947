//! Error types for statement construction and execution.

use std::fmt;

use crate::builder::value::ValueError;
use crate::dialect::DialectKind;

/// Opaque error raised by the database driver.
///
/// The core never inspects these; they are handed back to the caller as-is.
#[derive(Debug)]
pub struct BackendError(Box<dyn std::error::Error + Send + Sync>);

impl BackendError {
    /// Wraps a driver error.
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }

    /// Returns the wrapped driver error.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.0
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

/// Errors produced while building or executing statements.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dialect-specific statement was built with no dialect configured.
    #[error("no SQL dialect configured; {required} is required")]
    UnspecifiedDialect {
        /// Dialect the statement needs.
        required: DialectKind,
    },

    /// A dialect-specific statement was built under another dialect.
    #[error("statement requires the {required} dialect but {active} is active")]
    UnsupportedDialect {
        /// Dialect the statement needs.
        required: DialectKind,
        /// Dialect currently configured.
        active: DialectKind,
    },

    /// The active dialect does not implement a set operator.
    #[error("operator {operator} is not supported by the {dialect} dialect")]
    UnsupportedOperator {
        /// Rendered operator keyword.
        operator: &'static str,
        /// Name of the dialect that rejected it.
        dialect: &'static str,
    },

    /// A statement is missing a clause it cannot be executed without.
    #[error("{statement} statement has no {missing}")]
    EmptyStatement {
        /// Statement keyword.
        statement: &'static str,
        /// What the statement lacks.
        missing: &'static str,
    },

    /// Two subqueries combined with a set operator project different widths.
    #[error("set operation over subqueries with {left} and {right} columns")]
    ColumnCountMismatch {
        /// Columns projected by the left subquery.
        left: usize,
        /// Columns projected by the right subquery.
        right: usize,
    },

    /// A row type does not map a column of the target table.
    #[error("row type {tuple} has no field mapped to column {table}.{column}")]
    MissingColumnMapping {
        /// Rust type name of the row.
        tuple: &'static str,
        /// Target table.
        table: String,
        /// Unmapped column.
        column: String,
    },

    /// A column without table, name or type was used to read row values.
    #[error("column {column} is not well defined (table, name and type are required)")]
    IllDefinedColumn {
        /// Rendered column reference.
        column: String,
    },

    /// A fetched value could not be assigned to a row field.
    #[error("cannot read column {column}: {source}")]
    Conversion {
        /// Column being read.
        column: String,
        /// Underlying conversion failure.
        #[source]
        source: ValueError,
    },

    /// Error raised by the database driver.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Configuration document could not be parsed.
    #[error("invalid builder configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Wraps a driver error.
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(BackendError::new(err))
    }

    /// Returns `true` for errors raised while constructing a statement.
    #[must_use]
    pub const fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::UnspecifiedDialect { .. }
                | Self::UnsupportedDialect { .. }
                | Self::UnsupportedOperator { .. }
                | Self::EmptyStatement { .. }
                | Self::ColumnCountMismatch { .. }
                | Self::MissingColumnMapping { .. }
        )
    }
}

/// Result type for quill-sql operations.
pub type Result<T> = std::result::Result<T, Error>;
