//! PostgreSQL dialect implementation.

use quill_sql_core::dialect::{Dialect, DialectKind};

/// PostgreSQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn kind(&self) -> Option<DialectKind> {
        Some(DialectKind::PostgreSql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_sql_core::builder::{Insert, SetOperator};
    use quill_sql_core::config::BuilderConfig;
    use quill_sql_core::{Error, Table};

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.name(), "postgresql");
        assert_eq!(dialect.kind(), Some(DialectKind::PostgreSql));
        assert!(!dialect.supports_insert_ignore());
        assert!(dialect.supports_set_operator(SetOperator::Intersect));
        assert!(dialect.supports_set_operator(SetOperator::Except));
    }

    #[test]
    fn test_postgres_rejects_mysql_insert_verbs() {
        let dialect = PostgresDialect::new();
        assert_eq!(
            BuilderConfig::for_dialect(&dialect).dialect(),
            Some(DialectKind::PostgreSql)
        );
        let person = Table::new("Person");
        let err = Insert::new(&person).ignore_with(&dialect).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedOperator {
                operator: "INSERT IGNORE",
                dialect: "postgresql"
            }
        ));
        assert!(Insert::replace_with(&dialect, &person).is_err());
    }
}
