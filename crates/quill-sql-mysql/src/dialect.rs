//! MySQL dialect implementation.

use quill_sql_core::builder::SetOperator;
use quill_sql_core::dialect::{Dialect, DialectKind};

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn kind(&self) -> Option<DialectKind> {
        Some(DialectKind::MySql)
    }

    fn supports_set_operator(&self, op: SetOperator) -> bool {
        op == SetOperator::Union // INTERSECT and EXCEPT only since 8.0.31
    }

    fn supports_insert_ignore(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_sql_core::builder::{Bindable, Insert};
    use quill_sql_core::config::BuilderConfig;
    use quill_sql_core::Table;

    use crate::AlterMySql;

    #[test]
    fn test_mysql_dialect() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.kind(), Some(DialectKind::MySql));
        assert!(dialect.supports_insert_ignore());
        assert!(dialect.supports_set_operator(SetOperator::Union));
        assert!(!dialect.supports_set_operator(SetOperator::Except));
    }

    #[test]
    fn test_mysql_dialect_unlocks_mysql_statements() {
        let dialect = MySqlDialect::new();
        let config = BuilderConfig::for_dialect(&dialect);
        assert_eq!(config.dialect(), Some(DialectKind::MySql));
        assert!(AlterMySql::new(&config, &Table::new("Person")).is_ok());

        let person = Table::new("Person");
        let insert = Insert::new(&person).ignore_with(&dialect).unwrap().values([1]);
        assert_eq!(insert.to_sql(), "INSERT IGNORE INTO Person VALUES (?)");
        assert!(Insert::replace_with(&dialect, &person).is_ok());
    }
}
