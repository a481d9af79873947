//! Builder configuration.
//!
//! The active dialect is an explicit value passed to every dialect-specific
//! constructor instead of process-wide state.
//!
//! ```rust
//! use quill_sql_core::config::BuilderConfig;
//! use quill_sql_core::dialect::DialectKind;
//!
//! let config = BuilderConfig::from_json(r#"{ "dialect": "mysql" }"#).unwrap();
//! assert_eq!(config.dialect(), Some(DialectKind::MySql));
//! assert!(config.require(DialectKind::PostgreSql).is_err());
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dialect::{Dialect, DialectKind};
use crate::error::{Error, Result};

/// Settings read by statement constructors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    dialect: Option<DialectKind>,
}

impl BuilderConfig {
    /// Creates a configuration with no dialect set.
    #[must_use]
    pub const fn new() -> Self {
        Self { dialect: None }
    }

    /// Creates a configuration for the given dialect.
    #[must_use]
    pub const fn with_dialect(dialect: DialectKind) -> Self {
        Self {
            dialect: Some(dialect),
        }
    }

    /// Creates a configuration selecting the tag of `dialect`.
    ///
    /// Dialects without a tag leave the dialect unset.
    #[must_use]
    pub fn for_dialect<D: Dialect + ?Sized>(dialect: &D) -> Self {
        Self {
            dialect: dialect.kind(),
        }
    }

    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the active dialect.
    #[must_use]
    pub const fn dialect(&self) -> Option<DialectKind> {
        self.dialect
    }

    /// Sets the active dialect.
    pub fn set_dialect(&mut self, dialect: DialectKind) {
        self.dialect = Some(dialect);
    }

    /// Checks that `required` is the active dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnspecifiedDialect`] if no dialect is set and
    /// [`Error::UnsupportedDialect`] if another dialect is active.
    pub fn require(&self, required: DialectKind) -> Result<()> {
        match self.dialect {
            Some(active) if active == required => Ok(()),
            Some(active) => {
                warn!(%required, %active, "dialect-specific statement rejected");
                Err(Error::UnsupportedDialect { required, active })
            }
            None => {
                warn!(%required, "dialect-specific statement built without a dialect");
                Err(Error::UnspecifiedDialect { required })
            }
        }
    }
}
