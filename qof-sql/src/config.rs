//! Configuration for the query-text backend.
//!
//! ```toml
//! parameter = "u"
//! datetime_format = "%Y-%m-%d %H:%M:%S"
//! quote_identifiers = true
//! ```

use std::fmt::Write;

use chrono::NaiveDateTime;
use qof_query::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default date-time literal format.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Rendering options for [`SqlRenderer`](crate::SqlRenderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SqlConfig {
    /// Record parameter used when the caller does not name one. Empty means
    /// unprefixed property names.
    pub parameter: String,

    /// `chrono` format string for date-time literals.
    pub datetime_format: String,

    /// Condition emitted when no criterion applies.
    pub always_true: String,

    /// Condition emitted for `IN` with an empty list.
    pub always_false: String,

    /// Quote reserved or unusual identifiers with `"`.
    pub quote_identifiers: bool,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            parameter: String::new(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            always_true: "1 = 1".to_string(),
            always_false: "1 = 0".to_string(),
            quote_identifiers: false,
        }
    }
}

impl SqlConfig {
    /// Start a builder from the defaults.
    pub fn builder() -> SqlConfigBuilder {
        SqlConfigBuilder::default()
    }

    /// Parse configuration from a TOML string. Missing keys keep their
    /// defaults.
    pub fn from_toml_str(content: &str) -> QueryResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            QueryError::invalid_configuration(format!("malformed SQL configuration: {}", e.message()))
                .with_source(e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from `QOF_SQL_*` environment variables.
    ///
    /// - `QOF_SQL_PARAMETER`
    /// - `QOF_SQL_DATETIME_FORMAT`
    /// - `QOF_SQL_ALWAYS_TRUE`
    /// - `QOF_SQL_ALWAYS_FALSE`
    /// - `QOF_SQL_QUOTE_IDENTIFIERS` (`true`/`false`/`1`/`0`)
    pub fn from_env() -> QueryResult<Self> {
        info!("Loading SQL configuration from QOF_SQL_* variables");
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> QueryResult<Self> {
        let mut config = Self::default();

        if let Some(parameter) = lookup("QOF_SQL_PARAMETER") {
            config.parameter = parameter;
        }
        if let Some(format) = lookup("QOF_SQL_DATETIME_FORMAT") {
            config.datetime_format = format;
        }
        if let Some(literal) = lookup("QOF_SQL_ALWAYS_TRUE") {
            config.always_true = literal;
        }
        if let Some(literal) = lookup("QOF_SQL_ALWAYS_FALSE") {
            config.always_false = literal;
        }
        if let Some(flag) = lookup("QOF_SQL_QUOTE_IDENTIFIERS") {
            config.quote_identifiers = match flag.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(QueryError::invalid_configuration(format!(
                        "QOF_SQL_QUOTE_IDENTIFIERS must be a boolean, got '{}'",
                        flag
                    )));
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that every literal is usable.
    pub fn validate(&self) -> QueryResult<()> {
        if self.always_true.trim().is_empty() {
            return Err(QueryError::invalid_configuration(
                "always_true must not be empty",
            ));
        }
        if self.always_false.trim().is_empty() {
            return Err(QueryError::invalid_configuration(
                "always_false must not be empty",
            ));
        }
        // Offset specifiers parse but cannot format a naive date-time
        let mut sample = String::new();
        if self.datetime_format.is_empty()
            || write!(sample, "{}", NaiveDateTime::default().format(&self.datetime_format)).is_err()
        {
            return Err(QueryError::invalid_configuration(format!(
                "'{}' is not a valid date-time format",
                self.datetime_format
            ))
            .with_help("Use chrono strftime syntax, e.g. %Y-%m-%d %H:%M:%S"));
        }
        Ok(())
    }
}

/// Builder for [`SqlConfig`].
#[derive(Debug, Clone, Default)]
pub struct SqlConfigBuilder {
    config: SqlConfig,
}

impl SqlConfigBuilder {
    /// Set the default record parameter.
    pub fn parameter(mut self, parameter: impl Into<String>) -> Self {
        self.config.parameter = parameter.into();
        self
    }

    /// Set the date-time literal format.
    pub fn datetime_format(mut self, format: impl Into<String>) -> Self {
        self.config.datetime_format = format.into();
        self
    }

    /// Set the always-true condition.
    pub fn always_true(mut self, literal: impl Into<String>) -> Self {
        self.config.always_true = literal.into();
        self
    }

    /// Set the always-false condition.
    pub fn always_false(mut self, literal: impl Into<String>) -> Self {
        self.config.always_false = literal.into();
        self
    }

    /// Enable or disable identifier quoting.
    pub fn quote_identifiers(mut self, enabled: bool) -> Self {
        self.config.quote_identifiers = enabled;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> QueryResult<SqlConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
