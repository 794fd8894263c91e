//! One-stop wiring of both backends.

use qof_predicate::{Predicate, PredicateRenderer};
use qof_query::{FilterCompiler, FilterCriteria, QueryResult};
use qof_sql::{SqlConfig, SqlRenderer};
use tracing::info;

/// A query-text compiler and a predicate compiler, configured once and shared.
///
/// `FilterConverters` is `Send + Sync`; put it behind an `Arc` to share it
/// between threads.
///
/// ```rust
/// use qof::{FilterConverters, SqlConfig};
///
/// let converters = FilterConverters::builder()
///     .sql_config(SqlConfig::builder().parameter("u").build().unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(converters.sql_config().parameter, "u");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConverters {
    sql: FilterCompiler<SqlRenderer>,
    predicate: FilterCompiler<PredicateRenderer>,
}

impl FilterConverters {
    /// Converters with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder.
    pub fn builder() -> FilterConvertersBuilder {
        FilterConvertersBuilder::default()
    }

    /// Converters configured from `QOF_SQL_*` environment variables.
    pub fn from_env() -> QueryResult<Self> {
        Self::builder().sql_config(SqlConfig::from_env()?).build()
    }

    /// The query-text configuration.
    pub fn sql_config(&self) -> &SqlConfig {
        self.sql.renderer().config()
    }

    /// Compile `criteria` to query text, prefixing properties with
    /// `parameter_name` unless it is empty.
    pub fn to_sql<S: 'static, F>(
        &self,
        criteria: &FilterCriteria<'_, S, F>,
        parameter_name: &str,
    ) -> QueryResult<String> {
        self.sql.compile(criteria, parameter_name)
    }

    /// Compile `criteria` to query text with the configured parameter.
    pub fn to_sql_default<S: 'static, F>(
        &self,
        criteria: &FilterCriteria<'_, S, F>,
    ) -> QueryResult<String> {
        self.sql.compile(criteria, &self.sql_config().parameter)
    }

    /// Compile `criteria` to an in-memory predicate.
    pub fn to_predicate<S: 'static, F>(
        &self,
        criteria: &FilterCriteria<'_, S, F>,
        parameter_name: &str,
    ) -> QueryResult<Predicate<S>> {
        self.predicate.compile(criteria, parameter_name)
    }
}

/// Builder for [`FilterConverters`].
#[derive(Debug, Clone, Default)]
pub struct FilterConvertersBuilder {
    sql_config: SqlConfig,
}

impl FilterConvertersBuilder {
    /// Use this query-text configuration.
    pub fn sql_config(mut self, config: SqlConfig) -> Self {
        self.sql_config = config;
        self
    }

    /// Validate the configuration and build the converters.
    pub fn build(self) -> QueryResult<FilterConverters> {
        self.sql_config.validate()?;
        info!(
            parameter = %self.sql_config.parameter,
            quote_identifiers = self.sql_config.quote_identifiers,
            "filter converters configured"
        );

        Ok(FilterConverters {
            sql: FilterCompiler::new(SqlRenderer::new(self.sql_config)),
            predicate: FilterCompiler::new(PredicateRenderer),
        })
    }
}
