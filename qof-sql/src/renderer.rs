//! Rendering of criteria as query text.

use std::fmt::Write;

use qof_query::{
    CollectionRef, Criterion, FilterValue, GroupScope, Operator, QueryError, QueryResult,
    RenderCapability,
};

use crate::config::SqlConfig;
use crate::quote_identifier;

const BACKEND: &str = "sql";

/// Renders criteria trees as `WHERE`-clause text.
///
/// ```rust
/// use qof_query::RenderCapability;
/// use qof_sql::SqlRenderer;
///
/// let renderer = SqlRenderer::default();
/// let both = renderer.and("A = 1".to_string(), "B = 2".to_string());
/// assert_eq!(both, "A = 1 AND B = 2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlRenderer {
    config: SqlConfig,
}

impl SqlRenderer {
    /// Create a renderer with the given configuration.
    pub fn new(config: SqlConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SqlConfig {
        &self.config
    }

    fn identifier(&self, name: &str) -> String {
        if self.config.quote_identifiers {
            quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    fn column(&self, param: &str, property: &str) -> String {
        if param.trim().is_empty() {
            self.identifier(property)
        } else {
            format!("{}.{}", self.identifier(param), self.identifier(property))
        }
    }

    /// Render a scalar value as a literal.
    ///
    /// Non-finite floats and lists have no literal form. A date-time that
    /// the configured format cannot express is a configuration error.
    pub fn literal(&self, value: &FilterValue) -> QueryResult<String> {
        Ok(match value {
            FilterValue::Null => "NULL".to_string(),
            FilterValue::Bool(true) => "TRUE".to_string(),
            FilterValue::Bool(false) => "FALSE".to_string(),
            FilterValue::Int(i) => i.to_string(),
            FilterValue::Float(f) if !f.is_finite() => {
                return Err(QueryError::unrenderable_value(
                    BACKEND,
                    format!("the non-finite number {}", f),
                ));
            }
            FilterValue::Float(f) => f.to_string(),
            FilterValue::Decimal(d) => d.to_string(),
            FilterValue::String(s) => quote_string(s),
            FilterValue::DateTime(dt) => {
                let mut out = String::from("'");
                write!(out, "{}", dt.format(&self.config.datetime_format)).map_err(|_| {
                    QueryError::invalid_configuration(format!(
                        "'{}' cannot format date-time {}",
                        self.config.datetime_format, dt
                    ))
                })?;
                out.push('\'');
                out
            }
            FilterValue::Uuid(u) => format!("'{}'", u),
            FilterValue::List(_) => {
                return Err(QueryError::unrenderable_value(BACKEND, "a list as a single value"));
            }
        })
    }

    fn list(&self, items: &[FilterValue]) -> QueryResult<String> {
        let rendered = items
            .iter()
            .map(|item| self.literal(item))
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }
}

impl RenderCapability for SqlRenderer {
    type Output = String;
    type Param = String;
    type Compiled<S: 'static> = String;

    fn identity(&self) -> String {
        String::new()
    }

    fn is_identity(&self, condition: &String) -> bool {
        condition.is_empty()
    }

    fn and(&self, left: String, right: String) -> String {
        format!("{} AND {}", left, right)
    }

    fn or(&self, left: String, right: String) -> String {
        format!("{} OR {}", left, right)
    }

    fn comparison(&self, criterion: &Criterion, param: &String) -> QueryResult<String> {
        let operator = criterion.operator();
        let property = criterion.property().name();
        let column = self.column(param, property);
        let value = criterion.value();
        let unsupported = || QueryError::unsupported_operator(BACKEND, operator, property);

        let scalar = |symbol: &str| -> QueryResult<String> {
            let literal = self
                .literal(value)
                .map_err(|e| e.with_property(property).with_operator(operator))?;
            Ok(format!("{} {} {}", column, symbol, literal))
        };

        let sql = match operator {
            Operator::Equal => scalar("=")?,
            Operator::LessThan => scalar("<")?,
            Operator::GreaterThan => scalar(">")?,
            Operator::LessThanOrEqual => scalar("<=")?,
            Operator::GreaterThanOrEqual => scalar(">=")?,
            Operator::Contains => {
                let text = value.as_str().ok_or_else(unsupported)?;
                format!("{} LIKE {}", column, quote_string(&format!("%{}%", text)))
            }
            Operator::StartsWith => {
                let text = value.as_str().ok_or_else(unsupported)?;
                format!("{} LIKE {}", column, quote_string(&format!("{}%", text)))
            }
            Operator::In => {
                let items = value.as_list().ok_or_else(unsupported)?;
                if items.is_empty() {
                    self.config.always_false.clone()
                } else {
                    let list = self
                        .list(items)
                        .map_err(|e| e.with_property(property).with_operator(operator))?;
                    format!("{} IN ({})", column, list)
                }
            }
        };

        Ok(sql)
    }

    fn parameter<S: 'static>(&self, name: &str) -> String {
        name.to_string()
    }

    fn element_parameter(&self, collection: &CollectionRef) -> String {
        collection.name().to_string()
    }

    fn exists(
        &self,
        _outer: &String,
        _collection: &CollectionRef,
        inner: String,
        _inner_param: String,
    ) -> String {
        inner
    }

    fn finish<S: 'static>(&self, condition: String, _param: String) -> String {
        if condition.is_empty() {
            self.config.always_true.clone()
        } else {
            condition
        }
    }

    fn format_group(&self, scope: &GroupScope<'_>, condition: String) -> String {
        if scope.is_root() || scope.terms() <= 1 {
            condition
        } else {
            format!("({})", condition)
        }
    }
}

/// Single-quote a string literal, doubling embedded quotes.
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
