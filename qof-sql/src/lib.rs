//! # qof-sql
//!
//! Query-text backend for qof criteria trees.
//!
//! Compiles a [`FilterCriteria`](qof_query::FilterCriteria) into a
//! `WHERE`-clause fragment:
//! - `Equal`/`LessThan`/... render as `=`, `<`, `>`, `<=`, `>=`
//! - `Contains` and `StartsWith` render as `LIKE '%v%'` and `LIKE 'v%'`
//! - `In` renders as `IN (a, b, c)`
//! - Non-root groups with more than one term are parenthesized
//! - A tree with no applicable criterion renders as `1 = 1`
//!
//! Collection criteria are rendered inline, against the collection name.

pub mod config;
pub mod renderer;

pub use config::{SqlConfig, SqlConfigBuilder};
pub use renderer::{SqlRenderer, quote_string};

use qof_query::{FilterCompiler, FilterCriteria, QueryResult};

/// A compiler producing query text.
pub type SqlCompiler = FilterCompiler<SqlRenderer>;

/// Compile `criteria` to query text with the default configuration.
pub fn to_sql<S: 'static, F>(
    criteria: &FilterCriteria<'_, S, F>,
    parameter_name: &str,
) -> QueryResult<String> {
    SqlCompiler::default().compile(criteria, parameter_name)
}

/// Escape an identifier for use in SQL.
pub fn escape_identifier(name: &str) -> String {
    // Double any existing quotes
    let escaped = name.replace('"', "\"\"");
    format!("\"{}\"", escaped)
}

/// Check if an identifier needs quoting.
pub fn needs_quoting(name: &str) -> bool {
    let reserved = [
        "user", "order", "group", "select", "from", "where", "table", "index", "key", "default",
        "null", "not", "and", "or", "in", "is", "like", "between", "case", "when", "then",
        "else", "end", "as", "on", "join", "exists", "all", "any", "distinct", "having",
        "limit", "offset", "values", "set",
    ];

    if reserved.contains(&name.to_lowercase().as_str()) {
        return true;
    }

    name.is_empty()
        || name.starts_with(|c: char| c.is_ascii_digit())
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote an identifier if needed.
pub fn quote_identifier(name: &str) -> String {
    if needs_quoting(name) {
        escape_identifier(name)
    } else {
        name.to_string()
    }
}
