//! Error types for building and compiling criteria trees.
//!
//! Errors carry a code for programmatic handling, a message, and optional
//! context describing which property or operator was involved.
//!
//! # Error Codes
//!
//! Error codes follow a pattern: Q{category}{number}
//! - 1xxx: Build errors (unknown property, invalid criterion, bad operator code)
//! - 2xxx: Compile errors (unsupported operator or value for a backend)
//! - 7xxx: Configuration errors
//! - 9xxx: Internal errors
//!
//! ```rust
//! use qof_query::{ErrorCode, QueryError};
//!
//! let err = QueryError::invalid_property("User", "Emial");
//! assert_eq!(err.code, ErrorCode::InvalidProperty);
//! assert!(err.to_string().contains("Emial"));
//! ```
//!
//! An absent filter value is never an error: the builder skips the criterion.

use std::fmt;
use thiserror::Error;

use crate::operator::Operator;

/// Result type for criteria operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Build errors (1xxx)
    /// Property name not declared on the type (Q1001).
    InvalidProperty = 1001,
    /// Operator cannot be applied to the property/value pair (Q1002).
    InvalidCriterion = 1002,
    /// Unknown operator code (Q1003).
    InvalidOperator = 1003,

    // Compile errors (2xxx)
    /// Backend cannot render the comparison (Q2001).
    UnsupportedOperator = 2001,
    /// Backend has no literal form for the value (Q2002).
    UnrenderableValue = 2002,

    // Configuration errors (7xxx)
    /// Invalid configuration (Q7001).
    InvalidConfiguration = 7001,

    // Internal errors (9xxx)
    /// Internal error (Q9001).
    Internal = 9001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "Q1001").
    pub fn code(&self) -> String {
        format!("Q{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidProperty => "Unknown property",
            Self::InvalidCriterion => "Invalid criterion",
            Self::InvalidOperator => "Unknown operator",
            Self::UnsupportedOperator => "Unsupported operator",
            Self::UnrenderableValue => "Unrenderable value",
            Self::InvalidConfiguration => "Invalid configuration",
            Self::Internal => "Internal error",
        }
    }

    /// Whether the error is raised while building the tree.
    pub fn is_build_error(&self) -> bool {
        (1000..2000).contains(&(*self as u16))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The source or filter type involved.
    pub type_name: Option<String>,
    /// The property involved.
    pub property: Option<String>,
    /// The operator involved.
    pub operator: Option<Operator>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors raised while building or compiling criteria.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(suggestion.into());
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the type name.
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.context.type_name = Some(type_name.into());
        self
    }

    /// Set the property.
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.context.property = Some(property.into());
        self
    }

    /// Set the operator.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.context.operator = Some(operator);
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// A property selector named a property the type does not declare.
    pub fn invalid_property(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let property = property.into();
        Self::new(
            ErrorCode::InvalidProperty,
            format!("{} has no property named '{}'", type_name, property),
        )
        .with_type(&type_name)
        .with_property(&property)
        .with_suggestion("Check the spelling against the names declared by #[derive(Reflect)]")
        .with_help("Collection properties are not part of the scalar property list")
    }

    /// The operator cannot be applied to this property and value.
    pub fn invalid_criterion(
        property: impl Into<String>,
        operator: Operator,
        reason: impl Into<String>,
    ) -> Self {
        let property = property.into();
        Self::new(
            ErrorCode::InvalidCriterion,
            format!(
                "Cannot apply {} to property '{}': {}",
                operator,
                property,
                reason.into()
            ),
        )
        .with_property(&property)
        .with_operator(operator)
    }

    /// An operator code that does not name any operator.
    pub fn invalid_operator(code: impl Into<String>) -> Self {
        let code = code.into();
        Self::new(
            ErrorCode::InvalidOperator,
            format!("'{}' is not a comparison operator", code),
        )
        .with_suggestion(format!(
            "Use one of: {}",
            Operator::ALL
                .iter()
                .map(Operator::code)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    /// The backend cannot render this comparison.
    pub fn unsupported_operator(
        backend: impl Into<String>,
        operator: Operator,
        property: impl Into<String>,
    ) -> Self {
        let backend = backend.into();
        let property = property.into();
        Self::new(
            ErrorCode::UnsupportedOperator,
            format!(
                "Comparison {} on '{}' is not supported by the {} backend",
                operator, property, backend
            ),
        )
        .with_property(&property)
        .with_operator(operator)
        .with_help("This is a gap in the rendering backend, not in the criteria")
    }

    /// The backend has no literal form for a criterion value.
    pub fn unrenderable_value(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::UnrenderableValue,
            format!("The {} backend cannot render {}", backend.into(), reason.into()),
        )
    }

    /// Create a configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::InvalidConfiguration,
            format!("Invalid configuration: {}", message),
        )
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::Internal,
            format!("Internal error: {}", message.into()),
        )
    }

    // ============== Error Checks ==============

    /// Check if this error was raised while building the tree.
    pub fn is_build_error(&self) -> bool {
        self.code.is_build_error()
    }

    /// Check if this is an unsupported-operator fault.
    pub fn is_unsupported_operator(&self) -> bool {
        self.code == ErrorCode::UnsupportedOperator
    }

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref op) = self.context.operation {
            output.push_str(&format!("  → While: {}\n", op));
        }
        if let Some(ref type_name) = self.context.type_name {
            output.push_str(&format!("  → Type: {}\n", type_name));
        }
        if let Some(ref property) = self.context.property {
            output.push_str(&format!("  → Property: {}\n", property));
        }
        if let Some(operator) = self.context.operator {
            output.push_str(&format!("  → Operator: {}\n", operator));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output
    }
}

/// Helper for creating errors with context.
#[macro_export]
macro_rules! query_error {
    ($code:expr, $msg:expr) => {
        $crate::error::QueryError::new($code, $msg)
    };
    ($code:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {{
        let mut err = $crate::error::QueryError::new($code, $msg);
        $(
            err = err.$key($value);
        )+
        err
    }};
}
