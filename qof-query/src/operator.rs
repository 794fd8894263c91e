//! Comparison and group operators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::value::{FilterValue, ValueKind};

/// How a source property is compared with a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `property == value`
    Equal,
    /// `property < value`
    LessThan,
    /// `property > value`
    GreaterThan,
    /// `property <= value`
    LessThanOrEqual,
    /// `property >= value`
    GreaterThanOrEqual,
    /// Text property contains the value.
    Contains,
    /// Text property starts with the value.
    StartsWith,
    /// Property is one of the listed values.
    In,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 8] = [
        Self::Equal,
        Self::LessThan,
        Self::GreaterThan,
        Self::LessThanOrEqual,
        Self::GreaterThanOrEqual,
        Self::Contains,
        Self::StartsWith,
        Self::In,
    ];

    /// Stable textual code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::LessThan => "LessThan",
            Self::GreaterThan => "GreaterThan",
            Self::LessThanOrEqual => "LessThanOrEqual",
            Self::GreaterThanOrEqual => "GreaterThanOrEqual",
            Self::Contains => "Contains",
            Self::StartsWith => "StartsWith",
            Self::In => "In",
        }
    }

    /// Whether this is one of the text pattern operators.
    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Contains | Self::StartsWith)
    }

    /// Default operator for a property of the given kind.
    ///
    /// Text properties use `Contains`, everything else `Equal`.
    pub fn default_for(kind: ValueKind) -> Self {
        if kind.is_text() {
            Self::Contains
        } else {
            Self::Equal
        }
    }

    /// Check that the operator can compare a property of `kind` with `value`.
    ///
    /// The value must have the property's kind; numbers of any kind compare
    /// with numeric properties. Returns the reason on failure.
    pub fn accepts(&self, kind: ValueKind, value: &FilterValue) -> Result<(), &'static str> {
        match self {
            Self::In => match value {
                FilterValue::List(items) if items.iter().any(FilterValue::is_list) => {
                    Err("list items must be single values")
                }
                FilterValue::List(items) if items.iter().all(|item| kind.admits(item)) => Ok(()),
                FilterValue::List(_) => Err("list items do not match the property type"),
                _ => Err("expected a list value"),
            },
            Self::Contains | Self::StartsWith => {
                if !kind.is_text() && kind != ValueKind::Any {
                    Err("pattern operators need a text property")
                } else if value.as_str().is_none() {
                    Err("pattern operators need a string value")
                } else {
                    Ok(())
                }
            }
            _ if value.is_list() => Err("expected a single value, not a list"),
            Self::LessThan | Self::GreaterThan | Self::LessThanOrEqual | Self::GreaterThanOrEqual
                if matches!(value, FilterValue::Bool(_)) =>
            {
                Err("booleans have no ordering")
            }
            _ if !kind.admits(value) => Err("value does not match the property type"),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| QueryError::invalid_operator(s))
    }
}

/// How the members of a group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupOperator {
    /// Every member must hold.
    #[default]
    And,
    /// At least one member must hold.
    Or,
}

impl GroupOperator {
    /// Stable textual code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
        }
    }
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
