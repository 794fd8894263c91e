//! # qof-query
//!
//! Criteria trees for query objects.
//!
//! A *filter* object carries optional search parameters; a *source* type is
//! the entity being searched. This crate lets a caller describe, once, how the
//! two are compared:
//! - Property descriptors for both types (`Property`, `CollectionProperty`,
//!   usually generated by `#[derive(Reflect)]`)
//! - A fluent builder for nested `And`/`Or` groups of criteria
//! - Per-element criteria over collection properties
//! - A generic compiler that turns the tree into any backend representation
//!   implementing [`RenderCapability`]
//!
//! Criteria whose filter value is absent are dropped while building, so an
//! empty query object compiles to "no condition".
//!
//! ## Filter Values
//!
//! ```rust
//! use qof_query::FilterValue;
//!
//! let val: FilterValue = 42.into();
//! assert!(matches!(val, FilterValue::Int(42)));
//!
//! let val: FilterValue = None::<String>.into();
//! assert!(val.is_null());
//!
//! let val: FilterValue = vec![1, 2, 3].into();
//! assert!(val.is_list());
//! ```
//!
//! ## Operators
//!
//! ```rust
//! use qof_query::{Operator, ValueKind};
//!
//! let op: Operator = "StartsWith".parse().unwrap();
//! assert!(op.is_pattern());
//! assert_eq!(Operator::default_for(ValueKind::Text), Operator::Contains);
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use qof_query::{ErrorCode, QueryError};
//!
//! let err = QueryError::invalid_property("User", "Emial");
//! assert_eq!(err.code, ErrorCode::InvalidProperty);
//! assert!(err.is_build_error());
//! ```

pub mod builder;
pub mod capability;
pub mod compiler;
pub mod criteria;
pub mod criterion;
pub mod error;
pub mod group;
pub mod logging;
pub mod operator;
pub mod property;
pub mod value;

#[cfg(test)]
mod testing;

pub use builder::GroupBuilder;
pub use capability::{GroupScope, RenderCapability};
pub use compiler::{FilterCompiler, compile};
pub use criteria::FilterCriteria;
pub use criterion::Criterion;
pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult};
pub use group::{CollectionCriteria, CriteriaGroup, GroupId};
pub use operator::{GroupOperator, Operator};
pub use property::{CollectionProperty, CollectionRef, IntoProperty, Property, PropertyRef, Reflect};
pub use value::{FilterValue, ValueKind, ValueType};

// Re-export logging utilities
pub use logging::{get_log_format, get_log_level, init as init_logging, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::GroupBuilder;
    pub use crate::capability::RenderCapability;
    pub use crate::compiler::{FilterCompiler, compile};
    pub use crate::criteria::FilterCriteria;
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::operator::{GroupOperator, Operator};
    pub use crate::property::{CollectionProperty, Property, Reflect};
    pub use crate::value::{FilterValue, ValueType};
}
