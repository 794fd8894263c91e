//! # qof
//!
//! Query object filters for Rust.
//!
//! A *query object* carries optional search parameters. qof lets you declare,
//! once, how those parameters are compared against the properties of the
//! entity being searched, and then compile that declaration into:
//! - An in-memory [`Predicate`] for filtering collections
//! - A query-text fragment for a `WHERE` clause
//!
//! Parameters that are `None` are skipped, so one declaration serves every
//! combination of filled-in fields.
//!
//! ## Quick Start
//!
//! ```rust
//! use qof::prelude::*;
//!
//! #[derive(Reflect)]
//! struct User {
//!     id: i64,
//!     last_name: String,
//!     first_name: String,
//! }
//!
//! #[derive(Default)]
//! struct GetUserQuery {
//!     id: Option<i64>,
//!     name: Option<String>,
//! }
//!
//! # fn main() -> Result<(), qof::QueryError> {
//! let query = GetUserQuery {
//!     id: Some(1),
//!     name: Some("I".into()),
//! };
//!
//! let mut criteria = FilterCriteria::<User, _>::new(&query);
//! criteria
//!     .root()
//!     .add_criterion(User::ID, |q| q.id, Operator::GreaterThan)?
//!     .or_group()
//!     .add_criterion(User::LAST_NAME, |q| &q.name, Operator::StartsWith)?
//!     .add_criterion(User::FIRST_NAME, |q| &q.name, Operator::Contains)?
//!     .close_group();
//!
//! let converters = FilterConverters::new();
//! assert_eq!(
//!     converters.to_sql(&criteria, "")?,
//!     "Id > 1 AND (LastName LIKE 'I%' OR FirstName LIKE '%I%')"
//! );
//!
//! let users = vec![User { id: 2, last_name: "Ivanov".into(), first_name: "Ivan".into() }];
//! let predicate = converters.to_predicate(&criteria, "x")?;
//! assert_eq!(predicate.filter(&users).count(), 1);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod converters;

pub use converters::{FilterConverters, FilterConvertersBuilder};

/// Criteria tree model, builder and compiler.
pub mod query {
    pub use qof_query::*;
}

/// Query-text backend.
pub mod sql {
    pub use qof_sql::*;
}

/// In-memory predicate backend.
pub mod predicate {
    pub use qof_predicate::*;
}

// Re-export the derive alongside the trait it implements
pub use qof_codegen::Reflect;
pub use qof_query::Reflect;

pub use qof_query::{
    CollectionProperty, Criterion, CriteriaGroup, ErrorCode, FilterCompiler, FilterCriteria,
    FilterValue, GroupBuilder, GroupId, GroupOperator, Operator, Property, QueryError,
    QueryResult, RenderCapability, ValueKind, ValueType,
};
pub use qof_predicate::{Predicate, PredicateRenderer};
pub use qof_sql::{SqlConfig, SqlRenderer};

// Re-export logging utilities
pub use qof_query::logging::{get_log_format, get_log_level, init as init_logging, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::converters::FilterConverters;
    pub use crate::{Reflect, SqlConfig};
    pub use qof_predicate::Predicate;
    pub use qof_query::prelude::*;
}
