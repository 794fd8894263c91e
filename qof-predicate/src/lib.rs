//! # qof-predicate
//!
//! In-memory predicate backend for qof criteria trees.
//!
//! Compiles a [`FilterCriteria`](qof_query::FilterCriteria) into a
//! [`Predicate`] that tests records directly:
//!
//! ```rust,ignore
//! let predicate = qof_predicate::to_predicate(&criteria, "x")?;
//! let active: Vec<&User> = predicate.filter(&users).collect();
//! ```
//!
//! Collection criteria hold when any element of the collection satisfies
//! them. A property whose value is absent on a record fails every
//! comparison.

pub mod condition;
pub mod eval;
pub mod predicate;
pub mod renderer;

pub use condition::{Binding, Condition};
pub use eval::compare;
pub use predicate::Predicate;
pub use renderer::PredicateRenderer;

use qof_query::{FilterCompiler, FilterCriteria, QueryResult};

/// A compiler producing in-memory predicates.
pub type PredicateCompiler = FilterCompiler<PredicateRenderer>;

/// Compile `criteria` into a predicate over `S`.
pub fn to_predicate<S: 'static, F>(
    criteria: &FilterCriteria<'_, S, F>,
    parameter_name: &str,
) -> QueryResult<Predicate<S>> {
    PredicateCompiler::default().compile(criteria, parameter_name)
}
