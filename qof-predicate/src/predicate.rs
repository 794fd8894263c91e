//! Typed predicates produced by compilation.

use std::fmt;
use std::marker::PhantomData;

use crate::condition::{Binding, Condition};

/// A compiled criteria tree that tests records of type `S`.
///
/// Cheap to clone and safe to share across threads.
pub struct Predicate<S> {
    condition: Condition,
    parameter: Binding,
    _source: PhantomData<fn(&S) -> bool>,
}

impl<S: 'static> Predicate<S> {
    pub(crate) fn new(condition: Condition, parameter: Binding) -> Self {
        Self {
            condition,
            parameter,
            _source: PhantomData,
        }
    }

    /// Whether `record` satisfies the criteria.
    #[inline]
    pub fn matches(&self, record: &S) -> bool {
        self.condition.evaluate(record)
    }

    /// Keep the matching records, in their original order.
    pub fn filter<'a, I>(&'a self, records: I) -> impl Iterator<Item = &'a S> + 'a
    where
        I: IntoIterator<Item = &'a S>,
        I::IntoIter: 'a,
    {
        records.into_iter().filter(move |record| self.matches(record))
    }

    /// Keep the matching records of an owned collection.
    pub fn retain(&self, records: &mut Vec<S>) {
        records.retain(|record| self.matches(record));
    }

    /// Whether every record matches (no criterion applied).
    pub fn is_always(&self) -> bool {
        self.condition.is_always()
    }

    /// The underlying condition.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// The record parameter.
    pub fn parameter(&self) -> &Binding {
        &self.parameter
    }
}

impl<S> Clone for Predicate<S> {
    fn clone(&self) -> Self {
        Self {
            condition: self.condition.clone(),
            parameter: self.parameter.clone(),
            _source: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Predicate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.parameter, self.condition.label())
    }
}
