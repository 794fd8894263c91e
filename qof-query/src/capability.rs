//! The contract between the compiler and a rendering backend.

use crate::criterion::Criterion;
use crate::error::QueryResult;
use crate::group::CriteriaGroup;
use crate::operator::GroupOperator;
use crate::property::CollectionRef;

/// A target representation for compiled criteria.
///
/// The compiler walks the tree and only ever talks to the backend through
/// this trait, so the same tree can become an in-memory predicate, a query
/// string or anything else that can express comparisons, conjunction,
/// disjunction and "some element of a collection satisfies".
///
/// `identity` is the neutral element of both `and` and `or` as far as the
/// compiler is concerned: combining anything with it yields the other side
/// unchanged, and the compiler never passes it to `and`/`or`.
pub trait RenderCapability {
    /// A compiled condition.
    type Output;

    /// A parameter standing for the record (or collection element) under test.
    type Param;

    /// The final result for source type `S`.
    type Compiled<S: 'static>;

    /// The "no condition" value.
    fn identity(&self) -> Self::Output;

    /// Whether `condition` is the "no condition" value.
    fn is_identity(&self, condition: &Self::Output) -> bool;

    /// Both conditions hold.
    fn and(&self, left: Self::Output, right: Self::Output) -> Self::Output;

    /// Either condition holds.
    fn or(&self, left: Self::Output, right: Self::Output) -> Self::Output;

    /// Render one comparison against `param`.
    ///
    /// Returns [`ErrorCode::UnsupportedOperator`](crate::ErrorCode::UnsupportedOperator)
    /// for a comparison the backend cannot express.
    fn comparison(&self, criterion: &Criterion, param: &Self::Param) -> QueryResult<Self::Output>;

    /// The parameter for the top-level record of type `S`.
    fn parameter<S: 'static>(&self, name: &str) -> Self::Param;

    /// The parameter for an element of `collection`.
    fn element_parameter(&self, collection: &CollectionRef) -> Self::Param;

    /// Some element of `collection` on `outer` satisfies `inner`, which was
    /// compiled against `inner_param`.
    fn exists(
        &self,
        outer: &Self::Param,
        collection: &CollectionRef,
        inner: Self::Output,
        inner_param: Self::Param,
    ) -> Self::Output;

    /// Turn the root condition into the final result.
    fn finish<S: 'static>(&self, condition: Self::Output, param: Self::Param) -> Self::Compiled<S>;

    /// Post-process a compiled, non-identity group. Defaults to no change.
    fn format_group(&self, scope: &GroupScope<'_>, condition: Self::Output) -> Self::Output {
        let _ = scope;
        condition
    }
}

/// What a backend may know about a group when formatting it.
#[derive(Debug, Clone, Copy)]
pub struct GroupScope<'a> {
    group: &'a CriteriaGroup,
    terms: usize,
}

impl<'a> GroupScope<'a> {
    pub(crate) fn new(group: &'a CriteriaGroup, terms: usize) -> Self {
        Self { group, terms }
    }

    /// The group being formatted.
    pub fn group(&self) -> &'a CriteriaGroup {
        self.group
    }

    /// The group's operator.
    pub fn operator(&self) -> GroupOperator {
        self.group.operator()
    }

    /// Whether the group is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.group.is_root()
    }

    /// Non-identity terms folded into the condition. Each criterion of a
    /// collection counts as one term.
    pub fn terms(&self) -> usize {
        self.terms
    }
}
