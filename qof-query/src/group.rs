//! Criteria groups: the nodes of a criteria tree.
//!
//! Groups are stored in an arena owned by [`FilterCriteria`](crate::FilterCriteria)
//! and refer to each other by [`GroupId`]. A group's parent is an id, so the
//! tree has upward navigation without reference cycles.

use std::fmt;

use indexmap::IndexMap;

use crate::criterion::Criterion;
use crate::operator::GroupOperator;
use crate::property::CollectionRef;

/// Index of a group in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    /// Id of the root group of every tree.
    pub const ROOT: GroupId = GroupId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-element criteria for one collection property.
///
/// Compiles to a single existential condition.
#[derive(Debug, Clone)]
pub struct CollectionCriteria {
    collection: CollectionRef,
    criteria: Vec<Criterion>,
}

impl CollectionCriteria {
    /// The collection property.
    pub fn collection(&self) -> &CollectionRef {
        &self.collection
    }

    /// Criteria every matching element is tested against.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }
}

/// A set of criteria, child groups and collection criteria combined under
/// one operator.
#[derive(Debug, Clone)]
pub struct CriteriaGroup {
    id: GroupId,
    operator: GroupOperator,
    criteria: Vec<Criterion>,
    children: Vec<GroupId>,
    collections: IndexMap<&'static str, CollectionCriteria>,
    parent: Option<GroupId>,
}

impl CriteriaGroup {
    pub(crate) fn new(id: GroupId, operator: GroupOperator, parent: Option<GroupId>) -> Self {
        Self {
            id,
            operator,
            criteria: Vec::new(),
            children: Vec::new(),
            collections: IndexMap::new(),
            parent,
        }
    }

    /// This group's id.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Operator combining every member of the group.
    pub fn operator(&self) -> GroupOperator {
        self.operator
    }

    /// Leaf criteria, in insertion order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Child groups, in creation order.
    pub fn children(&self) -> &[GroupId] {
        &self.children
    }

    /// Collection criteria, one entry per collection property, in the order
    /// the collections were first used.
    pub fn collections(&self) -> impl ExactSizeIterator<Item = &CollectionCriteria> {
        self.collections.values()
    }

    /// Criteria for a collection property, by name.
    pub fn collection(&self, name: &str) -> Option<&CollectionCriteria> {
        self.collections.get(name)
    }

    /// Parent group; `None` for the root.
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// Whether this is the root group.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether the group has no members at all.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty() && self.children.is_empty() && self.collections.is_empty()
    }

    /// Criteria + child groups + per-element collection criteria.
    pub fn term_count(&self) -> usize {
        self.criteria.len()
            + self.children.len()
            + self
                .collections
                .values()
                .map(|c| c.criteria.len())
                .sum::<usize>()
    }

    pub(crate) fn push_criterion(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    pub(crate) fn push_child(&mut self, child: GroupId) {
        self.children.push(child);
    }

    pub(crate) fn push_collection_criterion(
        &mut self,
        collection: CollectionRef,
        criterion: Criterion,
    ) {
        self.collections
            .entry(collection.name())
            .or_insert_with(|| CollectionCriteria {
                collection,
                criteria: Vec::new(),
            })
            .criteria
            .push(criterion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Operator;
    use crate::testing::{Login, User};
    use crate::value::FilterValue;

    fn criterion(value: &str) -> Criterion {
        Criterion::new(
            Login::LOGIN_VALUE.erase(),
            FilterValue::String(value.into()),
            Operator::Equal,
        )
        .unwrap()
        .unwrap()
    }

    #[test]
    fn test_new_group_is_empty() {
        let group = CriteriaGroup::new(GroupId::ROOT, GroupOperator::And, None);
        assert!(group.is_empty());
        assert!(group.is_root());
        assert_eq!(group.term_count(), 0);
    }

    #[test]
    fn test_collection_criteria_accumulate_per_collection() {
        let mut group = CriteriaGroup::new(GroupId::new(1), GroupOperator::Or, Some(GroupId::ROOT));
        group.push_collection_criterion(User::LOGINS.erase(), criterion("u1"));
        group.push_collection_criterion(User::LOGINS.erase(), criterion("u2"));

        assert_eq!(group.collections().len(), 1);
        assert_eq!(group.collection("Logins").unwrap().criteria().len(), 2);
        assert_eq!(group.term_count(), 2);
        assert!(!group.is_root());
    }
}
