//! The root of a criteria tree.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use crate::builder::GroupBuilder;
use crate::group::{CriteriaGroup, GroupId};
use crate::operator::GroupOperator;

/// A criteria tree over source type `S`, reading filter values from `F`.
///
/// The tree owns every group; the filter object is only borrowed. Build it
/// through [`root`](Self::root) or the group entry points, then compile it
/// any number of times through a shared reference.
///
/// ```rust,ignore
/// let mut criteria = FilterCriteria::<User, _>::new(&query);
/// criteria
///     .root()
///     .add_criterion(User::ID, |q| q.id, Operator::GreaterThan)?
///     .or_group()
///     .add_criterion(User::LAST_NAME, |q| &q.name, Operator::StartsWith)?
///     .add_criterion(User::FIRST_NAME, |q| &q.name, Operator::Contains)?
///     .close_group();
/// ```
pub struct FilterCriteria<'f, S, F> {
    filter: &'f F,
    groups: Vec<CriteriaGroup>,
    _source: PhantomData<fn(&S)>,
}

impl<'f, S, F> FilterCriteria<'f, S, F> {
    /// Create a tree with an empty `And` root group.
    pub fn new(filter: &'f F) -> Self {
        Self {
            filter,
            groups: vec![CriteriaGroup::new(GroupId::ROOT, GroupOperator::And, None)],
            _source: PhantomData,
        }
    }

    /// The filter object supplying criterion values.
    pub fn filter(&self) -> &'f F {
        self.filter
    }

    /// The root group.
    pub fn root_group(&self) -> &CriteriaGroup {
        &self.groups[GroupId::ROOT.index()]
    }

    /// A group by id.
    pub fn get(&self, id: GroupId) -> Option<&CriteriaGroup> {
        self.groups.get(id.index())
    }

    /// Every group, in creation order (the root first).
    pub fn groups(&self) -> &[CriteriaGroup] {
        &self.groups
    }

    /// Number of leaf criteria in the whole tree, collection criteria included.
    pub fn criterion_count(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.criteria().len() + g.collections().map(|c| c.criteria().len()).sum::<usize>())
            .sum()
    }

    /// Whether no criterion was recorded anywhere.
    pub fn is_empty(&self) -> bool {
        self.criterion_count() == 0
    }

    /// Names of source properties referenced by scalar criteria anywhere in
    /// the tree, found by descending from the root through every group.
    pub fn referenced_properties(&self) -> HashSet<&'static str> {
        let mut used = HashSet::new();
        let mut pending = vec![GroupId::ROOT];

        while let Some(id) = pending.pop() {
            let group = &self.groups[id.index()];
            used.extend(group.criteria().iter().map(|c| c.property().name()));
            pending.extend(group.children().iter().copied());
        }

        used
    }

    pub(crate) fn group_mut(&mut self, id: GroupId) -> &mut CriteriaGroup {
        &mut self.groups[id.index()]
    }

    pub(crate) fn add_group(&mut self, parent: GroupId, operator: GroupOperator) -> GroupId {
        let id = GroupId::new(self.groups.len());
        self.groups.push(CriteriaGroup::new(id, operator, Some(parent)));
        self.group_mut(parent).push_child(id);
        id
    }
}

impl<'f, S: 'static, F> FilterCriteria<'f, S, F> {
    /// Start building on the root group.
    pub fn root(&mut self) -> GroupBuilder<'_, 'f, S, F> {
        GroupBuilder::new(self, GroupId::ROOT)
    }

    /// Resume building on an existing group.
    pub fn builder(&mut self, id: GroupId) -> Option<GroupBuilder<'_, 'f, S, F>> {
        if id.index() < self.groups.len() {
            Some(GroupBuilder::new(self, id))
        } else {
            None
        }
    }

    /// Open a child group of the root.
    pub fn group(&mut self, operator: GroupOperator) -> GroupBuilder<'_, 'f, S, F> {
        self.root().group(operator)
    }

    /// Open an `And` child group of the root.
    pub fn and_group(&mut self) -> GroupBuilder<'_, 'f, S, F> {
        self.group(GroupOperator::And)
    }

    /// Open an `Or` child group of the root.
    pub fn or_group(&mut self) -> GroupBuilder<'_, 'f, S, F> {
        self.group(GroupOperator::Or)
    }
}

impl<S, F> fmt::Debug for FilterCriteria<'_, S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCriteria")
            .field("source", &std::any::type_name::<S>())
            .field("filter", &std::any::type_name::<F>())
            .field("groups", &self.groups)
            .finish()
    }
}
