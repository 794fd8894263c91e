//! Fluent construction of criteria trees.
//!
//! A [`GroupBuilder`] is a cursor over a [`FilterCriteria`]: it remembers the
//! group currently being filled and moves up and down the tree as groups are
//! opened and closed. Every operation consumes the cursor and hands it back,
//! so calls chain:
//!
//! ```rust,ignore
//! criteria
//!     .root()
//!     .add_criterion(User::ID, |q| q.id, Operator::GreaterThan)?
//!     .add_criterion(User::EMAIL, |q| &q.email, Operator::Equal)?
//!     .or_group()
//!     .add_criterion(User::LAST_NAME, |q| &q.name, Operator::StartsWith)?
//!     .add_criterion(User::FIRST_NAME, |q| &q.name, Operator::Contains)?
//!     .close_group();
//! ```
//!
//! Criteria whose filter value is absent are skipped without error, which
//! lets one query object drive any combination of optional filters.

use tracing::debug;

use crate::criteria::FilterCriteria;
use crate::criterion::Criterion;
use crate::error::QueryResult;
use crate::group::{CriteriaGroup, GroupId};
use crate::operator::{GroupOperator, Operator};
use crate::property::{CollectionProperty, IntoProperty, Property, Reflect};
use crate::value::{FilterValue, ValueType};

/// Cursor for adding criteria and groups to a [`FilterCriteria`].
pub struct GroupBuilder<'a, 'f, S, F> {
    tree: &'a mut FilterCriteria<'f, S, F>,
    current: GroupId,
}

impl<'a, 'f, S: 'static, F> GroupBuilder<'a, 'f, S, F> {
    pub(crate) fn new(tree: &'a mut FilterCriteria<'f, S, F>, current: GroupId) -> Self {
        Self { tree, current }
    }

    /// Id of the group the cursor is on.
    pub fn id(&self) -> GroupId {
        self.current
    }

    /// The group the cursor is on.
    pub fn current(&self) -> &CriteriaGroup {
        // The cursor only ever holds ids handed out by its own tree.
        &self.tree.groups()[self.current.index()]
    }

    /// The tree being built.
    pub fn criteria(&self) -> &FilterCriteria<'f, S, F> {
        self.tree
    }

    /// Compare `property` with the value `selector` reads from the filter.
    ///
    /// An absent value adds nothing. A property name unknown to `S` fails
    /// with [`ErrorCode::InvalidProperty`](crate::ErrorCode::InvalidProperty),
    /// an operator that cannot compare this property and value with
    /// [`ErrorCode::InvalidCriterion`](crate::ErrorCode::InvalidCriterion).
    pub fn add_criterion<P, V>(
        self,
        property: P,
        selector: impl FnOnce(&'f F) -> V,
        operator: Operator,
    ) -> QueryResult<Self>
    where
        P: IntoProperty<S>,
        V: ValueType,
    {
        let property = property.into_property()?;
        let value = selector(self.tree.filter()).to_value();
        self.push_criterion(property, value, operator)
    }

    /// Compare `property` with a literal value.
    pub fn add_criterion_value<P, V>(
        self,
        property: P,
        value: V,
        operator: Operator,
    ) -> QueryResult<Self>
    where
        P: IntoProperty<S>,
        V: ValueType,
    {
        let property = property.into_property()?;
        self.push_criterion(property, value.to_value(), operator)
    }

    /// Compare a property of each element of `collection` with the value
    /// `selector` reads from the filter.
    ///
    /// All criteria for one collection in one group end up in a single
    /// existential condition: some element must satisfy all (or any, in an
    /// `Or` group) of them.
    pub fn add_collection_criterion<E, P, V>(
        self,
        collection: CollectionProperty<S, E>,
        property: P,
        selector: impl FnOnce(&'f F) -> V,
        operator: Operator,
    ) -> QueryResult<Self>
    where
        E: 'static,
        P: IntoProperty<E>,
        V: ValueType,
    {
        let property = property.into_property()?;
        let value = selector(self.tree.filter()).to_value();

        let Some(criterion) = Criterion::new(property.erase(), value, operator)? else {
            crate::qof_trace!(
                collection = collection.name(),
                property = property.name(),
                "skipping collection criterion with absent value"
            );
            return Ok(self);
        };

        debug!(
            group = %self.current,
            collection = collection.name(),
            property = property.name(),
            operator = %operator,
            "collection criterion added"
        );
        self.tree
            .group_mut(self.current)
            .push_collection_criterion(collection.erase(), criterion);
        Ok(self)
    }

    /// Open a child group combined with `operator` and move into it.
    pub fn group(self, operator: GroupOperator) -> Self {
        let id = self.tree.add_group(self.current, operator);
        debug!(group = %id, parent = %self.current, operator = %operator, "group opened");
        Self {
            tree: self.tree,
            current: id,
        }
    }

    /// Open an `And` child group and move into it.
    pub fn and_group(self) -> Self {
        self.group(GroupOperator::And)
    }

    /// Open an `Or` child group and move into it.
    pub fn or_group(self) -> Self {
        self.group(GroupOperator::Or)
    }

    /// Move to the parent group. On the root this is a no-op.
    pub fn close_group(self) -> Self {
        let parent = self.current().parent().unwrap_or(self.current);
        debug!(group = %self.current, parent = %parent, "group closed");
        Self {
            tree: self.tree,
            current: parent,
        }
    }

    fn push_criterion(
        self,
        property: Property<S>,
        value: FilterValue,
        operator: Operator,
    ) -> QueryResult<Self> {
        match Criterion::new(property.erase(), value, operator)? {
            Some(criterion) => {
                debug!(
                    group = %self.current,
                    property = property.name(),
                    operator = %operator,
                    "criterion added"
                );
                self.tree.group_mut(self.current).push_criterion(criterion);
            }
            None => crate::qof_trace!(
                property = property.name(),
                "skipping criterion with absent value"
            ),
        }
        Ok(self)
    }
}

impl<S: Reflect, F: Reflect> GroupBuilder<'_, '_, S, F> {
    /// Add a criterion for every source property that has a same-named
    /// filter property with a present value.
    ///
    /// A list value is compared with `In`, otherwise text properties use
    /// `Contains` and everything else `Equal`. Collections are not wired.
    pub fn add_criteria_from_properties(self) -> Self {
        self.wire(S::PROPERTIES.iter().copied())
    }

    /// Like [`add_criteria_from_properties`](Self::add_criteria_from_properties)
    /// for a chosen subset of source properties.
    pub fn add_criteria_from(self, properties: &[Property<S>]) -> Self {
        self.wire(properties.iter().copied())
    }

    /// Like [`add_criteria_from`](Self::add_criteria_from), naming the
    /// properties. Every name is resolved before anything is added.
    pub fn add_criteria_from_names(self, names: &[&str]) -> QueryResult<Self> {
        let properties = names
            .iter()
            .map(|name| IntoProperty::<S>::into_property(*name))
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(self.wire(properties))
    }

    /// Wire every source property not yet referenced by a criterion anywhere
    /// in the tree.
    pub fn add_criteria_from_unused_properties(self) -> Self {
        let used = self.tree.referenced_properties();
        let unused: Vec<Property<S>> = S::PROPERTIES
            .iter()
            .filter(|p| !used.contains(p.name()))
            .copied()
            .collect();
        self.wire(unused)
    }

    fn wire(self, properties: impl IntoIterator<Item = Property<S>>) -> Self {
        let filter = self.tree.filter();
        let mut added = 0usize;

        for property in properties {
            let Some(source) = F::property(property.name()) else {
                continue;
            };
            let value = source.get(filter);
            if value.is_null() {
                continue;
            }

            let operator = if value.is_list() {
                Operator::In
            } else {
                Operator::default_for(property.kind())
            };

            match Criterion::new(property.erase(), value, operator) {
                Ok(Some(criterion)) => {
                    self.tree.group_mut(self.current).push_criterion(criterion);
                    added += 1;
                }
                Ok(None) => {}
                Err(err) => debug!(
                    property = property.name(),
                    operator = %operator,
                    error = %err,
                    "skipping property that cannot be wired"
                ),
            }
        }

        debug!(
            group = %self.current,
            source = S::TYPE_NAME,
            filter = F::TYPE_NAME,
            added,
            "criteria wired from properties"
        );
        self
    }
}
