//! Property descriptors for source and filter types.
//!
//! A descriptor is a name, a declared kind and a getter. Descriptors are
//! plain `const` data, usually generated by `#[derive(Reflect)]`:
//!
//! ```rust
//! use qof_query::{FilterValue, Property, Reflect, ValueKind, ValueType};
//!
//! struct User {
//!     id: i64,
//! }
//!
//! impl User {
//!     const ID: Property<User> = {
//!         fn get(record: &User) -> FilterValue {
//!             record.id.to_value()
//!         }
//!         Property::new("Id", <i64 as ValueType>::KIND, get)
//!     };
//! }
//!
//! impl Reflect for User {
//!     const TYPE_NAME: &'static str = "User";
//!     const PROPERTIES: &'static [Property<Self>] = &[User::ID];
//! }
//!
//! assert_eq!(User::property("Id").map(|p| p.kind()), Some(ValueKind::Int));
//! assert_eq!(User::ID.get(&User { id: 7 }), FilterValue::Int(7));
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::{QueryError, QueryResult};
use crate::value::{FilterValue, ValueKind};

/// A type whose properties can be referenced by criteria.
pub trait Reflect: Sized + 'static {
    /// Type name used in errors and logs.
    const TYPE_NAME: &'static str;

    /// Scalar properties, in declaration order. Collections are not listed.
    const PROPERTIES: &'static [Property<Self>];

    /// Look up a scalar property by name.
    fn property(name: &str) -> Option<Property<Self>> {
        Self::PROPERTIES.iter().find(|p| p.name == name).copied()
    }

    /// Read a property value by name. Unknown names read as `Null`.
    fn value_of(&self, name: &str) -> FilterValue {
        Self::property(name)
            .map(|p| p.get(self))
            .unwrap_or(FilterValue::Null)
    }
}

/// A scalar property of `S`.
pub struct Property<S> {
    name: &'static str,
    kind: ValueKind,
    getter: fn(&S) -> FilterValue,
}

impl<S> Property<S> {
    /// Create a descriptor.
    pub const fn new(name: &'static str, kind: ValueKind, getter: fn(&S) -> FilterValue) -> Self {
        Self { name, kind, getter }
    }

    /// Property name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared kind.
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Read the property from a record.
    #[inline]
    pub fn get(&self, record: &S) -> FilterValue {
        (self.getter)(record)
    }
}

impl<S: 'static> Property<S> {
    /// Erase the owner type so criteria over different types share one shape.
    pub fn erase(&self) -> PropertyRef {
        let getter = self.getter;
        PropertyRef {
            name: self.name,
            kind: self.kind,
            owner: TypeId::of::<S>(),
            owner_name: std::any::type_name::<S>(),
            getter: Arc::new(move |record: &dyn Any| {
                record
                    .downcast_ref::<S>()
                    .map(getter)
                    .unwrap_or(FilterValue::Null)
            }),
        }
    }
}

impl<S> Clone for Property<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Property<S> {}

impl<S> PartialEq for Property<S> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<S> Eq for Property<S> {}

impl<S> fmt::Debug for Property<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A collection property of `S` whose elements are `E`.
pub struct CollectionProperty<S, E> {
    name: &'static str,
    items: fn(&S) -> &[E],
}

impl<S, E> CollectionProperty<S, E> {
    /// Create a descriptor.
    pub const fn new(name: &'static str, items: fn(&S) -> &[E]) -> Self {
        Self { name, items }
    }

    /// Property name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Borrow the elements of a record's collection.
    pub fn items<'a>(&self, record: &'a S) -> &'a [E] {
        (self.items)(record)
    }
}

impl<S: 'static, E: 'static> CollectionProperty<S, E> {
    /// Erase the owner and element types.
    pub fn erase(&self) -> CollectionRef {
        let items = self.items;
        CollectionRef {
            name: self.name,
            element_name: std::any::type_name::<E>(),
            items: Arc::new(erased_items(move |record: &dyn Any| match record
                .downcast_ref::<S>()
            {
                Some(record) => items(record).iter().map(|e| e as &dyn Any).collect(),
                None => Vec::new(),
            })),
        }
    }
}

// Pins the higher-ranked signature; closures do not infer it on their own.
fn erased_items<F>(f: F) -> F
where
    F: for<'a> Fn(&'a dyn Any) -> Vec<&'a dyn Any>,
{
    f
}

impl<S, E> Clone for CollectionProperty<S, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, E> Copy for CollectionProperty<S, E> {}

impl<S, E> fmt::Debug for CollectionProperty<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionProperty")
            .field("name", &self.name)
            .finish()
    }
}

type ErasedGetter = Arc<dyn Fn(&dyn Any) -> FilterValue + Send + Sync>;
type ErasedItems = Arc<dyn for<'a> Fn(&'a dyn Any) -> Vec<&'a dyn Any> + Send + Sync>;

/// A property descriptor with its owner type erased.
#[derive(Clone)]
pub struct PropertyRef {
    name: &'static str,
    kind: ValueKind,
    owner: TypeId,
    owner_name: &'static str,
    getter: ErasedGetter,
}

impl PropertyRef {
    /// Property name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Full name of the owning type.
    pub fn owner_name(&self) -> &'static str {
        self.owner_name
    }

    /// Whether the property belongs to `S`.
    pub fn belongs_to<S: 'static>(&self) -> bool {
        self.owner == TypeId::of::<S>()
    }

    /// Read the property from a record of the owning type.
    ///
    /// A record of any other type reads as `Null`.
    #[inline]
    pub fn get(&self, record: &dyn Any) -> FilterValue {
        (self.getter)(record)
    }
}

impl PartialEq for PropertyRef {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for PropertyRef {}

impl fmt::Debug for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("owner", &self.owner_name)
            .finish()
    }
}

/// A collection descriptor with its owner and element types erased.
#[derive(Clone)]
pub struct CollectionRef {
    name: &'static str,
    element_name: &'static str,
    items: ErasedItems,
}

impl CollectionRef {
    /// Property name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full name of the element type.
    pub fn element_name(&self) -> &'static str {
        self.element_name
    }

    /// Elements of the collection on `record`, each as `&dyn Any`.
    pub fn items<'a>(&self, record: &'a dyn Any) -> Vec<&'a dyn Any> {
        (self.items)(record)
    }
}

impl fmt::Debug for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRef")
            .field("name", &self.name)
            .field("element", &self.element_name)
            .finish()
    }
}

/// Anything that selects a scalar property of `S`.
///
/// Descriptors select infallibly; names are looked up and fail fast when the
/// type has no such property.
pub trait IntoProperty<S> {
    /// Resolve to a descriptor.
    fn into_property(self) -> QueryResult<Property<S>>;
}

impl<S> IntoProperty<S> for Property<S> {
    fn into_property(self) -> QueryResult<Property<S>> {
        Ok(self)
    }
}

impl<S: Reflect> IntoProperty<S> for &str {
    fn into_property(self) -> QueryResult<Property<S>> {
        S::property(self).ok_or_else(|| QueryError::invalid_property(S::TYPE_NAME, self))
    }
}
