//! Type descriptors.
//!
//! Every translatable type describes itself once through [`Describe`]. The
//! descriptor tells the factory chain what shape the type has and carries the
//! erased operations translators need, so no runtime reflection is involved.

mod stock;

use core::any::{Any, TypeId};
use core::hash::{Hash, Hasher};

use inlay_node::LeafValue;

use crate::annotation::{Annotation, Annotations};
use crate::error::TranslateErrorKind;
use crate::property::Property;

/// A type-erased owned value.
pub type AnyValue = Box<dyn Any + Send>;

/// Types that can be translated to and from a node tree.
///
/// # Example
///
/// ```
/// use inlay_translate::types::{Describe, TypeInfo};
/// use inlay_translate::property::Property;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Address {
///     street: String,
///     zip: u32,
/// }
///
/// impl Describe for Address {
///     fn describe() -> TypeInfo {
///         TypeInfo::structure::<Self>()
///             .embed()
///             .property(Property::new("street", |a: &Self| &a.street, |a: &mut Self| &mut a.street))
///             .property(Property::new("zip", |a: &Self| &a.zip, |a: &mut Self| &mut a.zip))
///             .build()
///     }
/// }
/// ```
pub trait Describe: Any + Send + Sized {
    fn describe() -> TypeInfo;
}

/// Lazy handle on a describable type.
///
/// Property descriptors hold a `TypeRef` rather than a `TypeInfo` so that
/// describing a type does not describe everything reachable from it.
#[derive(Clone, Copy)]
pub struct TypeRef {
    type_id: TypeId,
    name: &'static str,
    describe: fn() -> TypeInfo,
}

impl TypeRef {
    pub fn of<T: Describe>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
            describe: T::describe,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn resolve(&self) -> TypeInfo {
        (self.describe)()
    }
}

impl core::fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name).finish()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub ty: TypeRef,
    /// Declaring-type annotations (`Embed`, `Index`, `Unindex`).
    pub annotations: Annotations,
    pub shape: Shape,
}

#[derive(Debug, Clone)]
pub enum Shape {
    Scalar(ScalarShape),
    Optional(OptionalShape),
    Struct(StructShape),
    Collection(CollectionShape),
    Map(MapShape),
}

impl TypeInfo {
    pub fn name(&self) -> &'static str {
        self.ty.name()
    }

    pub fn scalar<T: Scalar + Describe>() -> Self {
        Self::with_shape::<T>(Shape::Scalar(ScalarShape::of::<T>()))
    }

    pub fn optional<T: Describe>() -> Self {
        Self::with_shape::<Option<T>>(Shape::Optional(OptionalShape::of::<T>()))
    }

    pub fn collection<C: ElementCollection + Describe>() -> Self {
        Self::with_shape::<C>(Shape::Collection(CollectionShape::of::<C>()))
    }

    pub fn map<M: KeyedCollection + Describe>() -> Self {
        Self::with_shape::<M>(Shape::Map(MapShape::of::<M>()))
    }

    /// Start describing a structural type.
    pub fn structure<T: Describe + Default>() -> StructBuilder<T> {
        StructBuilder {
            annotations: Annotations::new(),
            properties: Vec::new(),
            _marker: core::marker::PhantomData,
        }
    }

    fn with_shape<T: Describe>(shape: Shape) -> Self {
        Self {
            ty: TypeRef::of::<T>(),
            annotations: Annotations::new(),
            shape,
        }
    }
}

// =============================================================================
// Scalars
// =============================================================================

/// A type stored as a single leaf.
pub trait Scalar: Send + Sized + 'static {
    fn to_leaf(&self) -> LeafValue;
    fn from_leaf(leaf: &LeafValue) -> Result<Self, TranslateErrorKind>;
}

#[derive(Debug, Clone)]
pub struct ScalarShape {
    pub(crate) to_leaf: fn(&dyn Any) -> Option<LeafValue>,
    pub(crate) from_leaf: fn(&LeafValue) -> Result<AnyValue, TranslateErrorKind>,
}

impl ScalarShape {
    pub fn of<T: Scalar>() -> Self {
        Self {
            to_leaf: |value| value.downcast_ref::<T>().map(T::to_leaf),
            from_leaf: |leaf| T::from_leaf(leaf).map(|v| Box::new(v) as AnyValue),
        }
    }
}

// =============================================================================
// Optional
// =============================================================================

#[derive(Debug, Clone)]
pub struct OptionalShape {
    pub inner: TypeRef,
    pub(crate) wrap: fn(Option<AnyValue>) -> Option<AnyValue>,
    pub(crate) peek: fn(&dyn Any) -> Option<Option<&dyn Any>>,
}

impl OptionalShape {
    pub fn of<T: Describe>() -> Self {
        Self {
            inner: TypeRef::of::<T>(),
            wrap: wrap_option::<T>,
            peek: peek_option::<T>,
        }
    }
}

fn wrap_option<T: Describe>(value: Option<AnyValue>) -> Option<AnyValue> {
    match value {
        None => Some(Box::new(None::<T>)),
        Some(value) => value
            .downcast::<T>()
            .ok()
            .map(|v| Box::new(Some(*v)) as AnyValue),
    }
}

fn peek_option<T: Describe>(value: &dyn Any) -> Option<Option<&dyn Any>> {
    value
        .downcast_ref::<Option<T>>()
        .map(|v| v.as_ref().map(|v| v as &dyn Any))
}

// =============================================================================
// Collections
// =============================================================================

/// A sequence-like container stored as a list node.
///
/// Implement this for custom backings (sorted containers with their own
/// comparator, bounded buffers, ...). Loading into an existing instance only
/// goes through `clear_items` and `push_item`, so whatever state the instance
/// carries besides its items survives a reload.
pub trait ElementCollection: Default + Send + 'static {
    type Item: Describe;

    fn clear_items(&mut self);
    fn push_item(&mut self, item: Self::Item);
    fn items(&self) -> impl Iterator<Item = &Self::Item>;
}

#[derive(Debug, Clone)]
pub struct CollectionShape {
    pub element: TypeRef,
    pub(crate) create: fn() -> AnyValue,
    pub(crate) clear: fn(&mut dyn Any) -> bool,
    pub(crate) push: fn(&mut dyn Any, AnyValue) -> bool,
    pub(crate) items: fn(&dyn Any) -> Option<Vec<&dyn Any>>,
}

impl CollectionShape {
    pub fn of<C: ElementCollection>() -> Self {
        Self {
            element: TypeRef::of::<C::Item>(),
            create: || Box::new(C::default()),
            clear: clear_collection::<C>,
            push: push_collection::<C>,
            items: collection_items::<C>,
        }
    }
}

fn clear_collection<C: ElementCollection>(target: &mut dyn Any) -> bool {
    match target.downcast_mut::<C>() {
        Some(c) => {
            c.clear_items();
            true
        }
        None => false,
    }
}

fn push_collection<C: ElementCollection>(target: &mut dyn Any, item: AnyValue) -> bool {
    match (target.downcast_mut::<C>(), item.downcast::<C::Item>()) {
        (Some(c), Ok(item)) => {
            c.push_item(*item);
            true
        }
        _ => false,
    }
}

fn collection_items<C: ElementCollection>(target: &dyn Any) -> Option<Vec<&dyn Any>> {
    target
        .downcast_ref::<C>()
        .map(|c| c.items().map(|item| item as &dyn Any).collect())
}

// =============================================================================
// Maps
// =============================================================================

/// A string-keyed container stored as a map node.
pub trait KeyedCollection: Default + Send + 'static {
    type Value: Describe;

    fn clear_entries(&mut self);
    fn insert_entry(&mut self, key: String, value: Self::Value);
    fn entries(&self) -> impl Iterator<Item = (&str, &Self::Value)>;
}

#[derive(Debug, Clone)]
pub struct MapShape {
    pub value: TypeRef,
    pub(crate) create: fn() -> AnyValue,
    pub(crate) clear: fn(&mut dyn Any) -> bool,
    pub(crate) insert: fn(&mut dyn Any, String, AnyValue) -> bool,
    pub(crate) entries: fn(&dyn Any) -> Option<Vec<(&str, &dyn Any)>>,
}

impl MapShape {
    pub fn of<M: KeyedCollection>() -> Self {
        Self {
            value: TypeRef::of::<M::Value>(),
            create: || Box::new(M::default()),
            clear: clear_map::<M>,
            insert: insert_map::<M>,
            entries: map_entries::<M>,
        }
    }
}

fn clear_map<M: KeyedCollection>(target: &mut dyn Any) -> bool {
    match target.downcast_mut::<M>() {
        Some(m) => {
            m.clear_entries();
            true
        }
        None => false,
    }
}

fn insert_map<M: KeyedCollection>(target: &mut dyn Any, key: String, value: AnyValue) -> bool {
    match (target.downcast_mut::<M>(), value.downcast::<M::Value>()) {
        (Some(m), Ok(value)) => {
            m.insert_entry(key, *value);
            true
        }
        _ => false,
    }
}

fn map_entries<M: KeyedCollection>(target: &dyn Any) -> Option<Vec<(&str, &dyn Any)>> {
    target.downcast_ref::<M>().map(|m| {
        m.entries()
            .map(|(key, value)| (key, value as &dyn Any))
            .collect()
    })
}

// =============================================================================
// Structural types
// =============================================================================

#[derive(Debug, Clone)]
pub struct StructShape {
    pub(crate) construct: fn() -> AnyValue,
    pub properties: Vec<Property>,
}

impl StructShape {
    /// Properties in declaration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// Builder returned by [`TypeInfo::structure`].
#[must_use]
pub struct StructBuilder<T> {
    annotations: Annotations,
    properties: Vec<Property>,
    _marker: core::marker::PhantomData<fn() -> T>,
}

impl<T: Describe + Default> StructBuilder<T> {
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Mark the type embeddable wherever it appears.
    pub fn embed(self) -> Self {
        self.annotate(Annotation::Embed)
    }

    /// Index every property unless the property says otherwise.
    pub fn index(self) -> Self {
        self.annotate(Annotation::Index(Vec::new()))
    }

    /// Leave every property unindexed unless the property says otherwise.
    pub fn unindex(self) -> Self {
        self.annotate(Annotation::Unindex(Vec::new()))
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn build(self) -> TypeInfo {
        TypeInfo {
            ty: TypeRef::of::<T>(),
            annotations: self.annotations,
            shape: Shape::Struct(StructShape {
                construct: || Box::new(T::default()),
                properties: self.properties,
            }),
        }
    }
}
