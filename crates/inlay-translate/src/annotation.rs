//! Declarative markers attached to types and properties.

use core::any::Any;
use core::hash::{Hash, Hasher};

use crate::types::ElementCollection;

/// A predicate over a property's current value.
///
/// Conditions are plain function pointers so annotation sets stay cheap to
/// clone and can key the translator cache. Two conditions are equal when
/// their name, subject type and test function all match.
#[derive(Clone, Copy)]
pub struct Condition {
    name: &'static str,
    subject: &'static str,
    test: fn(&dyn Any) -> bool,
}

impl Condition {
    /// Condition over values of type `V`. Values of any other type never match.
    pub fn new<V: 'static>(name: &'static str, test: fn(&dyn Any) -> bool) -> Self {
        Self {
            name,
            subject: core::any::type_name::<V>(),
            test,
        }
    }

    /// Matches when the value equals `V::default()`.
    pub fn if_default<V: Default + PartialEq + 'static>() -> Self {
        Self::new::<V>("if_default", is_default::<V>)
    }

    /// Matches when an `Option<V>` is `None`.
    pub fn if_none<V: 'static>() -> Self {
        Self::new::<Option<V>>("if_none", is_none::<V>)
    }

    /// Matches when an `Option<V>` is `Some`.
    pub fn if_some<V: 'static>() -> Self {
        Self::new::<Option<V>>("if_some", is_some::<V>)
    }

    /// Matches when the collection holds no items.
    pub fn if_empty<C: ElementCollection>() -> Self {
        Self::new::<C>("if_empty", is_empty::<C>)
    }

    pub fn if_false() -> Self {
        Self::new::<bool>("if_false", |v| v.downcast_ref::<bool>() == Some(&false))
    }

    pub fn if_true() -> Self {
        Self::new::<bool>("if_true", |v| v.downcast_ref::<bool>() == Some(&true))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, value: &dyn Any) -> bool {
        (self.test)(value)
    }
}

fn is_default<V: Default + PartialEq + 'static>(value: &dyn Any) -> bool {
    value.downcast_ref::<V>().is_some_and(|v| *v == V::default())
}

fn is_none<V: 'static>(value: &dyn Any) -> bool {
    value.downcast_ref::<Option<V>>().is_some_and(Option::is_none)
}

fn is_some<V: 'static>(value: &dyn Any) -> bool {
    value.downcast_ref::<Option<V>>().is_some_and(Option::is_some)
}

fn is_empty<C: ElementCollection>(value: &dyn Any) -> bool {
    value
        .downcast_ref::<C>()
        .is_some_and(|c| c.items().next().is_none())
}

impl core::fmt::Debug for Condition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}<{}>", self.name, self.subject)
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.subject == other.subject
            && core::ptr::fn_addr_eq(self.test, other.test)
    }
}

impl Eq for Condition {}

impl Hash for Condition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.subject.hash(state);
        (self.test as *const ()).hash(state);
    }
}

/// Every stacked `Index`, `Unindex` or `IgnoreSave` entry of one kind,
/// combined. An unconditional entry applies regardless of the conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    unconditional: bool,
    conditions: Vec<Condition>,
}

impl Policy {
    fn extend(&mut self, conditions: &[Condition]) {
        if conditions.is_empty() {
            self.unconditional = true;
        }
        for condition in conditions {
            if !self.conditions.contains(condition) {
                self.conditions.push(*condition);
            }
        }
    }

    pub fn is_unconditional(&self) -> bool {
        self.unconditional
    }

    /// Conditions from every conditional entry, in declaration order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Whether the policy holds for `value`. A missing value only satisfies
    /// an unconditional policy.
    pub fn applies(&self, value: Option<&dyn Any>) -> bool {
        self.unconditional || value.is_some_and(|v| self.conditions.iter().any(|c| c.matches(v)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// Translate the type as a map of its properties.
    Embed,
    /// Index values, when any condition matches (always, if there are none).
    Index(Vec<Condition>),
    /// Do not index values, when any condition matches (always, if there are none).
    Unindex(Vec<Condition>),
    /// Do not save the property, when any condition matches (always, if there are none).
    IgnoreSave(Vec<Condition>),
    /// Additional names the property may be loaded from.
    AlsoLoad(Vec<String>),
}

/// Ordered set of annotations on a type or property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// The annotation set synthesized for a root type.
    pub fn embedded() -> Self {
        Self(vec![Annotation::Embed])
    }

    pub fn push(&mut self, annotation: Annotation) {
        if !self.0.contains(&annotation) {
            self.0.push(annotation);
        }
    }

    pub fn with(mut self, annotation: Annotation) -> Self {
        self.push(annotation);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_embed(&self) -> bool {
        self.0.iter().any(|a| matches!(a, Annotation::Embed))
    }

    pub fn index(&self) -> Option<Policy> {
        self.policy(|a| match a {
            Annotation::Index(conditions) => Some(conditions),
            _ => None,
        })
    }

    pub fn unindex(&self) -> Option<Policy> {
        self.policy(|a| match a {
            Annotation::Unindex(conditions) => Some(conditions),
            _ => None,
        })
    }

    pub fn ignore_save(&self) -> Option<Policy> {
        self.policy(|a| match a {
            Annotation::IgnoreSave(conditions) => Some(conditions),
            _ => None,
        })
    }

    /// `None` when no entry of the kind is present.
    fn policy(&self, pick: fn(&Annotation) -> Option<&Vec<Condition>>) -> Option<Policy> {
        let mut entries = self.0.iter().filter_map(pick).peekable();
        entries.peek()?;
        let mut policy = Policy::default();
        for conditions in entries {
            policy.extend(conditions);
        }
        Some(policy)
    }

    /// All `AlsoLoad` names, in declaration order.
    pub fn also_load(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter_map(|a| match a {
                Annotation::AlsoLoad(names) => Some(names.iter().map(String::as_str)),
                _ => None,
            })
            .flatten()
    }
}

impl FromIterator<Annotation> for Annotations {
    fn from_iter<T: IntoIterator<Item = Annotation>>(iter: T) -> Self {
        let mut annotations = Self::new();
        for annotation in iter {
            annotations.push(annotation);
        }
        annotations
    }
}
