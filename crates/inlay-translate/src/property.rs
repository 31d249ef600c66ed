//! Structural members of a type.

use core::any::Any;
use std::sync::Arc;

use crate::annotation::{Annotation, Annotations, Condition, Policy};
use crate::error::TranslateErrorKind;
use crate::types::{AnyValue, Describe, TypeRef};

/// Typed get/set for one field, erased over the owner and value types.
pub trait Accessor: Send + Sync {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any>;
    fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
    fn set(&self, owner: &mut dyn Any, value: AnyValue) -> Result<(), TranslateErrorKind>;
}

struct FieldAccessor<O, V> {
    get: fn(&O) -> &V,
    get_mut: fn(&mut O) -> &mut V,
}

impl<O: Describe, V: Describe> Accessor for FieldAccessor<O, V> {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        owner
            .downcast_ref::<O>()
            .map(|owner| (self.get)(owner) as &dyn Any)
    }

    fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        owner
            .downcast_mut::<O>()
            .map(|owner| (self.get_mut)(owner) as &mut dyn Any)
    }

    fn set(&self, owner: &mut dyn Any, value: AnyValue) -> Result<(), TranslateErrorKind> {
        let owner = owner
            .downcast_mut::<O>()
            .ok_or_else(TranslateErrorKind::value_mismatch::<O>)?;
        let value = value
            .downcast::<V>()
            .map_err(|_| TranslateErrorKind::value_mismatch::<V>())?;
        *(self.get_mut)(owner) = *value;
        Ok(())
    }
}

/// One member of a structural type: its names, declared type, annotations
/// and accessor.
#[derive(Clone)]
pub struct Property {
    name: String,
    /// Canonical name first, then distinct `AlsoLoad` aliases.
    all_names: Vec<String>,
    value_type: TypeRef,
    annotations: Annotations,
    ignore_save: Option<Policy>,
    index: Option<Policy>,
    unindex: Option<Policy>,
    accessor: Arc<dyn Accessor>,
}

impl core::fmt::Debug for Property {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("all_names", &self.all_names)
            .field("value_type", &self.value_type)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

impl Property {
    pub fn new<O: Describe, V: Describe>(
        name: impl Into<String>,
        get: fn(&O) -> &V,
        get_mut: fn(&mut O) -> &mut V,
    ) -> Self {
        let name = name.into();
        Self {
            all_names: vec![name.clone()],
            name,
            value_type: TypeRef::of::<V>(),
            annotations: Annotations::new(),
            ignore_save: None,
            index: None,
            unindex: None,
            accessor: Arc::new(FieldAccessor { get, get_mut }),
        }
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self.all_names = collect_names(&self.name, &self.annotations);
        self.ignore_save = self.annotations.ignore_save();
        self.index = self.annotations.index();
        self.unindex = self.annotations.unindex();
        self
    }

    /// Accept older names on load. Saving always uses the canonical name.
    pub fn also_load<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotate(Annotation::AlsoLoad(
            names.into_iter().map(Into::into).collect(),
        ))
    }

    /// Translate the property's type as an embedded structure even if the
    /// type itself is not marked embeddable.
    pub fn embed(self) -> Self {
        self.annotate(Annotation::Embed)
    }

    pub fn index(self) -> Self {
        self.annotate(Annotation::Index(Vec::new()))
    }

    pub fn index_if(self, condition: Condition) -> Self {
        self.annotate(Annotation::Index(vec![condition]))
    }

    pub fn unindex(self) -> Self {
        self.annotate(Annotation::Unindex(Vec::new()))
    }

    pub fn unindex_if(self, condition: Condition) -> Self {
        self.annotate(Annotation::Unindex(vec![condition]))
    }

    /// Never save the property. Takes precedence over any `ignore_save_if`.
    pub fn ignore_save(self) -> Self {
        self.annotate(Annotation::IgnoreSave(Vec::new()))
    }

    /// Skip saving whenever `condition` matches the current value. Stacked
    /// conditions skip when any of them matches.
    pub fn ignore_save_if(self, condition: Condition) -> Self {
        self.annotate(Annotation::IgnoreSave(vec![condition]))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn all_names(&self) -> &[String] {
        &self.all_names
    }

    pub fn value_type(&self) -> TypeRef {
        self.value_type
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn get<'a>(&self, owner: &'a dyn Any) -> Result<&'a dyn Any, TranslateErrorKind> {
        self.accessor.get(owner).ok_or(TranslateErrorKind::ValueMismatch {
            expected: self.value_type.name(),
        })
    }

    pub fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Result<&'a mut dyn Any, TranslateErrorKind> {
        self.accessor
            .get_mut(owner)
            .ok_or(TranslateErrorKind::ValueMismatch {
                expected: self.value_type.name(),
            })
    }

    pub fn set(&self, owner: &mut dyn Any, value: AnyValue) -> Result<(), TranslateErrorKind> {
        self.accessor.set(owner, value)
    }

    /// Whether the property should be written for the owner's current state.
    pub fn is_saved(&self, owner: &dyn Any) -> bool {
        self.ignore_save
            .as_ref()
            .is_none_or(|policy| !policy.applies(self.accessor.get(owner)))
    }

    /// At least one ignore-save entry depends on the value, whether or not an
    /// unconditional one is stacked with it.
    pub fn has_ignore_save_conditions(&self) -> bool {
        self.ignore_save
            .as_ref()
            .is_some_and(|policy| !policy.conditions().is_empty())
    }

    /// Explicit index instruction for the owner's current state, if any.
    pub fn index_instruction(&self, owner: &dyn Any) -> Option<bool> {
        let value = self.accessor.get(owner);
        let applies = |policy: &Option<Policy>| policy.as_ref().is_some_and(|p| p.applies(value));
        if applies(&self.index) {
            Some(true)
        } else if applies(&self.unindex) {
            Some(false)
        } else {
            None
        }
    }

    /// Declaration problems detectable without an owner.
    pub fn validate(&self) -> Result<(), TranslateErrorKind> {
        if self.index.is_some() && self.unindex.is_some() {
            return Err(TranslateErrorKind::ConflictingPropertyIndex {
                property: self.name.clone(),
            });
        }
        Ok(())
    }
}

fn collect_names(name: &str, annotations: &Annotations) -> Vec<String> {
    let mut names = vec![name.to_string()];
    for alias in annotations.also_load() {
        if !names.iter().any(|n| n == alias) {
            names.push(alias.to_string());
        }
    }
    names
}
