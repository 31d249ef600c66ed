//! The translator contract.

use core::any::Any;

use inlay_node::{Node, NodeKind};

use crate::error::Result;
use crate::types::AnyValue;

/// Outcome of a load or save that may decline to produce anything.
///
/// `Omit` is a normal control path: the caller writes no key (on save) or
/// leaves the field untouched (on load). It is never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Translated<T> {
    Value(T),
    Omit,
}

impl<T> Translated<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Omit => None,
        }
    }

    pub fn is_omit(&self) -> bool {
        matches!(self, Self::Omit)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Translated<U> {
        match self {
            Self::Value(value) => Translated::Value(f(value)),
            Self::Omit => Translated::Omit,
        }
    }
}

/// Carried through every load call.
#[derive(Debug, Default)]
pub struct LoadContext {
    omitted: usize,
}

impl LoadContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of properties left untouched because their translator omitted.
    pub fn omitted(&self) -> usize {
        self.omitted
    }

    pub(crate) fn record_omit(&mut self) {
        self.omitted += 1;
    }
}

/// Carried through every save call.
#[derive(Debug, Default)]
pub struct SaveContext {
    omitted: usize,
}

impl SaveContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of properties that produced no key.
    pub fn omitted(&self) -> usize {
        self.omitted
    }

    pub(crate) fn record_omit(&mut self) {
        self.omitted += 1;
    }
}

/// Bidirectional codec for one type at one position.
///
/// Translators are built once and shared; they hold no per-call state.
pub trait Translator: Send + Sync + core::fmt::Debug {
    fn load(&self, node: &Node, ctx: &mut LoadContext) -> Result<Translated<AnyValue>>;

    /// `index` is the indexing default inherited from the enclosing value.
    fn save(&self, value: &dyn Any, index: bool, ctx: &mut SaveContext)
    -> Result<Translated<Node>>;

    /// Collection- and map-shaped translators can load into an instance the
    /// caller already holds.
    fn merge(&self) -> Option<&dyn MergeExisting> {
        None
    }
}

/// Loading into an existing container instance.
pub trait MergeExisting {
    /// The node kind this translator can merge from.
    fn node_kind(&self) -> NodeKind;

    /// Replace the contents of `existing` with the elements of `node`,
    /// keeping the instance itself.
    fn merge_into(&self, existing: &mut dyn Any, node: &Node, ctx: &mut LoadContext)
    -> Result<()>;
}
