//! Cooperative translator construction.

use std::sync::Arc;

use inlay_node::NodePath;

use crate::annotation::Annotations;
use crate::error::Result;
use crate::registry::TranslatorRegistry;
use crate::translate::Translator;
use crate::types::TypeInfo;

/// Construction-time state, threaded through recursive construction by value.
///
/// Each level builds its children with a modified copy, so the flags never
/// outlive the construction that set them.
#[derive(Clone, Copy)]
pub struct CreateContext<'r> {
    registry: &'r TranslatorRegistry,
    in_embed: bool,
    in_collection: bool,
}

impl<'r> CreateContext<'r> {
    pub fn new(registry: &'r TranslatorRegistry) -> Self {
        Self {
            registry,
            in_embed: false,
            in_collection: false,
        }
    }

    pub fn registry(&self) -> &'r TranslatorRegistry {
        self.registry
    }

    /// Currently inside an embedded type.
    pub fn in_embed(&self) -> bool {
        self.in_embed
    }

    /// Currently inside a collection.
    pub fn in_collection(&self) -> bool {
        self.in_collection
    }

    pub fn entering_embed(self) -> Self {
        Self {
            in_embed: true,
            ..self
        }
    }

    pub fn entering_collection(self) -> Self {
        Self {
            in_collection: true,
            ..self
        }
    }
}

impl core::fmt::Debug for CreateContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CreateContext")
            .field("in_embed", &self.in_embed)
            .field("in_collection", &self.in_collection)
            .finish_non_exhaustive()
    }
}

/// One link in the factory chain.
pub trait TranslatorFactory: Send + Sync {
    /// Build a translator for `info` at `path`, or `Ok(None)` when this
    /// factory does not handle the type so the next one can try.
    fn create(
        &self,
        path: &NodePath,
        annotations: &Annotations,
        info: &TypeInfo,
        ctx: CreateContext<'_>,
    ) -> Result<Option<Arc<dyn Translator>>>;
}
