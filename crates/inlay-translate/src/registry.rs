//! The factory chain and translator cache.

use core::any::TypeId;
use std::sync::{Arc, RwLock};

use ahash::AHashMap;
use inlay_node::{Node, NodePath};
use tracing::{debug, trace};

use crate::annotation::Annotations;
use crate::embed::EmbedTranslatorFactory;
use crate::error::{Result, TranslateErrorKind};
use crate::factory::{CreateContext, TranslatorFactory};
use crate::translate::{LoadContext, SaveContext, Translated, Translator};
use crate::translators::{
    CollectionTranslatorFactory, MapTranslatorFactory, OptionalTranslatorFactory,
    ScalarTranslatorFactory,
};
use crate::types::{Describe, TypeRef};

/// Registry-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Indexing default for root values, before any type or property
    /// instruction applies.
    pub index_by_default: bool,
    /// Keep built translators for reuse.
    pub cache_translators: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            index_by_default: true,
            cache_translators: true,
        }
    }
}

impl RegistryConfig {
    pub fn index_by_default(mut self, index: bool) -> Self {
        self.index_by_default = index;
        self
    }

    pub fn cache_translators(mut self, cache: bool) -> Self {
        self.cache_translators = cache;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TranslatorKey {
    type_id: TypeId,
    path: NodePath,
    annotations: Annotations,
    in_embed: bool,
    in_collection: bool,
}

/// Resolves translators by asking each factory in turn.
///
/// The default chain is optional, scalar, collection, map, then embed.
/// Factories added with [`TranslatorRegistry::with_factory`] are consulted
/// before the defaults, most recently added first.
pub struct TranslatorRegistry {
    config: RegistryConfig,
    factories: Vec<Arc<dyn TranslatorFactory>>,
    embed: Arc<EmbedTranslatorFactory>,
    cache: RwLock<AHashMap<TranslatorKey, Arc<dyn Translator>>>,
}

impl Default for TranslatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TranslatorRegistry")
            .field("config", &self.config)
            .field("factories", &self.factories.len())
            .finish_non_exhaustive()
    }
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let embed = Arc::new(EmbedTranslatorFactory);
        Self {
            config,
            factories: vec![
                Arc::new(OptionalTranslatorFactory),
                Arc::new(ScalarTranslatorFactory),
                Arc::new(CollectionTranslatorFactory),
                Arc::new(MapTranslatorFactory),
                embed.clone(),
            ],
            embed,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Put `factory` at the front of the chain.
    pub fn with_factory(mut self, factory: impl TranslatorFactory + 'static) -> Self {
        self.factories.insert(0, Arc::new(factory));
        self
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Context for a construction that starts outside any structure.
    pub fn context(&self) -> CreateContext<'_> {
        CreateContext::new(self)
    }

    /// Translator for `ty` at `path`, built through the factory chain.
    pub fn create(
        &self,
        path: &NodePath,
        annotations: &Annotations,
        ty: TypeRef,
        ctx: CreateContext<'_>,
    ) -> Result<Arc<dyn Translator>> {
        let key = TranslatorKey {
            type_id: ty.type_id(),
            path: path.clone(),
            annotations: annotations.clone(),
            in_embed: ctx.in_embed(),
            in_collection: ctx.in_collection(),
        };
        if let Some(translator) = self.cached(&key) {
            trace!(%path, type_name = ty.name(), "translator cache hit");
            return Ok(translator);
        }

        let info = ty.resolve();
        for factory in &self.factories {
            if let Some(translator) = factory.create(path, annotations, &info, ctx)? {
                self.remember(key, &translator);
                return Ok(translator);
            }
        }
        Err(TranslateErrorKind::NoTranslator {
            type_name: ty.name(),
        }
        .at(path))
    }

    /// Translator for a root type, handled as an embedded type at the
    /// document root.
    pub fn create_root<T: Describe>(&self) -> Result<Arc<dyn Translator>> {
        let ty = TypeRef::of::<T>();
        let key = TranslatorKey {
            type_id: ty.type_id(),
            path: NodePath::root(),
            annotations: Annotations::embedded(),
            in_embed: false,
            in_collection: false,
        };
        if let Some(translator) = self.cached(&key) {
            return Ok(translator);
        }
        let translator = self.embed.create_root(ty, self.context())?;
        self.remember(key, &translator);
        Ok(translator)
    }

    /// Save a root value using the configured indexing default.
    pub fn save_root<T: Describe>(&self, value: &T) -> Result<Node> {
        let translator = self.create_root::<T>()?;
        let mut ctx = SaveContext::new();
        match translator.save(value, self.config.index_by_default, &mut ctx)? {
            Translated::Value(node) => Ok(node),
            Translated::Omit => Ok(Node::map(NodePath::root())),
        }
    }

    /// Load a root value from a node produced by [`Self::save_root`].
    pub fn load_root<T: Describe>(&self, node: &Node) -> Result<T> {
        let translator = self.create_root::<T>()?;
        let mut ctx = LoadContext::new();
        match translator.load(node, &mut ctx)? {
            Translated::Value(value) => value
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| TranslateErrorKind::value_mismatch::<T>().at(node.path())),
            Translated::Omit => Err(TranslateErrorKind::RootOmitted.at(node.path())),
        }
    }

    fn cached(&self, key: &TranslatorKey) -> Option<Arc<dyn Translator>> {
        if !self.config.cache_translators {
            return None;
        }
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        cache.get(key).cloned()
    }

    fn remember(&self, key: TranslatorKey, translator: &Arc<dyn Translator>) {
        if !self.config.cache_translators {
            return;
        }
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        debug!(path = %key.path, "caching translator");
        cache.entry(key).or_insert_with(|| translator.clone());
    }
}
