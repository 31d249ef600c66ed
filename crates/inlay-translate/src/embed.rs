//! Translation of whole structural types.
//!
//! A root type is just an embedded type located at the document root, so
//! both cases go through [`EmbedTranslatorFactory::create`].

use core::any::{Any, TypeId};
use std::sync::Arc;

use ahash::AHashSet;
use inlay_node::{Node, NodeKind, NodePath};
use tracing::{debug, trace};

use crate::annotation::Annotations;
use crate::error::{Result, TranslateErrorKind};
use crate::factory::{CreateContext, TranslatorFactory};
use crate::property::Property;
use crate::translate::{LoadContext, SaveContext, Translated, Translator};
use crate::translators::node_mismatch;
use crate::types::{AnyValue, Shape, TypeInfo, TypeRef};

/// Builds translators for types marked `Embed`, either on the type itself or
/// on the property holding it.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbedTranslatorFactory;

impl EmbedTranslatorFactory {
    /// Translator for a root type. The `Embed` marker is synthesized, so the
    /// type does not need to carry it.
    pub fn create_root(&self, ty: TypeRef, ctx: CreateContext<'_>) -> Result<Arc<dyn Translator>> {
        let root = NodePath::root();
        let info = ty.resolve();
        self.create(&root, &Annotations::embedded(), &info, ctx)?
            .ok_or_else(|| {
                TranslateErrorKind::NotStructural {
                    type_name: ty.name(),
                }
                .at(&root)
            })
    }
}

impl TranslatorFactory for EmbedTranslatorFactory {
    fn create(
        &self,
        path: &NodePath,
        annotations: &Annotations,
        info: &TypeInfo,
        ctx: CreateContext<'_>,
    ) -> Result<Option<Arc<dyn Translator>>> {
        if !annotations.has_embed() && !info.annotations.has_embed() {
            return Ok(None);
        }
        let Shape::Struct(shape) = &info.shape else {
            return Err(TranslateErrorKind::NotStructural {
                type_name: info.name(),
            }
            .at(path));
        };

        let ctx = ctx.entering_embed();
        let mut names = AHashSet::new();
        let mut properties = Vec::with_capacity(shape.properties().len());
        for property in shape.properties() {
            let property_path = path.extend(property.name());
            if !names.insert(property.name()) {
                return Err(TranslateErrorKind::DuplicateProperty {
                    property: property.name().to_string(),
                    type_name: info.name(),
                }
                .at(&property_path));
            }
            property
                .validate()
                .map_err(|kind| kind.at(&property_path))?;
            if property.has_ignore_save_conditions() && ctx.in_collection() && ctx.in_embed() {
                return Err(
                    TranslateErrorKind::ConditionalIgnoreSaveInEmbeddedCollection {
                        property: property.name().to_string(),
                    }
                    .at(&property_path),
                );
            }
            let translator = ctx.registry().create(
                &property_path,
                property.annotations(),
                property.value_type(),
                ctx,
            )?;
            properties.push(EachProperty {
                property: property.clone(),
                translator,
            });
        }

        let class_index = match (info.annotations.index(), info.annotations.unindex()) {
            (Some(_), Some(_)) => {
                return Err(TranslateErrorKind::ConflictingClassIndex {
                    type_name: info.name(),
                }
                .at(path));
            }
            (Some(_), None) => Some(true),
            (None, Some(_)) => Some(false),
            (None, None) => None,
        };

        debug!(
            %path,
            type_name = info.name(),
            properties = properties.len(),
            ?class_index,
            "built embedded translator"
        );
        Ok(Some(Arc::new(EmbeddedTranslator {
            path: path.clone(),
            type_name: info.name(),
            type_id: info.ty.type_id(),
            construct: shape.construct,
            properties,
            class_index,
        })))
    }
}

/// A property paired with the translator for its value.
#[derive(Debug)]
struct EachProperty {
    property: Property,
    translator: Arc<dyn Translator>,
}

impl EachProperty {
    /// Load this property from `node` into `owner`.
    fn execute_load(&self, node: &Node, owner: &mut dyn Any, ctx: &mut LoadContext) -> Result<()> {
        let Some(actual) = self.child(node)? else {
            return Ok(());
        };

        // Keep the instance the owner already holds for containers, it may
        // carry its own ordering or backing.
        if let Some(merge) = self.translator.merge()
            && merge.node_kind() == actual.kind()
        {
            let existing = self
                .property
                .get_mut(owner)
                .map_err(|kind| kind.at(actual.path()))?;
            return merge.merge_into(existing, actual, ctx);
        }

        match self.translator.load(actual, ctx)? {
            Translated::Value(value) => self
                .property
                .set(owner, value)
                .map_err(|kind| kind.at(actual.path())),
            Translated::Omit => {
                trace!(path = %actual.path(), "property omitted on load");
                ctx.record_omit();
                Ok(())
            }
        }
    }

    /// Save this property of `owner` into `node`. `index` is the default in
    /// effect for the owner.
    fn execute_save(
        &self,
        owner: &dyn Any,
        node: &mut Node,
        index: bool,
        ctx: &mut SaveContext,
    ) -> Result<()> {
        if !self.property.is_saved(owner) {
            return Ok(());
        }
        let index = self.property.index_instruction(owner).unwrap_or(index);
        let value = self
            .property
            .get(owner)
            .map_err(|kind| kind.at(node.path()))?;
        match self.translator.save(value, index, ctx)? {
            Translated::Value(child) => node
                .add(self.property.name(), child)
                .map_err(|e| TranslateErrorKind::from(e).at(node.path())),
            Translated::Omit => {
                trace!(path = %node.path(), property = self.property.name(), "property omitted on save");
                ctx.record_omit();
                Ok(())
            }
        }
    }

    /// The single child of `parent` under any of the property's names.
    fn child<'n>(&self, parent: &'n Node) -> Result<Option<&'n Node>> {
        let mut found: Option<(&str, &'n Node)> = None;
        for name in self.property.all_names() {
            let Some(child) = parent.get(name) else {
                continue;
            };
            if let Some((first, _)) = found {
                return Err(TranslateErrorKind::AliasCollision {
                    first: first.to_string(),
                    second: name.clone(),
                }
                .at(parent.path()));
            }
            found = Some((name.as_str(), child));
        }
        Ok(found.map(|(_, child)| child))
    }
}

#[derive(Debug)]
struct EmbeddedTranslator {
    path: NodePath,
    type_name: &'static str,
    type_id: TypeId,
    construct: fn() -> AnyValue,
    properties: Vec<EachProperty>,
    /// Type-level index instruction, overriding the inherited default.
    class_index: Option<bool>,
}

impl Translator for EmbeddedTranslator {
    fn load(&self, node: &Node, ctx: &mut LoadContext) -> Result<Translated<AnyValue>> {
        if node.kind() != NodeKind::Map {
            return Err(node_mismatch(NodeKind::Map, node));
        }
        let mut owner = (self.construct)();
        for property in &self.properties {
            property.execute_load(node, owner.as_mut(), ctx)?;
        }
        Ok(Translated::Value(owner))
    }

    fn save(
        &self,
        value: &dyn Any,
        index: bool,
        ctx: &mut SaveContext,
    ) -> Result<Translated<Node>> {
        if value.type_id() != self.type_id {
            return Err(TranslateErrorKind::ValueMismatch {
                expected: self.type_name,
            }
            .at(&self.path));
        }
        let mut node = Node::map(self.path.clone());
        let index = self.class_index.unwrap_or(index);
        for property in &self.properties {
            property.execute_save(value, &mut node, index, ctx)?;
        }
        Ok(Translated::Value(node))
    }
}
