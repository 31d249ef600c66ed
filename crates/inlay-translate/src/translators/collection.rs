use core::any::Any;
use std::sync::Arc;

use inlay_node::{Node, NodeKind, NodeList, NodePath, NodeValue};
use tracing::trace;

use super::node_mismatch;
use crate::annotation::Annotations;
use crate::error::{Result, TranslateError, TranslateErrorKind};
use crate::factory::{CreateContext, TranslatorFactory};
use crate::translate::{LoadContext, MergeExisting, SaveContext, Translated, Translator};
use crate::types::{AnyValue, CollectionShape, Shape, TypeInfo};

/// Handles [`Shape::Collection`] types as list nodes.
///
/// The element translator is built once, at the element position beneath the
/// collection's path, with the "inside a collection" flag set. Field
/// annotations are passed on to the element type so that an `Embed` on a
/// `Vec<T>` property embeds each `T`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionTranslatorFactory;

impl TranslatorFactory for CollectionTranslatorFactory {
    fn create(
        &self,
        path: &NodePath,
        annotations: &Annotations,
        info: &TypeInfo,
        ctx: CreateContext<'_>,
    ) -> Result<Option<Arc<dyn Translator>>> {
        let Shape::Collection(shape) = &info.shape else {
            return Ok(None);
        };
        let ctx = ctx.entering_collection();
        let element = ctx
            .registry()
            .create(&path.element(), annotations, shape.element, ctx)?;
        Ok(Some(Arc::new(CollectionTranslator {
            path: path.clone(),
            type_name: info.name(),
            shape: shape.clone(),
            element,
        })))
    }
}

#[derive(Debug)]
struct CollectionTranslator {
    path: NodePath,
    type_name: &'static str,
    shape: CollectionShape,
    element: Arc<dyn Translator>,
}

impl CollectionTranslator {
    fn mismatch(&self, path: &NodePath) -> TranslateError {
        TranslateErrorKind::ValueMismatch {
            expected: self.type_name,
        }
        .at(path)
    }

    /// Push every element of `node` into `target`, skipping omitted ones.
    fn fill(&self, target: &mut dyn Any, node: &Node, ctx: &mut LoadContext) -> Result<()> {
        let list = node
            .as_list()
            .ok_or_else(|| node_mismatch(NodeKind::List, node))?;
        for child in list {
            match self.element.load(child, ctx)? {
                Translated::Value(item) => {
                    if !(self.shape.push)(target, item) {
                        return Err(self.mismatch(child.path()));
                    }
                }
                Translated::Omit => trace!(path = %child.path(), "collection element omitted"),
            }
        }
        Ok(())
    }
}

impl Translator for CollectionTranslator {
    fn load(&self, node: &Node, ctx: &mut LoadContext) -> Result<Translated<AnyValue>> {
        let mut collection = (self.shape.create)();
        match node.as_leaf() {
            // Null stands for an empty collection
            Some(leaf) if leaf.value.is_null() => {}
            Some(_) => return Err(node_mismatch(NodeKind::List, node)),
            None => self.fill(collection.as_mut(), node, ctx)?,
        }
        Ok(Translated::Value(collection))
    }

    fn save(
        &self,
        value: &dyn Any,
        index: bool,
        ctx: &mut SaveContext,
    ) -> Result<Translated<Node>> {
        let items = (self.shape.items)(value).ok_or_else(|| self.mismatch(&self.path))?;
        if items.is_empty() {
            trace!(path = %self.path, "empty collection omitted");
            return Ok(Translated::Omit);
        }
        let mut list = NodeList::default();
        for item in items {
            if let Translated::Value(child) = self.element.save(item, index, ctx)? {
                list.push(child);
            }
        }
        Ok(Translated::Value(Node::new(
            self.path.clone(),
            NodeValue::List(list),
        )))
    }

    fn merge(&self) -> Option<&dyn MergeExisting> {
        Some(self)
    }
}

impl MergeExisting for CollectionTranslator {
    fn node_kind(&self) -> NodeKind {
        NodeKind::List
    }

    fn merge_into(
        &self,
        existing: &mut dyn Any,
        node: &Node,
        ctx: &mut LoadContext,
    ) -> Result<()> {
        if !(self.shape.clear)(existing) {
            return Err(self.mismatch(node.path()));
        }
        self.fill(existing, node, ctx)
    }
}
