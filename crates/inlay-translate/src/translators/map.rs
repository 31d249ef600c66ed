use core::any::Any;
use std::sync::Arc;

use inlay_node::{Node, NodeKind, NodeMap, NodePath, NodeValue};
use tracing::trace;

use super::node_mismatch;
use crate::annotation::Annotations;
use crate::error::{Result, TranslateError, TranslateErrorKind};
use crate::factory::{CreateContext, TranslatorFactory};
use crate::translate::{LoadContext, MergeExisting, SaveContext, Translated, Translator};
use crate::types::{AnyValue, MapShape, Shape, TypeInfo};

/// Handles [`Shape::Map`] types as map nodes keyed by the map's keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapTranslatorFactory;

impl TranslatorFactory for MapTranslatorFactory {
    fn create(
        &self,
        path: &NodePath,
        annotations: &Annotations,
        info: &TypeInfo,
        ctx: CreateContext<'_>,
    ) -> Result<Option<Arc<dyn Translator>>> {
        let Shape::Map(shape) = &info.shape else {
            return Ok(None);
        };
        let value = ctx
            .registry()
            .create(&path.element(), annotations, shape.value, ctx)?;
        Ok(Some(Arc::new(MapTranslator {
            path: path.clone(),
            type_name: info.name(),
            shape: shape.clone(),
            value,
        })))
    }
}

#[derive(Debug)]
struct MapTranslator {
    path: NodePath,
    type_name: &'static str,
    shape: MapShape,
    value: Arc<dyn Translator>,
}

impl MapTranslator {
    fn mismatch(&self, path: &NodePath) -> TranslateError {
        TranslateErrorKind::ValueMismatch {
            expected: self.type_name,
        }
        .at(path)
    }

    fn fill(&self, target: &mut dyn Any, node: &Node, ctx: &mut LoadContext) -> Result<()> {
        let map = node
            .as_map()
            .ok_or_else(|| node_mismatch(NodeKind::Map, node))?;
        for (key, child) in map {
            match self.value.load(child, ctx)? {
                Translated::Value(value) => {
                    if !(self.shape.insert)(target, key.clone(), value) {
                        return Err(self.mismatch(child.path()));
                    }
                }
                Translated::Omit => trace!(path = %child.path(), key = %key, "map entry omitted"),
            }
        }
        Ok(())
    }
}

impl Translator for MapTranslator {
    fn load(&self, node: &Node, ctx: &mut LoadContext) -> Result<Translated<AnyValue>> {
        let mut map = (self.shape.create)();
        match node.as_leaf() {
            Some(leaf) if leaf.value.is_null() => {}
            Some(_) => return Err(node_mismatch(NodeKind::Map, node)),
            None => self.fill(map.as_mut(), node, ctx)?,
        }
        Ok(Translated::Value(map))
    }

    fn save(
        &self,
        value: &dyn Any,
        index: bool,
        ctx: &mut SaveContext,
    ) -> Result<Translated<Node>> {
        let entries = (self.shape.entries)(value).ok_or_else(|| self.mismatch(&self.path))?;
        if entries.is_empty() {
            trace!(path = %self.path, "empty map omitted");
            return Ok(Translated::Omit);
        }
        let mut map = NodeMap::new();
        for (key, value) in entries {
            if let Translated::Value(child) = self.value.save(value, index, ctx)? {
                map.add(key.to_string(), child, &self.path)
                    .map_err(|e| TranslateErrorKind::from(e).at(&self.path))?;
            }
        }
        Ok(Translated::Value(Node::new(
            self.path.clone(),
            NodeValue::Map(map),
        )))
    }

    fn merge(&self) -> Option<&dyn MergeExisting> {
        Some(self)
    }
}

impl MergeExisting for MapTranslator {
    fn node_kind(&self) -> NodeKind {
        NodeKind::Map
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
