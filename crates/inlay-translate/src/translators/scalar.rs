use core::any::Any;
use std::sync::Arc;

use inlay_node::{Node, NodeKind, NodePath};
use tracing::trace;

use super::node_mismatch;
use crate::annotation::Annotations;
use crate::error::{Result, TranslateErrorKind};
use crate::factory::{CreateContext, TranslatorFactory};
use crate::translate::{LoadContext, SaveContext, Translated, Translator};
use crate::types::{AnyValue, ScalarShape, Shape, TypeInfo};

/// Handles every [`Shape::Scalar`] type.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarTranslatorFactory;

impl TranslatorFactory for ScalarTranslatorFactory {
    fn create(
        &self,
        path: &NodePath,
        _annotations: &Annotations,
        info: &TypeInfo,
        _ctx: CreateContext<'_>,
    ) -> Result<Option<Arc<dyn Translator>>> {
        let Shape::Scalar(shape) = &info.shape else {
            return Ok(None);
        };
        Ok(Some(Arc::new(ScalarTranslator {
            path: path.clone(),
            type_name: info.name(),
            shape: shape.clone(),
        })))
    }
}

#[derive(Debug)]
struct ScalarTranslator {
    path: NodePath,
    type_name: &'static str,
    shape: ScalarShape,
}

impl Translator for ScalarTranslator {
    fn load(&self, node: &Node, _ctx: &mut LoadContext) -> Result<Translated<AnyValue>> {
        let leaf = node
            .as_leaf()
            .ok_or_else(|| node_mismatch(NodeKind::Leaf, node))?;
        // Null cannot be held by a plain scalar; the field keeps its value.
        if leaf.value.is_null() {
            trace!(path = %node.path(), type_name = self.type_name, "null leaf omitted");
            return Ok(Translated::Omit);
        }
        (self.shape.from_leaf)(&leaf.value)
            .map(Translated::Value)
            .map_err(|kind| kind.at(node.path()))
    }

    fn save(
        &self,
        value: &dyn Any,
        index: bool,
        _ctx: &mut SaveContext,
    ) -> Result<Translated<Node>> {
        let leaf = (self.shape.to_leaf)(value).ok_or_else(|| {
            TranslateErrorKind::ValueMismatch {
                expected: self.type_name,
            }
            .at(&self.path)
        })?;
        Ok(Translated::Value(Node::leaf(self.path.clone(), leaf, index)))
    }
}
