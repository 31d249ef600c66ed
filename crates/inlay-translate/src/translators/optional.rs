use core::any::Any;
use std::sync::Arc;

use inlay_node::{LeafValue, Node, NodePath};

use crate::annotation::Annotations;
use crate::error::{Result, TranslateErrorKind};
use crate::factory::{CreateContext, TranslatorFactory};
use crate::translate::{LoadContext, SaveContext, Translated, Translator};
use crate::types::{AnyValue, OptionalShape, Shape, TypeInfo};

/// Handles `Option<T>` by storing `None` as a null leaf and delegating
/// `Some` to the translator for `T` at the same position.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptionalTranslatorFactory;

impl TranslatorFactory for OptionalTranslatorFactory {
    fn create(
        &self,
        path: &NodePath,
        annotations: &Annotations,
        info: &TypeInfo,
        ctx: CreateContext<'_>,
    ) -> Result<Option<Arc<dyn Translator>>> {
        let Shape::Optional(shape) = &info.shape else {
            return Ok(None);
        };
        let inner = ctx
            .registry()
            .create(path, annotations, shape.inner, ctx)?;
        Ok(Some(Arc::new(OptionalTranslator {
            path: path.clone(),
            type_name: info.name(),
            shape: shape.clone(),
            inner,
        })))
    }
}

#[derive(Debug)]
struct OptionalTranslator {
    path: NodePath,
    type_name: &'static str,
    shape: OptionalShape,
    inner: Arc<dyn Translator>,
}

impl OptionalTranslator {
    fn mismatch(&self, path: &NodePath) -> crate::error::TranslateError {
        TranslateErrorKind::ValueMismatch {
            expected: self.type_name,
        }
        .at(path)
    }
}

impl Translator for OptionalTranslator {
    fn load(&self, node: &Node, ctx: &mut LoadContext) -> Result<Translated<AnyValue>> {
        let value = match node.as_leaf() {
            Some(leaf) if leaf.value.is_null() => None,
            _ => match self.inner.load(node, ctx)? {
                Translated::Value(value) => Some(value),
                Translated::Omit => return Ok(Translated::Omit),
            },
        };
        (self.shape.wrap)(value)
            .map(Translated::Value)
            .ok_or_else(|| self.mismatch(node.path()))
    }

    fn save(
        &self,
        value: &dyn Any,
        index: bool,
        ctx: &mut SaveContext,
    ) -> Result<Translated<Node>> {
        match (self.shape.peek)(value) {
            None => Err(self.mismatch(&self.path)),
            Some(None) => Ok(Translated::Value(Node::leaf(
                self.path.clone(),
                LeafValue::Null,
                index,
            ))),
            Some(Some(inner)) => self.inner.save(inner, index, ctx),
        }
    }
}
