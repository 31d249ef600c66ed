//! Translators for non-structural shapes.
//!
//! Each module pairs a factory with the translator it builds. The registry
//! installs them ahead of the embedding factory.

pub mod collection;
pub mod map;
pub mod optional;
pub mod scalar;

pub use collection::CollectionTranslatorFactory;
pub use map::MapTranslatorFactory;
pub use optional::OptionalTranslatorFactory;
pub use scalar::ScalarTranslatorFactory;

use inlay_node::{Node, NodeKind};

use crate::error::{TranslateError, TranslateErrorKind};

pub(crate) fn node_mismatch(expected: NodeKind, node: &Node) -> TranslateError {
    TranslateErrorKind::NodeMismatch {
        expected,
        actual: node.kind(),
    }
    .at(node.path())
}
