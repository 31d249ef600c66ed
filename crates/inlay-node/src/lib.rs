/// Data structure for representing a location in a node tree.
pub mod path;

/// Scalar values stored at the leaves of a node tree.
pub mod leaf;

/// Map, list and leaf nodes.
pub mod node;

pub use leaf::{Leaf, LeafKind, LeafValue};
pub use node::{InsertError, Node, NodeKind, NodeList, NodeMap, NodeValue};
pub use path::{NodePath, PathSegment};

pub(crate) mod prelude_internal {
    #![allow(unused_imports)]
    pub use crate::leaf::{Leaf, LeafKind, LeafValue};
    pub use crate::node::{InsertError, Node, NodeKind, NodeList, NodeMap, NodeValue};
    pub use crate::path::{NodePath, PathSegment};
    pub use thisisplural::Plural;
}
