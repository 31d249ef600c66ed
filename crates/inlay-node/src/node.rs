use indexmap::IndexMap;

use crate::prelude_internal::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Map,
    List,
    Leaf,
}

impl core::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Map => write!(f, "map"),
            Self::List => write!(f, "list"),
            Self::Leaf => write!(f, "leaf"),
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum InsertError {
    #[error("key {key} already assigned at {path}")]
    AlreadyAssigned { key: String, path: NodePath },
    #[error("cannot add key {key} to a {kind} node at {path}")]
    NotAMap {
        key: String,
        kind: NodeKind,
        path: NodePath,
    },
}

/// A node in the tree, tagged with the path it was created at.
///
/// Equality is structural: the path is diagnostic only and is ignored, so
/// the same data saved at two different positions compares equal.
#[derive(Debug, Clone)]
pub struct Node {
    pub path: NodePath,
    pub content: NodeValue,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Map(NodeMap),
    List(NodeList),
    Leaf(Leaf),
}

impl NodeValue {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Map(_) => NodeKind::Map,
            Self::List(_) => NodeKind::List,
            Self::Leaf(_) => NodeKind::Leaf,
        }
    }
}

impl Node {
    pub fn new(path: NodePath, content: NodeValue) -> Self {
        Self { path, content }
    }

    /// Empty map node.
    pub fn map(path: NodePath) -> Self {
        Self::new(path, NodeValue::Map(NodeMap::new()))
    }

    /// Empty list node.
    pub fn list(path: NodePath) -> Self {
        Self::new(path, NodeValue::List(NodeList::default()))
    }

    pub fn leaf(path: NodePath, value: impl Into<LeafValue>, indexed: bool) -> Self {
        Self::new(path, NodeValue::Leaf(Leaf::new(value, indexed)))
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.content.kind()
    }

    pub fn as_map(&self) -> Option<&NodeMap> {
        match &self.content {
            NodeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut NodeMap> {
        match &mut self.content {
            NodeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&NodeList> {
        match &self.content {
            NodeValue::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut NodeList> {
        match &mut self.content {
            NodeValue::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match &self.content {
            NodeValue::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Child of a map node. `None` for missing keys and non-map nodes.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Add a child to a map node. Non-map nodes are left as is.
    pub fn add(&mut self, key: impl Into<String>, child: Node) -> Result<(), InsertError> {
        let kind = self.kind();
        match &mut self.content {
            NodeValue::Map(map) => map.add(key.into(), child, &self.path),
            _ => Err(InsertError::NotAMap {
                key: key.into(),
                kind,
                path: self.path.clone(),
            }),
        }
    }
}

/// Ordered mapping of field name to child node. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct NodeMap(IndexMap<String, Node>);

impl NodeMap {
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Insert a new key. `path` is only used to report a duplicate.
    pub fn add(&mut self, key: String, node: Node, path: &NodePath) -> Result<(), InsertError> {
        match self.0.entry(key) {
            indexmap::map::Entry::Occupied(e) => Err(InsertError::AlreadyAssigned {
                key: e.key().clone(),
                path: path.clone(),
            }),
            indexmap::map::Entry::Vacant(e) => {
                e.insert(node);
                Ok(())
            }
        }
    }
}

/// Ordered sequence of child nodes.
#[derive(Debug, Clone, Default, PartialEq, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref)]
pub struct NodeList(Vec<Node>);

impl NodeList {
    pub fn push(&mut self, node: Node) {
        self.0.push(node);
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.0.get(index)
    }
}
