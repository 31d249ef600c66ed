use core::fmt::Display;

use crate::prelude_internal::*;

/// Location of a node, from the document root down.
///
/// Paths are only used for diagnostics. Extending a path never mutates the
/// receiver, so a path can be shared by every translator built beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Plural)]
#[plural(len, is_empty, iter)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    /// Create an empty path representing the document root
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the named child beneath this one.
    pub fn extend(&self, name: impl Into<String>) -> Self {
        self.with(PathSegment::Field(name.into()))
    }

    /// Path shared by every element of the collection at this path.
    pub fn element(&self) -> Self {
        self.with(PathSegment::Element)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Last segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment);
        NodePath(segments)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named property of a map node
    Field(String),
    /// Any element of a list node
    Element,
}

impl Display for NodePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i != 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Element => write!(f, "[]")?,
            }
        }
        Ok(())
    }
}
