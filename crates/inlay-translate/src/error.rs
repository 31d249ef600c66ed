use inlay_node::{InsertError, LeafKind, NodeKind, NodePath};

pub type Result<T, E = TranslateError> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
#[error("at {path}: {kind}")]
pub struct TranslateError {
    pub path: NodePath,
    pub kind: TranslateErrorKind,
}

impl TranslateError {
    pub fn new(path: &NodePath, kind: TranslateErrorKind) -> Self {
        Self {
            path: path.clone(),
            kind,
        }
    }

    /// Structural problem with a type's declaration, raised while a translator
    /// is being built.
    pub fn is_configuration(&self) -> bool {
        self.kind.is_configuration()
    }

    /// Problem with the stored data itself, raised while loading.
    pub fn is_data_integrity(&self) -> bool {
        self.kind.is_data_integrity()
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum TranslateErrorKind {
    /// Type declares both index and unindex.
    #[error("cannot have both index and unindex on type {type_name}")]
    ConflictingClassIndex { type_name: &'static str },

    /// Property declares both index and unindex.
    #[error("cannot have both index and unindex on property {property}")]
    ConflictingPropertyIndex { property: String },

    /// Conditional ignore-save on a property of an embedded collection element.
    #[error(
        "conditional ignore-save on {property} is not allowed within embedded collections; only unconditional ignore-save is"
    )]
    ConditionalIgnoreSaveInEmbeddedCollection { property: String },

    /// Two properties of one type share a canonical name.
    #[error("duplicate property {property} on type {type_name}")]
    DuplicateProperty {
        property: String,
        type_name: &'static str,
    },

    /// Marked embeddable but has no property layout.
    #[error("type {type_name} is marked embeddable but is not a structural type")]
    NotStructural { type_name: &'static str },

    /// Every factory in the chain declined the type.
    #[error("no translator for type {type_name}")]
    NoTranslator { type_name: &'static str },

    /// More than one accepted name of a single property is present.
    #[error("collision trying to load field; multiple name matches ({first}, {second})")]
    AliasCollision { first: String, second: String },

    #[error("node mismatch: expected {expected}, got {actual}")]
    NodeMismatch {
        expected: NodeKind,
        actual: NodeKind,
    },

    #[error("leaf mismatch: expected {expected}, got {actual}")]
    LeafMismatch {
        expected: LeafKind,
        actual: LeafKind,
    },

    /// Erased value was not of the type the translator was built for.
    #[error("value mismatch: expected {expected}")]
    ValueMismatch { expected: &'static str },

    #[error("value out of range: {0}")]
    OutOfRange(String),

    #[error(transparent)]
    Insert(#[from] InsertError),

    /// The root translator declined to produce a value.
    #[error("root value was omitted")]
    RootOmitted,
}

impl TranslateErrorKind {
    /// Attach the path the error occurred at.
    pub fn at(self, path: &NodePath) -> TranslateError {
        TranslateError::new(path, self)
    }

    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConflictingClassIndex { .. }
                | Self::ConflictingPropertyIndex { .. }
                | Self::ConditionalIgnoreSaveInEmbeddedCollection { .. }
                | Self::DuplicateProperty { .. }
                | Self::NotStructural { .. }
                | Self::NoTranslator { .. }
        )
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::AliasCollision { .. })
    }

    pub(crate) fn value_mismatch<T>() -> Self {
        Self::ValueMismatch {
            expected: core::any::type_name::<T>(),
        }
    }
}
