use num_bigint::BigInt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Null,
    Bool,
    Integer,
    Float,
    Text,
}

impl core::fmt::Display for LeafKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A scalar value. How user types map onto these is decided by the scalar
/// translators, not by the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    Null,
    Bool(bool),
    Integer(BigInt),
    Float(f64),
    Text(String),
}

impl LeafValue {
    pub fn kind(&self) -> LeafKind {
        match self {
            Self::Null => LeafKind::Null,
            Self::Bool(_) => LeafKind::Bool,
            Self::Integer(_) => LeafKind::Integer,
            Self::Float(_) => LeafKind::Float,
            Self::Text(_) => LeafKind::Text,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text content as a string slice if this is a `Text` variant.
    pub fn as_str(&self) -> Option<&str> {
        if let Self::Text(text) = self {
            Some(text)
        } else {
            None
        }
    }
}

impl From<bool> for LeafValue {
    fn from(value: bool) -> Self {
        LeafValue::Bool(value)
    }
}

impl From<i64> for LeafValue {
    fn from(value: i64) -> Self {
        LeafValue::Integer(BigInt::from(value))
    }
}

impl From<BigInt> for LeafValue {
    fn from(value: BigInt) -> Self {
        LeafValue::Integer(value)
    }
}

impl From<f64> for LeafValue {
    fn from(value: f64) -> Self {
        LeafValue::Float(value)
    }
}

impl From<&str> for LeafValue {
    fn from(value: &str) -> Self {
        LeafValue::Text(value.to_string())
    }
}

impl From<String> for LeafValue {
    fn from(value: String) -> Self {
        LeafValue::Text(value)
    }
}

/// Leaf node payload: the value plus whether it participates in secondary
/// lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub value: LeafValue,
    pub indexed: bool,
}

impl Leaf {
    pub fn new(value: impl Into<LeafValue>, indexed: bool) -> Self {
        Self {
            value: value.into(),
            indexed,
        }
    }

    pub fn null(indexed: bool) -> Self {
        Self::new(LeafValue::Null, indexed)
    }
}
