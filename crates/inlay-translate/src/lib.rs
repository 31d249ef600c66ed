//! Schema-driven translation between Rust values and inlay node trees.
//!
//! Types describe themselves through [`types::Describe`]. A
//! [`registry::TranslatorRegistry`] turns those descriptors into reusable
//! [`translate::Translator`]s by walking a chain of factories, recursing
//! into properties, collection elements and map values as it goes.
//!
//! ```
//! use inlay_translate::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Describe for User {
//!     fn describe() -> TypeInfo {
//!         TypeInfo::structure::<Self>()
//!             .property(Property::new("name", |u: &Self| &u.name, |u: &mut Self| &mut u.name))
//!             .property(
//!                 Property::new("age", |u: &Self| &u.age, |u: &mut Self| &mut u.age)
//!                     .also_load(["years"]),
//!             )
//!             .build()
//!     }
//! }
//!
//! let registry = TranslatorRegistry::new();
//! let user = User { name: "Alice".to_string(), age: 30 };
//! let node = registry.save_root(&user).unwrap();
//! assert_eq!(registry.load_root::<User>(&node).unwrap(), user);
//! ```

/// Markers attached to types and properties.
pub mod annotation;

/// Embedding of structural types, the core of the crate.
pub mod embed;

pub mod error;

/// Construction-time context and the factory trait.
pub mod factory;

/// Structural members of a type.
pub mod property;

/// Factory chain and translator cache.
pub mod registry;

/// The translator contract.
pub mod translate;

/// Translators for scalars, optionals, collections and maps.
pub mod translators;

/// Type descriptors.
pub mod types;

pub use error::{Result, TranslateError, TranslateErrorKind};

pub mod prelude {
    pub use crate::annotation::{Annotation, Annotations, Condition, Policy};
    pub use crate::error::{TranslateError, TranslateErrorKind};
    pub use crate::factory::{CreateContext, TranslatorFactory};
    pub use crate::property::Property;
    pub use crate::registry::{RegistryConfig, TranslatorRegistry};
    pub use crate::translate::{LoadContext, SaveContext, Translated, Translator};
    pub use crate::types::{Describe, ElementCollection, KeyedCollection, Scalar, TypeInfo, TypeRef};
    pub use inlay_node::{Leaf, LeafValue, Node, NodeKind, NodePath};
}
