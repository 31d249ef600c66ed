use inlay_translate::prelude::*;
use pretty_assertions::assert_eq;

use super::fixtures::Address;

#[derive(Debug, Default, Clone, PartialEq)]
struct Shipment {
    address: Address,
}

impl Describe for Shipment {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .property(Property::new(
                "address",
                |s: &Self| &s.address,
                |s: &mut Self| &mut s.address,
            ))
            .build()
    }
}

/// Structural, but only embeddable where a property asks for it.
#[derive(Debug, Default, Clone, PartialEq)]
struct Dimensions {
    width: i64,
    height: i64,
}

impl Describe for Dimensions {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .property(Property::new(
                "width",
                |d: &Self| &d.width,
                |d: &mut Self| &mut d.width,
            ))
            .property(Property::new(
                "height",
                |d: &Self| &d.height,
                |d: &mut Self| &mut d.height,
            ))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Parcel {
    size: Dimensions,
}

impl Describe for Parcel {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .property(
                Property::new("size", |p: &Self| &p.size, |p: &mut Self| &mut p.size).embed(),
            )
            .build()
    }
}

#[derive(Debug, Default)]
struct LooseParcel {
    size: Dimensions,
}

impl Describe for LooseParcel {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .property(Property::new(
                "size",
                |p: &Self| &p.size,
                |p: &mut Self| &mut p.size,
            ))
            .build()
    }
}

fn sample_address() -> Address {
    Address {
        street: "22 Harbor Rd".to_string(),
        city: "Portsmouth".to_string(),
        zip: Some(3801),
    }
}

#[test]
fn root_save_matches_embedded_save() {
    let registry = TranslatorRegistry::new();
    let address = sample_address();

    let as_root = registry.save_root(&address).unwrap();
    let wrapped = registry
        .save_root(&Shipment {
            address: address.clone(),
        })
        .unwrap();

    let embedded = wrapped.get("address").unwrap();
    assert_eq!(&as_root, embedded);
    assert_eq!(as_root.path(), &NodePath::root());
    assert_eq!(embedded.path(), &NodePath::root().extend("address"));
}

#[test]
fn embedded_node_loads_as_root() {
    let registry = TranslatorRegistry::new();
    let wrapped = registry
        .save_root(&Shipment {
            address: sample_address(),
        })
        .unwrap();
    let address: Address = registry.load_root(wrapped.get("address").unwrap()).unwrap();
    assert_eq!(address, sample_address());
}

#[test]
fn property_marker_embeds_unmarked_type() {
    let registry = TranslatorRegistry::new();
    let parcel = Parcel {
        size: Dimensions {
            width: 30,
            height: 12,
        },
    };
    let node = registry.save_root(&parcel).unwrap();
    let size = node.get("size").unwrap();
    assert_eq!(size.kind(), NodeKind::Map);
    assert_eq!(size.get("width").unwrap().as_leaf().unwrap().value, LeafValue::from(30_i64));

    let loaded: Parcel = registry.load_root(&node).unwrap();
    assert_eq!(loaded, parcel);
}

#[test]
fn unmarked_structural_property_has_no_translator() {
    let registry = TranslatorRegistry::new();
    let err = registry.create_root::<LooseParcel>().unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.path, NodePath::root().extend("size"));
    assert_eq!(
        err.kind,
        TranslateErrorKind::NoTranslator {
            type_name: core::any::type_name::<Dimensions>()
        }
    );
}
