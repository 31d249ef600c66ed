use inlay_translate::prelude::*;
use pretty_assertions::assert_eq;

use super::fixtures::{Address, Person, alice, init_tracing};

#[test]
fn person_round_trips() {
    init_tracing();
    let registry = TranslatorRegistry::new();
    let person = alice();
    let node = registry.save_root(&person).unwrap();
    let loaded: Person = registry.load_root(&node).unwrap();
    assert_eq!(loaded, person);
}

#[test]
fn saved_tree_shape() {
    let registry = TranslatorRegistry::new();
    let node = registry.save_root(&alice()).unwrap();

    let root = node.as_map().unwrap();
    assert_eq!(
        root.keys().collect::<Vec<_>>(),
        ["name", "age", "home", "previous", "nicknames", "scores", "work"]
    );

    let home = node.get("home").unwrap();
    assert_eq!(home.path().to_string(), "home");
    assert_eq!(
        home.get("city").unwrap().as_leaf().unwrap().value,
        LeafValue::from("Springfield")
    );

    let previous = node.get("previous").unwrap().as_list().unwrap();
    assert_eq!(previous.len(), 2);
    let first = previous.get(0).unwrap();
    assert_eq!(first.path().to_string(), "previous[]");
    assert_eq!(
        first.get("street").unwrap().path().to_string(),
        "previous[].street"
    );
    assert!(first.get("zip").unwrap().as_leaf().unwrap().value.is_null());
}

#[test]
fn empty_containers_are_not_written() {
    let registry = TranslatorRegistry::new();
    let person = Person {
        name: "Bob".to_string(),
        ..Default::default()
    };
    let node = registry.save_root(&person).unwrap();
    assert!(node.get("previous").is_none());
    assert!(node.get("nicknames").is_none());
    assert!(node.get("scores").is_none());
    assert!(node.get("work").unwrap().as_leaf().unwrap().value.is_null());

    let loaded: Person = registry.load_root(&node).unwrap();
    assert_eq!(loaded, person);
}

#[test]
fn missing_keys_leave_defaults() {
    let registry = TranslatorRegistry::new();
    let mut node = Node::map(NodePath::root());
    node.add("name", Node::leaf(NodePath::root().extend("name"), "Carol", true))
        .unwrap();
    let loaded: Person = registry.load_root(&node).unwrap();
    assert_eq!(
        loaded,
        Person {
            name: "Carol".to_string(),
            ..Default::default()
        }
    );
}

#[test]
fn null_scalar_is_omitted_and_counted() {
    let registry = TranslatorRegistry::new();
    let translator = registry.create_root::<Person>().unwrap();
    let mut node = Node::map(NodePath::root());
    node.add("age", Node::leaf(NodePath::root().extend("age"), LeafValue::Null, true))
        .unwrap();

    let mut ctx = LoadContext::new();
    let loaded = translator.load(&node, &mut ctx).unwrap().value().unwrap();
    assert_eq!(loaded.downcast_ref::<Person>().unwrap().age, 0);
    assert_eq!(ctx.omitted(), 1);
}

#[test]
fn empty_collection_counts_as_omitted_on_save() {
    let registry = TranslatorRegistry::new();
    let translator = registry.create_root::<Person>().unwrap();
    let mut ctx = SaveContext::new();
    translator.save(&Person::default(), true, &mut ctx).unwrap();
    // previous, nicknames, scores
    assert_eq!(ctx.omitted(), 3);
}

#[test]
fn loading_root_from_leaf_is_an_error() {
    let registry = TranslatorRegistry::new();
    let err = registry
        .load_root::<Address>(&Node::leaf(NodePath::root(), "nope", true))
        .unwrap_err();
    assert_eq!(
        err.kind,
        TranslateErrorKind::NodeMismatch {
            expected: NodeKind::Map,
            actual: NodeKind::Leaf,
        }
    );
}

#[test]
fn nested_error_carries_path() {
    let registry = TranslatorRegistry::new();
    let mut home = Node::map(NodePath::root().extend("home"));
    home.add(
        "zip",
        Node::leaf(NodePath::root().extend("home").extend("zip"), "not a number", true),
    )
    .unwrap();
    let mut node = Node::map(NodePath::root());
    node.add("home", home).unwrap();

    let err = registry.load_root::<Person>(&node).unwrap_err();
    assert_eq!(err.path.to_string(), "home.zip");
    assert!(matches!(err.kind, TranslateErrorKind::LeafMismatch { .. }));
}

#[test]
fn saving_wrong_type_is_an_error() {
    let registry = TranslatorRegistry::new();
    let translator = registry.create_root::<Person>().unwrap();
    let err = translator
        .save(&Address::default(), true, &mut SaveContext::new())
        .unwrap_err();
    assert!(matches!(err.kind, TranslateErrorKind::ValueMismatch { .. }));
}

#[test]
fn scalar_root_is_not_structural() {
    let registry = TranslatorRegistry::new();
    let err = registry.create_root::<i64>().unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err.kind,
        TranslateErrorKind::NotStructural {
            type_name: core::any::type_name::<i64>()
        }
    );
}
