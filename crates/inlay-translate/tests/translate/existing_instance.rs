use std::collections::BTreeMap;

use inlay_translate::prelude::*;
use pretty_assertions::assert_eq;

use super::fixtures::{LabelledMap, Leaderboard, SortedList, map_node, sorted_lists_created, text};

fn ranks_node(path: NodePath, ranks: &[i64]) -> Node {
    let mut node = Node::list(path.clone());
    for rank in ranks {
        node.as_list_mut()
            .unwrap()
            .push(Node::leaf(path.element(), *rank, true));
    }
    node
}

fn leaderboard_node(ranks: &[i64]) -> Node {
    let root = NodePath::root();
    let meta = map_node(
        root.extend("meta"),
        vec![("season", text(root.extend("meta").element(), "spring"))],
    );
    map_node(
        root.clone(),
        vec![
            ("title", text(root.extend("title"), "Weekly")),
            ("ranks", ranks_node(root.extend("ranks"), ranks)),
            ("meta", meta),
        ],
    )
}

#[test]
fn collection_is_loaded_into_the_constructed_instance() {
    let registry = TranslatorRegistry::new();
    let translator = registry.create_root::<Leaderboard>().unwrap();
    let node = leaderboard_node(&[1, 3, 2]);

    let before = sorted_lists_created();
    let loaded = translator
        .load(&node, &mut LoadContext::new())
        .unwrap()
        .value()
        .unwrap();
    // Only the owner's own constructor created a list.
    assert_eq!(sorted_lists_created() - before, 1);

    let board = loaded.downcast_ref::<Leaderboard>().unwrap();
    assert!(board.ranks.descending);
    assert_eq!(board.ranks.items, vec![3, 2, 1]);
}

#[test]
fn map_is_loaded_into_the_constructed_instance() {
    let registry = TranslatorRegistry::new();
    let board: Leaderboard = registry.load_root(&leaderboard_node(&[5])).unwrap();
    assert_eq!(
        board.meta,
        LabelledMap {
            label: "custom",
            entries: BTreeMap::from([("season".to_string(), "spring".to_string())]),
        }
    );
}

#[test]
fn absent_collection_keeps_constructed_contents() {
    let registry = TranslatorRegistry::new();
    let node = map_node(
        NodePath::root(),
        vec![("title", text(NodePath::root().extend("title"), "Empty"))],
    );
    let board: Leaderboard = registry.load_root(&node).unwrap();
    assert_eq!(board.ranks.items, vec![1000]);
    assert_eq!(board.meta.entries.len(), 1);
}

#[test]
fn null_collection_replaces_instance() {
    let registry = TranslatorRegistry::new();
    let node = map_node(
        NodePath::root(),
        vec![(
            "ranks",
            Node::leaf(NodePath::root().extend("ranks"), LeafValue::Null, true),
        )],
    );
    let board: Leaderboard = registry.load_root(&node).unwrap();
    assert_eq!(
        board.ranks,
        SortedList {
            descending: false,
            items: vec![],
        }
    );
}

#[test]
fn round_trip_preserves_comparator() {
    let registry = TranslatorRegistry::new();
    let mut board = Leaderboard::default();
    board.ranks.clear_items();
    for rank in [7, 9, 8] {
        board.ranks.push_item(rank);
    }
    let node = registry.save_root(&board).unwrap();
    let loaded: Leaderboard = registry.load_root(&node).unwrap();
    assert_eq!(loaded, board);
}
