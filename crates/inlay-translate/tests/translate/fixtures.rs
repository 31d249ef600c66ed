#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;

use inlay_translate::prelude::*;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: Option<u32>,
}

impl Describe for Address {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .embed()
            .property(Property::new(
                "street",
                |a: &Self| &a.street,
                |a: &mut Self| &mut a.street,
            ))
            .property(Property::new(
                "city",
                |a: &Self| &a.city,
                |a: &mut Self| &mut a.city,
            ))
            .property(Property::new(
                "zip",
                |a: &Self| &a.zip,
                |a: &mut Self| &mut a.zip,
            ))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub home: Address,
    pub previous: Vec<Address>,
    pub nicknames: Vec<String>,
    pub scores: BTreeMap<String, i64>,
    pub work: Option<Address>,
}

impl Describe for Person {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .property(Property::new(
                "name",
                |p: &Self| &p.name,
                |p: &mut Self| &mut p.name,
            ))
            .property(Property::new(
                "age",
                |p: &Self| &p.age,
                |p: &mut Self| &mut p.age,
            ))
            .property(Property::new(
                "home",
                |p: &Self| &p.home,
                |p: &mut Self| &mut p.home,
            ))
            .property(Property::new(
                "previous",
                |p: &Self| &p.previous,
                |p: &mut Self| &mut p.previous,
            ))
            .property(Property::new(
                "nicknames",
                |p: &Self| &p.nicknames,
                |p: &mut Self| &mut p.nicknames,
            ))
            .property(Property::new(
                "scores",
                |p: &Self| &p.scores,
                |p: &mut Self| &mut p.scores,
            ))
            .property(Property::new(
                "work",
                |p: &Self| &p.work,
                |p: &mut Self| &mut p.work,
            ))
            .build()
    }
}

pub fn alice() -> Person {
    Person {
        name: "Alice".to_string(),
        age: 34,
        home: Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            zip: Some(12345),
        },
        previous: vec![
            Address {
                street: "9 Elm St".to_string(),
                city: "Shelbyville".to_string(),
                zip: None,
            },
            Address {
                street: "4 Oak Ave".to_string(),
                city: "Ogdenville".to_string(),
                zip: Some(54321),
            },
        ],
        nicknames: vec!["Al".to_string(), "Ally".to_string()],
        scores: BTreeMap::from([("chess".to_string(), 1800), ("go".to_string(), 3)]),
        work: Some(Address {
            street: "100 Industrial Way".to_string(),
            city: "Springfield".to_string(),
            zip: None,
        }),
    }
}

thread_local! {
    static SORTED_LISTS_CREATED: Cell<usize> = const { Cell::new(0) };
}

/// Number of [`SortedList`]s created on this thread so far.
pub fn sorted_lists_created() -> usize {
    SORTED_LISTS_CREATED.with(Cell::get)
}

/// A collection that keeps its items ordered by its own comparator.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedList {
    pub descending: bool,
    pub items: Vec<i64>,
}

impl SortedList {
    pub fn descending() -> Self {
        Self {
            descending: true,
            ..Self::default()
        }
    }
}

impl Default for SortedList {
    fn default() -> Self {
        SORTED_LISTS_CREATED.with(|c| c.set(c.get() + 1));
        Self {
            descending: false,
            items: Vec::new(),
        }
    }
}

impl ElementCollection for SortedList {
    type Item = i64;

    fn clear_items(&mut self) {
        self.items.clear();
    }

    fn push_item(&mut self, item: i64) {
        let descending = self.descending;
        let at = self
            .items
            .partition_point(|&x| if descending { x > item } else { x < item });
        self.items.insert(at, item);
    }

    fn items(&self) -> impl Iterator<Item = &i64> {
        self.items.iter()
    }
}

impl Describe for SortedList {
    fn describe() -> TypeInfo {
        TypeInfo::collection::<Self>()
    }
}

/// A map that remembers who configured it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledMap {
    pub label: &'static str,
    pub entries: BTreeMap<String, String>,
}

impl Default for LabelledMap {
    fn default() -> Self {
        Self {
            label: "default",
            entries: BTreeMap::new(),
        }
    }
}

impl KeyedCollection for LabelledMap {
    type Value = String;

    fn clear_entries(&mut self) {
        self.entries.clear();
    }

    fn insert_entry(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &String)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Describe for LabelledMap {
    fn describe() -> TypeInfo {
        TypeInfo::map::<Self>()
    }
}

/// Sets up non-default containers the way a caller's constructor would.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub title: String,
    pub ranks: SortedList,
    pub meta: LabelledMap,
}

impl Default for Leaderboard {
    fn default() -> Self {
        let mut ranks = SortedList::descending();
        ranks.push_item(1000);
        Self {
            title: String::new(),
            ranks,
            meta: LabelledMap {
                label: "custom",
                entries: BTreeMap::from([("seed".to_string(), "value".to_string())]),
            },
        }
    }
}

impl Describe for Leaderboard {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .property(Property::new(
                "title",
                |b: &Self| &b.title,
                |b: &mut Self| &mut b.title,
            ))
            .property(Property::new(
                "ranks",
                |b: &Self| &b.ranks,
                |b: &mut Self| &mut b.ranks,
            ))
            .property(Property::new(
                "meta",
                |b: &Self| &b.meta,
                |b: &mut Self| &mut b.meta,
            ))
            .build()
    }
}

/// Build a map node from `(key, node)` pairs.
pub fn map_node(path: NodePath, children: Vec<(&str, Node)>) -> Node {
    let mut node = Node::map(path);
    for (key, child) in children {
        node.add(key, child).unwrap();
    }
    node
}

pub fn text(path: NodePath, value: &str) -> Node {
    Node::leaf(path, value, true)
}
