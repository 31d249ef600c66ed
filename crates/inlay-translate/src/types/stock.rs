//! Descriptors for std and indexmap types.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use inlay_node::{LeafKind, LeafValue};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::{Describe, ElementCollection, KeyedCollection, Scalar, TypeInfo};
use crate::error::TranslateErrorKind;

fn leaf_mismatch(expected: LeafKind, actual: &LeafValue) -> TranslateErrorKind {
    TranslateErrorKind::LeafMismatch {
        expected,
        actual: actual.kind(),
    }
}

impl Scalar for bool {
    fn to_leaf(&self) -> LeafValue {
        LeafValue::Bool(*self)
    }

    fn from_leaf(leaf: &LeafValue) -> Result<Self, TranslateErrorKind> {
        match leaf {
            LeafValue::Bool(b) => Ok(*b),
            other => Err(leaf_mismatch(LeafKind::Bool, other)),
        }
    }
}

impl Scalar for String {
    fn to_leaf(&self) -> LeafValue {
        LeafValue::Text(self.clone())
    }

    fn from_leaf(leaf: &LeafValue) -> Result<Self, TranslateErrorKind> {
        match leaf {
            LeafValue::Text(text) => Ok(text.clone()),
            other => Err(leaf_mismatch(LeafKind::Text, other)),
        }
    }
}

impl Scalar for f64 {
    fn to_leaf(&self) -> LeafValue {
        LeafValue::Float(*self)
    }

    fn from_leaf(leaf: &LeafValue) -> Result<Self, TranslateErrorKind> {
        match leaf {
            LeafValue::Float(f) => Ok(*f),
            LeafValue::Integer(i) => i
                .to_f64()
                .ok_or_else(|| TranslateErrorKind::OutOfRange(format!("{i} as f64"))),
            other => Err(leaf_mismatch(LeafKind::Float, other)),
        }
    }
}

macro_rules! integer_scalar {
    ($($ty:ty => $to:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                fn to_leaf(&self) -> LeafValue {
                    LeafValue::Integer(BigInt::from(*self))
                }

                fn from_leaf(leaf: &LeafValue) -> Result<Self, TranslateErrorKind> {
                    match leaf {
                        LeafValue::Integer(i) => i.$to().ok_or_else(|| {
                            TranslateErrorKind::OutOfRange(format!(
                                "{} as {}",
                                i,
                                stringify!($ty)
                            ))
                        }),
                        other => Err(leaf_mismatch(LeafKind::Integer, other)),
                    }
                }
            }
        )*
    };
}

integer_scalar!(i32 => to_i32, i64 => to_i64, u32 => to_u32, u64 => to_u64);

macro_rules! describe_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeInfo {
                    TypeInfo::scalar::<Self>()
                }
            }
        )*
    };
}

describe_scalar!(bool, String, f64, i32, i64, u32, u64);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeInfo {
        TypeInfo::optional::<T>()
    }
}

impl<T: Describe> ElementCollection for Vec<T> {
    type Item = T;

    fn clear_items(&mut self) {
        self.clear();
    }

    fn push_item(&mut self, item: T) {
        self.push(item);
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeInfo {
        TypeInfo::collection::<Self>()
    }
}

impl<T: Describe> ElementCollection for VecDeque<T> {
    type Item = T;

    fn clear_items(&mut self) {
        self.clear();
    }

    fn push_item(&mut self, item: T) {
        self.push_back(item);
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> TypeInfo {
        TypeInfo::collection::<Self>()
    }
}

impl<T: Describe + Ord> ElementCollection for BTreeSet<T> {
    type Item = T;

    fn clear_items(&mut self) {
        self.clear();
    }

    fn push_item(&mut self, item: T) {
        self.insert(item);
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: Describe + Ord> Describe for BTreeSet<T> {
    fn describe() -> TypeInfo {
        TypeInfo::collection::<Self>()
    }
}

impl<V: Describe> KeyedCollection for BTreeMap<String, V> {
    type Value = V;

    fn clear_entries(&mut self) {
        self.clear();
    }

    fn insert_entry(&mut self, key: String, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V: Describe> Describe for BTreeMap<String, V> {
    fn describe() -> TypeInfo {
        TypeInfo::map::<Self>()
    }
}

impl<V, S> KeyedCollection for HashMap<String, V, S>
where
    V: Describe,
    S: BuildHasher + Default + Send + 'static,
{
    type Value = V;

    fn clear_entries(&mut self) {
        self.clear();
    }

    fn insert_entry(&mut self, key: String, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V, S> Describe for HashMap<String, V, S>
where
    V: Describe,
    S: BuildHasher + Default + Send + 'static,
{
    fn describe() -> TypeInfo {
        TypeInfo::map::<Self>()
    }
}

impl<V, S> KeyedCollection for IndexMap<String, V, S>
where
    V: Describe,
    S: BuildHasher + Default + Send + 'static,
{
    type Value = V;

    fn clear_entries(&mut self) {
        self.clear();
    }

    fn insert_entry(&mut self, key: String, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V, S> Describe for IndexMap<String, V, S>
where
    V: Describe,
    S: BuildHasher + Default + Send + 'static,
{
    fn describe() -> TypeInfo {
        TypeInfo::map::<Self>()
    }
}
