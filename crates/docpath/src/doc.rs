//! Native document type with token-keyed members.
//!
//! JSON objects can only be keyed by strings. `Doc` maps are keyed by
//! [`Key`], so a [`Token`](crate::Token) can address a real entry.

use crate::node::{check_list_index, put_in_list, Node, Refusal};
use crate::Key;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// A nested document of maps, lists and primitives.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Doc {
    /// Absent / null value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(serde_json::Number),
    /// String value.
    Text(String),
    /// Indexed sequence.
    List(Vec<Doc>),
    /// Keyed members in insertion order.
    Map(IndexMap<Key, Doc>),
}

impl Doc {
    /// An empty map.
    pub fn map() -> Self {
        Doc::Map(IndexMap::new())
    }

    /// Builder-style insert into a map. Non-map values are replaced by a map.
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Doc>) -> Self {
        if !matches!(self, Doc::Map(_)) {
            self = Doc::map();
        }
        if let Doc::Map(map) = &mut self {
            map.insert(map_key(&key.into()).into_owned(), value.into());
        }
        self
    }

    /// Borrow the text if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Doc::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the elements if this is a list.
    pub fn as_list(&self) -> Option<&[Doc]> {
        match self {
            Doc::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the members if this is a map.
    pub fn as_map(&self) -> Option<&IndexMap<Key, Doc>> {
        match self {
            Doc::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert to JSON. Token-keyed members have no JSON form and are skipped.
    pub fn to_json(&self) -> Value {
        match self {
            Doc::Null => Value::Null,
            Doc::Bool(b) => Value::Bool(*b),
            Doc::Number(n) => Value::Number(n.clone()),
            Doc::Text(s) => Value::String(s.clone()),
            Doc::List(items) => Value::Array(items.iter().map(Doc::to_json).collect()),
            Doc::Map(map) => {
                let mut obj = Map::new();
                for (k, v) in map {
                    match k {
                        Key::Name(name) => {
                            obj.insert(name.clone(), v.to_json());
                        }
                        Key::Index(i) => {
                            obj.insert(i.to_string(), v.to_json());
                        }
                        Key::Token(_) => {}
                    }
                }
                Value::Object(obj)
            }
        }
    }
}

// Index keys address maps by their decimal name, as in JSON.
fn map_key(key: &Key) -> Cow<'_, Key> {
    match key {
        Key::Index(i) => Cow::Owned(Key::Name(i.to_string())),
        other => Cow::Borrowed(other),
    }
}

impl Node for Doc {
    fn is_null(&self) -> bool {
        matches!(self, Doc::Null)
    }

    fn type_name(&self) -> &'static str {
        match self {
            Doc::Null => "null",
            Doc::Bool(_) => "boolean",
            Doc::Number(_) => "number",
            Doc::Text(_) => "string",
            Doc::List(_) => "list",
            Doc::Map(_) => "map",
        }
    }

    fn child(&self, key: &Key) -> Option<&Self> {
        match (self, key) {
            (Doc::List(items), Key::Index(i)) => items.get(*i),
            (Doc::Map(map), key) => map.get(&*map_key(key)),
            _ => None,
        }
    }

    fn child_mut(&mut self, key: &Key) -> Option<&mut Self> {
        match (self, key) {
            (Doc::List(items), Key::Index(i)) => items.get_mut(*i),
            (Doc::Map(map), key) => map.get_mut(&*map_key(key)),
            _ => None,
        }
    }

    fn live_keys(&self) -> Vec<Key> {
        match self {
            Doc::List(items) => (0..items.len()).map(Key::Index).collect(),
            Doc::Map(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn check_assign(&self, key: &Key) -> Result<(), Refusal> {
        match (self, key) {
            (Doc::List(items), Key::Index(i)) => check_list_index(items.len(), *i),
            (Doc::Map(_), _) => Ok(()),
            _ => Err(Refusal::WrongKind),
        }
    }

    fn assign(&mut self, key: &Key, value: Self) -> Result<(), Refusal> {
        match (self, key) {
            (Doc::List(items), Key::Index(i)) => put_in_list(items, *i, value, Doc::Null),
            (Doc::Map(map), key) => {
                map.insert(map_key(key).into_owned(), value);
                Ok(())
            }
            _ => Err(Refusal::WrongKind),
        }
    }

    fn remove_key(&mut self, key: &Key) -> bool {
        match (self, key) {
            (Doc::List(items), Key::Index(i)) => {
                if *i < items.len() {
                    items.remove(*i);
                    true
                } else {
                    false
                }
            }
            (Doc::Map(map), key) => map.shift_remove(&*map_key(key)).is_some(),
            _ => false,
        }
    }

    fn empty_list() -> Self {
        Doc::List(Vec::new())
    }

    fn empty_map() -> Self {
        Doc::map()
    }
}

impl From<Value> for Doc {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Doc::Null,
            Value::Bool(b) => Doc::Bool(b),
            Value::Number(n) => Doc::Number(n),
            Value::String(s) => Doc::Text(s),
            Value::Array(items) => Doc::List(items.into_iter().map(Doc::from).collect()),
            Value::Object(obj) => Doc::Map(
                obj.into_iter()
                    .map(|(k, v)| (Key::Name(k), Doc::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Doc {
    fn from(s: &str) -> Self {
        Doc::Text(s.to_owned())
    }
}

impl From<String> for Doc {
    fn from(s: String) -> Self {
        Doc::Text(s)
    }
}

impl From<bool> for Doc {
    fn from(b: bool) -> Self {
        Doc::Bool(b)
    }
}

impl From<i64> for Doc {
    fn from(n: i64) -> Self {
        Doc::Number(n.into())
    }
}

impl From<Vec<Doc>> for Doc {
    fn from(items: Vec<Doc>) -> Self {
        Doc::List(items)
    }
}
