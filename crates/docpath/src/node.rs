//! Document node abstraction.
//!
//! Path algorithms only need a handful of structural operations from a
//! document. [`Node`] captures them so the same traversal code drives both
//! `serde_json::Value` and the token-capable [`Doc`](crate::Doc).

use crate::Key;
use serde_json::{Map, Value};

/// Largest number of null elements one write may pad onto a list.
///
/// Writing index `i` into a list of length `len` is accepted while
/// `i - len <= MAX_LIST_PADDING`.
pub const MAX_LIST_PADDING: usize = 1 << 16;

/// Why a node refused to store a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// The node cannot hold this kind of key at all.
    WrongKind,
    /// The index lies more than [`MAX_LIST_PADDING`] past the end of a list.
    TooFar {
        /// Current length of the list.
        len: usize,
    },
}

/// Structural access to one node of a document.
pub trait Node: Sized {
    /// Returns true for the null node, which counts as absent during traversal.
    fn is_null(&self) -> bool;

    /// Short name of the node's kind, used in error messages.
    fn type_name(&self) -> &'static str;

    /// Look up a direct child.
    fn child(&self, key: &Key) -> Option<&Self>;

    /// Look up a direct child mutably.
    fn child_mut(&mut self, key: &Key) -> Option<&mut Self>;

    /// Keys currently present, in natural order: ascending indices for a
    /// list, member order for a map, nothing otherwise.
    fn live_keys(&self) -> Vec<Key>;

    /// Check whether [`Node::assign`] would accept `key`, without changing
    /// anything.
    fn check_assign(&self, key: &Key) -> Result<(), Refusal>;

    /// Store `value` under `key`, replacing any existing child. An index past
    /// the end of a list pads the gap with nulls.
    ///
    /// Leaves the node untouched when it refuses the key.
    fn assign(&mut self, key: &Key, value: Self) -> Result<(), Refusal>;

    /// Remove the child under `key`. List removal shifts later elements down.
    ///
    /// Returns true if something was removed.
    fn remove_key(&mut self, key: &Key) -> bool;

    /// A new empty list.
    fn empty_list() -> Self;

    /// A new empty map.
    fn empty_map() -> Self;
}

impl Node for Value {
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn child(&self, key: &Key) -> Option<&Self> {
        match (self, key) {
            (Value::Object(obj), Key::Name(k)) => obj.get(k),
            (Value::Object(obj), Key::Index(i)) => obj.get(&i.to_string()),
            (Value::Array(arr), Key::Index(i)) => arr.get(*i),
            _ => None,
        }
    }

    fn child_mut(&mut self, key: &Key) -> Option<&mut Self> {
        match (self, key) {
            (Value::Object(obj), Key::Name(k)) => obj.get_mut(k),
            (Value::Object(obj), Key::Index(i)) => obj.get_mut(&i.to_string()),
            (Value::Array(arr), Key::Index(i)) => arr.get_mut(*i),
            _ => None,
        }
    }

    fn live_keys(&self) -> Vec<Key> {
        match self {
            Value::Array(arr) => (0..arr.len()).map(Key::Index).collect(),
            Value::Object(obj) => obj.keys().map(|k| Key::Name(k.clone())).collect(),
            _ => Vec::new(),
        }
    }

    fn check_assign(&self, key: &Key) -> Result<(), Refusal> {
        match (self, key) {
            (Value::Object(_), Key::Name(_) | Key::Index(_)) => Ok(()),
            (Value::Array(arr), Key::Index(i)) => check_list_index(arr.len(), *i),
            _ => Err(Refusal::WrongKind),
        }
    }

    fn assign(&mut self, key: &Key, value: Self) -> Result<(), Refusal> {
        match (self, key) {
            (Value::Object(obj), Key::Name(k)) => {
                obj.insert(k.clone(), value);
                Ok(())
            }
            (Value::Object(obj), Key::Index(i)) => {
                obj.insert(i.to_string(), value);
                Ok(())
            }
            (Value::Array(arr), Key::Index(i)) => put_in_list(arr, *i, value, Value::Null),
            _ => Err(Refusal::WrongKind),
        }
    }

    fn remove_key(&mut self, key: &Key) -> bool {
        match (self, key) {
            (Value::Object(obj), Key::Name(k)) => obj.shift_remove(k).is_some(),
            (Value::Object(obj), Key::Index(i)) => obj.shift_remove(&i.to_string()).is_some(),
            (Value::Array(arr), Key::Index(i)) => {
                if *i < arr.len() {
                    arr.remove(*i);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn empty_list() -> Self {
        Value::Array(Vec::new())
    }

    fn empty_map() -> Self {
        Value::Object(Map::new())
    }
}

pub(crate) fn check_list_index(len: usize, index: usize) -> Result<(), Refusal> {
    if index.saturating_sub(len) > MAX_LIST_PADDING {
        Err(Refusal::TooFar { len })
    } else {
        Ok(())
    }
}

pub(crate) fn put_in_list<T: Clone>(
    items: &mut Vec<T>,
    index: usize,
    value: T,
    fill: T,
) -> Result<(), Refusal> {
    check_list_index(items.len(), index)?;
    if index < items.len() {
        items[index] = value;
    } else {
        items.resize(index, fill);
        items.push(value);
    }
    Ok(())
}
