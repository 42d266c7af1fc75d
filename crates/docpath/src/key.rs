//! Addressing keys and template slots.
//!
//! A [`Key`] is one step into a document: a map member name, a list index, or
//! an opaque [`Token`]. A [`Slot`] is one step of a template, which is either a
//! concrete key or a placeholder filled in later.

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// An identity-compared key.
///
/// Two tokens are equal only if one is a clone of the other; the label is
/// for display and never takes part in comparison.
#[derive(Clone)]
pub struct Token {
    id: u64,
    label: Option<Arc<str>>,
}

impl Token {
    /// Create a fresh unlabeled token.
    pub fn new() -> Self {
        Self {
            id: NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed),
            label: None,
        }
    }

    /// Create a fresh token carrying a debug label.
    pub fn labeled(label: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed),
            label: Some(label.into()),
        }
    }

    /// The debug label, if one was supplied.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.label().unwrap_or("token"))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}#{})", self.label().unwrap_or("?"), self.id)
    }
}

/// A single step into a document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Map member access: `{"name": value}`
    Name(String),
    /// List element access: `[index]`
    Index(usize),
    /// Identity-keyed member access.
    Token(Token),
}

impl Key {
    /// Create a name key.
    #[inline]
    pub fn name(k: impl Into<String>) -> Self {
        Key::Name(k.into())
    }

    /// Create an index key.
    #[inline]
    pub fn index(i: usize) -> Self {
        Key::Index(i)
    }

    /// Returns true if this is an index key.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// Get the name if this is a name key.
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(k) => Some(k),
            _ => None,
        }
    }

    /// Get the index if this is an index key.
    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(k) => f.write_str(k),
            Key::Index(i) => write!(f, "{}", i),
            Key::Token(t) => write!(f, "{}", t),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Name(k) => serializer.serialize_str(k),
            Key::Index(i) => serializer.serialize_u64(*i as u64),
            Key::Token(t) => serializer.collect_str(t),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_owned())
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i)
    }
}

impl From<Token> for Key {
    fn from(t: Token) -> Self {
        Key::Token(t)
    }
}

impl From<&Token> for Key {
    fn from(t: &Token) -> Self {
        Key::Token(t.clone())
    }
}

/// One position of a template.
///
/// `Placeholder` is its own variant, so no document key can ever be taken
/// for an unresolved position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A fixed key.
    Key(Key),
    /// A position supplied later.
    Placeholder,
}

impl Slot {
    /// Returns true if this slot is a placeholder.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Placeholder)
    }

    /// Get the fixed key, if any.
    #[inline]
    pub fn as_key(&self) -> Option<&Key> {
        match self {
            Slot::Key(k) => Some(k),
            Slot::Placeholder => None,
        }
    }
}

impl From<Key> for Slot {
    fn from(k: Key) -> Self {
        Slot::Key(k)
    }
}

/// Render a sequence of positions in the dotted/bracketed form, `None`
/// standing for a placeholder.
///
/// The first name key is bare, later ones get a `.` prefix. Index, token and
/// placeholder positions are always bracketed.
pub(crate) fn render<'a>(parts: impl IntoIterator<Item = Option<&'a Key>>) -> String {
    let mut out = String::new();
    for (i, part) in parts.into_iter().enumerate() {
        match part {
            Some(Key::Name(k)) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(k);
            }
            Some(key) => {
                out.push('[');
                out.push_str(&key.to_string());
                out.push(']');
            }
            None => out.push_str("[?]"),
        }
    }
    out
}

/// Build a `Vec<Key>` from literal arguments.
///
/// # Examples
///
/// ```
/// use docpath::{keys, Key, Token};
///
/// // String literals become Name keys, usize values become Index keys
/// let ks = keys!["items", 0usize, "name"];
/// assert_eq!(ks[1], Key::Index(0));
///
/// let tag = Token::labeled("meta");
/// let ks = keys!["data", &tag];
/// assert_eq!(ks[1], Key::Token(tag));
/// ```
#[macro_export]
macro_rules! keys {
    () => {
        ::std::vec::Vec::<$crate::Key>::new()
    };
    ($($key:expr),+ $(,)?) => {
        ::std::vec![$($crate::Key::from($key)),+]
    };
}
