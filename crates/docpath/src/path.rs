//! Concrete paths into a document.
//!
//! A [`Path`] is an immutable key sequence obtained from a
//! [`RootContext`](crate::RootContext). It carries no document: reads and
//! writes take the document as an argument.

use crate::key::render;
use crate::node::{Node, Refusal};
use crate::registry::Registry;
use crate::template::Template;
use crate::{Key, PathError, PathResult, Slot};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Shared state of one canonical path.
pub(crate) struct PathNode {
    keys: Vec<Key>,
    rendered: OnceLock<String>,
}

impl PathNode {
    pub(crate) fn new(keys: Vec<Key>) -> Self {
        Self {
            keys,
            rendered: OnceLock::new(),
        }
    }

    pub(crate) fn rendered(&self) -> &str {
        self.rendered.get_or_init(|| render(self.keys.iter().map(Some)))
    }
}

/// A location in a document.
///
/// Cloning is cheap and keeps the instance identity. `==` compares keys;
/// [`Path::ptr_eq`] compares identity, which within one root context is the
/// same thing.
///
/// # Examples
///
/// ```
/// use docpath::{keys, root_path};
/// use serde_json::json;
///
/// let mut doc = json!({"a": {"b": {"c": 5}}});
/// let path = root_path().sub_path(keys!["a", "b", "c"]);
///
/// assert_eq!(path.get_value(&doc), Some(&json!(5)));
/// path.set_value(&mut doc, json!(9)).unwrap();
/// assert_eq!(doc["a"]["b"]["c"], 9);
/// ```
#[derive(Clone)]
pub struct Path {
    node: Arc<PathNode>,
    registry: Arc<Registry>,
}

impl Path {
    pub(crate) fn from_node(node: Arc<PathNode>, registry: Arc<Registry>) -> Self {
        Self { node, registry }
    }

    /// Returns true for the zero-length path denoting the whole document.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.node.keys.is_empty()
    }

    /// The ordered keys of this path.
    #[inline]
    pub fn parts(&self) -> &[Key] {
        &self.node.keys
    }

    /// Number of keys in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.node.keys.len()
    }

    /// Same as [`Path::is_root`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Returns true if both handles refer to the same canonical instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Path) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Read the value at this path.
    ///
    /// Returns `None` as soon as a step hits a null node or a missing key.
    /// Never fails.
    pub fn get_value<'d, N: Node>(&self, doc: &'d N) -> Option<&'d N> {
        self.node.keys.iter().try_fold(doc, |node, key| {
            if node.is_null() {
                None
            } else {
                node.child(key)
            }
        })
    }

    /// Mutable variant of [`Path::get_value`].
    pub fn get_value_mut<'d, N: Node>(&self, doc: &'d mut N) -> Option<&'d mut N> {
        self.node.keys.iter().try_fold(doc, |node, key| {
            if node.is_null() {
                None
            } else {
                node.child_mut(key)
            }
        })
    }

    /// Write `value` at this path, creating missing intermediate containers.
    ///
    /// A missing or null intermediate becomes an empty list when the next key
    /// is an index, and an empty map otherwise. Writing a null value keeps the
    /// key present; use [`Path::remove_value`] to drop it.
    ///
    /// The whole write is checked before anything is created, so a rejected
    /// write leaves `doc` unchanged.
    pub fn set_value<N: Node>(&self, doc: &mut N, value: N) -> PathResult<()> {
        let Some((last, init)) = self.node.keys.split_last() else {
            return Err(PathError::root_mutation("set a value at"));
        };
        self.check_writable(&*doc)?;

        let mut node = doc;
        for (i, key) in init.iter().enumerate() {
            if node.child(key).map_or(true, Node::is_null) {
                let next = &self.node.keys[i + 1];
                tracing::debug!(path = %self, depth = i, "creating intermediate container");
                if let Err(refusal) = node.assign(key, fresh_container(next)) {
                    return Err(self.refused(key, &*node, refusal));
                }
            }
            let found = node.type_name();
            node = match node.child_mut(key) {
                Some(child) => child,
                None => return Err(self.not_assignable(key, found)),
            };
        }

        match node.assign(last, value) {
            Ok(()) => Ok(()),
            Err(refusal) => Err(self.refused(last, &*node, refusal)),
        }
    }

    // Walks the existing document read-only. Once a step leaves it, the
    // remaining keys land in fresh containers and are checked against those.
    fn check_writable<N: Node>(&self, doc: &N) -> PathResult<()> {
        let mut existing = Some(doc);
        for key in &self.node.keys {
            let fresh;
            let holder = match existing {
                Some(node) => node,
                None => {
                    fresh = fresh_container::<N>(key);
                    &fresh
                }
            };
            holder
                .check_assign(key)
                .map_err(|refusal| self.refused(key, holder, refusal))?;
            existing = existing
                .and_then(|node| node.child(key))
                .filter(|child| !child.is_null());
        }
        Ok(())
    }

    /// Remove the value at this path.
    ///
    /// List elements are spliced out, shifting later elements down; map
    /// members are deleted. Missing intermediates make this a no-op.
    /// Returns whether anything was removed.
    pub fn remove_value<N: Node>(&self, doc: &mut N) -> PathResult<bool> {
        let Some((last, init)) = self.node.keys.split_last() else {
            return Err(PathError::root_mutation("remove"));
        };

        let mut node = doc;
        for key in init {
            node = match node.child_mut(key) {
                Some(child) if !child.is_null() => child,
                _ => {
                    tracing::trace!(path = %self, "remove skipped, intermediate missing");
                    return Ok(false);
                }
            };
        }
        Ok(node.remove_key(last))
    }

    /// The canonical path for this path's keys followed by `keys`.
    pub fn sub_path<I, K>(&self, keys: I) -> Path
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let mut all = self.node.keys.clone();
        all.extend(keys.into_iter().map(Into::into));
        self.registry.path(all)
    }

    /// The canonical template one level below this path.
    pub fn dynamic_child(&self) -> Template {
        let slots = self
            .node
            .keys
            .iter()
            .cloned()
            .map(Slot::Key)
            .chain(std::iter::once(Slot::Placeholder))
            .collect();
        self.registry.template(slots)
    }

    /// The canonical path without the last key, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        let (_, init) = self.node.keys.split_last()?;
        Some(self.registry.path(init.to_vec()))
    }

    /// Re-express this path through `template`, filling the template's
    /// placeholders from this path's keys at the same positions.
    ///
    /// Passing the template this path was produced from returns this exact
    /// instance.
    pub fn related_path(&self, template: &Template) -> PathResult<Path> {
        template.get_path(template.dynamic_parts_from_path(self)?)
    }

    fn not_assignable(&self, key: &Key, found: &'static str) -> PathError {
        PathError::key_not_assignable(self.to_string(), key.to_string(), found)
    }

    fn refused<N: Node>(&self, key: &Key, holder: &N, refusal: Refusal) -> PathError {
        match (refusal, key) {
            (Refusal::TooFar { len }, Key::Index(index)) => {
                PathError::index_out_of_bounds(self.to_string(), *index, len)
            }
            _ => self.not_assignable(key, holder.type_name()),
        }
    }
}

// The container autovivified to hold `key`.
fn fresh_container<N: Node>(key: &Key) -> N {
    if key.is_index() {
        N::empty_list()
    } else {
        N::empty_map()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.node.keys == other.node.keys
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.keys.hash(state);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node.rendered())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({})", self.node.rendered())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.node.keys.serialize(serializer)
    }
}
