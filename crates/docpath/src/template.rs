//! Path templates: paths with positions filled in later.

use crate::key::render;
use crate::node::Node;
use crate::path::Path;
use crate::registry::Registry;
use crate::{Key, PathError, PathResult, Slot};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Shared state of one canonical template.
pub(crate) struct TemplateNode {
    slots: Vec<Slot>,
    placeholders: usize,
    rendered: OnceLock<String>,
}

impl TemplateNode {
    pub(crate) fn new(slots: Vec<Slot>) -> Self {
        let placeholders = slots.iter().filter(|s| s.is_placeholder()).count();
        Self {
            slots,
            placeholders,
            rendered: OnceLock::new(),
        }
    }

    pub(crate) fn rendered(&self) -> &str {
        self.rendered.get_or_init(|| render(self.slots.iter().map(Slot::as_key)))
    }
}

/// A path shape with placeholder positions.
///
/// # Examples
///
/// ```
/// use docpath::{keys, root_path};
/// use serde_json::json;
///
/// let doc = json!({"a": {"e": [{"f": "hi"}, {"f": "bye"}]}});
/// let items = root_path().sub_path(keys!["a", "e"]).dynamic_child();
/// let names = items.sub_path_template(keys!["f"]);
/// assert_eq!(names.to_string(), "a.e[?].f");
///
/// let found: Vec<String> = names
///     .enumerate_all_paths(&doc)
///     .iter()
///     .map(|p| p.to_string())
///     .collect();
/// assert_eq!(found, ["a.e[0].f", "a.e[1].f"]);
///
/// let second = names.get_path(keys![1usize]).unwrap();
/// assert_eq!(second.get_value(&doc), Some(&json!("bye")));
/// ```
#[derive(Clone)]
pub struct Template {
    node: Arc<TemplateNode>,
    registry: Arc<Registry>,
}

impl Template {
    pub(crate) fn from_node(node: Arc<TemplateNode>, registry: Arc<Registry>) -> Self {
        Self { node, registry }
    }

    /// The ordered slots of this template.
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.node.slots
    }

    /// Number of placeholder slots, which is the arity of [`Template::get_path`].
    #[inline]
    pub fn placeholder_count(&self) -> usize {
        self.node.placeholders
    }

    /// Returns true if both handles refer to the same canonical instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Template) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Substitute `keys` for the placeholders, left to right.
    ///
    /// Exactly [`Template::placeholder_count`] keys must be supplied.
    pub fn get_path<I, K>(&self, keys: I) -> PathResult<Path>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let expected = self.node.placeholders;
        let mut supplied = keys.into_iter().map(Into::into);
        let mut used = 0;
        let mut resolved = Vec::with_capacity(self.node.slots.len());

        for slot in &self.node.slots {
            match slot {
                Slot::Key(key) => resolved.push(key.clone()),
                Slot::Placeholder => match supplied.next() {
                    Some(key) => {
                        used += 1;
                        resolved.push(key);
                    }
                    None => {
                        return Err(PathError::placeholder_underflow(
                            self.to_string(),
                            expected,
                            used,
                        ))
                    }
                },
            }
        }

        let extra = supplied.count();
        if extra > 0 {
            return Err(PathError::placeholder_overflow(
                self.to_string(),
                expected,
                used + extra,
            ));
        }

        Ok(self.registry.path(resolved))
    }

    /// Extract the keys at this template's placeholder positions from `path`.
    ///
    /// `path` may be longer than the template; keys past the template's end
    /// are ignored. Fixed slots must match the path key at the same position.
    pub fn dynamic_parts_from_path(&self, path: &Path) -> PathResult<Vec<Key>> {
        let keys = path.parts();
        if keys.len() < self.node.slots.len() {
            return Err(PathError::template_too_long(path.to_string(), self.to_string()));
        }

        let mut parts = Vec::with_capacity(self.node.placeholders);
        for (slot, key) in self.node.slots.iter().zip(keys) {
            match slot {
                Slot::Placeholder => parts.push(key.clone()),
                Slot::Key(fixed) if fixed == key => {}
                Slot::Key(_) => {
                    return Err(PathError::template_mismatch(path.to_string(), self.to_string()))
                }
            }
        }
        Ok(parts)
    }

    /// The canonical template for these slots followed by fixed `keys`.
    pub fn sub_path_template<I, K>(&self, keys: I) -> Template
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let mut slots = self.node.slots.clone();
        slots.extend(keys.into_iter().map(|k| Slot::Key(k.into())));
        self.registry.template(slots)
    }

    /// The canonical template with one more trailing placeholder.
    pub fn dynamic_child(&self) -> Template {
        let mut slots = self.node.slots.clone();
        slots.push(Slot::Placeholder);
        self.registry.template(slots)
    }

    /// Every path matching this template that exists in `doc`.
    ///
    /// Placeholders expand to the live keys of the node they stand over:
    /// ascending indices for lists, member order for maps, nothing for null
    /// or primitives. Fixed slots whose key is absent prune their branch.
    pub fn enumerate_all_paths<N: Node>(&self, doc: &N) -> Vec<Path> {
        let mut found = Vec::new();
        let mut prefix = Vec::with_capacity(self.node.slots.len());
        enumerate(doc, &self.node.slots, &mut prefix, &mut found);
        tracing::trace!(template = %self, matches = found.len(), "enumerated template");
        found
            .into_iter()
            .map(|keys| self.registry.path(keys))
            .collect()
    }
}

fn enumerate<N: Node>(node: &N, slots: &[Slot], prefix: &mut Vec<Key>, out: &mut Vec<Vec<Key>>) {
    let Some((slot, rest)) = slots.split_first() else {
        out.push(prefix.clone());
        return;
    };
    if node.is_null() {
        return;
    }

    match slot {
        Slot::Key(key) => {
            if let Some(child) = node.child(key) {
                prefix.push(key.clone());
                enumerate(child, rest, prefix, out);
                prefix.pop();
            }
        }
        Slot::Placeholder => {
            for key in node.live_keys() {
                if let Some(child) = node.child(&key) {
                    prefix.push(key);
                    enumerate(child, rest, prefix, out);
                    prefix.pop();
                }
            }
        }
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.node.slots == other.node.slots
    }
}

impl Eq for Template {}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node.rendered())
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Template({})", self.node.rendered())
    }
}
