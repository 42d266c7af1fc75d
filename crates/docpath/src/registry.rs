//! Canonical instance registry and root contexts.
//!
//! Every [`Path`] and [`Template`] is obtained from the registry of the root
//! context it descends from. Equal key (or slot) sequences requested from one
//! registry always yield the same instance, so callers can compare with
//! [`Path::ptr_eq`] or memoize on identity.
//!
//! Registries grow without eviction: every distinct sequence ever requested
//! stays alive until the last handle into the root context is dropped.

use crate::parse::{parse_keys, parse_slots};
use crate::path::{Path, PathNode};
use crate::template::{Template, TemplateNode};
use crate::{Key, PathResult, Slot};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Tables {
    paths: HashMap<Vec<Key>, Arc<PathNode>>,
    templates: HashMap<Vec<Slot>, Arc<TemplateNode>>,
}

/// Canonicalization table for one root context.
///
/// Lookup and insertion happen under a single lock, so concurrent requests for
/// the same sequence converge on one instance.
#[derive(Default)]
pub(crate) struct Registry {
    tables: Mutex<Tables>,
}

impl Registry {
    // Tables are append-only, so a poisoned lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The canonical path for `keys`.
    pub(crate) fn path(self: &Arc<Self>, keys: Vec<Key>) -> Path {
        let mut tables = self.lock();
        if let Some(node) = tables.paths.get(keys.as_slice()) {
            return Path::from_node(Arc::clone(node), Arc::clone(self));
        }

        let node = Arc::new(PathNode::new(keys.clone()));
        tracing::trace!(path = %node.rendered(), "registered canonical path");
        tables.paths.insert(keys, Arc::clone(&node));
        Path::from_node(node, Arc::clone(self))
    }

    /// The canonical template for `slots`.
    pub(crate) fn template(self: &Arc<Self>, slots: Vec<Slot>) -> Template {
        let mut tables = self.lock();
        if let Some(node) = tables.templates.get(slots.as_slice()) {
            return Template::from_node(Arc::clone(node), Arc::clone(self));
        }

        let node = Arc::new(TemplateNode::new(slots.clone()));
        tracing::trace!(template = %node.rendered(), "registered canonical template");
        tables.templates.insert(slots, Arc::clone(&node));
        Template::from_node(node, Arc::clone(self))
    }

    pub(crate) fn path_count(&self) -> usize {
        self.lock().paths.len()
    }

    pub(crate) fn template_count(&self) -> usize {
        self.lock().templates.len()
    }
}

/// One identity space of paths and templates.
///
/// Paths obtained from different root contexts are never the same instance,
/// even when their keys are equal.
///
/// # Examples
///
/// ```
/// use docpath::{keys, RootContext};
///
/// let ctx = RootContext::new();
/// let root = ctx.root();
///
/// let direct = root.sub_path(keys!["a", "b"]);
/// let stepwise = root.sub_path(keys!["a"]).sub_path(keys!["b"]);
/// assert!(direct.ptr_eq(&stepwise));
///
/// let other = RootContext::new().root().sub_path(keys!["a", "b"]);
/// assert_eq!(direct, other);
/// assert!(!direct.ptr_eq(&other));
/// ```
#[derive(Clone)]
pub struct RootContext {
    registry: Arc<Registry>,
    root: Path,
}

impl RootContext {
    /// Create a fresh context and its zero-length root path.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::default());
        let root = registry.path(Vec::new());
        Self { registry, root }
    }

    /// The root path, denoting the whole document.
    #[inline]
    pub fn root(&self) -> Path {
        self.root.clone()
    }

    /// The canonical path for an explicit key sequence.
    pub fn path<I, K>(&self, keys: I) -> Path
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.registry.path(keys.into_iter().map(Into::into).collect())
    }

    /// The canonical template for an explicit slot sequence.
    pub fn template(&self, slots: impl IntoIterator<Item = Slot>) -> Template {
        self.registry.template(slots.into_iter().collect())
    }

    /// Parse a rendered path such as `a.e[0].f`.
    pub fn parse_path(&self, input: &str) -> PathResult<Path> {
        Ok(self.registry.path(parse_keys(input)?))
    }

    /// Parse a rendered template such as `a.e[?].f`.
    pub fn parse_template(&self, input: &str) -> PathResult<Template> {
        Ok(self.registry.template(parse_slots(input)?))
    }

    /// Number of canonical paths created so far.
    pub fn path_count(&self) -> usize {
        self.registry.path_count()
    }

    /// Number of canonical templates created so far.
    pub fn template_count(&self) -> usize {
        self.registry.template_count()
    }
}

impl Default for RootContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RootContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootContext")
            .field("paths", &self.path_count())
            .field("templates", &self.template_count())
            .finish()
    }
}

/// Create a fresh root context and return its root path.
///
/// The context stays alive as long as any path or template derived from it.
pub fn root_path() -> Path {
    RootContext::new().root()
}
