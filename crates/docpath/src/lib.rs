//! Canonical, composable paths into nested documents.
//!
//! `docpath` addresses locations deep inside partially-populated documents
//! through reusable path objects instead of ad-hoc strings.
//!
//! # Core Concepts
//!
//! - **Key**: one addressing step (member name, list index, or identity token)
//! - **Path**: an immutable key sequence; reads, writes and removes values
//! - **Template**: a key sequence with placeholders, resolved into paths later
//!   or enumerated against a document
//! - **RootContext**: an identity space; equal key sequences requested from
//!   one context are the same instance
//! - **Node**: the structural operations a document type provides, implemented
//!   for `serde_json::Value` and for the token-capable [`Doc`]
//!
//! # Quick Start
//!
//! ```
//! use docpath::{keys, RootContext};
//! use serde_json::json;
//!
//! let ctx = RootContext::new();
//! let root = ctx.root();
//!
//! let mut doc = json!({"a": {"e": [{"f": "hi"}, {"f": "bye"}]}});
//!
//! // Missing intermediates read as None
//! assert_eq!(root.sub_path(keys!["a", "g", 0usize]).get_value(&doc), None);
//!
//! // Writes create them: an index key below `g` makes `g` a list
//! let greens = root.sub_path(keys!["a", "g"]).dynamic_child();
//! greens.get_path(keys![0usize]).unwrap().set_value(&mut doc, json!("green")).unwrap();
//! assert_eq!(doc["a"]["g"], json!(["green"]));
//!
//! // Templates enumerate the paths that exist
//! let names = root.sub_path(keys!["a", "e"]).dynamic_child().sub_path_template(keys!["f"]);
//! let found = names.enumerate_all_paths(&doc);
//! assert_eq!(found[1].to_string(), "a.e[1].f");
//!
//! // Identity is preserved across construction routes
//! assert!(found[1].ptr_eq(&root.sub_path(keys!["a", "e", 1usize, "f"])));
//! ```
//!
//! # Shape checking
//!
//! Keys are supplied explicitly (see [`keys!`] and [`parse_keys`]); nothing
//! checks them against a document schema at build time. Writes validate at
//! runtime instead: descending through a primitive or writing a name key into
//! a list fails with [`PathError::KeyNotAssignable`].

mod doc;
mod error;
mod key;
mod node;
mod parse;
mod path;
mod registry;
mod template;

pub use doc::Doc;
pub use error::{PathError, PathResult};
pub use key::{Key, Slot, Token};
pub use node::{Node, Refusal, MAX_LIST_PADDING};
pub use parse::{parse_keys, parse_slots};
pub use path::Path;
pub use registry::{root_path, RootContext};
pub use template::Template;

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
