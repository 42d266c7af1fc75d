//! Error types for docpath operations.

use thiserror::Error;

/// Result type alias for docpath operations.
pub type PathResult<T> = Result<T, PathError>;

/// Errors that can occur while building or applying paths.
///
/// Paths and templates are carried in their rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// `set_value` or `remove_value` on the root path.
    #[error("cannot {operation} the root path")]
    RootMutation {
        /// The attempted operation.
        operation: &'static str,
    },

    /// Fewer concrete keys than the template has placeholders.
    #[error("template '{template}' needs {expected} dynamic keys, got {supplied}")]
    PlaceholderUnderflow {
        /// The template being resolved.
        template: String,
        /// Number of placeholders in the template.
        expected: usize,
        /// Number of keys supplied.
        supplied: usize,
    },

    /// More concrete keys than the template has placeholders.
    #[error("template '{template}' takes {expected} dynamic keys, got {supplied}")]
    PlaceholderOverflow {
        /// The template being resolved.
        template: String,
        /// Number of placeholders in the template.
        expected: usize,
        /// Number of keys supplied.
        supplied: usize,
    },

    /// A fixed template key differs from the path key at the same position.
    #[error("path '{path}' does not match template '{template}'")]
    TemplateMismatch {
        /// The path being matched.
        path: String,
        /// The template it was matched against.
        template: String,
    },

    /// The template is longer than the path it is matched against.
    #[error("path '{path}' cannot be a parent path of template '{template}'")]
    TemplateTooLong {
        /// The path being matched.
        path: String,
        /// The template it was matched against.
        template: String,
    },

    /// A key cannot be written into the node found at a position.
    #[error("cannot assign key '{key}' into {found} at '{path}'")]
    KeyNotAssignable {
        /// The path being written.
        path: String,
        /// The offending key.
        key: String,
        /// Type name of the node that rejected the key.
        found: &'static str,
    },

    /// A list index lies too far past the end of the list to pad up to it.
    #[error("index {index} out of bounds (len: {len}) at '{path}'")]
    IndexOutOfBounds {
        /// The path being written.
        path: String,
        /// The requested index.
        index: usize,
        /// Length of the list at that position.
        len: usize,
    },

    /// A textual path could not be parsed.
    #[error("invalid path syntax at offset {offset} in '{input}': {message}")]
    InvalidSyntax {
        /// The input text.
        input: String,
        /// Byte offset of the problem.
        offset: usize,
        /// Description of what went wrong.
        message: String,
    },
}

impl PathError {
    /// Create a root mutation error.
    #[inline]
    pub fn root_mutation(operation: &'static str) -> Self {
        PathError::RootMutation { operation }
    }

    /// Create a placeholder underflow error.
    #[inline]
    pub fn placeholder_underflow(
        template: impl Into<String>,
        expected: usize,
        supplied: usize,
    ) -> Self {
        PathError::PlaceholderUnderflow {
            template: template.into(),
            expected,
            supplied,
        }
    }

    /// Create a placeholder overflow error.
    #[inline]
    pub fn placeholder_overflow(
        template: impl Into<String>,
        expected: usize,
        supplied: usize,
    ) -> Self {
        PathError::PlaceholderOverflow {
            template: template.into(),
            expected,
            supplied,
        }
    }

    /// Create a template mismatch error.
    #[inline]
    pub fn template_mismatch(path: impl Into<String>, template: impl Into<String>) -> Self {
        PathError::TemplateMismatch {
            path: path.into(),
            template: template.into(),
        }
    }

    /// Create a template-too-long error.
    #[inline]
    pub fn template_too_long(path: impl Into<String>, template: impl Into<String>) -> Self {
        PathError::TemplateTooLong {
            path: path.into(),
            template: template.into(),
        }
    }

    /// Create a key-not-assignable error.
    #[inline]
    pub fn key_not_assignable(
        path: impl Into<String>,
        key: impl Into<String>,
        found: &'static str,
    ) -> Self {
        PathError::KeyNotAssignable {
            path: path.into(),
            key: key.into(),
            found,
        }
    }

    /// Create an index out of bounds error.
    #[inline]
    pub fn index_out_of_bounds(path: impl Into<String>, index: usize, len: usize) -> Self {
        PathError::IndexOutOfBounds {
            path: path.into(),
            index,
            len,
        }
    }

    /// Create an invalid syntax error.
    #[inline]
    pub fn invalid_syntax(
        input: impl Into<String>,
        offset: usize,
        message: impl Into<String>,
    ) -> Self {
        PathError::InvalidSyntax {
            input: input.into(),
            offset,
            message: message.into(),
        }
    }
}
