//! Error types for tree operations.

use std::fmt;

use crate::path::NodePath;

/// Errors that can occur while resolving or editing a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A path component referenced a child that does not exist.
    ///
    /// `depth` is the position of the offending component within the path,
    /// `index` the requested child index, and `len` the number of children
    /// actually present at that step.
    IndexOutOfRange {
        /// Path being resolved when the failure occurred.
        path: NodePath,
        /// Zero-based position of the bad component within `path`.
        depth: usize,
        /// The child index that was requested.
        index: usize,
        /// Number of children available at that node.
        len: usize,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::IndexOutOfRange {
                path,
                depth,
                index,
                len,
            } => write!(
                f,
                "index {index} out of range at depth {depth} of path \"{path}\" ({len} children)"
            ),
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
