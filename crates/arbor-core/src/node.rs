//! The tree node model.
//!
//! A [`TreeNode`] is one labeled node in an ordered tree: a user-editable
//! `value`, a `max_len` length constraint fixed at construction, ordered
//! children, and an error ledger of [`PathKey`]s recording which edits
//! produced currently-active violations.
//!
//! Nodes are published inside `Arc`s and never mutated afterwards; all
//! mutation happens on freshly cloned copies before publication (see
//! [`crate::cow`]). `Clone` is intentionally shallow: children are `Arc`s,
//! so cloning a node shares every subtree by reference.
//!
//! # Invariants
//!
//! 1. `max_len` never changes after construction.
//! 2. A node's own violation state is `value_len() >= max_len`, where
//!    `value_len` counts grapheme clusters.
//! 3. `errors` is idempotent per key: double insert is one entry, removing
//!    an absent key is a no-op.
//! 4. Children order is semantically meaningful; it determines paths.

use std::collections::BTreeSet;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::path::PathKey;

/// One labeled node in an ordered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// User-editable content.
    value: String,
    /// Length constraint on `value`, in grapheme clusters.
    max_len: usize,
    /// Ordered children (crate-visible for the copy-on-write engine).
    pub(crate) children: Vec<Arc<TreeNode>>,
    /// Active violation keys, own or propagated from descendants
    /// (crate-visible for the validation tracker).
    pub(crate) errors: BTreeSet<PathKey>,
}

impl TreeNode {
    /// Create a node with the given value and length constraint.
    #[must_use]
    pub fn new(value: impl Into<String>, max_len: usize) -> Self {
        Self {
            value: value.into(),
            max_len,
            children: Vec::new(),
            errors: BTreeSet::new(),
        }
    }

    /// Append a child node (builder style).
    #[must_use]
    pub fn child(mut self, node: TreeNode) -> Self {
        self.children.push(Arc::new(node));
        self
    }

    /// Set children from a vec (builder style).
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<TreeNode>) -> Self {
        self.children = nodes.into_iter().map(Arc::new).collect();
        self
    }

    /// The node's value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The node's value length in grapheme clusters.
    #[must_use]
    pub fn value_len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// The length constraint, in grapheme clusters.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The ordered children.
    #[must_use]
    pub fn children(&self) -> &[Arc<TreeNode>] {
        &self.children
    }

    /// The active violation keys on this node.
    #[must_use]
    pub fn errors(&self) -> &BTreeSet<PathKey> {
        &self.errors
    }

    /// Whether this node's own value currently breaks its constraint.
    #[must_use]
    pub fn is_violating(&self) -> bool {
        self.value_len() >= self.max_len
    }

    /// Replace the value. Only meaningful on a clone that has not been
    /// published yet; published nodes are immutable.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Total number of nodes in this subtree, including this one.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.subtree_len())
            .sum::<usize>()
    }
}
