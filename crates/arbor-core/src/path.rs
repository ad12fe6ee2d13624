//! Paths: ordered child-index sequences addressing nodes from the root.
//!
//! A [`NodePath`] is the list of child indices walked from the root to reach
//! a node. The root's path is the empty sequence. Paths double as the opaque
//! keys recorded in a node's error ledger ([`PathKey`]), compared and ordered
//! structurally rather than through a string encoding; the dashed text form
//! (`"1-0"`) exists only for display and parsing.
//!
//! # Invariants
//!
//! 1. `resolve_chain(root, path)` returns `path.len() + 1` nodes, the first
//!    being `root`.
//! 2. Resolution is pure: no allocation beyond the returned chain, no
//!    mutation, O(depth) time.
//! 3. A failed resolution reports the exact step that was out of range.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{TreeError, TreeResult};
use crate::node::TreeNode;

/// Ordered sequence of child indices identifying a node from the root.
///
/// The root itself is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath {
    indices: Vec<usize>,
}

/// Key recorded in a node's error ledger, identifying the edit that produced
/// a violation. Structurally identical to the path of the violating node.
pub type PathKey = NodePath;

impl NodePath {
    /// The root path (empty sequence).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from child indices, root first.
    #[must_use]
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// The child indices, root first.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of steps from the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.indices.is_empty()
    }

    /// The path of this node's child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }

    /// Split into parent path and final index. `None` for the root path.
    #[must_use]
    pub fn split_last(&self) -> Option<(Self, usize)> {
        let (&last, parent) = self.indices.split_last()?;
        Some((
            Self {
                indices: parent.to_vec(),
            },
            last,
        ))
    }
}

impl fmt::Display for NodePath {
    /// Dashed form, e.g. `"1-0"`. The root path displays as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.indices {
            if !first {
                f.write_str("-")?;
            }
            write!(f, "{index}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = std::num::ParseIntError;

    /// Parse the dashed form back into a path. The empty string is the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        let indices = s
            .split('-')
            .map(str::parse)
            .collect::<Result<Vec<usize>, _>>()?;
        Ok(Self { indices })
    }
}

/// Resolve the chain of nodes from `root` to the node addressed by `path`.
///
/// The first element is always `root`; each subsequent element is the child
/// of its predecessor at the corresponding path index. Fails with
/// [`TreeError::IndexOutOfRange`] at the first step whose index does not name
/// an existing child, leaving `root` untouched.
pub fn resolve_chain(root: &Arc<TreeNode>, path: &NodePath) -> TreeResult<Vec<Arc<TreeNode>>> {
    let mut chain = Vec::with_capacity(path.depth() + 1);
    let mut current = Arc::clone(root);
    for (depth, &index) in path.indices().iter().enumerate() {
        let children = current.children();
        let Some(child) = children.get(index) else {
            return Err(TreeError::IndexOutOfRange {
                path: path.clone(),
                depth,
                index,
                len: children.len(),
            });
        };
        let next = Arc::clone(child);
        chain.push(current);
        current = next;
    }
    chain.push(current);
    Ok(chain)
}

/// Current path of `node` within the tree rooted at `root`, found by
/// identity (`Arc::ptr_eq`) search.
///
/// Returns `None` if `node` is not reachable from `root`. This is the
/// always-fresh replacement for a cached per-node trace: it is derived from
/// the root on demand, so structural edits can never leave it stale.
#[must_use]
pub fn path_of(root: &Arc<TreeNode>, node: &Arc<TreeNode>) -> Option<NodePath> {
    fn walk(current: &Arc<TreeNode>, target: &Arc<TreeNode>, prefix: &mut Vec<usize>) -> bool {
        if Arc::ptr_eq(current, target) {
            return true;
        }
        for (index, child) in current.children().iter().enumerate() {
            prefix.push(index);
            if walk(child, target, prefix) {
                return true;
            }
            prefix.pop();
        }
        false
    }

    let mut prefix = Vec::new();
    walk(root, node, &mut prefix).then(|| NodePath::from_indices(prefix))
}
