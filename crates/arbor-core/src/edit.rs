//! Structural edits: inserting and deleting children.
//!
//! Both operations are expressed as copy-on-write updates applied to the
//! parent node, so they inherit the engine's sharing and atomicity
//! guarantees. Insertion clamps its index into the valid range and never
//! fails beyond resolving the parent path; deletion checks its index and
//! fails with [`TreeError::IndexOutOfRange`] like the resolver would.
//!
//! Indices of later siblings shift on insert/delete. Nothing here caches
//! positions, so there is nothing to go stale: a node's current path is
//! always derived from the root (see [`crate::path::path_of`]).

use std::sync::Arc;

use crate::cow::update;
use crate::error::{TreeError, TreeResult};
use crate::node::TreeNode;
use crate::path::{NodePath, resolve_chain};

/// Insert `node` as a child of the node at `parent_path`.
///
/// `index` of `None` appends; a given index is clamped to the valid
/// insertion range `0..=children.len()`.
pub fn insert_child(
    root: &Arc<TreeNode>,
    parent_path: &NodePath,
    node: TreeNode,
    index: Option<usize>,
) -> TreeResult<Arc<TreeNode>> {
    update(root, parent_path, move |parent| {
        let len = parent.children.len();
        let at = index.unwrap_or(len).min(len);
        parent.children.insert(at, Arc::new(node));
    })
}

/// Remove the child at `index` from the node at `parent_path`.
///
/// Later siblings shift down by one. Fails with
/// [`TreeError::IndexOutOfRange`] if `index` does not name an existing
/// child; the prior root is then left untouched.
pub fn delete_child(
    root: &Arc<TreeNode>,
    parent_path: &NodePath,
    index: usize,
) -> TreeResult<Arc<TreeNode>> {
    let chain = resolve_chain(root, parent_path)?;
    let len = chain.last().map_or(0, |parent| parent.children().len());
    if index >= len {
        return Err(TreeError::IndexOutOfRange {
            path: parent_path.child(index),
            depth: parent_path.depth(),
            index,
            len,
        });
    }
    update(root, parent_path, move |parent| {
        parent.children.remove(index);
    })
}

/// Remove the node addressed by the full `path` (parent path plus final
/// index). The root itself is not a child and cannot be deleted.
pub fn delete_at(root: &Arc<TreeNode>, path: &NodePath) -> TreeResult<Arc<TreeNode>> {
    let Some((parent_path, index)) = path.split_last() else {
        return Err(TreeError::IndexOutOfRange {
            path: path.clone(),
            depth: 0,
            index: 0,
            len: 0,
        });
    };
    delete_child(root, &parent_path, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: &str) -> TreeNode {
        TreeNode::new(value, 32)
    }

    fn sample() -> Arc<TreeNode> {
        Arc::new(
            node("root")
                .child(node("a").child(node("a0")).child(node("a1")))
                .child(node("b")),
        )
    }

    // ─── Insertion ────────────────────────────────────────────────

    #[test]
    fn insert_appends_by_default() {
        let root = sample();
        let new_root = insert_child(&root, &NodePath::root(), node("c"), None).unwrap();
        assert_eq!(new_root.children().len(), 3);
        assert_eq!(new_root.children()[2].value(), "c");
        // Prior root unchanged.
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn insert_at_index_shifts_siblings() {
        let root = sample();
        let new_root = insert_child(&root, &NodePath::root(), node("c"), Some(0)).unwrap();
        assert_eq!(new_root.children()[0].value(), "c");
        assert_eq!(new_root.children()[1].value(), "a");
        assert_eq!(new_root.children()[2].value(), "b");
    }

    #[test]
    fn insert_index_is_clamped() {
        let root = sample();
        let new_root = insert_child(&root, &NodePath::root(), node("c"), Some(99)).unwrap();
        assert_eq!(new_root.children()[2].value(), "c");
    }

    #[test]
    fn insert_into_nested_parent_shares_siblings() {
        let root = sample();
        let new_root =
            insert_child(&root, &NodePath::from_indices([0]), node("a2"), None).unwrap();
        assert_eq!(new_root.children()[0].children().len(), 3);
        // The untouched "b" subtree keeps its identity.
        assert!(Arc::ptr_eq(&root.children()[1], &new_root.children()[1]));
        // Existing children of the edited parent are shared too.
        assert!(Arc::ptr_eq(
            &root.children()[0].children()[0],
            &new_root.children()[0].children()[0]
        ));
    }

    #[test]
    fn insert_fails_on_bad_parent_path() {
        let root = sample();
        let err = insert_child(&root, &NodePath::from_indices([7]), node("x"), None).unwrap_err();
        assert!(matches!(err, TreeError::IndexOutOfRange { index: 7, .. }));
    }

    // ─── Deletion ─────────────────────────────────────────────────

    #[test]
    fn delete_shifts_survivor_down() {
        // Two children; deleting index 0 leaves the former index-1 child
        // as the sole child at index 0.
        let root = sample();
        let new_root = delete_child(&root, &NodePath::root(), 0).unwrap();
        assert_eq!(new_root.children().len(), 1);
        assert_eq!(new_root.children()[0].value(), "b");
        assert!(Arc::ptr_eq(&root.children()[1], &new_root.children()[0]));
    }

    #[test]
    fn delete_out_of_range_is_rejected() {
        let root = sample();
        let err = delete_child(&root, &NodePath::root(), 2).unwrap_err();
        assert_eq!(
            err,
            TreeError::IndexOutOfRange {
                path: NodePath::from_indices([2]),
                depth: 0,
                index: 2,
                len: 2,
            }
        );
    }

    #[test]
    fn delete_at_splits_full_path() {
        let root = sample();
        let new_root = delete_at(&root, &NodePath::from_indices([0, 0])).unwrap();
        assert_eq!(new_root.children()[0].children().len(), 1);
        assert_eq!(new_root.children()[0].children()[0].value(), "a1");
    }

    #[test]
    fn delete_at_root_is_rejected() {
        let root = sample();
        assert!(delete_at(&root, &NodePath::root()).is_err());
    }

    #[test]
    fn failed_delete_leaves_root_untouched() {
        let root = sample();
        let before = Arc::clone(&root);
        let _ = delete_child(&root, &NodePath::from_indices([1]), 0).unwrap_err();
        assert!(Arc::ptr_eq(&root, &before));
        assert_eq!(root.subtree_len(), 5);
    }
}
