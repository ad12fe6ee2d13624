//! The tree session: one owner, sequential edits, atomic publication.
//!
//! A [`TreeSession`] holds exactly one current immutable root. Every edit
//! either fully completes and replaces the root in a single step, or fully
//! fails and leaves it untouched; there is no observable intermediate
//! state. Readers that captured an earlier root keep a valid, immutable
//! snapshot for as long as they like.
//!
//! The typed edit methods additionally describe each successful edit as a
//! discrete [`EditOp`] delivered to registered observers together with the
//! new root. External mirrors (e.g. a parallel arena of focus handles)
//! replay these ops to keep their shape in sync with the tree's; the
//! session itself never manages such mirrors.
//!
//! Not designed for concurrent writers: edits are serialized by the single
//! owner. For multi-editor use, wrap the session in a mutex; nothing inside
//! needs to change.

use std::sync::Arc;

use crate::cow;
use crate::edit;
use crate::error::TreeResult;
use crate::node::TreeNode;
use crate::path::{NodePath, resolve_chain};
use crate::validate;

/// One discrete, replayable edit, as seen by observers.
///
/// `Replace` does not change tree shape; mirrors tracking shape only may
/// ignore it. `Insert` and `Remove` carry the exact parent path and child
/// index so a mirror can apply the identical index-level operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// The node at `path` had its value (or validation state) replaced.
    Replace {
        /// Path of the edited node.
        path: NodePath,
    },
    /// A child was inserted under `parent` at `index`.
    Insert {
        /// Path of the parent node.
        parent: NodePath,
        /// Actual insertion index, after clamping.
        index: usize,
    },
    /// The child at `index` under `parent` was removed.
    Remove {
        /// Path of the parent node.
        parent: NodePath,
        /// Index of the removed child.
        index: usize,
    },
}

type EditObserver = Box<dyn FnMut(&EditOp, &Arc<TreeNode>)>;

/// Owner of the current tree snapshot, applying edits sequentially.
pub struct TreeSession {
    root: Arc<TreeNode>,
    observers: Vec<EditObserver>,
}

impl std::fmt::Debug for TreeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSession")
            .field("root", &self.root)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl TreeSession {
    /// Start a session owning the given initial tree.
    #[must_use]
    pub fn new(root: TreeNode) -> Self {
        Self::from_root(Arc::new(root))
    }

    /// Start a session from an already-shared root.
    #[must_use]
    pub fn from_root(root: Arc<TreeNode>) -> Self {
        Self {
            root,
            observers: Vec::new(),
        }
    }

    /// The current root snapshot.
    #[must_use]
    pub fn root(&self) -> &Arc<TreeNode> {
        &self.root
    }

    /// A shareable handle to the current snapshot.
    ///
    /// The returned root stays valid and immutable indefinitely, no matter
    /// how many edits are applied afterwards.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TreeNode> {
        Arc::clone(&self.root)
    }

    /// Register an observer called after every successful typed edit with
    /// the op that was applied and the newly published root.
    pub fn observe(&mut self, f: impl FnMut(&EditOp, &Arc<TreeNode>) + 'static) {
        self.observers.push(Box::new(f));
    }

    /// Apply an arbitrary pre-bound edit function.
    ///
    /// On success the result becomes the current root in a single step; on
    /// failure the current root is untouched and the error is returned.
    /// Observers are not notified — the op shape of an arbitrary function
    /// is unknown, so mirrors must use the typed methods instead.
    pub fn apply_edit(
        &mut self,
        f: impl FnOnce(&Arc<TreeNode>) -> TreeResult<Arc<TreeNode>>,
    ) -> TreeResult<()> {
        let new_root = f(&self.root)?;
        self.root = new_root;
        Ok(())
    }

    /// Copy-on-write update of the node at `path`. Emits [`EditOp::Replace`].
    pub fn update(
        &mut self,
        path: &NodePath,
        mutator: impl FnOnce(&mut TreeNode),
    ) -> TreeResult<()> {
        let new_root = cow::update(&self.root, path, mutator)?;
        self.publish(new_root, EditOp::Replace { path: path.clone() });
        Ok(())
    }

    /// Value edit with validation propagation. Emits [`EditOp::Replace`].
    pub fn record_edit(&mut self, path: &NodePath, new_value: impl Into<String>) -> TreeResult<()> {
        let new_root = validate::record_edit(&self.root, path, new_value)?;
        self.publish(new_root, EditOp::Replace { path: path.clone() });
        Ok(())
    }

    /// Insert a child under `parent_path`; `None` appends, a given index is
    /// clamped. Emits [`EditOp::Insert`] and returns the actual index.
    pub fn insert_child(
        &mut self,
        parent_path: &NodePath,
        node: TreeNode,
        index: Option<usize>,
    ) -> TreeResult<usize> {
        // Resolve the clamped index up front so the emitted op carries the
        // position the mirror must use.
        let chain = resolve_chain(&self.root, parent_path)?;
        let len = chain.last().map_or(0, |parent| parent.children().len());
        let at = index.unwrap_or(len).min(len);

        let new_root = edit::insert_child(&self.root, parent_path, node, Some(at))?;
        self.publish(
            new_root,
            EditOp::Insert {
                parent: parent_path.clone(),
                index: at,
            },
        );
        Ok(at)
    }

    /// Remove the child at `index` under `parent_path`. Emits
    /// [`EditOp::Remove`].
    pub fn delete_child(&mut self, parent_path: &NodePath, index: usize) -> TreeResult<()> {
        let new_root = edit::delete_child(&self.root, parent_path, index)?;
        self.publish(
            new_root,
            EditOp::Remove {
                parent: parent_path.clone(),
                index,
            },
        );
        Ok(())
    }

    /// Remove the node addressed by the full `path`. Emits
    /// [`EditOp::Remove`] with the path split into parent and index.
    pub fn delete_at(&mut self, path: &NodePath) -> TreeResult<()> {
        let new_root = edit::delete_at(&self.root, path)?;
        // delete_at already rejected the root path.
        let (parent, index) = path.split_last().unwrap_or((NodePath::root(), 0));
        self.publish(new_root, EditOp::Remove { parent, index });
        Ok(())
    }

    /// Swap in the new root, then notify observers.
    fn publish(&mut self, new_root: Arc<TreeNode>, op: EditOp) {
        #[cfg(feature = "tracing")]
        tracing::debug!(?op, nodes = new_root.subtree_len(), "publish");

        self.root = new_root;
        for observer in &mut self.observers {
            observer(&op, &self.root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn node(value: &str) -> TreeNode {
        TreeNode::new(value, 32)
    }

    fn sample() -> TreeNode {
        node("root")
            .child(node("a").child(node("a0")))
            .child(node("b"))
    }

    // ─── Atomic publication ───────────────────────────────────────

    #[test]
    fn successful_edit_swaps_root() {
        let mut session = TreeSession::new(sample());
        let before = session.snapshot();
        session
            .update(&NodePath::from_indices([1]), |n| n.set_value("B"))
            .unwrap();
        assert!(!Arc::ptr_eq(session.root(), &before));
        assert_eq!(session.root().children()[1].value(), "B");
    }

    #[test]
    fn failed_edit_leaves_root_untouched() {
        let mut session = TreeSession::new(sample());
        let before = session.snapshot();
        assert!(
            session
                .update(&NodePath::from_indices([9]), |_| {})
                .is_err()
        );
        assert!(Arc::ptr_eq(session.root(), &before));
    }

    #[test]
    fn old_snapshots_survive_later_edits() {
        let mut session = TreeSession::new(sample());
        let old = session.snapshot();
        session
            .record_edit(&NodePath::from_indices([0, 0]), "changed")
            .unwrap();
        session.delete_child(&NodePath::root(), 1).unwrap();
        assert_eq!(old.children()[0].children()[0].value(), "a0");
        assert_eq!(old.children().len(), 2);
    }

    #[test]
    fn apply_edit_runs_prebound_operation() {
        let mut session = TreeSession::new(sample());
        let path = NodePath::from_indices([0]);
        session
            .apply_edit(|root| crate::validate::record_edit(root, &path, "pre-bound"))
            .unwrap();
        assert_eq!(session.root().children()[0].value(), "pre-bound");
    }

    // ─── Edit ops and observers ───────────────────────────────────

    #[test]
    fn observers_see_each_op_with_the_new_root() {
        let mut session = TreeSession::new(sample());
        let seen: Rc<RefCell<Vec<EditOp>>> = Rc::default();
        let sink = Rc::clone(&seen);
        session.observe(move |op, root| {
            assert!(root.subtree_len() > 0);
            sink.borrow_mut().push(op.clone());
        });

        session
            .insert_child(&NodePath::root(), node("c"), None)
            .unwrap();
        session.delete_child(&NodePath::root(), 0).unwrap();
        session.record_edit(&NodePath::from_indices([0]), "x").unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                EditOp::Insert {
                    parent: NodePath::root(),
                    index: 2,
                },
                EditOp::Remove {
                    parent: NodePath::root(),
                    index: 0,
                },
                EditOp::Replace {
                    path: NodePath::from_indices([0]),
                },
            ]
        );
    }

    #[test]
    fn insert_reports_clamped_index() {
        let mut session = TreeSession::new(sample());
        let at = session
            .insert_child(&NodePath::root(), node("c"), Some(99))
            .unwrap();
        assert_eq!(at, 2);
    }

    #[test]
    fn failed_edit_emits_no_op() {
        let mut session = TreeSession::new(sample());
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);
        session.observe(move |_, _| *sink.borrow_mut() += 1);

        assert!(session.delete_child(&NodePath::root(), 9).is_err());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn delete_at_emits_parent_and_index() {
        let mut session = TreeSession::new(sample());
        let seen: Rc<RefCell<Vec<EditOp>>> = Rc::default();
        let sink = Rc::clone(&seen);
        session.observe(move |op, _| sink.borrow_mut().push(op.clone()));

        session.delete_at(&NodePath::from_indices([0, 0])).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![EditOp::Remove {
                parent: NodePath::from_indices([0]),
                index: 0,
            }]
        );
    }
}
