//! Validation tracking: value edits with ancestor error propagation.
//!
//! [`record_edit`] writes a new value to the node at a path and then settles
//! the violation key for that path on every node of the root-to-target
//! chain: inserted everywhere when the new value breaks the target's
//! constraint, removed everywhere when it satisfies it. Recording never
//! fails the write itself; a violation is tracked state, not an error.
//!
//! # Invariants
//!
//! 1. The ledger key for an edit at path `p` is exactly `PathKey(p)`; two
//!    edits at the same path settle the same key.
//! 2. Keys from distinct descendant paths coexist independently; clearing
//!    one violation never disturbs another.
//! 3. Insert is idempotent, removal of an absent key is a no-op.
//! 4. Nodes off the chain are untouched and keep their `Arc` identity.

use std::sync::Arc;

use crate::error::TreeResult;
use crate::node::TreeNode;
use crate::path::{NodePath, PathKey, resolve_chain};

/// Set the value of the node at `path` and propagate its violation state.
///
/// The write always proceeds; whether the new value violates the target's
/// constraint only decides if the path's key is inserted into or removed
/// from the error ledger of the target and every ancestor (root included).
pub fn record_edit(
    root: &Arc<TreeNode>,
    path: &NodePath,
    new_value: impl Into<String>,
) -> TreeResult<Arc<TreeNode>> {
    let chain = resolve_chain(root, path)?;
    let key: PathKey = path.clone();

    let mut target = TreeNode::clone(chain.last().unwrap_or(root));
    target.set_value(new_value);
    let violating = target.is_violating();
    settle(&mut target, &key, violating);

    #[cfg(feature = "tracing")]
    tracing::trace!(path = %path, violating, "record_edit");

    let mut rebuilt = Arc::new(target);
    for depth in (0..path.depth()).rev() {
        let mut ancestor = TreeNode::clone(&chain[depth]);
        settle(&mut ancestor, &key, violating);
        ancestor.children[path.indices()[depth]] = rebuilt;
        rebuilt = Arc::new(ancestor);
    }
    Ok(rebuilt)
}

/// Insert or remove `key` on one node. Both directions are idempotent.
fn settle(node: &mut TreeNode, key: &PathKey, violating: bool) {
    if violating {
        node.errors.insert(key.clone());
    } else {
        node.errors.remove(key);
    }
}
