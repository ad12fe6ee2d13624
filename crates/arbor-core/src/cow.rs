//! Copy-on-write update engine.
//!
//! [`update`] applies a mutator to the single node addressed by a path and
//! returns a new root. Only the nodes on the root-to-target chain are
//! cloned; every sibling subtree keeps its `Arc` identity, so callers can
//! use pointer comparison as a cheap "did this subtree change" test.
//!
//! # Invariants
//!
//! 1. The returned root is a new allocation (`!Arc::ptr_eq(new, old)`).
//! 2. Every node not on the chain retains its identity across the edit.
//! 3. Failure is atomic: if the path does not resolve, no new tree is
//!    built and the caller's root is untouched.

use std::sync::Arc;

use crate::error::TreeResult;
use crate::node::TreeNode;
use crate::path::{NodePath, resolve_chain};

/// Apply `mutator` to the node at `path` and return the new root.
///
/// The chain root→target is shallow-cloned bottom-up: the target clone is
/// mutated, then each ancestor clone has the child slot on the chain
/// repointed at the rebuilt subtree. All other children are shared.
pub fn update(
    root: &Arc<TreeNode>,
    path: &NodePath,
    mutator: impl FnOnce(&mut TreeNode),
) -> TreeResult<Arc<TreeNode>> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("cow_update", depth = path.depth()).entered();

    let chain = resolve_chain(root, path)?;

    // Clone and mutate the target, then rebuild each ancestor with the
    // chain child repointed at the fresh subtree.
    let mut rebuilt = {
        let mut target = TreeNode::clone(chain.last().unwrap_or(root));
        mutator(&mut target);
        Arc::new(target)
    };
    for depth in (0..path.depth()).rev() {
        let mut ancestor = TreeNode::clone(&chain[depth]);
        ancestor.children[path.indices()[depth]] = rebuilt;
        rebuilt = Arc::new(ancestor);
    }
    Ok(rebuilt)
}
