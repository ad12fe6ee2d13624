#![forbid(unsafe_code)]

//! Persistent, path-addressed ordered tree with copy-on-write edits and
//! ancestor-propagated validation.
//!
//! Every edit produces a brand-new root that shares all untouched subtrees
//! with its predecessor by reference; the old root stays valid and
//! immutable, so holders of earlier snapshots are never invalidated.
//! Callers use `Arc` pointer identity as a cheap "did this subtree change"
//! test across snapshots.
//!
//! The pieces, bottom up:
//!
//! - [`node::TreeNode`] — one labeled node: value, length constraint,
//!   ordered children, violation-key ledger.
//! - [`path`] — [`path::NodePath`] child-index addressing,
//!   [`path::resolve_chain`] root-to-target resolution, and
//!   [`path::path_of`] on-demand path derivation.
//! - [`cow::update`] — the copy-on-write engine cloning only the chain of
//!   ancestors of an edited node.
//! - [`edit`] — insert/delete children, layered on the engine.
//! - [`validate::record_edit`] — value writes whose violation state is
//!   recorded against the originating path on the target and every
//!   ancestor.
//! - [`session::TreeSession`] — the single owner applying edits
//!   sequentially and publishing each new snapshot atomically, with
//!   [`session::EditOp`] notifications for external shape mirrors.
//!
//! # Example
//!
//! ```
//! use arbor_core::{NodePath, TreeNode, TreeSession};
//!
//! let mut session = TreeSession::new(
//!     TreeNode::new("root", 10)
//!         .child(TreeNode::new("left", 10))
//!         .child(TreeNode::new("right", 10)),
//! );
//!
//! let before = session.snapshot();
//! session.record_edit(&NodePath::from_indices([0]), "renamed")?;
//!
//! // The edited path was rebuilt; the untouched sibling is shared.
//! assert_eq!(session.root().children()[0].value(), "renamed");
//! assert!(std::sync::Arc::ptr_eq(
//!     &before.children()[1],
//!     &session.root().children()[1],
//! ));
//! # Ok::<(), arbor_core::TreeError>(())
//! ```

pub mod cow;
pub mod edit;
pub mod error;
pub mod node;
pub mod path;
pub mod session;
pub mod validate;

pub use cow::update;
pub use edit::{delete_at, delete_child, insert_child};
pub use error::{TreeError, TreeResult};
pub use node::TreeNode;
pub use path::{NodePath, PathKey, path_of, resolve_chain};
pub use session::{EditOp, TreeSession};
pub use validate::record_edit;
