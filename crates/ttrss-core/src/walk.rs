//! Depth-first, pre-order traversal of a [`FeedTreeNode`].
//!
//! The visitor answers every node with a [`WalkControl`]. `SkipSubtree` is
//! only meaningful for categories: returning it for a feed aborts the walk
//! with [`WalkError::SkipOnFeed`].

use crate::tree::FeedTreeNode;

/// Visitor decision for one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkControl<E> {
    Continue,
    /// Do not descend into this category; continue with its next sibling.
    SkipSubtree,
    /// Stop the walk and return the error.
    Abort(E),
}

/// Why a walk stopped early.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalkError<E> {
    #[error("walk aborted: {0}")]
    Aborted(E),
    #[error("skip-subtree returned for feed {id} ({name:?}), which has no subtree")]
    SkipOnFeed { id: i64, name: String },
}

impl<E> WalkError<E> {
    /// The visitor's error, if the walk was aborted by one.
    pub fn into_aborted(self) -> Option<E> {
        match self {
            Self::Aborted(e) => Some(e),
            Self::SkipOnFeed { .. } => None,
        }
    }
}

/// Walk `root` depth-first, calling `visit` once per node before its children.
pub fn walk<E, F>(root: &FeedTreeNode, mut visit: F) -> Result<(), WalkError<E>>
where
    F: FnMut(&FeedTreeNode) -> WalkControl<E>,
{
    match visit(root) {
        WalkControl::Continue => {}
        WalkControl::Abort(e) => return Err(WalkError::Aborted(e)),
        WalkControl::SkipSubtree if root.is_category() => return Ok(()),
        WalkControl::SkipSubtree => return Err(skip_on_feed(root)),
    }
    if root.is_category() {
        walk_children(root, &mut visit)?;
    }
    Ok(())
}

fn walk_children<E, F>(category: &FeedTreeNode, visit: &mut F) -> Result<(), WalkError<E>>
where
    F: FnMut(&FeedTreeNode) -> WalkControl<E>,
{
    for child in &category.children {
        match (visit(child), child.is_category()) {
            (WalkControl::Abort(e), _) => return Err(WalkError::Aborted(e)),
            (WalkControl::SkipSubtree, false) => return Err(skip_on_feed(child)),
            (WalkControl::SkipSubtree, true) | (WalkControl::Continue, false) => {}
            (WalkControl::Continue, true) => walk_children(child, visit)?,
        }
    }
    Ok(())
}

fn skip_on_feed<E>(node: &FeedTreeNode) -> WalkError<E> {
    WalkError::SkipOnFeed {
        id: node.id,
        name: node.name.clone(),
    }
}
