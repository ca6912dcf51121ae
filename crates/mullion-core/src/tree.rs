//! Node tree built on arena storage.
//!
//! Provides [`Tree`], an owning hierarchy of values with:
//! - Stable generational ids via arena-based storage
//! - Parent-child ownership with cascading removal
//! - Atomic shape mutations (a failed call leaves the tree untouched)
//!
//! # Ids and dangling references
//!
//! [`NodeId`]s are generational: once a node is removed, every copy of its
//! id reads as dead (`get` returns `None`) and is never resurrected by a
//! later insertion. Holders of weak back-references therefore degrade
//! gracefully, but a well-behaved owner should still purge them: the
//! [`remove`](Tree::remove) operation returns the full set of removed ids
//! as the single cleanup point for that purpose.
//!
//! # Shape mutations
//!
//! `insert`, `attach`, `detach` and `remove` are the only operations that
//! change the shape of the tree. Each either completes fully or returns an
//! error without touching anything, so there is no intermediate state in
//! which a node has a parent but inconsistent bookkeeping.

use slotmap::{new_key_type, SlotMap};

use crate::error::{TreeError, TreeResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a node in a [`Tree`].
    ///
    /// Ids are stable handles that remain valid as the tree changes shape.
    /// They become dead when the node is removed.
    pub struct NodeId;
}

struct Node<T> {
    value: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An owning tree of values keyed by stable [`NodeId`]s.
///
/// Child order is insertion order and is preserved by every operation;
/// callers that use the order for painting or hit-testing can rely on it.
pub struct Tree<T> {
    nodes: SlotMap<NodeId, Node<T>>,
}

impl<T> Tree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Insert a detached node and return its id.
    ///
    /// The node has no parent until [`attach`](Self::attach) is called.
    pub fn insert(&mut self, value: T) -> NodeId {
        let id = self.nodes.insert(Node {
            value,
            parent: None,
            children: Vec::new(),
        });
        tracing::trace!(target: targets::TREE, ?id, "inserted node");
        id
    }

    /// Attach a detached node as the last child of `parent`.
    ///
    /// Fails with [`TreeError::AlreadyAttached`] if `child` already has a
    /// parent, and with [`TreeError::CircularAttachment`] if `parent` is
    /// `child` or one of its descendants. On error the tree is unchanged.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Err(TreeError::InvalidNode);
        }
        if self.nodes[child].parent.is_some() {
            return Err(TreeError::AlreadyAttached);
        }
        if self.is_ancestor_of(child, parent) {
            return Err(TreeError::CircularAttachment);
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        tracing::trace!(target: targets::TREE, ?parent, ?child, "attached node");
        Ok(())
    }

    /// Detach `child` from `parent`, leaving it in the tree as a detached
    /// subtree root.
    ///
    /// Fails with [`TreeError::NotAChild`] if `child`'s parent is not
    /// `parent`. On error the tree is unchanged.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Err(TreeError::InvalidNode);
        }
        if self.nodes[child].parent != Some(parent) {
            return Err(TreeError::NotAChild);
        }

        self.nodes[child].parent = None;
        self.nodes[parent].children.retain(|&c| c != child);
        tracing::trace!(target: targets::TREE, ?parent, ?child, "detached node");
        Ok(())
    }

    /// Remove a node and its whole subtree.
    ///
    /// The node is detached from its parent (if any) and every node of the
    /// subtree is dropped. Returns the removed ids in post-order (children
    /// before parents, the removed node itself last) so that holders of
    /// back-references can purge them in one place.
    pub fn remove(&mut self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        if !self.nodes.contains_key(id) {
            return Err(TreeError::InvalidNode);
        }

        // Unlink from the parent first so the subtree is no longer
        // reachable even if a value drop panics half-way through.
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&c| c != id);
        }

        let mut removed = Vec::new();
        self.collect_post_order(id, &mut removed);
        for &node in &removed {
            self.nodes.remove(node);
        }
        tracing::trace!(target: targets::TREE, ?id, count = removed.len(), "removed subtree");
        Ok(removed)
    }

    fn collect_post_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[id].children {
            self.collect_post_order(child, out);
        }
        out.push(id);
    }

    /// Check whether `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == potential_ancestor {
                return true;
            }
            current = self.nodes.get(node).and_then(|n| n.parent);
        }
        false
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get a reference to a node's value.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|n| &n.value)
    }

    /// Get a mutable reference to a node's value.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|n| &mut n.value)
    }

    /// Check whether a node is still alive.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the parent of a node, `Ok(None)` for a root.
    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        self.nodes
            .get(id)
            .map(|n| n.parent)
            .ok_or(TreeError::InvalidNode)
    }

    /// Get the children of a node in insertion order.
    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .ok_or(TreeError::InvalidNode)
    }

    /// Iterate over the ancestors of a node, nearest first.
    ///
    /// The node itself is not yielded. Iteration stops silently at a dead
    /// id, so the iterator is safe to use on a stale handle.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.nodes.get(id).and_then(|n| n.parent);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.nodes.get(next).and_then(|n| n.parent);
            Some(next)
        })
    }

    /// Collect a subtree's ids in pre-order, the given node first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.nodes.contains_key(id) {
            self.collect_pre_order(id, &mut out);
        }
        out
    }

    fn collect_pre_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in &self.nodes[id].children {
            self.collect_pre_order(child, out);
        }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}
