//! Error types for the node tree.

use thiserror::Error;

/// Errors raised by [`Tree`](crate::Tree) shape mutations.
///
/// All of these indicate a caller bug rather than bad input: the tree is
/// left exactly as it was before the failing call, and the call site is
/// expected to have logged the violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The node id is invalid or the node has been removed.
    #[error("invalid or removed node id")]
    InvalidNode,
    /// Attempted to attach a node that already has a parent.
    #[error("node is already attached to a parent")]
    AlreadyAttached,
    /// Attempted to detach a node from something that is not its parent.
    #[error("node is not a child of the given parent")]
    NotAChild,
    /// The attachment would make a node its own ancestor.
    #[error("attachment would make a node its own ancestor")]
    CircularAttachment,
}

/// A specialized Result type for tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
