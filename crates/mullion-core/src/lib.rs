//! Core systems for Mullion.
//!
//! This crate provides the foundational pieces of the Mullion widget
//! toolkit:
//!
//! - **Node tree**: an owning hierarchy with stable generational ids,
//!   cascading removal and atomic attach/detach (see [`Tree`])
//! - **Error taxonomy**: contract-violation errors for tree misuse
//! - **Logging**: `tracing` targets and a tree debug renderer
//!
//! The widget layer in the `mullion` crate builds its screen/widget
//! hierarchy on top of [`Tree`]; nothing in this crate knows about
//! widgets, input or painting.
//!
//! # Example
//!
//! ```
//! use mullion_core::Tree;
//!
//! let mut tree = Tree::new();
//! let root = tree.insert("panel");
//! let child = tree.insert("button");
//! tree.attach(root, child)?;
//!
//! // Removing a node removes its whole subtree and reports every
//! // dropped id so back-references can be purged in one place.
//! let removed = tree.remove(root)?;
//! assert_eq!(removed.len(), 2);
//! # Ok::<(), mullion_core::TreeError>(())
//! ```

mod error;
pub mod logging;
mod tree;

pub use error::{TreeError, TreeResult};
pub use logging::format_tree;
pub use tree::{NodeId, Tree};
