//! Logging and debugging facilities.
//!
//! Mullion uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Lifecycle events (insert/attach/detach/remove, dispatch cycles) are
//! traced at `trace` level; contract violations are logged at `error`
//! level by the call site that detected them.
//!
//! # Debug visualization
//!
//! [`format_tree`] renders a [`Tree`] as indented text, given a closure
//! that labels each node. The widget layer uses it to dump the live
//! widget hierarchy into failure diagnostics.

use std::fmt::Write as _;

use crate::tree::{NodeId, Tree};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Node tree shape mutations.
    pub const TREE: &str = "mullion_core::tree";
    /// Screen lifecycle and widget management.
    pub const SCREEN: &str = "mullion::screen";
    /// Per-frame input dispatch.
    pub const DISPATCH: &str = "mullion::dispatch";
}

/// Render a subtree as indented text.
///
/// `label` is called once per node to produce its display line. Dead ids
/// inside the tree's child lists cannot occur (the tree maintains that
/// invariant), so every reachable node is rendered.
pub fn format_tree<T>(
    tree: &Tree<T>,
    root: NodeId,
    label: impl Fn(NodeId, &T) -> String,
) -> String {
    let mut out = String::new();
    format_node(tree, root, 0, &label, &mut out);
    out
}

fn format_node<T>(
    tree: &Tree<T>,
    id: NodeId,
    depth: usize,
    label: &impl Fn(NodeId, &T) -> String,
    out: &mut String,
) {
    let Some(value) = tree.get(id) else {
        return;
    };
    let _ = writeln!(out, "{:indent$}{}", "", label(id, value), indent = depth * 2);
    if let Ok(children) = tree.children(id) {
        for &child in children {
            format_node(tree, child, depth + 1, label, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_nested_nodes() {
        let mut tree = Tree::new();
        let root = tree.insert("root");
        let child = tree.insert("child");
        let leaf = tree.insert("leaf");
        tree.attach(root, child).unwrap();
        tree.attach(child, leaf).unwrap();

        let text = format_tree(&tree, root, |_, v| (*v).to_string());
        assert_eq!(text, "root\n  child\n    leaf\n");
    }

    #[test]
    fn format_skips_dead_root() {
        let mut tree = Tree::new();
        let root = tree.insert("root");
        tree.remove(root).unwrap();
        assert_eq!(format_tree(&tree, root, |_, v| (*v).to_string()), "");
    }
}
