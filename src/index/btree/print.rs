//! Human-readable structure dump. Not meant to be parsed.

use std::fmt;

use crate::index::btree::BTree;

/// Pre-order dump of a tree, one node per line.
///
/// The root is labelled `depth_marker` and every level below it adds one
/// to the label and two spaces of indentation:
///
/// ```text
/// 1: [20]
///   2: [5, 10]
///   2: [30, 40]
/// ```
struct Dump<'a> {
    tree: &'a BTree,
    depth_marker: usize,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.tree.root else {
            return writeln!(f, "<empty>");
        };

        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.tree.arena.node(id);
            writeln!(
                f,
                "{:indent$}{}: {:?}",
                "",
                self.depth_marker + depth,
                node.keys,
                indent = depth * 2
            )?;
            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }
        Ok(())
    }
}

impl BTree {
    /// Render the tree structure, labelling the root level `depth_marker`.
    pub fn dump(&self, depth_marker: usize) -> String {
        Dump {
            tree: self,
            depth_marker,
        }
        .to_string()
    }
}

impl fmt::Display for BTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dump = Dump {
            tree: self,
            depth_marker: 1,
        };
        fmt::Display::fmt(&dump, f)
    }
}
