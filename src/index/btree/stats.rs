//! Structural statistics for a B-tree.

use std::fmt;

/// Counters for the structural work a tree has done.
///
/// Plain integers, updated under `&mut BTree`.
///
/// # Example
/// ```
/// use degreetree::BTree;
///
/// let mut tree = BTree::new(2);
/// for key in 1..=4 {
///     tree.insert(key).unwrap();
/// }
///
/// let stats = tree.stats();
/// assert_eq!(stats.root_splits, 1);
/// println!("{}", stats);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Node splits, including root splits.
    pub splits: u64,

    /// Splits of the root (each adds one level).
    pub root_splits: u64,

    /// Two siblings and their separator folded into one node.
    pub merges: u64,

    /// Keys rotated from a sibling through the parent.
    pub borrows: u64,

    /// Empty internal roots replaced by their only child (each removes one
    /// level).
    pub root_collapses: u64,

    /// Nodes taken from the arena.
    pub nodes_allocated: u64,

    /// Nodes returned to the arena.
    pub nodes_freed: u64,
}

impl TreeStats {
    /// Borrows plus merges: every underflow repair done on the delete path.
    pub fn rebalances(&self) -> u64 {
        self.borrows + self.merges
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {} (root: {}), merges: {}, borrows: {}, collapses: {}, nodes: +{}/-{} }}",
            self.splits,
            self.root_splits,
            self.merges,
            self.borrows,
            self.root_collapses,
            self.nodes_allocated,
            self.nodes_freed
        )
    }
}
