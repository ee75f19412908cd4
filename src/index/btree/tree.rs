//! BTree - the tree handle, lifecycle and accessors.
//!
//! Search, insert, delete, traversal and validation live in sibling
//! modules as further `impl BTree` blocks.

use tracing::debug;

use crate::common::config::MIN_DEGREE;
use crate::common::{Key, NodeId, Result, TreeConfig};
use crate::index::btree::TreeStats;
use crate::storage::{Node, NodeArena};

/// A B-tree of unique integer keys with a fixed minimum degree `T`.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                          BTree                           │
/// │   root: Option<NodeId> ──┐                               │
/// │                          ▼                               │
/// │  ┌────────────────────────────────────────────────────┐  │
/// │  │ NodeArena                                          │  │
/// │  │   [20 | 40]                                        │  │
/// │  │   /   |    \                                       │  │
/// │  │ [10] [30] [50 | 60]                                │  │
/// │  └────────────────────────────────────────────────────┘  │
/// │   config: TreeConfig   len: usize   counters: TreeStats  │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// # Invariants
/// After every public operation:
/// - all leaves sit at the same depth
/// - non-root nodes hold `T-1..=2T-1` keys, the root `1..=2T-1`
/// - keys are unique and ascend within each node and in order
/// - an empty tree has no root node at all
///
/// # Usage
/// ```
/// use degreetree::{BTree, SearchResult};
///
/// let mut tree = BTree::create(2, &[30, 10, 20]).unwrap();
/// assert!(tree.insert(40).unwrap());
/// assert!(!tree.insert(10).unwrap()); // duplicate
///
/// assert!(matches!(tree.search(20), SearchResult::Found { .. }));
/// assert!(tree.remove(30));
/// assert_eq!(tree.to_vec(), vec![10, 20, 40]);
/// ```
#[derive(Debug)]
pub struct BTree {
    /// Owns every node of this tree.
    pub(super) arena: NodeArena,

    /// Root node, or `None` when the tree holds no keys.
    pub(super) root: Option<NodeId>,

    /// Degree and node cap (immutable after construction).
    pub(super) config: TreeConfig,

    /// Number of keys in the tree.
    pub(super) len: usize,

    /// Structural counters; the node counters are filled from the arena
    /// when a snapshot is taken.
    pub(super) counters: TreeStats,
}

impl BTree {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create an empty tree with minimum degree `min_degree`.
    ///
    /// # Panics
    /// Panics if `min_degree < 2`.
    pub fn new(min_degree: usize) -> Self {
        Self::with_config(TreeConfig::new(min_degree))
    }

    /// Create an empty tree from an explicit config.
    ///
    /// # Panics
    /// Panics if `config.min_degree < 2`.
    pub fn with_config(config: TreeConfig) -> Self {
        assert!(
            config.min_degree >= MIN_DEGREE,
            "min_degree must be >= {MIN_DEGREE}, got {}",
            config.min_degree
        );

        Self {
            arena: NodeArena::new(&config),
            root: None,
            config,
            len: 0,
            counters: TreeStats::default(),
        }
    }

    /// Build a tree by inserting `keys` one at a time.
    ///
    /// Duplicates are skipped; an empty slice gives an empty tree.
    ///
    /// # Errors
    /// - `Error::AllocationFailed` if a node cannot be allocated
    pub fn create(min_degree: usize, keys: &[Key]) -> Result<Self> {
        Self::create_with_config(TreeConfig::new(min_degree), keys)
    }

    /// Like [`create`](Self::create), with an explicit config.
    ///
    /// # Errors
    /// - `Error::NodeLimitReached` if the keys need more nodes than allowed
    /// - `Error::AllocationFailed` if a node cannot be allocated
    pub fn create_with_config(config: TreeConfig, keys: &[Key]) -> Result<Self> {
        let mut tree = Self::with_config(config);
        tree.insert_all(keys.iter().copied())?;
        Ok(tree)
    }

    // ========================================================================
    // Destruction
    // ========================================================================

    /// Release every node, children before parent, and empty the tree.
    ///
    /// Calling this on an empty tree does nothing. The tree stays usable
    /// afterwards.
    pub fn destroy(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };

        // Post-order walk: a node is freed on its second visit, after all
        // of its children.
        let mut stack = vec![(root, false)];
        let mut released = 0usize;
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                self.arena.free(id);
                released += 1;
                continue;
            }
            stack.push((id, true));
            let node = self.arena.node(id);
            stack.extend(node.children.iter().rev().map(|&child| (child, false)));
        }

        debug!(nodes = released, keys = self.len, "destroyed tree");
        self.len = 0;
    }

    /// Remove every key. Same as [`destroy`](Self::destroy).
    pub fn clear(&mut self) {
        self.destroy();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels: 0 for an empty tree, 1 for a lone leaf root.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(id) = current {
            height += 1;
            current = self.arena.node(id).children.first().copied();
        }
        height
    }

    /// Number of live nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.live_count()
    }

    /// Minimum degree `T`.
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.config.min_degree
    }

    /// Maximum keys per node (`2T-1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.config.max_keys()
    }

    /// The config this tree was built with.
    #[inline]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Root node handle, or `None` for an empty tree.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node by handle.
    ///
    /// Returns `None` for handles that are not live in this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Snapshot of the structural counters.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            nodes_allocated: self.arena.allocations(),
            nodes_freed: self.arena.frees(),
            ..self.counters
        }
    }

    /// Zero all structural counters.
    pub fn reset_stats(&mut self) {
        self.counters = TreeStats::default();
        self.arena.reset_counters();
    }
}

impl Default for BTree {
    fn default() -> Self {
        Self::with_config(TreeConfig::default())
    }
}
