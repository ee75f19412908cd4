//! Node Arena - owns every node of one tree.
//!
//! The [`NodeArena`] provides:
//! - Slot storage addressed by [`NodeId`]
//! - A free list so merged-away slots are reused by later splits
//! - An optional cap on live nodes
//! - All-or-nothing reservation of nodes ahead of a mutation

use tracing::debug;

use crate::common::{Error, NodeId, Result, TreeConfig};
use crate::storage::Node;

/// Slot storage for the nodes of a single tree.
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────────────────┐
/// │                        NodeArena                          │
/// │  ┌─────────────────────────────────────────────────────┐  │
/// │  │ slots: Vec<Option<Node>>                            │  │
/// │  │ [Some(n0)] [None] [Some(n2)] [Some(n3)] [None] ...  │  │
/// │  └─────────────────────────────────────────────────────┘  │
/// │  ┌──────────────┐  ┌──────────────┐                       │
/// │  │  free_list   │  │  max_nodes   │                       │
/// │  │ Vec<NodeId>  │  │ Option<usize>│                       │
/// │  └──────────────┘  └──────────────┘                       │
/// └───────────────────────────────────────────────────────────┘
/// ```
///
/// Every live node is owned by exactly one slot. Freeing a node moves it
/// out of its slot and returns it to the caller; the slot id goes on the
/// free list (LIFO, so the most recently vacated slot is reused first).
///
/// Dereferencing a freed or never-allocated id is a programming error and
/// panics.
#[derive(Debug)]
pub struct NodeArena {
    /// Node storage; `None` marks a vacant slot.
    slots: Vec<Option<Node>>,

    /// Stack of vacant slot ids.
    free_list: Vec<NodeId>,

    /// Number of occupied slots.
    live: usize,

    /// Minimum degree, used to size new nodes.
    min_degree: usize,

    /// Cap on `live`, if any.
    max_nodes: Option<usize>,

    /// Nodes handed out since creation or the last counter reset.
    allocations: u64,

    /// Nodes released since creation or the last counter reset.
    frees: u64,
}

impl NodeArena {
    /// Create an empty arena for trees built with `config`.
    pub fn new(config: &TreeConfig) -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            min_degree: config.min_degree,
            max_nodes: config.max_nodes,
            allocations: 0,
            frees: 0,
        }
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Allocate one empty node.
    ///
    /// # Errors
    /// - `Error::NodeLimitReached` if the arena is at its node cap
    /// - `Error::AllocationFailed` if memory cannot be reserved
    pub fn allocate(&mut self, is_leaf: bool) -> Result<NodeId> {
        self.check_limit(1)?;

        // Build the node before touching any arena state.
        let node = Node::with_capacity(self.min_degree, is_leaf)?;

        let id = match self.free_list.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.try_reserve(1)?;
                // Room to free every slot later without reallocating.
                self.free_list.try_reserve(self.slots.len() + 1)?;
                let id = NodeId::new(self.slots.len());
                self.slots.push(Some(node));
                id
            }
        };

        self.live += 1;
        self.allocations += 1;
        Ok(id)
    }

    /// Allocate `count` empty nodes, all or nothing.
    ///
    /// On failure every node allocated by this call is released again, so
    /// the set of live nodes is unchanged.
    ///
    /// # Errors
    /// - `Error::NodeLimitReached` if `count` more nodes would exceed the cap
    /// - `Error::AllocationFailed` if memory cannot be reserved
    pub fn reserve(&mut self, count: usize) -> Result<Vec<NodeId>> {
        self.check_limit(count)?;

        let mut ids = Vec::new();
        ids.try_reserve_exact(count)?;

        for _ in 0..count {
            match self.allocate(true) {
                Ok(id) => ids.push(id),
                Err(e) => {
                    for id in ids {
                        self.free(id);
                    }
                    return Err(e);
                }
            }
        }

        Ok(ids)
    }

    /// Release a node, returning it to the caller.
    ///
    /// Returns `None` if the slot was already vacant.
    pub fn free(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id);
        self.live -= 1;
        self.frees += 1;
        Some(node)
    }

    fn check_limit(&self, count: usize) -> Result<()> {
        if let Some(limit) = self.max_nodes {
            if self.live + count > limit {
                debug!(live = self.live, requested = count, limit, "node limit reached");
                return Err(Error::NodeLimitReached { limit });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Look up a node, or `None` if the id is vacant or out of range.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Borrow a live node.
    ///
    /// # Panics
    /// Panics if `id` does not name a live node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("dangling node handle {id}"),
        }
    }

    /// Mutably borrow a live node.
    ///
    /// # Panics
    /// Panics if `id` does not name a live node.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("dangling node handle {id}"),
        }
    }

    /// Mutably borrow two distinct live nodes at once.
    ///
    /// # Panics
    /// Panics if `a == b` or either id does not name a live node.
    pub fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut Node, &mut Node) {
        assert_ne!(a, b, "pair_mut needs two distinct nodes");

        let (lo, hi) = if a.0 < b.0 { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi.0);

        let lo_node = match head.get_mut(lo.0).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("dangling node handle {lo}"),
        };
        let hi_node = match tail.first_mut().and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("dangling node handle {hi}"),
        };

        if a.0 < b.0 {
            (lo_node, hi_node)
        } else {
            (hi_node, lo_node)
        }
    }

    // ========================================================================
    // Accounting
    // ========================================================================

    /// Number of live nodes.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of vacant slots waiting for reuse.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Nodes handed out since creation or the last reset.
    #[inline]
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Nodes released since creation or the last reset.
    #[inline]
    pub fn frees(&self) -> u64 {
        self.frees
    }

    /// Zero the allocation counters.
    pub fn reset_counters(&mut self) {
        self.allocations = 0;
        self.frees = 0;
    }
}
