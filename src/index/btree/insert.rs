//! Top-down insertion with pre-emptive splits.
//!
//! # Algorithm
//! 1. Walk the search path once without mutating. A hit means the key is
//!    a duplicate and the insert is a no-op. Otherwise count the nodes the
//!    insert will create: one per full node on the path, plus a new root
//!    if the root is full.
//! 2. Reserve exactly that many nodes from the arena. This is the only
//!    fallible step; if it fails nothing has been touched.
//! 3. Grow the root if it is full, then descend, splitting every full
//!    child before stepping into it, and place the key in the leaf.
//!
//! Because every node entered during step 3 is non-full, a split always
//! has room to receive the promoted median and the walk never backs up.

use tracing::{debug, trace};

use crate::common::{Key, NodeId, Result};
use crate::index::btree::BTree;

impl BTree {
    /// Insert `key`.
    ///
    /// Returns `Ok(true)` if the key was added, `Ok(false)` if it was
    /// already present (the tree is left untouched).
    ///
    /// # Errors
    /// - `Error::NodeLimitReached` if the insert needs more nodes than the
    ///   configured cap allows
    /// - `Error::AllocationFailed` if a node cannot be allocated
    ///
    /// On error the tree is unchanged.
    pub fn insert(&mut self, key: Key) -> Result<bool> {
        let Some(needed) = self.plan_insert(key) else {
            return Ok(false);
        };
        let mut reserved = self.arena.reserve(needed)?;

        match self.root {
            None => {
                let leaf = take_reserved(&mut reserved);
                self.arena.node_mut(leaf).keys.push(key);
                self.root = Some(leaf);
            }
            Some(mut root) => {
                if self.arena.node(root).len() == self.max_keys() {
                    root = self.grow_root(root, &mut reserved);
                }
                self.insert_non_full(root, key, &mut reserved);
            }
        }

        debug_assert!(reserved.is_empty(), "reserved nodes left unused");
        self.len += 1;
        Ok(true)
    }

    /// Insert every key from `keys`, skipping duplicates.
    ///
    /// Returns how many keys were actually added. Stops at the first
    /// error; keys inserted before it stay in the tree.
    ///
    /// # Errors
    /// Same as [`insert`](Self::insert).
    pub fn insert_all<I>(&mut self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = Key>,
    {
        let mut added = 0;
        for key in keys {
            if self.insert(key)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Count the nodes inserting `key` will allocate, or `None` if `key`
    /// is already present.
    fn plan_insert(&self, key: Key) -> Option<usize> {
        let Some(mut current) = self.root else {
            return Some(1);
        };

        let max = self.max_keys();
        let mut needed = 0;
        if self.arena.node(current).len() == max {
            needed += 2; // new root + right half of the old root
        }

        // Splitting a full node leaves the subtree below it in place, so
        // the pre-split path visits the same nodes the insert will.
        loop {
            let node = self.arena.node(current);
            let index = node.position(key);

            if node.holds_at(index, key) {
                return None;
            }
            if node.is_leaf {
                return Some(needed);
            }

            let child = node.children[index];
            if self.arena.node(child).len() == max {
                needed += 1;
            }
            current = child;
        }
    }

    /// Put a fresh internal root above the full `old_root` and split it.
    /// Returns the new root.
    fn grow_root(&mut self, old_root: NodeId, reserved: &mut Vec<NodeId>) -> NodeId {
        let new_root = take_reserved(reserved);
        {
            let node = self.arena.node_mut(new_root);
            node.reset(false);
            node.children.push(old_root);
        }
        self.root = Some(new_root);
        self.split_child(new_root, 0, reserved);

        self.counters.root_splits += 1;
        debug!(root = %new_root, height = self.height(), "root split");
        new_root
    }

    /// Split the full child at `index` of `parent`.
    ///
    /// The child keeps its lower `T-1` keys (and lower `T` children), a
    /// reserved sibling takes the upper `T-1` keys (and upper `T`
    /// children), and the median moves up into `parent` at `index` with
    /// the sibling as child `index + 1`.
    fn split_child(&mut self, parent: NodeId, index: usize, reserved: &mut Vec<NodeId>) {
        let t = self.config.min_degree;
        let child = self.arena.node(parent).children[index];
        let sibling = take_reserved(reserved);

        let median = {
            let (full, right) = self.arena.pair_mut(child, sibling);
            debug_assert_eq!(full.keys.len(), 2 * t - 1, "split of a non-full node");

            right.reset(full.is_leaf);
            right.keys.extend(full.keys.drain(t..));
            if !full.is_leaf {
                right.children.extend(full.children.drain(t..));
            }

            let median = full.keys[t - 1];
            full.keys.truncate(t - 1);
            median
        };

        let node = self.arena.node_mut(parent);
        node.keys.insert(index, median);
        node.children.insert(index + 1, sibling);

        self.counters.splits += 1;
        trace!(node = %child, sibling = %sibling, median, "split node");
    }

    /// Descend from the non-full `root`, splitting full children ahead of
    /// the walk, and insert `key` into the leaf it ends at.
    fn insert_non_full(&mut self, root: NodeId, key: Key, reserved: &mut Vec<NodeId>) {
        let max = self.max_keys();
        let mut current = root;

        loop {
            let node = self.arena.node(current);
            let mut index = node.position(key);

            if node.is_leaf {
                self.arena.node_mut(current).insert_key(key);
                return;
            }

            let child = node.children[index];
            if self.arena.node(child).len() == max {
                self.split_child(current, index, reserved);
                // The promoted median now sits at `index`; go right of it
                // if the key is larger.
                if key > self.arena.node(current).keys[index] {
                    index += 1;
                }
            }
            current = self.arena.node(current).children[index];
        }
    }
}

/// Pop one of the nodes reserved for the current insert.
fn take_reserved(reserved: &mut Vec<NodeId>) -> NodeId {
    match reserved.pop() {
        Some(id) => id,
        None => panic!("insert planning under-counted new nodes"),
    }
}
