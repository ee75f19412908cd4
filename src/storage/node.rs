//! Node - a single B-tree node.
//!
//! A [`Node`] holds an ordered run of keys and, if internal, one more
//! child handle than it has keys. Nodes live in the
//! [`NodeArena`](super::NodeArena) and refer to their children by
//! [`NodeId`].

use crate::common::{Key, NodeId, Result};

/// A B-tree node.
///
/// # Layout
/// ```text
///            keys:   [ k0 | k1 | ... | k(n-1) ]
///        children: [ c0 | c1 | c2 | ... | cn ]
///
///   every key in c(i) < k(i) < every key in c(i+1)
/// ```
///
/// # Capacity
/// Both vectors are reserved once when the node is created: `2T-1` keys
/// and `2T` children (none for a leaf). Split, merge and borrow only move
/// elements between already-reserved buffers, so the only fallible step of
/// any tree operation is creating the node itself.
#[derive(Debug)]
pub struct Node {
    /// Keys in strictly ascending order.
    pub(crate) keys: Vec<Key>,

    /// Child handles; empty for leaves, `keys.len() + 1` otherwise.
    pub(crate) children: Vec<NodeId>,

    /// Leaf flag, fixed for the node's lifetime except for a freshly
    /// reserved node that has not been placed yet.
    pub(crate) is_leaf: bool,
}

impl Node {
    /// Create an empty node with room for a full complement of keys and
    /// children for minimum degree `min_degree`.
    ///
    /// Children capacity is always reserved, since a reserved node may
    /// later be placed as an internal node.
    ///
    /// # Errors
    /// - `Error::AllocationFailed` if the allocator refuses the reservation
    pub(crate) fn with_capacity(min_degree: usize, is_leaf: bool) -> Result<Self> {
        let mut keys = Vec::new();
        keys.try_reserve_exact(2 * min_degree - 1)?;

        let mut children = Vec::new();
        children.try_reserve_exact(2 * min_degree)?;

        Ok(Self {
            keys,
            children,
            is_leaf,
        })
    }

    /// Keys stored in this node, ascending.
    #[inline]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Child handles (empty for a leaf).
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Number of keys in this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether this node holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Smallest index `i` with `key <= keys[i]` (binary scan).
    ///
    /// Returns `len()` if every key is smaller.
    #[inline]
    pub fn position(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    /// Whether `keys[index]` is exactly `key`.
    #[inline]
    pub(crate) fn holds_at(&self, index: usize, key: Key) -> bool {
        self.keys.get(index) == Some(&key)
    }

    /// Insert `key` at its sorted position (shift right).
    pub(crate) fn insert_key(&mut self, key: Key) {
        let pos = self.position(key);
        self.keys.insert(pos, key);
    }

    /// Remove the key at `index` (shift left).
    pub(crate) fn remove_key(&mut self, index: usize) -> Key {
        self.keys.remove(index)
    }

    /// Detach the first key and, for an internal node, the first child.
    pub(crate) fn pop_front(&mut self) -> (Key, Option<NodeId>) {
        let key = self.keys.remove(0);
        let child = if self.is_leaf {
            None
        } else {
            Some(self.children.remove(0))
        };
        (key, child)
    }

    /// Detach the last key and, for an internal node, the last child.
    pub(crate) fn pop_back(&mut self) -> (Key, Option<NodeId>) {
        let key = self.keys.remove(self.keys.len() - 1);
        let child = if self.is_leaf {
            None
        } else {
            self.children.pop()
        };
        (key, child)
    }

    /// Clear contents and set the leaf flag, ready for reuse.
    pub(crate) fn reset(&mut self, is_leaf: bool) {
        self.keys.clear();
        self.children.clear();
        self.is_leaf = is_leaf;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_with(keys: &[Key]) -> Node {
        let mut node = Node::with_capacity(3, true).unwrap();
        node.keys.extend_from_slice(keys);
        node
    }

    #[test]
    fn test_new_node_capacity() {
        let node = Node::with_capacity(3, true).unwrap();
        assert!(node.is_empty());
        assert!(node.is_leaf());
        assert!(node.keys.capacity() >= 5);
        assert!(node.children.capacity() >= 6);
    }

    #[test]
    fn test_position_binary_scan() {
        let node = leaf_with(&[10, 20, 30]);

        assert_eq!(node.position(5), 0);
        assert_eq!(node.position(10), 0);
        assert_eq!(node.position(15), 1);
        assert_eq!(node.position(30), 2);
        assert_eq!(node.position(31), 3);
    }

    #[test]
    fn test_holds_at() {
        let node = leaf_with(&[10, 20]);

        assert!(node.holds_at(1, 20));
        assert!(!node.holds_at(0, 20));
        assert!(!node.holds_at(2, 20)); // past the end
    }

    #[test]
    fn test_insert_and_remove_shift() {
        let mut node = leaf_with(&[10, 30]);

        node.insert_key(20);
        node.insert_key(5);
        assert_eq!(node.keys(), &[5, 10, 20, 30]);

        assert_eq!(node.remove_key(1), 10);
        assert_eq!(node.keys(), &[5, 20, 30]);
    }

    #[test]
    fn test_pop_front_and_back() {
        let mut leaf = leaf_with(&[1, 2, 3]);
        assert_eq!(leaf.pop_front(), (1, None));
        assert_eq!(leaf.pop_back(), (3, None));
        assert_eq!(leaf.keys(), &[2]);

        let mut internal = Node::with_capacity(3, false).unwrap();
        internal.keys.extend_from_slice(&[10, 20]);
        internal
            .children
            .extend([NodeId::new(0), NodeId::new(1), NodeId::new(2)]);

        assert_eq!(internal.pop_back(), (20, Some(NodeId::new(2))));
        assert_eq!(internal.pop_front(), (10, Some(NodeId::new(0))));
        assert_eq!(internal.children(), &[NodeId::new(1)]);
    }

    #[test]
    fn test_reset() {
        let mut node = leaf_with(&[1, 2]);
        node.children.push(NodeId::new(9));

        node.reset(false);
        assert!(node.is_empty());
        assert!(node.children().is_empty());
        assert!(!node.is_leaf());
    }
}
