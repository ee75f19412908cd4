//! Top-down deletion with pre-emptive borrow and merge.
//!
//! # Algorithm
//! The walk only ever steps into a node that already holds at least `T`
//! keys, so removing one key on the way down can never leave a node
//! below `T-1`:
//!
//! ```text
//! key in this node, leaf        -> shift it out
//! key in this node, internal    -> left child has >= T keys:  swap in predecessor
//!                                  right child has >= T keys: swap in successor
//!                                  both have T-1:             merge, keep going
//! key below this node           -> target child has T-1 keys:
//!                                    borrow from a sibling with >= T,
//!                                    otherwise merge with a sibling
//! ```
//!
//! A merge at the root can leave it empty; the root is then replaced by
//! its only child once the walk is done.

use tracing::{debug, trace};

use crate::common::{Key, NodeId};
use crate::index::btree::BTree;

impl BTree {
    /// Remove `key`.
    ///
    /// Returns `true` if the key was present. Removing an absent key
    /// leaves the tree untouched. Removal never allocates and never fails.
    pub fn remove(&mut self, key: Key) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        if !self.contains(key) {
            return false;
        }

        self.delete_from(root, key);
        self.len -= 1;
        self.shrink_root();
        true
    }

    /// Remove every key from `keys`. Returns how many were present.
    pub fn remove_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = Key>,
    {
        keys.into_iter().filter(|&key| self.remove(key)).count()
    }

    fn delete_from(&mut self, start: NodeId, key: Key) {
        let t = self.config.min_degree;
        let mut current = start;
        let mut key = key;

        loop {
            let node = self.arena.node(current);
            let index = node.position(key);

            if node.holds_at(index, key) {
                if node.is_leaf {
                    self.arena.node_mut(current).remove_key(index);
                    return;
                }

                let left = node.children[index];
                let right = node.children[index + 1];

                if self.arena.node(left).len() >= t {
                    let predecessor = self.subtree_max(left);
                    self.arena.node_mut(current).keys[index] = predecessor;
                    key = predecessor;
                    current = left;
                } else if self.arena.node(right).len() >= t {
                    let successor = self.subtree_min(right);
                    self.arena.node_mut(current).keys[index] = successor;
                    key = successor;
                    current = right;
                } else {
                    self.merge_children(current, index);
                    current = left;
                }
            } else {
                if node.is_leaf {
                    return;
                }

                let child = node.children[index];
                let index = if self.arena.node(child).len() < t {
                    self.fill_child(current, index)
                } else {
                    index
                };
                current = self.arena.node(current).children[index];
            }
        }
    }

    /// Bring the child at `index` of `parent` up to at least `T` keys.
    ///
    /// Returns the index of the child that now covers the original
    /// child's key range (it moves left by one when merged into its left
    /// sibling).
    fn fill_child(&mut self, parent: NodeId, index: usize) -> usize {
        let t = self.config.min_degree;
        let (left, right) = {
            let node = self.arena.node(parent);
            let left = index.checked_sub(1).map(|i| node.children[i]);
            let right = node.children.get(index + 1).copied();
            (left, right)
        };

        if let Some(left) = left {
            if self.arena.node(left).len() >= t {
                self.borrow_from_left(parent, index);
                return index;
            }
        }
        if let Some(right) = right {
            if self.arena.node(right).len() >= t {
                self.borrow_from_right(parent, index);
                return index;
            }
        }

        if right.is_some() {
            self.merge_children(parent, index);
            index
        } else {
            self.merge_children(parent, index - 1);
            index - 1
        }
    }

    /// Rotate the left sibling's last key up into `parent` and the
    /// separator down into the front of the child at `index`.
    fn borrow_from_left(&mut self, parent: NodeId, index: usize) {
        let (child, sibling) = {
            let node = self.arena.node(parent);
            (node.children[index], node.children[index - 1])
        };

        let (up, moved) = self.arena.node_mut(sibling).pop_back();
        let down = std::mem::replace(&mut self.arena.node_mut(parent).keys[index - 1], up);

        let node = self.arena.node_mut(child);
        node.keys.insert(0, down);
        if let Some(moved) = moved {
            node.children.insert(0, moved);
        }

        self.counters.borrows += 1;
        trace!(node = %child, from = %sibling, key = down, "borrowed from left sibling");
    }

    /// Rotate the right sibling's first key up into `parent` and the
    /// separator down onto the end of the child at `index`.
    fn borrow_from_right(&mut self, parent: NodeId, index: usize) {
        let (child, sibling) = {
            let node = self.arena.node(parent);
            (node.children[index], node.children[index + 1])
        };

        let (up, moved) = self.arena.node_mut(sibling).pop_front();
        let down = std::mem::replace(&mut self.arena.node_mut(parent).keys[index], up);

        let node = self.arena.node_mut(child);
        node.keys.push(down);
        if let Some(moved) = moved {
            node.children.push(moved);
        }

        self.counters.borrows += 1;
        trace!(node = %child, from = %sibling, key = down, "borrowed from right sibling");
    }

    /// Fold the child at `index + 1` and the separator at `index` into the
    /// child at `index`, freeing the right child.
    ///
    /// Both children hold `T-1` keys, so the result holds exactly `2T-1`.
    fn merge_children(&mut self, parent: NodeId, index: usize) {
        let (left, right, separator) = {
            let node = self.arena.node_mut(parent);
            let separator = node.remove_key(index);
            let right = node.children.remove(index + 1);
            (node.children[index], right, separator)
        };

        let absorbed = match self.arena.free(right) {
            Some(node) => node,
            None => panic!("dangling node handle {right}"),
        };

        let node = self.arena.node_mut(left);
        node.keys.push(separator);
        node.keys.extend(absorbed.keys);
        node.children.extend(absorbed.children);
        debug_assert!(node.keys.len() <= 2 * self.config.min_degree - 1);

        self.counters.merges += 1;
        trace!(node = %left, absorbed = %right, separator, "merged siblings");
    }

    /// Drop an empty root after a removal: an empty leaf root empties the
    /// tree, an empty internal root hands over to its only child.
    fn shrink_root(&mut self) {
        let Some(root) = self.root else {
            return;
        };
        let node = self.arena.node(root);
        if !node.is_empty() {
            return;
        }

        let next = node.children.first().copied();
        self.arena.free(root);
        self.root = next;

        if let Some(child) = next {
            self.counters.root_collapses += 1;
            debug!(root = %child, height = self.height(), "root collapse");
        } else {
            debug!("tree emptied");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(t: usize, keys: impl IntoIterator<Item = Key>) -> BTree {
        let mut tree = BTree::new(t);
        tree.insert_all(keys).unwrap();
        tree
    }

    #[test]
    fn test_remove_from_leaf_root() {
        let mut tree = tree_of(3, [1, 2, 3]);

        assert!(tree.remove(2));
        assert_eq!(tree.to_vec(), vec![1, 3]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_remove_last_key_empties_tree() {
        let mut tree = tree_of(2, [7]);

        assert!(tree.remove(7));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut tree = tree_of(2, 1..=10);
        let nodes_before = tree.node_count();
        tree.reset_stats();

        assert!(!tree.remove(42));
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.node_count(), nodes_before);
        assert_eq!(tree.stats().rebalances(), 0);

        let mut empty = BTree::new(2);
        assert!(!empty.remove(1));
    }

    #[test]
    fn test_internal_key_uses_predecessor() {
        // Root [20], leaves [5, 10] and [30, 40].
        let mut tree = tree_of(2, [10, 20, 30, 40, 5]);

        assert!(tree.remove(20));
        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.keys(), &[10]);
        assert_eq!(tree.to_vec(), vec![5, 10, 30, 40]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_internal_key_uses_successor() {
        // Root [2], leaves [1] and [3, 4].
        let mut tree = tree_of(2, [1, 2, 3, 4]);

        assert!(tree.remove(2));
        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.keys(), &[3]);
        assert_eq!(tree.to_vec(), vec![1, 3, 4]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_internal_key_merges_minimal_children() {
        // Root [2], leaves [1] and [3].
        let mut tree = tree_of(2, [1, 2, 3, 4]);
        tree.remove(4);

        assert!(tree.remove(2));
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.to_vec(), vec![1, 3]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_borrow_from_left_sibling() {
        // [1,2,3,4] -> root [2], leaves [1] [3,4]; add 0 -> [0,1] [3,4]
        let mut tree = tree_of(2, [1, 2, 3, 4, 0]);
        tree.remove(4);
        tree.reset_stats();

        // Right leaf [3] is minimal, left [0,1] can lend.
        assert!(tree.remove(3));
        assert_eq!(tree.stats().borrows, 1);
        assert_eq!(tree.stats().merges, 0);
        assert_eq!(tree.to_vec(), vec![0, 1, 2]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_borrow_from_right_sibling() {
        let mut tree = tree_of(2, [1, 2, 3, 4]);
        tree.reset_stats();

        // Left leaf [1] is minimal, right [3,4] can lend.
        assert!(tree.remove(1));
        assert_eq!(tree.stats().borrows, 1);
        assert_eq!(tree.to_vec(), vec![2, 3, 4]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_merge_collapses_root() {
        let mut tree = tree_of(2, [1, 2, 3, 4]);
        tree.remove(4);
        assert_eq!(tree.height(), 2);
        tree.reset_stats();

        // Root [2] with leaves [1] [3]: removing 1 merges everything.
        assert!(tree.remove(1));
        assert_eq!(tree.stats().merges, 1);
        assert_eq!(tree.stats().root_collapses, 1);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.to_vec(), vec![2, 3]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_everything_any_order() {
        let keys: Vec<Key> = (0..200).map(|i| (i * 37) % 200).collect();
        for t in 2..=5 {
            let mut tree = tree_of(t, keys.iter().copied());
            for (removed, &key) in keys.iter().rev().enumerate() {
                assert!(tree.remove(key), "t={} key={}", t, key);
                assert_eq!(tree.len(), keys.len() - removed - 1);
                tree.check_invariants().unwrap();
            }
            assert!(tree.is_empty());
            assert_eq!(tree.node_count(), 0);
        }
    }

    #[test]
    fn test_remove_all_counts_present() {
        let mut tree = tree_of(3, 1..=10);
        assert_eq!(tree.remove_all([2, 4, 4, 99]), 2);
        assert_eq!(tree.len(), 8);
    }
}
