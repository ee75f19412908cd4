//! Point lookups: search, contains, min, max.

use crate::common::{Key, NodeId};
use crate::index::btree::BTree;

/// Outcome of [`BTree::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// The key is `keys()[index]` of `node`.
    Found { node: NodeId, index: usize },

    /// The key is absent.
    ///
    /// `node` is the leaf where the scan ended and `index` the position
    /// the key would occupy there. `node` is `None` for an empty tree.
    NotFound { node: Option<NodeId>, index: usize },
}

impl SearchResult {
    /// Whether the key was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }
}

impl BTree {
    /// Look up `key`.
    ///
    /// Each node is scanned with a binary search for the first key `>=`
    /// `key`; on a miss the scan descends into the child at that index.
    pub fn search(&self, key: Key) -> SearchResult {
        let Some(mut current) = self.root else {
            return SearchResult::NotFound {
                node: None,
                index: 0,
            };
        };

        loop {
            let node = self.arena.node(current);
            let index = node.position(key);

            if node.holds_at(index, key) {
                return SearchResult::Found {
                    node: current,
                    index,
                };
            }
            if node.is_leaf {
                return SearchResult::NotFound {
                    node: Some(current),
                    index,
                };
            }
            current = node.children[index];
        }
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: Key) -> bool {
        self.search(key).is_found()
    }

    /// Smallest key, or `None` for an empty tree.
    pub fn min(&self) -> Option<Key> {
        self.root.map(|root| self.subtree_min(root))
    }

    /// Largest key, or `None` for an empty tree.
    pub fn max(&self) -> Option<Key> {
        self.root.map(|root| self.subtree_max(root))
    }

    /// Leftmost key of the subtree rooted at `id` (in-order successor
    /// source on the delete path).
    pub(super) fn subtree_min(&self, mut id: NodeId) -> Key {
        loop {
            let node = self.arena.node(id);
            match node.children.first() {
                Some(&child) => id = child,
                None => return node.keys[0],
            }
        }
    }

    /// Rightmost key of the subtree rooted at `id` (in-order predecessor
    /// source on the delete path).
    pub(super) fn subtree_max(&self, mut id: NodeId) -> Key {
        loop {
            let node = self.arena.node(id);
            match node.children.last() {
                Some(&child) => id = child,
                None => return node.keys[node.keys.len() - 1],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_empty_tree() {
        let tree = BTree::new(2);
        assert_eq!(
            tree.search(7),
            SearchResult::NotFound {
                node: None,
                index: 0
            }
        );
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn test_search_found_reports_position() {
        let tree = BTree::create(3, &[10, 20, 30]).unwrap();

        match tree.search(20) {
            SearchResult::Found { node, index } => {
                assert_eq!(tree.node(node).unwrap().keys()[index], 20);
            }
            other => panic!("Expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_search_not_found_reports_insert_slot() {
        let tree = BTree::create(3, &[10, 20, 30]).unwrap();

        match tree.search(25) {
            SearchResult::NotFound {
                node: Some(node),
                index,
            } => {
                let leaf = tree.node(node).unwrap();
                assert!(leaf.is_leaf());
                assert_eq!(index, 2);
            }
            other => panic!("Expected NotFound in a leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_search_descends_levels() {
        let keys: Vec<Key> = (1..=50).collect();
        let tree = BTree::create(2, &keys).unwrap();
        assert!(tree.height() > 2);

        for key in 1..=50 {
            assert!(tree.contains(key), "missing {}", key);
        }
        assert!(!tree.contains(0));
        assert!(!tree.contains(51));
    }

    #[test]
    fn test_min_max() {
        let tree = BTree::create(2, &[42, -7, 13, 99, 0, 5]).unwrap();
        assert_eq!(tree.min(), Some(-7));
        assert_eq!(tree.max(), Some(99));
    }
}
