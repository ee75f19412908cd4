//! In-order traversal.

use std::iter::FusedIterator;

use crate::common::{Key, NodeId};
use crate::index::btree::BTree;

/// Lazy ascending iterator over the keys of a [`BTree`].
///
/// Keeps one `(node, next key index)` frame per level of the path from the
/// root to the current key, so memory is bounded by the tree height.
///
/// # Example
/// ```
/// use degreetree::BTree;
///
/// let tree = BTree::create(2, &[3, 1, 2]).unwrap();
/// let keys: Vec<i32> = tree.iter().collect();
/// assert_eq!(keys, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    tree: &'a BTree,
    stack: Vec<(NodeId, usize)>,
    remaining: usize,
}

impl<'a> Keys<'a> {
    fn new(tree: &'a BTree) -> Self {
        let mut keys = Self {
            tree,
            stack: Vec::with_capacity(tree.height()),
            remaining: tree.len(),
        };
        if let Some(root) = tree.root {
            keys.push_left_spine(root);
        }
        keys
    }

    /// Push `id` and every first child below it.
    fn push_left_spine(&mut self, mut id: NodeId) {
        loop {
            self.stack.push((id, 0));
            match self.tree.arena.node(id).children.first() {
                Some(&child) => id = child,
                None => return,
            }
        }
    }
}

impl Iterator for Keys<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        let tree = self.tree;
        loop {
            let frame = self.stack.last_mut()?;
            let node = tree.arena.node(frame.0);

            if frame.1 < node.keys.len() {
                let key = node.keys[frame.1];
                frame.1 += 1;
                // Everything between this key and the next lives under the
                // child to its right.
                if !node.is_leaf {
                    let child = node.children[frame.1];
                    self.push_left_spine(child);
                }
                self.remaining -= 1;
                return Some(key);
            }

            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Keys<'_> {}

impl FusedIterator for Keys<'_> {}

impl BTree {
    /// Iterate over all keys in ascending order.
    pub fn iter(&self) -> Keys<'_> {
        Keys::new(self)
    }

    /// Collect all keys in ascending order.
    pub fn to_vec(&self) -> Vec<Key> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a BTree {
    type Item = Key;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Keys<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_empty() {
        let tree = BTree::new(2);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[test]
    fn test_iter_sorted_across_levels() {
        let keys: Vec<Key> = (0..500).map(|i| (i * 101) % 500).collect();
        let tree = BTree::create(3, &keys).unwrap();
        assert!(tree.height() >= 3);

        let expected: Vec<Key> = (0..500).collect();
        assert_eq!(tree.to_vec(), expected);
    }

    #[test]
    fn test_iter_exact_size() {
        let tree = BTree::create(2, &[5, 1, 4, 2, 3]).unwrap();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 5);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn test_into_iterator_for_ref() {
        let tree = BTree::create(2, &[2, 1]).unwrap();
        let mut seen = Vec::new();
        for key in &tree {
            seen.push(key);
        }
        assert_eq!(seen, vec![1, 2]);
    }
}
