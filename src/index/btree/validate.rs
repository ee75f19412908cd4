//! Structural invariant checker.
//!
//! Used as a test oracle after random insert/remove sequences; a correct
//! tree always passes.

use crate::common::{Error, Key, NodeId, Result};
use crate::index::btree::BTree;

/// Accumulated facts from one validation walk.
#[derive(Default)]
struct Walk {
    leaf_depth: Option<usize>,
    keys: usize,
    nodes: usize,
}

fn violation(node: NodeId, reason: String) -> Error {
    Error::InvariantViolation { node, reason }
}

impl BTree {
    /// Check every structural invariant.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` for the first broken invariant found:
    ///   uneven leaf depth, key count out of bounds, keys out of order or
    ///   outside their separators, wrong child count, or a cached length /
    ///   live node count that disagrees with the tree.
    pub fn check_invariants(&self) -> Result<()> {
        let Some(root) = self.root else {
            if self.len != 0 {
                return Err(violation(
                    NodeId::new(0),
                    format!("empty tree reports len {}", self.len),
                ));
            }
            if self.arena.live_count() != 0 {
                return Err(violation(
                    NodeId::new(0),
                    format!("empty tree owns {} nodes", self.arena.live_count()),
                ));
            }
            return Ok(());
        };

        let mut walk = Walk::default();
        self.check_node(root, 0, None, None, &mut walk)?;

        if walk.keys != self.len {
            return Err(violation(
                root,
                format!("len is {} but tree holds {} keys", self.len, walk.keys),
            ));
        }
        if walk.nodes != self.arena.live_count() {
            return Err(violation(
                root,
                format!(
                    "{} nodes reachable but {} live in the arena",
                    walk.nodes,
                    self.arena.live_count()
                ),
            ));
        }
        Ok(())
    }

    fn check_node(
        &self,
        id: NodeId,
        depth: usize,
        lower: Option<Key>,
        upper: Option<Key>,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = match self.arena.get(id) {
            Some(node) => node,
            None => return Err(violation(id, "dangling child handle".to_string())),
        };
        let is_root = depth == 0;
        let count = node.keys.len();

        let min = if is_root { 1 } else { self.config.min_keys() };
        if count < min || count > self.config.max_keys() {
            return Err(violation(
                id,
                format!(
                    "{} keys, expected {}..={}",
                    count,
                    min,
                    self.config.max_keys()
                ),
            ));
        }

        if let Some(pair) = node.keys.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(violation(
                id,
                format!("keys not ascending: {} then {}", pair[0], pair[1]),
            ));
        }
        if let (Some(lower), Some(&first)) = (lower, node.keys.first()) {
            if first <= lower {
                return Err(violation(
                    id,
                    format!("key {} not above separator {}", first, lower),
                ));
            }
        }
        if let (Some(upper), Some(&last)) = (upper, node.keys.last()) {
            if last >= upper {
                return Err(violation(
                    id,
                    format!("key {} not below separator {}", last, upper),
                ));
            }
        }

        walk.keys += count;
        walk.nodes += 1;

        if node.is_leaf {
            if !node.children.is_empty() {
                return Err(violation(id, "leaf has children".to_string()));
            }
            match walk.leaf_depth {
                None => walk.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(violation(
                        id,
                        format!("leaf at depth {}, expected {}", depth, expected),
                    ));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        if node.children.len() != count + 1 {
            return Err(violation(
                id,
                format!("{} keys but {} children", count, node.children.len()),
            ));
        }

        for (i, &child) in node.children.iter().enumerate() {
            let child_lower = if i == 0 { lower } else { Some(node.keys[i - 1]) };
            let child_upper = if i == count { upper } else { Some(node.keys[i]) };
            self.check_node(child, depth + 1, child_lower, child_upper, walk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_trees_pass() {
        BTree::new(2).check_invariants().unwrap();

        for t in 2..=6 {
            let keys: Vec<Key> = (0..300).map(|i| (i * 7919) % 1000).collect();
            let tree = BTree::create(t, &keys).unwrap();
            tree.check_invariants().unwrap();
        }
    }

    #[test]
    fn test_detects_unordered_keys() {
        let mut tree = BTree::create(3, &[1, 2, 3]).unwrap();
        let root = tree.root().unwrap();
        tree.arena.node_mut(root).keys.swap(0, 2);

        match tree.check_invariants() {
            Err(Error::InvariantViolation { node, reason }) => {
                assert_eq!(node, root);
                assert!(reason.contains("not ascending"));
            }
            other => panic!("Expected InvariantViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_detects_underfull_node() {
        let mut tree = BTree::create(3, &(1..=10).collect::<Vec<_>>()).unwrap();
        let root = tree.root().unwrap();
        let child = tree.node(root).unwrap().children()[0];
        tree.arena.node_mut(child).keys.truncate(1);

        assert!(tree.check_invariants().is_err());
    }

    #[test]
    fn test_detects_stale_len() {
        let mut tree = BTree::create(2, &[1, 2]).unwrap();
        tree.len = 5;

        match tree.check_invariants() {
            Err(Error::InvariantViolation { reason, .. }) => {
                assert!(reason.contains("len is 5"));
            }
            other => panic!("Expected InvariantViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_detects_leaked_node() {
        let mut tree = BTree::create(2, &[1]).unwrap();
        tree.arena.allocate(true).unwrap();

        assert!(tree.check_invariants().is_err());
    }
}
