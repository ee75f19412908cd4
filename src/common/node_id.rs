//! Node identifier type.

use std::fmt;

/// Identifies a node slot in the node arena.
///
/// Using `usize` so the id indexes the arena's slot vector directly:
/// `slots[node_id.0]`. Ids are only meaningful for the tree that handed
/// them out, and a freed slot's id may be reused by a later split.
///
/// # Example
/// ```
/// use degreetree::NodeId;
///
/// let id = NodeId::new(5);
/// assert_eq!(id.0, 5);
/// assert_eq!(id.to_string(), "Node(5)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
