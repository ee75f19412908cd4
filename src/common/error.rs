//! Error types for degreetree.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::common::NodeId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in degreetree.
///
/// Missing keys and duplicate inserts are not errors: they are ordinary
/// outcomes reported through return values. Only allocation problems and
/// validator findings end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// The tree's configured node limit would be exceeded.
    #[error("Node limit of {limit} reached")]
    NodeLimitReached { limit: usize },

    /// The allocator could not reserve memory for a node.
    #[error("Allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),

    /// A structural invariant does not hold.
    ///
    /// Only produced by `BTree::check_invariants`; a correct tree never
    /// returns it.
    #[error("Invariant violated at {node}: {reason}")]
    InvariantViolation { node: NodeId, reason: String },
}
