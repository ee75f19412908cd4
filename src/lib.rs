//! degreetree - an in-memory B-tree with a configurable minimum degree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           degreetree                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Index Layer (index/)                     │   │
//! │  │   BTree: create / insert / remove / search / destroy     │   │
//! │  │   pre-emptive split on insert, borrow/merge on remove    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Storage Layer (storage/)                  │   │
//! │  │      NodeArena (slots + free list + node cap) + Node     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Key, NodeId, Error, config)
//! - [`storage`] - Node layout and the node arena
//! - [`index`] - The B-tree engine
//!
//! # Quick Start
//! ```
//! use degreetree::{BTree, SearchResult};
//!
//! // Minimum degree 2: every node holds 1..=3 keys
//! let mut tree = BTree::create(2, &[50, 10, 40, 20, 30]).unwrap();
//!
//! tree.insert(25).unwrap();
//! assert!(tree.remove(40));
//!
//! assert!(matches!(tree.search(25), SearchResult::Found { .. }));
//! assert_eq!(tree.to_vec(), vec![10, 20, 25, 30, 50]);
//! tree.check_invariants().unwrap();
//!
//! print!("{}", tree);
//! ```

pub mod common;
pub mod index;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MIN_DEGREE, MIN_DEGREE};
pub use common::{Error, Key, NodeId, Result, TreeConfig};

pub use index::btree::{BTree, Keys, SearchResult, TreeStats};
pub use storage::Node;
