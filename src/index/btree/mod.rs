//! B-tree index implementation.
//!
//! A classic multiway search tree parameterized by its minimum degree `T`
//! (CLRS formulation): nodes hold `T-1..=2T-1` keys, the root as few as
//! one, and all leaves sit at the same depth.
//!
//! # Components
//! - [`BTree`] - The tree handle: create, insert, remove, search, destroy
//! - [`SearchResult`] - Found / not-found outcome with the node position
//! - [`Keys`] - Lazy in-order iterator
//! - [`TreeStats`] - Split / merge / borrow counters
//!
//! Both mutations work top-down in one pass: insert splits full nodes
//! before entering them, remove tops up minimal nodes before entering
//! them.

mod delete;
mod insert;
mod iter;
mod print;
mod search;
mod stats;
mod tree;
mod validate;

pub use iter::Keys;
pub use search::SearchResult;
pub use stats::TreeStats;
pub use tree::BTree;
