//! Storage layer - node layout and ownership.
//!
//! This module handles where nodes live:
//! - [`Node`] - Keys, child handles and the leaf flag
//! - [`NodeArena`] - Slot storage with a free list and node cap

mod arena;
mod node;

pub use arena::NodeArena;
pub use node::Node;
