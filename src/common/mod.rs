//! Common types and utilities shared across degreetree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration (minimum degree, node limit)
//! - Error types
//! - Identifiers (NodeId)

pub mod config;
pub mod error;
mod node_id;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use node_id::NodeId;

/// Key type stored in the tree.
///
/// Keys are plain scalar integers; the tree is not generic over keys.
pub type Key = i32;
