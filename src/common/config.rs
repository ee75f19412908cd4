//! Configuration for a B-tree instance.

/// Smallest legal minimum degree.
///
/// With `T = 2` every node holds 1..=3 keys and 2..=4 children
/// (a 2-3-4 tree). Anything smaller cannot split a full node into two
/// non-empty halves.
pub const MIN_DEGREE: usize = 2;

/// Minimum degree used by [`TreeConfig::default`].
pub const DEFAULT_MIN_DEGREE: usize = 2;

/// Per-tree configuration, fixed at creation time.
///
/// # Example
/// ```
/// use degreetree::TreeConfig;
///
/// let config = TreeConfig::new(3).with_max_nodes(64);
/// assert_eq!(config.max_keys(), 5);
/// assert_eq!(config.max_children(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Minimum degree `T`. Nodes hold at most `2T-1` keys.
    pub min_degree: usize,

    /// Upper bound on live nodes, or `None` for no limit.
    ///
    /// Inserts that would need more nodes fail with
    /// [`Error::NodeLimitReached`](crate::Error::NodeLimitReached).
    pub max_nodes: Option<usize>,
}

impl TreeConfig {
    /// Create a config with the given minimum degree and no node limit.
    ///
    /// # Panics
    /// Panics if `min_degree < 2`.
    pub fn new(min_degree: usize) -> Self {
        assert!(
            min_degree >= MIN_DEGREE,
            "min_degree must be >= {MIN_DEGREE}, got {min_degree}"
        );
        Self {
            min_degree,
            max_nodes: None,
        }
    }

    /// Cap the number of live nodes.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Maximum keys per node (`2T-1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Minimum keys per non-root node (`T-1`).
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }

    /// Maximum children per internal node (`2T`).
    #[inline]
    pub fn max_children(&self) -> usize {
        2 * self.min_degree
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DEGREE)
    }
}
