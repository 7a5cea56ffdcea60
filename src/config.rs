//! Search configuration.

/// Default iteration budget for one `solve` call.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Configuration for the A* search.
///
/// # Examples
///
/// ```
/// use eightpuzzle::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_iterations(5_000)
///     .with_prune_duplicates(true);
/// assert_eq!(config.max_iterations, 5_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of frontier nodes expanded before giving up.
    ///
    /// Stale frontier entries (states already expanded) are not counted.
    pub max_iterations: usize,

    /// Skip queuing a state when a copy with equal or lower `g` is already
    /// queued.
    ///
    /// Off by default: duplicates then coexist in the frontier until the
    /// first one is expanded. Either way the solution length is optimal;
    /// pruning trades a hash map for a smaller frontier.
    pub prune_duplicates: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            prune_duplicates: false,
        }
    }
}

impl SearchConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_prune_duplicates(mut self, prune: bool) -> Self {
        self.prune_duplicates = prune;
        self
    }
}
