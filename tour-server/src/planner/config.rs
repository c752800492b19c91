//! Search configuration for the tour planner.

/// Limits and scheduling parameters for one search.
///
/// The enumeration is exponential in catalog size, so production callers
/// should set `max_results` or `max_depth`, or cancel the search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of tours to collect (0 = unlimited).
    /// The search stops expanding once this many have been found.
    pub max_results: usize,

    /// Maximum number of activities per tour (0 = unlimited).
    pub max_depth: usize,

    /// Branches with at least this many remaining candidates fan their
    /// children out onto the worker pool. Root branches always fan out.
    pub parallel_threshold: usize,

    /// Worker threads for the search pool (0 = the global rayon pool).
    pub threads: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_results: usize,
        max_depth: usize,
        parallel_threshold: usize,
        threads: usize,
    ) -> Self {
        Self {
            max_results,
            max_depth,
            parallel_threshold,
            threads,
        }
    }

    /// Returns the result cap, if any.
    pub fn result_limit(&self) -> Option<usize> {
        (self.max_results > 0).then_some(self.max_results)
    }

    /// Returns the depth cap, if any.
    pub fn depth_limit(&self) -> Option<usize> {
        (self.max_depth > 0).then_some(self.max_depth)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 0,
            max_depth: 0,
            parallel_threshold: 6,
            threads: 0,
        }
    }
}
