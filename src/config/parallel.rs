//! Parallelism configuration for the aggregation pass.
//!
//! Aggregation fans out one task per top-level subtree. Each task owns its
//! subtree's accumulators, so no locking is involved; running sequentially
//! yields the same report.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Default tree size below which aggregation stays sequential
fn default_min_directories() -> usize {
    64
}

/// Configuration for parallel aggregation.
///
/// # Example
///
/// ```rust
/// use dirmap::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     max_concurrency: Some(4),
///     min_directories: 0,
/// };
/// assert_eq!(config.effective_concurrency(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    ///
    /// When disabled, subtrees are aggregated one after another.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum worker threads (default: available cores)
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Minimum number of directories before fanning out (default: 64)
    #[serde(default = "default_min_directories")]
    pub min_directories: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
            min_directories: default_min_directories(),
        }
    }
}

impl ParallelConfig {
    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Get the effective concurrency level.
    ///
    /// Returns the configured max_concurrency, or the number of
    /// available CPU cores if not specified.
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(num_cpus).max(1)
    }

    /// Whether a tree of `directory_count` directories should be fanned out.
    pub fn should_parallelize(&self, directory_count: usize) -> bool {
        self.enabled && directory_count >= self.min_directories && self.effective_concurrency() > 1
    }
}

/// Returns the number of available CPU cores.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}
