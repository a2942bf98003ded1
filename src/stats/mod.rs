//! Distribution and inequality statistics
//!
//! Provides the per-metric sample statistics used for every directory scope.

pub mod distribution;
pub mod metric;

pub use distribution::{MetricDistribution, PALMA_UNDEFINED};
pub use metric::TrackedMetric;
