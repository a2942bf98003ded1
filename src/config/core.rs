use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::classification::ClassificationConfig;
use super::parallel::ParallelConfig;
use crate::classifier::FileClassifier;
use crate::cocomo::CocomoPreset;
use crate::core::Result;
use crate::stats::TrackedMetric;

/// Root configuration structure for dirmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirmapConfig {
    /// COCOMO preset used for the repository estimate (default: organic)
    #[serde(default = "default_cocomo_preset")]
    pub cocomo_preset: String,

    /// Keep test files out of numeric aggregates (default: true)
    #[serde(default = "default_exclude_tests")]
    pub exclude_tests: bool,

    /// Metrics that get a distribution per directory scope
    #[serde(default = "TrackedMetric::defaults")]
    pub tracked_metrics: Vec<TrackedMetric>,

    /// Add excluded files to `file_count` (never to other aggregates)
    #[serde(default)]
    pub count_excluded_in_direct: bool,

    /// File classification rules
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Parallel aggregation settings
    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl Default for DirmapConfig {
    fn default() -> Self {
        Self {
            cocomo_preset: default_cocomo_preset(),
            exclude_tests: default_exclude_tests(),
            tracked_metrics: TrackedMetric::defaults(),
            count_excluded_in_direct: false,
            classification: ClassificationConfig::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

fn default_cocomo_preset() -> String {
    "organic".to_string()
}

fn default_exclude_tests() -> bool {
    true
}

impl DirmapConfig {
    /// Tracked metrics, deduplicated and in stable order.
    pub fn tracked_metrics(&self) -> Vec<TrackedMetric> {
        self.tracked_metrics
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Check everything that can fail before aggregation starts.
    pub fn validate(&self) -> Result<()> {
        CocomoPreset::lookup(&self.cocomo_preset)?;
        FileClassifier::new(&self.classification, self.exclude_tests)?;
        Ok(())
    }
}
