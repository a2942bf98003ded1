// Export modules for library usage
pub mod aggregation;
pub mod classifier;
pub mod cli;
pub mod cocomo;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use crate::core::{
    ClassifiedFile, Error, ErrorCode, ExcludedFile, ExclusionReason, FileCategory, FileRecord,
    PathViolation, Result,
};

pub use crate::aggregation::{Aggregator, DirectoryStats, LanguageStats, Stats, TreeStats};
pub use crate::classifier::FileClassifier;
pub use crate::cocomo::{CocomoEstimate, CocomoPreset};
pub use crate::config::DirmapConfig;
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::pipeline::analyze;
pub use crate::report::{AnalysisReport, DirectoryEntry, RepositorySummary};
pub use crate::stats::{MetricDistribution, TrackedMetric};
pub use crate::tree::{DirectoryNode, DirectoryTree};
