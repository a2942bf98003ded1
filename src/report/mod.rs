//! Report assembly
//!
//! Flattens the aggregated tree into directory entries ordered by id (root
//! first, then path order), and attaches the excluded-file ledger, the
//! repository summary and the COCOMO estimates.

mod summary;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregation::{DirectoryStats, LanguageStats, Stats, TreeStats};
use crate::cocomo::CocomoEstimate;
use crate::core::{ClassifiedFile, ExcludedFile};
use crate::stats::TrackedMetric;
use crate::tree::{DirectoryId, DirectoryTree};

pub use summary::{
    ClassificationBreakdown, LanguageDetail, LanguageSummary, RepositorySummary, StructureSummary,
};

/// One directory in the output record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryEntry {
    pub directory_id: DirectoryId,
    pub parent_id: Option<DirectoryId>,
    pub path: String,
    pub name: String,
    pub depth: usize,
    pub is_leaf: bool,
    pub child_count: usize,
    /// Paths of direct subdirectories, in path order
    pub subdirectories: Vec<String>,
    pub direct: Stats,
    pub recursive: Stats,
    pub languages: BTreeMap<String, LanguageStats>,
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub tracked_metrics: Vec<TrackedMetric>,
    pub directories: Vec<DirectoryEntry>,
    /// Excluded files with their reason, sorted by path
    pub excluded: Vec<ExcludedFile>,
    pub summary: RepositorySummary,
    pub cocomo: CocomoEstimate,
    pub cocomo_comparison: BTreeMap<String, CocomoEstimate>,
}

impl AnalysisReport {
    pub fn directory(&self, path: &str) -> Option<&DirectoryEntry> {
        self.directories.iter().find(|entry| entry.path == path)
    }

    pub fn root(&self) -> Option<&DirectoryEntry> {
        self.directories.first()
    }
}

/// Inputs the assembler shapes into an [`AnalysisReport`].
pub struct ReportParts<'a> {
    pub tree: &'a DirectoryTree,
    pub stats: TreeStats,
    pub files: &'a [ClassifiedFile],
    pub tracked_metrics: Vec<TrackedMetric>,
    pub cocomo: CocomoEstimate,
    pub cocomo_comparison: BTreeMap<String, CocomoEstimate>,
}

pub fn assemble(parts: ReportParts<'_>) -> AnalysisReport {
    let ReportParts {
        tree,
        stats,
        files,
        tracked_metrics,
        cocomo,
        cocomo_comparison,
    } = parts;

    let directories: Vec<DirectoryEntry> = tree
        .nodes()
        .iter()
        .zip(stats.into_vec())
        .map(|(node, dir_stats)| {
            let DirectoryStats {
                direct,
                recursive,
                languages,
            } = dir_stats;
            DirectoryEntry {
                directory_id: node.id,
                parent_id: node.parent,
                path: node.path.clone(),
                name: node.name.clone(),
                depth: node.depth,
                is_leaf: node.is_leaf(),
                child_count: node.children.len(),
                subdirectories: node
                    .children
                    .iter()
                    .map(|&child| tree.node(child).path.clone())
                    .collect(),
                direct,
                recursive,
                languages,
            }
        })
        .collect();

    let mut excluded: Vec<ExcludedFile> = files
        .iter()
        .filter_map(|file| {
            file.classification.exclusion.map(|reason| ExcludedFile {
                path: file.path().to_string(),
                reason,
            })
        })
        .collect();
    excluded.sort_by(|a, b| a.path.cmp(&b.path).then(a.reason.cmp(&b.reason)));

    let summary = match directories.first() {
        Some(root) => RepositorySummary {
            totals: root.recursive.clone(),
            structure: summary::structure(tree, root.recursive.file_count),
            languages: summary::language_summary(&root.languages),
            by_language: summary::language_details(&root.languages, files),
            classification: ClassificationBreakdown::from_files(files),
        },
        None => RepositorySummary {
            totals: Stats::default(),
            structure: summary::structure(tree, 0),
            languages: summary::language_summary(&BTreeMap::new()),
            by_language: BTreeMap::new(),
            classification: ClassificationBreakdown::from_files(files),
        },
    };

    AnalysisReport {
        tracked_metrics,
        directories,
        excluded,
        summary,
        cocomo,
        cocomo_comparison,
    }
}
