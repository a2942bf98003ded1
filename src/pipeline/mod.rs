//! Analysis pipeline
//!
//! `analyze` runs the phases in order: validation, classification, tree
//! building, aggregation, cost estimation and report assembly. Configuration
//! and input problems abort the run before any statistics are produced; the
//! caller gets either a complete report or the first error found.

use std::time::Instant;
use tracing::{debug, info, info_span};

use crate::aggregation::Aggregator;
use crate::classifier::FileClassifier;
use crate::cocomo::{self, CocomoPreset};
use crate::config::DirmapConfig;
use crate::core::{path, Error, FileRecord, Result};
use crate::report::{self, AnalysisReport, ReportParts};
use crate::tree::DirectoryTree;

/// Check every record path; reports the first violation in input order.
pub fn validate_records(records: &[FileRecord]) -> Result<()> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(index, record)| {
            path::validate(&record.path)
                .map_err(|violation| Error::validation(index, record.path.as_str(), violation))
        })
}

/// Turn a flat list of file records into a directory report.
pub fn analyze(records: Vec<FileRecord>, config: &DirmapConfig) -> Result<AnalysisReport> {
    let span = info_span!(
        "analysis",
        records = records.len(),
        preset = %config.cocomo_preset
    );
    let _guard = span.enter();
    let started = Instant::now();

    let (preset, classifier) = {
        let _span = info_span!("validation").entered();
        let preset = CocomoPreset::lookup(&config.cocomo_preset)?;
        let classifier = FileClassifier::new(&config.classification, config.exclude_tests)?;
        validate_records(&records)?;
        debug!(records = records.len(), "Input records valid");
        (preset, classifier)
    };

    let files = {
        let _span = info_span!("classification").entered();
        let files = classifier.classify_all(records);
        let excluded = files.iter().filter(|file| file.is_excluded()).count();
        info!(files = files.len(), excluded, "Classified files");
        files
    };

    let tree = {
        let _span = info_span!("tree_building").entered();
        let tree = DirectoryTree::build(&files);
        info!(
            directories = tree.len(),
            max_depth = tree.max_depth(),
            "Built directory tree"
        );
        tree
    };

    let aggregator = Aggregator::new(config);
    let stats = {
        let _span = info_span!("aggregation").entered();
        let phase_start = Instant::now();
        let stats = aggregator.aggregate(&tree, &files);
        info!(
            directories = stats.len(),
            elapsed_ms = phase_start.elapsed().as_millis() as u64,
            "Aggregated directory statistics"
        );
        stats
    };

    let lines_code = stats.root().map_or(0, |root| root.recursive.lines_code);
    let (estimate, comparison) = {
        let _span = info_span!("cost_estimation").entered();
        let estimate = preset.estimate(lines_code);
        let comparison = cocomo::estimate_all(lines_code);
        debug!(
            preset = preset.name,
            effort_person_months = estimate.effort_person_months,
            "Estimated effort"
        );
        (estimate, comparison)
    };

    let report = {
        let _span = info_span!("report_assembly").entered();
        report::assemble(ReportParts {
            tree: &tree,
            stats,
            files: &files,
            tracked_metrics: aggregator.metrics().to_vec(),
            cocomo: estimate,
            cocomo_comparison: comparison,
        })
    };

    info!(
        directories = report.directories.len(),
        excluded = report.excluded.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Analysis complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorCode, PathViolation};

    fn record(path: &str, code: u64) -> FileRecord {
        FileRecord::new(path, "Python").with_lines(code, 0, 0)
    }

    #[test]
    fn test_analyze_basic_tree() {
        let report = analyze(
            vec![record("src/a.py", 100), record("src/sub/b.py", 50)],
            &DirmapConfig::default(),
        )
        .unwrap();

        assert_eq!(report.directories.len(), 3);
        assert_eq!(report.root().unwrap().recursive.lines_code, 150);
        assert_eq!(report.cocomo.preset_name, "organic");
    }

    #[test]
    fn test_first_violation_reported() {
        let err = analyze(
            vec![
                record("ok.py", 1),
                record("../escape.py", 1),
                record("/abs.py", 1),
            ],
            &DirmapConfig::default(),
        )
        .unwrap_err();

        match err {
            Error::Validation {
                index,
                path,
                violation,
            } => {
                assert_eq!(index, 1);
                assert_eq!(path, "../escape.py");
                assert_eq!(violation, PathViolation::ParentTraversal);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_backslash_rejected() {
        let err = analyze(vec![record("src\\win.py", 1)], &DirmapConfig::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_PATH);
    }

    #[test]
    fn test_unknown_preset_checked_before_paths() {
        let config = DirmapConfig {
            cocomo_preset: "bogus".into(),
            ..Default::default()
        };
        let err = analyze(vec![record("/bad.py", 1)], &config).unwrap_err();
        assert!(matches!(err, Error::UnknownPreset { .. }));
    }

    #[test]
    fn test_empty_input() {
        let report = analyze(Vec::new(), &DirmapConfig::default()).unwrap();
        assert_eq!(report.directories.len(), 1);
        assert_eq!(report.root().unwrap().recursive.file_count, 0);
        assert_eq!(report.cocomo.effort_person_months, 0.0);
    }
}
