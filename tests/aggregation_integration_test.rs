mod common;

use common::{code_file, synthetic_repo};
use dirmap::config::ParallelConfig;
use dirmap::{analyze, DirmapConfig, ExclusionReason, FileRecord, TrackedMetric};
use pretty_assertions::assert_eq;

#[test]
fn test_direct_and_recursive_counts() {
    let report = analyze(
        vec![
            code_file("src/a.py", "Python", 100),
            code_file("src/b.py", "Python", 100),
            code_file("src/sub/c.py", "Python", 100),
        ],
        &DirmapConfig::default(),
    )
    .unwrap();

    let src = report.directory("src").unwrap();
    assert_eq!(src.direct.file_count, 2);
    assert_eq!(src.direct.lines_code, 200);
    assert_eq!(src.recursive.file_count, 3);
    assert_eq!(src.recursive.lines_code, 300);

    let sub = report.directory("src/sub").unwrap();
    assert_eq!(sub.recursive.file_count, 1);
    assert_eq!(sub.recursive.lines_code, 100);

    let root = report.root().unwrap();
    assert_eq!(root.path, ".");
    assert_eq!(root.direct.file_count, 0);
    assert_eq!(root.recursive.lines_code, 300);
}

#[test]
fn test_recursive_stats_sum_children() {
    let report = analyze(synthetic_repo(4, 5), &DirmapConfig::default()).unwrap();

    for entry in &report.directories {
        let children_loc: u64 = entry
            .subdirectories
            .iter()
            .map(|path| report.directory(path).unwrap().recursive.lines_code)
            .sum();
        assert_eq!(
            entry.recursive.lines_code,
            entry.direct.lines_code + children_loc,
            "{}",
            entry.path
        );
        let count = &entry.recursive.distributions[&TrackedMetric::LinesCode].count;
        assert_eq!(*count as u64, entry.recursive.file_count, "{}", entry.path);
    }
}

#[test]
fn test_inequality_of_equal_and_skewed_directories() {
    let mut records: Vec<FileRecord> = (0..5)
        .map(|i| code_file(&format!("flat/f{i}.rs"), "Rust", 10))
        .collect();
    records.extend((0..4).map(|i| code_file(&format!("skewed/f{i}.rs"), "Rust", 0)));
    records.push(code_file("skewed/big.rs", "Rust", 100));

    let report = analyze(records, &DirmapConfig::default()).unwrap();

    let flat = &report.directory("flat").unwrap().direct.distributions[&TrackedMetric::LinesCode];
    assert_eq!(flat.gini, 0.0);

    let skewed =
        &report.directory("skewed").unwrap().direct.distributions[&TrackedMetric::LinesCode];
    assert!((skewed.gini - 0.8).abs() < 1e-9);
    assert!((skewed.top_20_pct_share - 1.0).abs() < 1e-9);
}

#[test]
fn test_excluded_files_never_reach_aggregates() {
    let report = analyze(
        vec![
            code_file("app/main.go", "Go", 50),
            code_file("app/vendor/lib.go", "Go", 5_000),
            code_file("app/main_test.go", "Go", 80),
            code_file("web/app.min.js", "JavaScript", 1),
        ],
        &DirmapConfig::default(),
    )
    .unwrap();

    assert_eq!(report.root().unwrap().recursive.lines_code, 50);
    assert_eq!(report.root().unwrap().recursive.file_count, 1);

    let reasons: Vec<(&str, ExclusionReason)> = report
        .excluded
        .iter()
        .map(|file| (file.path.as_str(), file.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            ("app/main_test.go", ExclusionReason::Test),
            ("app/vendor/lib.go", ExclusionReason::Vendor),
            ("web/app.min.js", ExclusionReason::Generated),
        ]
    );
    assert_eq!(
        report.root().unwrap().recursive.excluded_file_count,
        3
    );
}

#[test]
fn test_include_tests_keeps_test_code() {
    let config = DirmapConfig {
        exclude_tests: false,
        ..Default::default()
    };
    let report = analyze(
        vec![
            code_file("app/main.go", "Go", 50),
            code_file("app/main_test.go", "Go", 80),
        ],
        &config,
    )
    .unwrap();

    let app = report.directory("app").unwrap();
    assert_eq!(app.recursive.lines_code, 130);
    assert_eq!(app.recursive.test_loc, 80);
    assert!(report.excluded.is_empty());
}

#[test]
fn test_parallel_matches_sequential() {
    let records = synthetic_repo(6, 7);
    let sequential = DirmapConfig {
        parallel: ParallelConfig {
            enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let parallel = DirmapConfig {
        parallel: ParallelConfig {
            enabled: true,
            max_concurrency: Some(4),
            min_directories: 0,
        },
        ..Default::default()
    };

    let a = analyze(records.clone(), &sequential).unwrap();
    let b = analyze(records, &parallel).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_input_order_does_not_change_report() {
    let records = synthetic_repo(3, 4);
    let mut reversed = records.clone();
    reversed.reverse();

    let config = DirmapConfig::default();
    let a = serde_json::to_string(&analyze(records, &config).unwrap()).unwrap();
    let b = serde_json::to_string(&analyze(reversed, &config).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_repeated_runs_serialize_identically() {
    let config = DirmapConfig::default();
    let first = serde_json::to_string_pretty(&analyze(synthetic_repo(2, 3), &config).unwrap())
        .unwrap();
    let second = serde_json::to_string_pretty(&analyze(synthetic_repo(2, 3), &config).unwrap())
        .unwrap();
    assert_eq!(first, second);
}
