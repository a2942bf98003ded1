use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dirmap::config::ParallelConfig;
use dirmap::{analyze, Aggregator, DirectoryTree, DirmapConfig, FileClassifier, FileRecord};
use std::hint::black_box;

fn create_records(top_level: usize, depth: usize, files_per_dir: usize) -> Vec<FileRecord> {
    let mut records = Vec::new();
    for top in 0..top_level {
        let mut dir = format!("pkg{top}");
        for level in 0..depth {
            for file in 0..files_per_dir {
                let code = ((top * 31 + level * 17 + file * 13) % 500 + 1) as u64;
                records.push(
                    FileRecord::new(format!("{dir}/file_{file}.rs"), "Rust")
                        .with_lines(code, code / 4, code / 8)
                        .with_complexity(code / 15)
                        .with_bytes(code * 32),
                );
            }
            dir.push_str(&format!("/level{}", level % 3));
        }
    }
    records
}

fn bench_full_analysis(c: &mut Criterion) {
    let records = create_records(16, 8, 10);
    let config = DirmapConfig::default();

    c.bench_function("analyze_1280_files", |b| {
        b.iter(|| analyze(black_box(records.clone()), &config).unwrap())
    });
}

fn bench_aggregation_modes(c: &mut Criterion) {
    let config = DirmapConfig::default();
    let classifier = FileClassifier::new(&config.classification, config.exclude_tests).unwrap();
    let files = classifier.classify_all(create_records(32, 10, 12));
    let tree = DirectoryTree::build(&files);

    let mut group = c.benchmark_group("aggregation");
    for method in ["sequential", "parallel"] {
        let aggregator = Aggregator::new(&config).with_parallel(ParallelConfig {
            enabled: method == "parallel",
            max_concurrency: None,
            min_directories: 0,
        });
        group.bench_with_input(BenchmarkId::from_parameter(method), &files, |b, files| {
            b.iter(|| aggregator.aggregate(black_box(&tree), files))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_analysis, bench_aggregation_modes);
criterion_main!(benches);
