//! Bottom-up directory aggregation
//!
//! Directories are folded deepest first, so every child is finished before its
//! parent and no recursion is needed. For each directory the direct scope is
//! built from its own files; the recursive scope is the direct scope plus the
//! recursive scopes of its children, which are moved (not copied) into the
//! parent once the child's statistics have been emitted.
//!
//! With parallelism enabled the top-level subtrees are folded on a bounded
//! rayon pool. Each task owns the accumulators of its subtree, and the root is
//! folded last from the per-subtree results. The output does not depend on
//! the execution mode.

mod stats;

use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::config::{DirmapConfig, ParallelConfig};
use crate::core::ClassifiedFile;
use crate::stats::TrackedMetric;
use crate::tree::{DirectoryId, DirectoryTree, ROOT_ID};

pub(crate) use stats::{ratio, Accumulator};
pub use stats::{LanguageStats, Stats};

/// Direct and recursive statistics of one directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryStats {
    pub direct: Stats,
    pub recursive: Stats,
    /// Per-language totals over the whole subtree
    pub languages: BTreeMap<String, LanguageStats>,
}

/// Statistics for every directory, indexed by [`DirectoryId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStats {
    directories: Vec<DirectoryStats>,
}

impl TreeStats {
    pub fn get(&self, id: DirectoryId) -> Option<&DirectoryStats> {
        self.directories.get(id)
    }

    pub fn root(&self) -> Option<&DirectoryStats> {
        self.get(ROOT_ID)
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DirectoryId, &DirectoryStats)> {
        self.directories.iter().enumerate()
    }

    pub fn into_vec(self) -> Vec<DirectoryStats> {
        self.directories
    }
}

type Finished = Vec<(DirectoryId, DirectoryStats)>;
type Pending = HashMap<DirectoryId, Accumulator>;

/// One fold over a set of directories, deepest first.
struct Pass<'a> {
    tree: &'a DirectoryTree,
    files: &'a [ClassifiedFile],
    metrics: &'a [TrackedMetric],
    count_excluded: bool,
}

impl Pass<'_> {
    /// Fold `ids` (deepest first). Children must either be in `ids` or already
    /// sit in `pending`; each finished directory leaves its recursive
    /// accumulator in `pending` for its parent.
    fn run(&self, ids: &[DirectoryId], pending: &mut Pending, finished: &mut Finished) {
        for &id in ids {
            let node = self.tree.node(id);

            let mut scope = Accumulator::new(self.metrics.len());
            for &file_index in &node.files {
                scope.add_file(&self.files[file_index], self.metrics, self.count_excluded);
            }
            let direct = scope.stats(self.metrics);

            for child in &node.children {
                if let Some(child_scope) = pending.remove(child) {
                    scope.merge(child_scope);
                }
            }
            let recursive = scope.stats(self.metrics);
            let languages = scope.languages().clone();

            finished.push((
                id,
                DirectoryStats {
                    direct,
                    recursive,
                    languages,
                },
            ));
            pending.insert(id, scope);
        }
    }
}

/// Folds classified files into per-directory statistics.
#[derive(Debug, Clone)]
pub struct Aggregator {
    metrics: Vec<TrackedMetric>,
    count_excluded_in_direct: bool,
    parallel: ParallelConfig,
}

impl Aggregator {
    pub fn new(config: &DirmapConfig) -> Self {
        Self {
            metrics: config.tracked_metrics(),
            count_excluded_in_direct: config.count_excluded_in_direct,
            parallel: config.parallel.clone(),
        }
    }

    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn metrics(&self) -> &[TrackedMetric] {
        &self.metrics
    }

    /// Aggregate using the configured execution mode.
    pub fn aggregate(&self, tree: &DirectoryTree, files: &[ClassifiedFile]) -> TreeStats {
        if self.parallel.should_parallelize(tree.len()) {
            self.aggregate_parallel(tree, files, self.parallel.effective_concurrency())
        } else {
            self.aggregate_sequential(tree, files)
        }
    }

    pub fn aggregate_sequential(&self, tree: &DirectoryTree, files: &[ClassifiedFile]) -> TreeStats {
        tracing::debug!(directories = tree.len(), "Aggregating sequentially");
        let pass = self.pass(tree, files);
        let mut pending = Pending::new();
        let mut finished = Finished::with_capacity(tree.len());
        pass.run(&tree.deepest_first(), &mut pending, &mut finished);
        collect(tree.len(), finished)
    }

    /// Fold each top-level subtree on a pool of `threads` workers, then the root.
    pub fn aggregate_parallel(
        &self,
        tree: &DirectoryTree,
        files: &[ClassifiedFile],
        threads: usize,
    ) -> TreeStats {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("Failed to build aggregation thread pool: {}. Running sequentially.", e);
                return self.aggregate_sequential(tree, files);
            }
        };

        let partitions = tree.top_level_partitions();
        tracing::debug!(
            directories = tree.len(),
            subtrees = partitions.len(),
            threads,
            "Aggregating in parallel"
        );

        let pass = self.pass(tree, files);
        let results: Vec<(Pending, Finished)> = pool.install(|| {
            partitions
                .par_iter()
                .map(|ids| {
                    let mut pending = Pending::new();
                    let mut finished = Finished::with_capacity(ids.len());
                    pass.run(ids, &mut pending, &mut finished);
                    (pending, finished)
                })
                .collect()
        });

        let mut pending = Pending::new();
        let mut finished = Finished::with_capacity(tree.len());
        for (subtree_pending, subtree_finished) in results {
            pending.extend(subtree_pending);
            finished.extend(subtree_finished);
        }
        if !tree.is_empty() {
            pass.run(&[ROOT_ID], &mut pending, &mut finished);
        }
        collect(tree.len(), finished)
    }

    fn pass<'a>(&'a self, tree: &'a DirectoryTree, files: &'a [ClassifiedFile]) -> Pass<'a> {
        Pass {
            tree,
            files,
            metrics: &self.metrics,
            count_excluded: self.count_excluded_in_direct,
        }
    }
}

fn collect(len: usize, finished: Finished) -> TreeStats {
    let mut slots: Vec<Option<DirectoryStats>> = (0..len).map(|_| None).collect();
    for (id, stats) in finished {
        slots[id] = Some(stats);
    }
    TreeStats {
        directories: slots.into_iter().map(Option::unwrap_or_default).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Classification, ExclusionReason, FileRecord};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn source(path: &str, language: &str, code: u64) -> ClassifiedFile {
        ClassifiedFile {
            record: FileRecord::new(path, language)
                .with_lines(code, 0, 0)
                .with_complexity(code / 10),
            language: language.into(),
            classification: Classification::source(),
        }
    }

    fn aggregate(files: &[ClassifiedFile], config: &DirmapConfig) -> (DirectoryTree, TreeStats) {
        let tree = DirectoryTree::build(files);
        let stats = Aggregator::new(config).aggregate_sequential(&tree, files);
        (tree, stats)
    }

    fn stats_for<'a>(tree: &DirectoryTree, stats: &'a TreeStats, dir: &str) -> &'a DirectoryStats {
        stats.get(tree.get(dir).unwrap().id).unwrap()
    }

    #[test]
    fn test_direct_and_recursive_scopes() {
        let files = vec![
            source("src/a.py", "Python", 100),
            source("src/b.py", "Python", 100),
            source("src/sub/c.py", "Python", 100),
        ];
        let (tree, stats) = aggregate(&files, &DirmapConfig::default());

        let src = stats_for(&tree, &stats, "src");
        assert_eq!(src.direct.file_count, 2);
        assert_eq!(src.direct.lines_code, 200);
        assert_eq!(src.recursive.file_count, 3);
        assert_eq!(src.recursive.lines_code, 300);

        let sub = stats_for(&tree, &stats, "src/sub");
        assert_eq!(sub.recursive.file_count, 1);
        assert_eq!(sub.recursive.lines_code, 100);

        let root = stats.root().unwrap();
        assert_eq!(root.direct.file_count, 0);
        assert_eq!(root.recursive.file_count, 3);
    }

    #[test]
    fn test_intermediate_directory_has_zero_direct() {
        let files = vec![source("a/b/c/deep.rs", "Rust", 40)];
        let (tree, stats) = aggregate(&files, &DirmapConfig::default());

        let b = stats_for(&tree, &stats, "a/b");
        assert_eq!(b.direct, Stats {
            distributions: b.direct.distributions.clone(),
            ..Stats::default()
        });
        assert_eq!(b.recursive.lines_code, 40);
        assert_eq!(b.languages["Rust"].file_count, 1);
    }

    #[test]
    fn test_recursive_distribution_uses_file_values() {
        let files = vec![
            source("lib/a.rs", "Rust", 0),
            source("lib/b.rs", "Rust", 0),
            source("lib/x/c.rs", "Rust", 0),
            source("lib/x/d.rs", "Rust", 0),
            source("lib/y/e.rs", "Rust", 100),
        ];
        let (tree, stats) = aggregate(&files, &DirmapConfig::default());
        let lib = stats_for(&tree, &stats, "lib");

        let dist = &lib.recursive.distributions[&TrackedMetric::LinesCode];
        assert_eq!(dist.count, 5);
        assert_eq!(dist.gini, 0.8);
        assert_eq!(dist.top_20_pct_share, 1.0);
        assert_eq!(lib.direct.distributions[&TrackedMetric::LinesCode].count, 2);
    }

    #[test]
    fn test_excluded_files_tracked_per_directory() {
        let mut vendored = source("web/vendor/jq.js", "JavaScript", 9000);
        vendored.classification.exclusion = Some(ExclusionReason::Vendor);
        let files = vec![source("web/app.js", "JavaScript", 10), vendored];
        let (tree, stats) = aggregate(&files, &DirmapConfig::default());

        let web = stats_for(&tree, &stats, "web");
        assert_eq!(web.direct.excluded_file_count, 0);
        assert_eq!(web.recursive.excluded_file_count, 1);
        assert_eq!(web.recursive.excluded_by_reason[&ExclusionReason::Vendor], 1);
        assert_eq!(web.recursive.lines_code, 10);

        let vendor = stats_for(&tree, &stats, "web/vendor");
        assert_eq!(vendor.direct.file_count, 0);
        assert_eq!(vendor.direct.excluded_file_count, 1);
    }

    #[test]
    fn test_count_excluded_in_direct() {
        let mut generated = source("api/gen.rs", "Rust", 5000);
        generated.classification.exclusion = Some(ExclusionReason::Generated);
        let files = vec![source("api/handler.rs", "Rust", 50), generated];
        let config = DirmapConfig {
            count_excluded_in_direct: true,
            ..Default::default()
        };
        let (tree, stats) = aggregate(&files, &config);

        let api = stats_for(&tree, &stats, "api");
        assert_eq!(api.direct.file_count, 2);
        assert_eq!(api.direct.lines_code, 50);
        assert_eq!(api.recursive.file_count, 2);
    }

    #[test]
    fn test_languages_per_subtree() {
        let files = vec![
            source("svc/main.go", "Go", 10),
            source("svc/web/app.ts", "TypeScript", 20),
            source("svc/web/util.ts", "TypeScript", 30),
        ];
        let (tree, stats) = aggregate(&files, &DirmapConfig::default());

        let svc = stats_for(&tree, &stats, "svc");
        assert_eq!(svc.direct.language_count, 1);
        assert_eq!(svc.recursive.language_count, 2);
        assert_eq!(svc.languages["TypeScript"].lines_code, 50);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut files = Vec::new();
        for top in ["alpha", "beta", "gamma", "delta"] {
            for mid in 0..5 {
                for leaf in 0..3 {
                    let code = (top.len() * 37 + mid * 11 + leaf * 5) as u64;
                    files.push(source(&format!("{top}/m{mid}/f{leaf}.rs"), "Rust", code));
                }
            }
        }
        files.push(source("top.rs", "Rust", 7));

        let tree = DirectoryTree::build(&files);
        let aggregator = Aggregator::new(&DirmapConfig::default());
        let sequential = aggregator.aggregate_sequential(&tree, &files);
        let parallel = aggregator.aggregate_parallel(&tree, &files, 4);
        assert_eq!(sequential, parallel);
        assert_eq!(parallel.root().unwrap().recursive.file_count, 61);
    }

    #[test]
    fn test_configured_mode_dispatch() {
        let files = vec![source("a/x.rs", "Rust", 1), source("b/y.rs", "Rust", 2)];
        let tree = DirectoryTree::build(&files);
        let eager = ParallelConfig {
            enabled: true,
            max_concurrency: Some(2),
            min_directories: 0,
        };
        let aggregator = Aggregator::new(&DirmapConfig::default());
        let expected = aggregator.aggregate_sequential(&tree, &files);
        let actual = aggregator.with_parallel(eager).aggregate(&tree, &files);
        assert_eq!(actual, expected);
    }

    fn arb_files() -> impl Strategy<Value = Vec<ClassifiedFile>> {
        let segment = prop::sample::select(vec!["a", "b", "c"]);
        let file = (
            prop::collection::vec(segment, 0..4),
            prop::sample::select(vec!["x.rs", "y.py"]),
            0u64..1000,
            any::<bool>(),
        );
        prop::collection::vec(file, 0..40).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(dirs, name, code, excluded)| {
                    let path = dirs
                        .into_iter()
                        .chain(std::iter::once(name))
                        .collect::<Vec<_>>()
                        .join("/");
                    let mut file = source(&path, "Rust", code);
                    if excluded {
                        file.classification.exclusion = Some(ExclusionReason::Pattern);
                    }
                    file
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_recursive_dominates_direct(files in arb_files()) {
            let tree = DirectoryTree::build(&files);
            let stats = Aggregator::new(&DirmapConfig::default()).aggregate_sequential(&tree, &files);

            for (_, dir) in stats.iter() {
                prop_assert!(dir.recursive.file_count >= dir.direct.file_count);
                prop_assert!(dir.recursive.lines_code >= dir.direct.lines_code);
                prop_assert!(dir.recursive.lines_total >= dir.direct.lines_total);
                prop_assert!(dir.recursive.complexity_total >= dir.direct.complexity_total);
                prop_assert!(dir.recursive.bytes >= dir.direct.bytes);
                prop_assert!(dir.recursive.excluded_file_count >= dir.direct.excluded_file_count);
            }

            let included = files.iter().filter(|f| !f.is_excluded()).count() as u64;
            prop_assert_eq!(stats.root().unwrap().recursive.file_count, included);
        }

        #[test]
        fn prop_parallel_equals_sequential(files in arb_files()) {
            let tree = DirectoryTree::build(&files);
            let aggregator = Aggregator::new(&DirmapConfig::default());
            prop_assert_eq!(
                aggregator.aggregate_sequential(&tree, &files),
                aggregator.aggregate_parallel(&tree, &files, 3)
            );
        }
    }
}
