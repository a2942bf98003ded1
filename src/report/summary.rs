use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregation::{ratio, LanguageStats, Stats};
use crate::core::{ClassifiedFile, ExclusionReason, FileCategory};
use crate::stats::{MetricDistribution, TrackedMetric};
use crate::tree::DirectoryTree;

/// Languages need at least this many files before distributions are reported.
const MIN_FILES_FOR_LANGUAGE_DISTRIBUTION: u64 = 3;

/// Repository-wide view derived from the tree and the root's recursive stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositorySummary {
    pub totals: Stats,
    pub structure: StructureSummary,
    pub languages: LanguageSummary,
    pub by_language: BTreeMap<String, LanguageDetail>,
    pub classification: ClassificationBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureSummary {
    pub directory_count: usize,
    pub max_depth: usize,
    pub avg_depth: f64,
    pub leaf_directory_count: usize,
    pub avg_files_per_directory: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageSummary {
    pub language_count: usize,
    pub by_files: BTreeMap<String, u64>,
    pub by_loc: BTreeMap<String, u64>,
    pub dominant_language: Option<String>,
    /// Share of code lines held by the dominant language
    pub dominant_language_pct: f64,
    /// 1 - dominant share; 0 for single-language repositories
    pub polyglot_score: f64,
    pub single_file_languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageDetail {
    #[serde(flatten)]
    pub stats: LanguageStats,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub distributions: BTreeMap<TrackedMetric, MetricDistribution>,
}

/// Classification counts over every input file, excluded ones included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationBreakdown {
    pub total_files: u64,
    pub included_files: u64,
    pub excluded_files: u64,
    pub test_files: u64,
    pub vendor_files: u64,
    pub generated_files: u64,
    pub minified_files: u64,
    pub by_reason: BTreeMap<ExclusionReason, u64>,
    pub by_category: BTreeMap<FileCategory, u64>,
}

impl ClassificationBreakdown {
    pub fn from_files(files: &[ClassifiedFile]) -> Self {
        files.iter().fold(Self::default(), |mut acc, file| {
            let flags = &file.classification;
            acc.total_files += 1;
            acc.test_files += u64::from(flags.is_test);
            acc.vendor_files += u64::from(flags.is_vendor);
            acc.generated_files += u64::from(flags.is_generated);
            acc.minified_files += u64::from(flags.is_minified);
            *acc.by_category.entry(flags.category).or_insert(0) += 1;
            match flags.exclusion {
                Some(reason) => {
                    acc.excluded_files += 1;
                    *acc.by_reason.entry(reason).or_insert(0) += 1;
                }
                None => acc.included_files += 1,
            }
            acc
        })
    }
}

pub(crate) fn structure(tree: &DirectoryTree, included_files: u64) -> StructureSummary {
    let directory_count = tree.len();
    let depth_sum: usize = tree.nodes().iter().map(|node| node.depth).sum();
    StructureSummary {
        directory_count,
        max_depth: tree.max_depth(),
        avg_depth: ratio(depth_sum as u64, directory_count as u64),
        leaf_directory_count: tree.nodes().iter().filter(|node| node.is_leaf()).count(),
        avg_files_per_directory: ratio(included_files, directory_count as u64),
    }
}

pub(crate) fn language_summary(languages: &BTreeMap<String, LanguageStats>) -> LanguageSummary {
    let total_loc = languages
        .values()
        .fold(0u64, |total, stats| total.saturating_add(stats.lines_code));

    // Strictly greater keeps the alphabetically first language on ties.
    let dominant = languages
        .iter()
        .fold(None::<(&String, u64)>, |best, (name, stats)| match best {
            Some((_, loc)) if loc >= stats.lines_code => best,
            _ => Some((name, stats.lines_code)),
        })
        .filter(|_| total_loc > 0);

    let dominant_language_pct = dominant.map_or(0.0, |(_, loc)| ratio(loc, total_loc));

    LanguageSummary {
        language_count: languages.len(),
        by_files: languages
            .iter()
            .map(|(name, stats)| (name.clone(), stats.file_count))
            .collect(),
        by_loc: languages
            .iter()
            .map(|(name, stats)| (name.clone(), stats.lines_code))
            .collect(),
        dominant_language: dominant.map(|(name, _)| name.clone()),
        dominant_language_pct,
        polyglot_score: if dominant.is_some() {
            ((1.0 - dominant_language_pct) * 10_000.0).round() / 10_000.0
        } else {
            0.0
        },
        single_file_languages: languages
            .iter()
            .filter(|(_, stats)| stats.file_count == 1)
            .map(|(name, _)| name.clone())
            .collect(),
    }
}

pub(crate) fn language_details(
    languages: &BTreeMap<String, LanguageStats>,
    files: &[ClassifiedFile],
) -> BTreeMap<String, LanguageDetail> {
    const METRICS: [TrackedMetric; 2] = [TrackedMetric::LinesCode, TrackedMetric::Complexity];

    let mut samples: BTreeMap<&str, [Vec<f64>; 2]> = BTreeMap::new();
    for file in files.iter().filter(|file| !file.is_excluded()) {
        let entry = samples.entry(file.language.as_str()).or_default();
        for (sample, metric) in entry.iter_mut().zip(METRICS) {
            sample.push(metric.value(&file.record));
        }
    }

    languages
        .iter()
        .map(|(name, stats)| {
            let distributions = match samples.get(name.as_str()) {
                Some(values) if stats.file_count >= MIN_FILES_FOR_LANGUAGE_DISTRIBUTION => METRICS
                    .iter()
                    .zip(values)
                    .map(|(metric, sample)| (*metric, MetricDistribution::from_values(sample)))
                    .collect(),
                _ => BTreeMap::new(),
            };
            (
                name.clone(),
                LanguageDetail {
                    stats: stats.clone(),
                    distributions,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(files: u64, code: u64) -> LanguageStats {
        LanguageStats {
            file_count: files,
            lines_code: code,
            ..Default::default()
        }
    }

    #[test]
    fn test_language_summary_dominant() {
        let mut languages = BTreeMap::new();
        languages.insert("Python".to_string(), lang(4, 750));
        languages.insert("Shell".to_string(), lang(1, 250));

        let summary = language_summary(&languages);
        assert_eq!(summary.dominant_language.as_deref(), Some("Python"));
        assert_eq!(summary.dominant_language_pct, 0.75);
        assert_eq!(summary.polyglot_score, 0.25);
        assert_eq!(summary.single_file_languages, vec!["Shell".to_string()]);
        assert_eq!(summary.by_loc["Shell"], 250);
    }

    #[test]
    fn test_language_summary_tie_prefers_first_name() {
        let mut languages = BTreeMap::new();
        languages.insert("Go".to_string(), lang(2, 100));
        languages.insert("C".to_string(), lang(2, 100));
        assert_eq!(
            language_summary(&languages).dominant_language.as_deref(),
            Some("C")
        );
    }

    #[test]
    fn test_language_summary_saturates_total() {
        let mut languages = BTreeMap::new();
        languages.insert("C".to_string(), lang(1, u64::MAX));
        languages.insert("Go".to_string(), lang(1, u64::MAX));

        let summary = language_summary(&languages);
        assert_eq!(summary.dominant_language.as_deref(), Some("C"));
        assert_eq!(summary.dominant_language_pct, 1.0);
    }

    #[test]
    fn test_language_summary_without_code() {
        let summary = language_summary(&BTreeMap::new());
        assert_eq!(summary.dominant_language, None);
        assert_eq!(summary.polyglot_score, 0.0);
        assert_eq!(summary.language_count, 0);
    }
}
