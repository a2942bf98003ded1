use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{ClassifiedFile, ExclusionReason, FileCategory, FileRecord};
use crate::stats::{MetricDistribution, TrackedMetric};

/// Additive totals for one language within a scope.
///
/// Totals saturate at `u64::MAX` instead of overflowing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub file_count: u64,
    pub lines_total: u64,
    pub lines_code: u64,
    pub lines_comment: u64,
    pub complexity: u64,
    pub bytes: u64,
}

impl LanguageStats {
    pub fn add(&mut self, record: &FileRecord) {
        self.file_count += 1;
        self.lines_total = self.lines_total.saturating_add(record.lines_total);
        self.lines_code = self.lines_code.saturating_add(record.lines_code);
        self.lines_comment = self.lines_comment.saturating_add(record.lines_comment);
        self.complexity = self.complexity.saturating_add(record.complexity);
        self.bytes = self.bytes.saturating_add(record.bytes);
    }

    pub fn merge(&mut self, other: &LanguageStats) {
        self.file_count = self.file_count.saturating_add(other.file_count);
        self.lines_total = self.lines_total.saturating_add(other.lines_total);
        self.lines_code = self.lines_code.saturating_add(other.lines_code);
        self.lines_comment = self.lines_comment.saturating_add(other.lines_comment);
        self.complexity = self.complexity.saturating_add(other.complexity);
        self.bytes = self.bytes.saturating_add(other.bytes);
    }
}

/// Statistics for one directory scope (direct or recursive).
///
/// Excluded files only ever show up in `excluded_file_count`,
/// `excluded_by_reason` and, when requested, `file_count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub file_count: u64,
    pub lines_total: u64,
    pub lines_code: u64,
    pub lines_comment: u64,
    pub lines_blank: u64,
    pub complexity_total: u64,
    pub bytes: u64,
    /// Code lines in included test files
    pub test_loc: u64,
    pub excluded_file_count: u64,
    pub excluded_by_reason: BTreeMap<ExclusionReason, u64>,
    pub category_counts: BTreeMap<FileCategory, u64>,
    pub language_count: usize,
    pub avg_file_loc: f64,
    pub avg_complexity: f64,
    pub comment_ratio: f64,
    pub blank_ratio: f64,
    pub complexity_density: f64,
    pub distributions: BTreeMap<TrackedMetric, MetricDistribution>,
}

/// Running totals and raw samples for a scope while the tree is folded.
#[derive(Debug, Clone, Default)]
pub(crate) struct Accumulator {
    file_count: u64,
    measured_files: u64,
    lines_total: u64,
    lines_code: u64,
    lines_comment: u64,
    lines_blank: u64,
    complexity: u64,
    bytes: u64,
    test_loc: u64,
    excluded_files: u64,
    excluded_by_reason: BTreeMap<ExclusionReason, u64>,
    categories: BTreeMap<FileCategory, u64>,
    languages: BTreeMap<String, LanguageStats>,
    /// One sample per tracked metric, in tracked-metric order
    samples: Vec<Vec<f64>>,
}

impl Accumulator {
    pub(crate) fn new(metric_count: usize) -> Self {
        Self {
            samples: vec![Vec::new(); metric_count],
            ..Default::default()
        }
    }

    pub(crate) fn add_file(
        &mut self,
        file: &ClassifiedFile,
        metrics: &[TrackedMetric],
        count_excluded: bool,
    ) {
        if let Some(reason) = file.classification.exclusion {
            self.excluded_files += 1;
            *self.excluded_by_reason.entry(reason).or_insert(0) += 1;
            if count_excluded {
                self.file_count += 1;
            }
            return;
        }

        let record = &file.record;
        self.file_count += 1;
        self.measured_files += 1;
        self.lines_total = self.lines_total.saturating_add(record.lines_total);
        self.lines_code = self.lines_code.saturating_add(record.lines_code);
        self.lines_comment = self.lines_comment.saturating_add(record.lines_comment);
        self.lines_blank = self.lines_blank.saturating_add(record.lines_blank);
        self.complexity = self.complexity.saturating_add(record.complexity);
        self.bytes = self.bytes.saturating_add(record.bytes);
        if file.classification.is_test {
            self.test_loc = self.test_loc.saturating_add(record.lines_code);
        }
        *self
            .categories
            .entry(file.classification.category)
            .or_insert(0) += 1;
        self.languages
            .entry(file.language.clone())
            .or_default()
            .add(record);

        for (sample, metric) in self.samples.iter_mut().zip(metrics) {
            sample.push(metric.value(record));
        }
    }

    /// Fold a child scope into this one.
    pub(crate) fn merge(&mut self, other: Accumulator) {
        self.file_count = self.file_count.saturating_add(other.file_count);
        self.measured_files = self.measured_files.saturating_add(other.measured_files);
        self.lines_total = self.lines_total.saturating_add(other.lines_total);
        self.lines_code = self.lines_code.saturating_add(other.lines_code);
        self.lines_comment = self.lines_comment.saturating_add(other.lines_comment);
        self.lines_blank = self.lines_blank.saturating_add(other.lines_blank);
        self.complexity = self.complexity.saturating_add(other.complexity);
        self.bytes = self.bytes.saturating_add(other.bytes);
        self.test_loc = self.test_loc.saturating_add(other.test_loc);
        self.excluded_files = self.excluded_files.saturating_add(other.excluded_files);

        for (reason, count) in other.excluded_by_reason {
            *self.excluded_by_reason.entry(reason).or_insert(0) += count;
        }
        for (category, count) in other.categories {
            *self.categories.entry(category).or_insert(0) += count;
        }
        for (language, stats) in other.languages {
            self.languages.entry(language).or_default().merge(&stats);
        }

        // Append the smaller sample onto the larger one.
        for (mine, mut theirs) in self.samples.iter_mut().zip(other.samples) {
            if mine.len() < theirs.len() {
                std::mem::swap(mine, &mut theirs);
            }
            mine.extend(theirs);
        }
    }

    pub(crate) fn languages(&self) -> &BTreeMap<String, LanguageStats> {
        &self.languages
    }

    pub(crate) fn stats(&self, metrics: &[TrackedMetric]) -> Stats {
        let distributions = metrics
            .iter()
            .zip(&self.samples)
            .map(|(metric, sample)| (*metric, MetricDistribution::from_values(sample)))
            .collect();

        Stats {
            file_count: self.file_count,
            lines_total: self.lines_total,
            lines_code: self.lines_code,
            lines_comment: self.lines_comment,
            lines_blank: self.lines_blank,
            complexity_total: self.complexity,
            bytes: self.bytes,
            test_loc: self.test_loc,
            excluded_file_count: self.excluded_files,
            excluded_by_reason: self.excluded_by_reason.clone(),
            category_counts: self.categories.clone(),
            language_count: self.languages.len(),
            avg_file_loc: ratio(self.lines_code, self.measured_files),
            avg_complexity: ratio(self.complexity, self.measured_files),
            comment_ratio: ratio(self.lines_comment, self.lines_total),
            blank_ratio: ratio(self.lines_blank, self.lines_total),
            complexity_density: ratio(self.complexity, self.lines_code),
            distributions,
        }
    }
}

pub(crate) fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        (numerator as f64 / denominator as f64 * 10_000.0).round() / 10_000.0
    }
}
