//! File classification
//!
//! Tags every record as test, vendor, generated or minified and assigns the
//! exclusion reason that keeps it out of numeric aggregates. Classification
//! never fails: an unmatched file is plain source. Rules come from
//! [`ClassificationConfig`] and are compiled once when the classifier is built.

mod category;

use glob::{MatchOptions, Pattern};
use std::collections::HashSet;

use crate::config::ClassificationConfig;
use crate::core::path;
use crate::core::{
    language_bucket, Classification, ClassifiedFile, Error, ExclusionReason, FileCategory,
    FileRecord, Result, UNKNOWN_LANGUAGE,
};

pub use category::CategoryRules;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

pub(crate) fn compile_patterns(patterns: &[&str]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| Pattern::new(pattern).map_err(Error::from))
        .collect()
}

pub(crate) fn matches_any(patterns: &[Pattern], text: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| pattern.matches_with(text, MATCH_OPTIONS))
}

fn lowercase_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|item| item.to_ascii_lowercase()).collect()
}

fn compile_field(patterns: &[String], field: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| {
                tracing::debug!(field, pattern = %pattern, "Rejected classification glob");
                Error::from(e)
            })
        })
        .collect()
}

/// Compiled classification rules.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    vendor_dirs: HashSet<String>,
    generated_dirs: HashSet<String>,
    test_dirs: HashSet<String>,
    generated_files: Vec<Pattern>,
    test_files: Vec<Pattern>,
    exclude_patterns: Vec<Pattern>,
    minification_languages: HashSet<String>,
    min_avg_line_length: f64,
    min_code_density: f64,
    exclude_tests: bool,
    categories: CategoryRules,
}

impl FileClassifier {
    /// Compile the rules; invalid globs or thresholds are configuration errors.
    pub fn new(config: &ClassificationConfig, exclude_tests: bool) -> Result<Self> {
        if !config.min_avg_line_length.is_finite() || config.min_avg_line_length <= 0.0 {
            return Err(Error::configuration_field(
                format!(
                    "min_avg_line_length must be positive, got {}",
                    config.min_avg_line_length
                ),
                "classification.min_avg_line_length",
            ));
        }
        if !(0.0..=1.0).contains(&config.min_code_density) {
            return Err(Error::configuration_field(
                format!(
                    "min_code_density must be within [0, 1], got {}",
                    config.min_code_density
                ),
                "classification.min_code_density",
            ));
        }

        Ok(Self {
            vendor_dirs: lowercase_set(&config.vendor_dirs),
            generated_dirs: lowercase_set(&config.generated_dirs),
            test_dirs: lowercase_set(&config.test_dirs),
            generated_files: compile_field(
                &config.generated_file_patterns,
                "generated_file_patterns",
            )?,
            test_files: compile_field(&config.test_file_patterns, "test_file_patterns")?,
            exclude_patterns: compile_field(&config.exclude_patterns, "exclude_patterns")?,
            minification_languages: lowercase_set(&config.minification_languages),
            min_avg_line_length: config.min_avg_line_length,
            min_code_density: config.min_code_density,
            exclude_tests,
            categories: CategoryRules::new()?,
        })
    }

    /// Classify one record, resolving its language bucket.
    pub fn classify(&self, record: FileRecord) -> ClassifiedFile {
        let language = match language_bucket(&record.language) {
            Some(language) => language.to_string(),
            None => {
                tracing::warn!(
                    path = %record.path,
                    language = %record.language,
                    "Unrecognized language, grouping under {}",
                    UNKNOWN_LANGUAGE
                );
                UNKNOWN_LANGUAGE.to_string()
            }
        };

        let classification = self.classification_for(&record, &language);
        ClassifiedFile {
            record,
            language,
            classification,
        }
    }

    /// Classify a batch, preserving input order.
    pub fn classify_all(&self, records: Vec<FileRecord>) -> Vec<ClassifiedFile> {
        records.into_iter().map(|record| self.classify(record)).collect()
    }

    fn classification_for(&self, record: &FileRecord, language: &str) -> Classification {
        let name = path::file_name(&record.path);
        let segments: Vec<String> = path::dir_segments(&record.path)
            .map(|segment| segment.to_ascii_lowercase())
            .collect();
        let in_dirs = |dirs: &HashSet<String>| segments.iter().any(|s| dirs.contains(s));

        let is_vendor = in_dirs(&self.vendor_dirs);
        let is_generated = record.is_generated
            || in_dirs(&self.generated_dirs)
            || matches_any(&self.generated_files, name);
        let is_minified = record.is_minified || self.looks_minified(record, language);
        let is_test =
            record.is_test || in_dirs(&self.test_dirs) || matches_any(&self.test_files, name);
        let is_pattern = matches_any(&self.exclude_patterns, &record.path);

        let exclusion = if is_vendor {
            Some(ExclusionReason::Vendor)
        } else if is_generated {
            Some(ExclusionReason::Generated)
        } else if is_minified {
            Some(ExclusionReason::Minified)
        } else if is_pattern {
            Some(ExclusionReason::Pattern)
        } else if is_test && self.exclude_tests {
            Some(ExclusionReason::Test)
        } else {
            None
        };

        let category = if is_test {
            FileCategory::Test
        } else {
            self.categories.categorize(name, &segments)
        };

        Classification {
            is_test,
            is_vendor,
            is_generated,
            is_minified,
            category,
            exclusion,
        }
    }

    /// Long lines that are almost all code, in a language where that means minified.
    fn looks_minified(&self, record: &FileRecord, language: &str) -> bool {
        if record.lines_total == 0
            || !self
                .minification_languages
                .contains(&language.to_ascii_lowercase())
        {
            return false;
        }

        let lines = record.lines_total as f64;
        let avg_line_length = record.bytes as f64 / lines;
        let code_density = record.lines_code as f64 / lines;
        avg_line_length >= self.min_avg_line_length && code_density >= self.min_code_density
    }
}
