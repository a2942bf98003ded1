use serde::{Deserialize, Serialize};
use std::fmt;

/// Language bucket for records whose language the detector could not name.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Per-file metrics as produced by an external analyzer.
///
/// Field aliases accept scc's `--by-file` PascalCase names so its output can be
/// fed in without a translation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(alias = "Location", alias = "location")]
    pub path: String,
    #[serde(default, alias = "Language")]
    pub language: String,
    #[serde(default, alias = "Lines", alias = "lines")]
    pub lines_total: u64,
    #[serde(default, alias = "Code", alias = "code")]
    pub lines_code: u64,
    #[serde(default, alias = "Comment", alias = "comment")]
    pub lines_comment: u64,
    #[serde(default, alias = "Blank", alias = "blank")]
    pub lines_blank: u64,
    #[serde(default, alias = "Bytes")]
    pub bytes: u64,
    #[serde(default, alias = "Complexity")]
    pub complexity: u64,
    #[serde(default, alias = "Minified", alias = "minified")]
    pub is_minified: bool,
    #[serde(default, alias = "Generated", alias = "generated")]
    pub is_generated: bool,
    #[serde(default)]
    pub is_test: bool,
}

impl FileRecord {
    /// Record with only a path and language; counters start at zero.
    pub fn new(path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
            lines_total: 0,
            lines_code: 0,
            lines_comment: 0,
            lines_blank: 0,
            bytes: 0,
            complexity: 0,
            is_minified: false,
            is_generated: false,
            is_test: false,
        }
    }

    pub fn with_lines(mut self, code: u64, comment: u64, blank: u64) -> Self {
        self.lines_code = code;
        self.lines_comment = comment;
        self.lines_blank = blank;
        self.lines_total = code.saturating_add(comment).saturating_add(blank);
        self
    }

    pub fn with_bytes(mut self, bytes: u64) -> Self {
        self.bytes = bytes;
        self
    }

    pub fn with_complexity(mut self, complexity: u64) -> Self {
        self.complexity = complexity;
        self
    }
}

/// Secondary role of a file, independent of exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Source,
    Test,
    Config,
    Docs,
    Build,
    Ci,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Test => "test",
            Self::Config => "config",
            Self::Docs => "docs",
            Self::Build => "build",
            Self::Ci => "ci",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a file is kept out of numeric aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    Vendor,
    Generated,
    Minified,
    Pattern,
    Test,
}

impl ExclusionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::Generated => "generated",
            Self::Minified => "minified",
            Self::Pattern => "pattern",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_test: bool,
    pub is_vendor: bool,
    pub is_generated: bool,
    pub is_minified: bool,
    pub category: FileCategory,
    pub exclusion: Option<ExclusionReason>,
}

impl Classification {
    pub fn source() -> Self {
        Self {
            is_test: false,
            is_vendor: false,
            is_generated: false,
            is_minified: false,
            category: FileCategory::Source,
            exclusion: None,
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.exclusion.is_some()
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::source()
    }
}

/// A record together with its classification and language bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFile {
    pub record: FileRecord,
    /// Language name used for grouping; `Unknown` when the detector gave none.
    pub language: String,
    pub classification: Classification,
}

impl ClassifiedFile {
    pub fn path(&self) -> &str {
        &self.record.path
    }

    pub fn is_excluded(&self) -> bool {
        self.classification.is_excluded()
    }
}

/// An excluded file as it appears in the report ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedFile {
    pub path: String,
    pub reason: ExclusionReason,
}

/// Map a detector-provided language name to its grouping bucket.
pub fn language_bucket(language: &str) -> Option<&str> {
    let trimmed = language.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        None
    } else {
        Some(trimmed)
    }
}
