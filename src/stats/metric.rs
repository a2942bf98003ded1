use crate::core::FileRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-file numeric metric that can be tracked as a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedMetric {
    LinesTotal,
    LinesCode,
    LinesComment,
    LinesBlank,
    Bytes,
    Complexity,
    /// Comment lines over total lines
    CommentRatio,
    /// Complexity per code line
    ComplexityDensity,
}

impl TrackedMetric {
    pub const ALL: [TrackedMetric; 8] = [
        Self::LinesTotal,
        Self::LinesCode,
        Self::LinesComment,
        Self::LinesBlank,
        Self::Bytes,
        Self::Complexity,
        Self::CommentRatio,
        Self::ComplexityDensity,
    ];

    /// Metrics tracked when the configuration names none.
    pub fn defaults() -> Vec<TrackedMetric> {
        vec![Self::LinesTotal, Self::LinesCode, Self::Complexity]
    }

    /// Value of this metric for one file.
    pub fn value(self, record: &FileRecord) -> f64 {
        match self {
            Self::LinesTotal => record.lines_total as f64,
            Self::LinesCode => record.lines_code as f64,
            Self::LinesComment => record.lines_comment as f64,
            Self::LinesBlank => record.lines_blank as f64,
            Self::Bytes => record.bytes as f64,
            Self::Complexity => record.complexity as f64,
            Self::CommentRatio => ratio(record.lines_comment, record.lines_total),
            Self::ComplexityDensity => ratio(record.complexity, record.lines_code),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LinesTotal => "lines_total",
            Self::LinesCode => "lines_code",
            Self::LinesComment => "lines_comment",
            Self::LinesBlank => "lines_blank",
            Self::Bytes => "bytes",
            Self::Complexity => "complexity",
            Self::CommentRatio => "comment_ratio",
            Self::ComplexityDensity => "complexity_density",
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for TrackedMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackedMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|metric| metric.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                format!(
                    "Invalid metric: '{}'. Valid options: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_metrics_guard_zero_denominator() {
        let record = FileRecord::new("a.rs", "Rust");
        assert_eq!(TrackedMetric::CommentRatio.value(&record), 0.0);
        assert_eq!(TrackedMetric::ComplexityDensity.value(&record), 0.0);
    }

    #[test]
    fn test_metric_values() {
        let record = FileRecord::new("a.rs", "Rust")
            .with_lines(80, 20, 0)
            .with_complexity(8);
        assert_eq!(TrackedMetric::LinesTotal.value(&record), 100.0);
        assert_eq!(TrackedMetric::CommentRatio.value(&record), 0.2);
        assert_eq!(TrackedMetric::ComplexityDensity.value(&record), 0.1);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for metric in TrackedMetric::ALL {
            assert_eq!(metric.as_str().parse::<TrackedMetric>(), Ok(metric));
        }
        assert!("cyclomatic".parse::<TrackedMetric>().is_err());
    }
}
