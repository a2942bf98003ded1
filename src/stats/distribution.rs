//! Distribution shape and inequality statistics over a sample of per-file values.
//!
//! Every function here is pure and total: empty, singleton and all-zero
//! samples produce well-defined zero (or `None`) results instead of errors.
//!
//! # Policies
//!
//! - Percentiles interpolate linearly at rank `(p/100)·(n-1)` of the sorted sample.
//! - `stddev` is the sample standard deviation (n-1 denominator).
//! - Theil is built from the mean logarithmic deviation (MLD) over strictly
//!   positive values and reported as `1 - exp(-MLD)`, which equals
//!   `1 - geometric_mean / mean` and lies in `[0, 1)`. Zero entries are left
//!   out of the log term.
//! - Top/bottom shares take `round_half_up(n·pct)` elements, at least one.
//! - Palma reports [`PALMA_UNDEFINED`] when the bottom 40% holds nothing but
//!   the top 10% holds something.
//! - For `n <= 1` every inequality and dispersion field is exactly 0 and the
//!   shape fields are `None`; shape fields stay `None` until `n >= 3`.

use serde::{Deserialize, Serialize};

/// Palma value reported when the bottom-40% share is zero.
pub const PALMA_UNDEFINED: f64 = 1.0e6;

/// Decimal places kept in emitted statistics.
const PRECISION: f64 = 10_000.0;

/// Statistical distribution for one metric over a set of files.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricDistribution {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
    pub stddev: f64,
    /// Coefficient of variation (stddev / mean)
    pub cv: f64,
    /// Interquartile range (p75 - p25)
    pub iqr: f64,
    pub gini: f64,
    pub theil: f64,
    pub hoover: f64,
    pub palma: f64,
    pub top_10_pct_share: f64,
    pub top_20_pct_share: f64,
    pub bottom_50_pct_share: f64,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
}

impl MetricDistribution {
    /// Compute the distribution of an unordered sample.
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Compute the distribution of a sample already sorted ascending.
    pub fn from_sorted(sorted: &[f64]) -> Self {
        let n = sorted.len();
        if n == 0 {
            return Self::default();
        }

        let total: f64 = sorted.iter().sum();
        let mean = total / n as f64;
        let stddev = sample_stddev(sorted, mean);
        let p25 = percentile(sorted, 25.0);
        let p50 = percentile(sorted, 50.0);
        let p75 = percentile(sorted, 75.0);

        Self {
            count: n,
            min: round(sorted[0]),
            max: round(sorted[n - 1]),
            mean: round(mean),
            median: round(p50),
            p25: round(p25),
            p50: round(p50),
            p75: round(p75),
            p90: round(percentile(sorted, 90.0)),
            p95: round(percentile(sorted, 95.0)),
            p99: round(percentile(sorted, 99.0)),
            stddev: round(stddev),
            cv: if mean > 0.0 { round(stddev / mean) } else { 0.0 },
            iqr: round(p75 - p25),
            gini: round(gini(sorted)),
            theil: round(theil(sorted)),
            hoover: round(hoover(sorted)),
            palma: round(palma(sorted)),
            top_10_pct_share: round(top_share(sorted, 10)),
            top_20_pct_share: round(top_share(sorted, 20)),
            bottom_50_pct_share: round(bottom_share(sorted, 50)),
            skewness: skewness(sorted, mean).map(round),
            kurtosis: kurtosis(sorted, mean).map(round),
        }
    }
}

fn round(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

/// Linearly interpolated percentile of a sorted sample; 0 for an empty one.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

fn sample_stddev(sorted: &[f64], mean: f64) -> f64 {
    let n = sorted.len();
    if n <= 1 {
        return 0.0;
    }
    let sum_sq: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Gini coefficient of a sorted sample, in `[0, 1]`.
///
/// `G = 2·Σ(i·xᵢ) / (n·Σx) - (n+1)/n` with 1-indexed ranks.
pub fn gini(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n <= 1 {
        return 0.0;
    }
    let total: f64 = sorted.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| (i + 1) as f64 * x)
        .sum();
    let n = n as f64;
    ((2.0 * weighted) / (n * total) - (n + 1.0) / n).clamp(0.0, 1.0)
}

/// Theil L (mean logarithmic deviation) over the strictly positive values,
/// mapped onto `[0, 1)` as `1 - exp(-MLD)`.
pub fn theil(sorted: &[f64]) -> f64 {
    if sorted.len() <= 1 {
        return 0.0;
    }
    let positive: Vec<f64> = sorted.iter().copied().filter(|x| *x > 0.0).collect();
    if positive.len() <= 1 {
        return 0.0;
    }

    let m = positive.len() as f64;
    let mean = positive.iter().sum::<f64>() / m;
    let mld = positive.iter().map(|x| (mean / x).ln()).sum::<f64>() / m;
    (1.0 - (-mld.max(0.0)).exp()).clamp(0.0, 1.0)
}

/// Hoover (Robin Hood) index: share of the total that would have to move for equality.
pub fn hoover(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n <= 1 {
        return 0.0;
    }
    let total: f64 = sorted.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let mean = total / n as f64;
    let deviation: f64 = sorted.iter().map(|x| (x - mean).abs()).sum();
    (0.5 * deviation / total).clamp(0.0, 1.0)
}

/// Palma ratio: top 10% share over bottom 40% share.
pub fn palma(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n <= 1 {
        return 0.0;
    }
    let total: f64 = sorted.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let top: f64 = sorted[n - share_count(n, 10)..].iter().sum();
    let bottom: f64 = sorted[..share_count(n, 40)].iter().sum();

    if bottom <= 0.0 {
        if top > 0.0 {
            PALMA_UNDEFINED
        } else {
            0.0
        }
    } else {
        top / bottom
    }
}

/// Share of the total held by the largest `pct`% of values.
pub fn top_share(sorted: &[f64], pct: usize) -> f64 {
    let n = sorted.len();
    share_of(sorted, n - share_count(n, pct)..n)
}

/// Share of the total held by the smallest `pct`% of values.
pub fn bottom_share(sorted: &[f64], pct: usize) -> f64 {
    share_of(sorted, 0..share_count(sorted.len(), pct))
}

fn share_of(sorted: &[f64], range: std::ops::Range<usize>) -> f64 {
    if sorted.len() <= 1 {
        return 0.0;
    }
    let total: f64 = sorted.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let part: f64 = sorted[range].iter().sum();
    (part / total).clamp(0.0, 1.0)
}

/// Element count for a `pct`% slice: round-half-up nearest rank, within `1..=n`.
fn share_count(n: usize, pct: usize) -> usize {
    if n == 0 {
        return 0;
    }
    ((n * pct + 50) / 100).clamp(1, n)
}

fn central_moment(sorted: &[f64], mean: f64, order: i32) -> f64 {
    sorted.iter().map(|x| (x - mean).powi(order)).sum::<f64>() / sorted.len() as f64
}

/// Fisher-Pearson skewness (g1); `None` below three values.
pub fn skewness(sorted: &[f64], mean: f64) -> Option<f64> {
    if sorted.len() < 3 {
        return None;
    }
    let m2 = central_moment(sorted, mean, 2);
    if m2 <= 0.0 {
        return Some(0.0);
    }
    Some(central_moment(sorted, mean, 3) / m2.powf(1.5))
}

/// Excess kurtosis (g2); `None` below three values.
pub fn kurtosis(sorted: &[f64], mean: f64) -> Option<f64> {
    if sorted.len() < 3 {
        return None;
    }
    let m2 = central_moment(sorted, mean, 2);
    if m2 <= 0.0 {
        return Some(0.0);
    }
    Some(central_moment(sorted, mean, 4) / (m2 * m2) - 3.0)
}
