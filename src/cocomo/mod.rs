//! COCOMO cost estimation
//!
//! Basic COCOMO derives effort and schedule from code volume:
//!
//! - `effort = a · KLOC^b · eaf` person-months
//! - `duration = c · effort^d` months
//! - `average_staff = effort / duration`
//! - `estimated_cost = effort · avg_wage / 12 · overhead`
//!
//! The three classic project modes (`organic`, `semi-detached`, `embedded`)
//! sit next to organisation-profile presets. For a fixed preset both effort and
//! duration are non-decreasing in KLOC, because every exponent is positive.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::{Error, Result};

/// Average annual wage used by the classic project modes.
const DEFAULT_AVG_WAGE: f64 = 56_286.0;
/// Overhead multiplier used by the classic project modes.
const DEFAULT_OVERHEAD: f64 = 2.4;

/// Coefficients of one COCOMO preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CocomoPreset {
    pub name: &'static str,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    /// Average annual wage per person
    pub avg_wage: f64,
    /// Multiplier over raw wages (benefits, facilities, management)
    pub overhead: f64,
    /// Effort adjustment factor
    pub eaf: f64,
    pub description: &'static str,
}

/// Static preset table.
pub const PRESETS: &[CocomoPreset] = &[
    CocomoPreset {
        name: "organic",
        a: 2.4,
        b: 1.05,
        c: 2.5,
        d: 0.38,
        avg_wage: DEFAULT_AVG_WAGE,
        overhead: DEFAULT_OVERHEAD,
        eaf: 1.0,
        description: "Small teams, familiar problem, flexible requirements",
    },
    CocomoPreset {
        name: "semi-detached",
        a: 3.0,
        b: 1.12,
        c: 2.5,
        d: 0.35,
        avg_wage: DEFAULT_AVG_WAGE,
        overhead: DEFAULT_OVERHEAD,
        eaf: 1.0,
        description: "Mixed experience, medium-sized projects",
    },
    CocomoPreset {
        name: "embedded",
        a: 3.6,
        b: 1.20,
        c: 2.5,
        d: 0.32,
        avg_wage: DEFAULT_AVG_WAGE,
        overhead: DEFAULT_OVERHEAD,
        eaf: 1.0,
        description: "Tight hardware, software and operational constraints",
    },
    CocomoPreset {
        name: "early_startup",
        a: 2.0,
        b: 1.00,
        c: 2.2,
        d: 0.40,
        avg_wage: 150_000.0,
        overhead: 1.5,
        eaf: 0.8,
        description: "< 10 employees, flat structure, no bureaucracy",
    },
    CocomoPreset {
        name: "growth_startup",
        a: 2.4,
        b: 1.05,
        c: 2.5,
        d: 0.38,
        avg_wage: 140_000.0,
        overhead: 1.8,
        eaf: 0.9,
        description: "10-50 employees, adding process",
    },
    CocomoPreset {
        name: "scale_up",
        a: 2.8,
        b: 1.08,
        c: 2.5,
        d: 0.36,
        avg_wage: 130_000.0,
        overhead: 2.2,
        eaf: 1.0,
        description: "50-200 employees, formal processes emerging",
    },
    CocomoPreset {
        name: "sme",
        a: 3.0,
        b: 1.12,
        c: 2.5,
        d: 0.35,
        avg_wage: 120_000.0,
        overhead: 2.4,
        eaf: 1.0,
        description: "200-500 employees, established processes",
    },
    CocomoPreset {
        name: "mid_market",
        a: 3.2,
        b: 1.15,
        c: 2.5,
        d: 0.34,
        avg_wage: 115_000.0,
        overhead: 2.6,
        eaf: 1.1,
        description: "500-2000 employees, compliance overhead",
    },
    CocomoPreset {
        name: "large_enterprise",
        a: 3.6,
        b: 1.20,
        c: 2.5,
        d: 0.32,
        avg_wage: 110_000.0,
        overhead: 3.0,
        eaf: 1.2,
        description: "2000+ employees, heavy governance",
    },
    CocomoPreset {
        name: "regulated",
        a: 4.0,
        b: 1.25,
        c: 2.8,
        d: 0.30,
        avg_wage: 120_000.0,
        overhead: 3.5,
        eaf: 1.5,
        description: "Finance, healthcare, defense, government",
    },
    CocomoPreset {
        name: "open_source",
        a: 2.0,
        b: 1.00,
        c: 3.0,
        d: 0.42,
        avg_wage: 0.0,
        overhead: 1.0,
        eaf: 0.5,
        description: "Volunteer effort, no cost model applicable",
    },
];

/// Effort, schedule and cost derived for one preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CocomoEstimate {
    pub preset_name: String,
    pub kloc: f64,
    pub effort_person_months: f64,
    pub duration_months: f64,
    pub average_staff: f64,
    pub estimated_cost: f64,
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl CocomoPreset {
    /// Find a preset by name; `-` and `_` are interchangeable.
    pub fn lookup(name: &str) -> Result<&'static CocomoPreset> {
        let wanted = normalize_name(name);
        PRESETS
            .iter()
            .find(|preset| normalize_name(preset.name) == wanted)
            .ok_or_else(|| Error::UnknownPreset {
                name: name.to_string(),
                valid: Self::names().join(", "),
            })
    }

    pub fn names() -> Vec<&'static str> {
        PRESETS.iter().map(|preset| preset.name).collect()
    }

    /// Estimate for a code volume given in lines of code.
    pub fn estimate(&self, lines_code: u64) -> CocomoEstimate {
        let kloc = lines_code as f64 / 1000.0;
        if kloc <= 0.0 {
            return CocomoEstimate {
                preset_name: self.name.to_string(),
                kloc: 0.0,
                effort_person_months: 0.0,
                duration_months: 0.0,
                average_staff: 0.0,
                estimated_cost: 0.0,
            };
        }

        let effort = self.a * kloc.powf(self.b) * self.eaf;
        let duration = self.c * effort.powf(self.d);
        let staff = if duration > 0.0 { effort / duration } else { 0.0 };
        let cost = effort * (self.avg_wage / 12.0) * self.overhead;

        CocomoEstimate {
            preset_name: self.name.to_string(),
            kloc: (kloc * 1000.0).round() / 1000.0,
            effort_person_months: round2(effort),
            duration_months: round2(duration),
            average_staff: round2(staff),
            estimated_cost: round2(cost),
        }
    }
}

/// Estimate for a named preset; unknown names are a configuration error.
pub fn estimate(preset_name: &str, lines_code: u64) -> Result<CocomoEstimate> {
    Ok(CocomoPreset::lookup(preset_name)?.estimate(lines_code))
}

/// Estimates for every preset, keyed by preset name.
pub fn estimate_all(lines_code: u64) -> BTreeMap<String, CocomoEstimate> {
    PRESETS
        .iter()
        .map(|preset| (preset.name.to_string(), preset.estimate(lines_code)))
        .collect()
}
