//! Post-search route adjustments.
//!
//! Adjusters never change a route. They derive an adjusted travel time plus
//! advisory lines from the route's locations and base figures.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::routing::Route;

/// Combined congestion above which a long delay is advised.
pub const HEAVY_CONGESTION: f64 = 1.5;
/// Combined congestion above which a short delay is advised.
pub const MODERATE_CONGESTION: f64 = 1.2;

/// Outcome of an adjustment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    /// Multiplier that turned the base time into `adjusted_time`.
    pub factor: f64,
    pub adjusted_time: f64,
    pub advisories: Vec<String>,
}

impl Adjustment {
    /// No change and nothing to report.
    pub fn unchanged(time: f64) -> Self {
        Self {
            factor: 1.0,
            adjusted_time: time,
            advisories: Vec::new(),
        }
    }
}

/// Source of conditions that change travel time along a path.
pub trait RouteAdjuster: Send + Sync {
    /// Short label used in logs and reports.
    fn name(&self) -> &str;

    fn adjust(&self, path: &[String], distance: f64, time: f64) -> Adjustment;

    fn adjust_route(&self, route: &Route) -> Adjustment {
        self.adjust(&route.path, route.distance, route.time)
    }
}

/// Congestion band for a single factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Low,
    Moderate,
    High,
}

impl CongestionLevel {
    pub fn from_factor(factor: f64) -> Self {
        if factor > HEAVY_CONGESTION {
            CongestionLevel::High
        } else if factor > MODERATE_CONGESTION {
            CongestionLevel::Moderate
        } else {
            CongestionLevel::Low
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            CongestionLevel::Low => "LOW",
            CongestionLevel::Moderate => "MODERATE",
            CongestionLevel::High => "HIGH",
        };
        f.write_str(value)
    }
}

/// Fixed per-location congestion factors. Unlisted locations count as `1.0`.
#[derive(Debug, Clone, Default)]
pub struct CongestionTable {
    factors: HashMap<String, f64>,
}

impl CongestionTable {
    pub fn new<I, S>(factors: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            factors: factors
                .into_iter()
                .map(|(name, factor)| (name.into(), factor))
                .collect(),
        }
    }

    /// Typical daytime congestion around the University of Ghana campus.
    pub fn campus_defaults() -> Self {
        Self::new([
            ("Main Gate", 1.5),
            ("Balme Library", 1.3),
            ("Bush Canteen", 1.4),
            ("Night Market", 1.6),
            ("Banking Square", 1.2),
            ("Engineering School", 1.1),
            ("CS Department", 1.0),
            ("Math Department", 1.0),
        ])
    }

    pub fn factor_for(&self, location: &str) -> f64 {
        self.factors.get(location).copied().unwrap_or(1.0)
    }

    /// Combined factor for a path: `1.0` plus every location factor, divided
    /// by the number of locations. Empty paths are unaffected.
    pub fn combined_factor(&self, path: &[String]) -> f64 {
        if path.is_empty() {
            return 1.0;
        }
        let total: f64 = 1.0
            + path
                .iter()
                .map(|location| self.factor_for(location))
                .sum::<f64>();
        total / path.len() as f64
    }
}

impl RouteAdjuster for CongestionTable {
    fn name(&self) -> &str {
        "congestion"
    }

    fn adjust(&self, path: &[String], _distance: f64, time: f64) -> Adjustment {
        if path.is_empty() {
            return Adjustment::unchanged(time);
        }

        let factor = self.combined_factor(path);
        let mut advisories: Vec<String> = Vec::new();
        match CongestionLevel::from_factor(factor) {
            CongestionLevel::High => {
                advisories.push("Heavy congestion expected, consider leaving 30 minutes later".into())
            }
            CongestionLevel::Moderate => advisories
                .push("Moderate congestion expected, consider leaving 15 minutes later".into()),
            CongestionLevel::Low => {}
        }

        for location in path {
            let location_factor = self.factor_for(location);
            let level = CongestionLevel::from_factor(location_factor);
            if level != CongestionLevel::Low {
                advisories.push(format!("{location}: {level} ({location_factor:.1}x)"));
            }
        }

        tracing::debug!(
            "congestion factor {:.3} over {} locations",
            factor,
            path.len()
        );

        Adjustment {
            factor,
            adjusted_time: time * factor,
            advisories,
        }
    }
}
