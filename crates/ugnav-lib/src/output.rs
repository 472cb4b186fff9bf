use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::routing::{Route, RouteAlgorithm, RouteAnalysis};

/// Presentation style for turning a [`RouteReport`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Per-algorithm timing in milliseconds.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlgorithmTiming {
    pub algorithm: RouteAlgorithm,
    pub elapsed_ms: f64,
}

/// Structured, render-ready view of a [`RouteAnalysis`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteReport {
    pub start: String,
    pub goal: String,
    pub optimal: Route,
    pub routes: Vec<Route>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<String>,
    pub traffic_factor: f64,
    pub timings: Vec<AlgorithmTiming>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}

impl RouteReport {
    /// Build a report from an analysis that found at least one route.
    pub fn from_analysis(analysis: &RouteAnalysis) -> Result<Self> {
        let optimal = analysis.optimal.clone().ok_or(Error::EmptyRoute)?;

        let timings = analysis
            .timings
            .iter()
            .map(|(algorithm, elapsed)| AlgorithmTiming {
                algorithm: *algorithm,
                elapsed_ms: elapsed.as_secs_f64() * 1_000.0,
            })
            .collect();

        Ok(Self {
            start: analysis.start.clone(),
            goal: analysis.goal.clone(),
            optimal,
            routes: analysis.routes.clone(),
            landmarks: analysis
                .waypoints
                .iter()
                .filter(|name| !name.trim().is_empty())
                .cloned()
                .collect(),
            traffic_factor: analysis.traffic_factor,
            timings,
            advisories: Vec::new(),
        })
    }

    /// Attach advisory lines, e.g. from a [`RouteAdjuster`](crate::RouteAdjuster).
    pub fn with_advisories(mut self, advisories: Vec<String>) -> Self {
        self.advisories = advisories;
        self
    }

    /// Render the report using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "=== UG Campus Route Analysis ===");
        let _ = writeln!(buffer, "From: {}", self.start);
        let _ = writeln!(buffer, "To: {}", self.goal);
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "Optimal Route: {}", self.optimal);
        let _ = writeln!(buffer, "Algorithm: {}", self.optimal.algorithm);
        let _ = writeln!(buffer);

        let _ = writeln!(buffer, "All Available Routes:");
        for (index, route) in self.routes.iter().enumerate() {
            let _ = writeln!(
                buffer,
                "{:>3}. [{}] {}",
                index + 1,
                route.algorithm,
                route
            );
        }

        if !self.landmarks.is_empty() {
            let _ = writeln!(buffer);
            let _ = writeln!(buffer, "Landmarks Considered: {}", self.landmarks.join(", "));
        }

        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "Traffic Factor: {:.2}x", self.traffic_factor);

        if !self.advisories.is_empty() {
            let _ = writeln!(buffer);
            for advisory in &self.advisories {
                let _ = writeln!(buffer, "! {advisory}");
            }
        }

        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "Algorithm Performance (ms):");
        for timing in &self.timings {
            let _ = writeln!(
                buffer,
                "  {:<16} {:>10.3}",
                timing.algorithm.to_string(),
                timing.elapsed_ms
            );
        }

        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} to {}_ (algorithm: `{}`)",
            self.start, self.goal, self.optimal.algorithm
        );
        let _ = writeln!(
            buffer,
            "**Optimal:** {} ({:.2}m, {:.1}s)",
            self.optimal.path.join(" → "),
            self.optimal.distance,
            self.optimal.time
        );
        let _ = writeln!(buffer);
        for route in &self.routes {
            let _ = writeln!(
                buffer,
                "* `{}`: {} ({:.2}m, {:.1}s, {} explored)",
                route.algorithm,
                route.path.join(" → "),
                route.distance,
                route.time,
                route.nodes_explored
            );
        }

        if !self.landmarks.is_empty() {
            let _ = writeln!(buffer);
            let _ = writeln!(buffer, "_Landmarks:_ {}", self.landmarks.join(", "));
        }
        if (self.traffic_factor - 1.0).abs() > f64::EPSILON {
            let _ = writeln!(buffer, "_Traffic factor:_ {:.2}x", self.traffic_factor);
        }
        for advisory in &self.advisories {
            let _ = writeln!(buffer, "> {advisory}");
        }

        buffer
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use super::*;

    fn sample_route(algorithm: RouteAlgorithm) -> Route {
        Route {
            algorithm,
            path: vec![
                "Main Gate".to_string(),
                "JQB".to_string(),
                "Math Department".to_string(),
            ],
            distance: 1150.0,
            time: 575.0,
            nodes_explored: 4,
        }
    }

    fn sample_analysis() -> RouteAnalysis {
        let mut timings = BTreeMap::new();
        timings.insert(RouteAlgorithm::Dijkstra, Duration::from_millis(2));
        timings.insert(RouteAlgorithm::AStar, Duration::from_micros(250));
        RouteAnalysis {
            start: "Main Gate".to_string(),
            goal: "Math Department".to_string(),
            routes: vec![
                sample_route(RouteAlgorithm::Dijkstra),
                sample_route(RouteAlgorithm::AStar),
            ],
            optimal: Some(sample_route(RouteAlgorithm::Dijkstra)),
            timings,
            waypoints: vec!["JQB".to_string()],
            traffic_factor: 1.0,
        }
    }

    #[test]
    fn plain_text_lists_every_section() {
        let report = RouteReport::from_analysis(&sample_analysis()).expect("report");
        let text = report.render(RouteRenderMode::PlainText);

        assert!(text.starts_with("=== UG Campus Route Analysis ==="));
        assert!(text.contains(
            "Optimal Route: Main Gate -> JQB -> Math Department (1150.00m, 575.0s)"
        ));
        assert!(text.contains("Algorithm: Dijkstra"));
        assert!(text.contains("  1. [Dijkstra]"));
        assert!(text.contains("  2. [A*]"));
        assert!(text.contains("Landmarks Considered: JQB"));
        assert!(text.contains("Traffic Factor: 1.00x"));
        assert!(text.contains("Algorithm Performance (ms):"));
    }

    #[test]
    fn rich_text_uses_markup() {
        let report = RouteReport::from_analysis(&sample_analysis()).expect("report");
        let text = report.render(RouteRenderMode::RichText);
        assert!(text.contains("**Optimal:** Main Gate → JQB → Math Department"));
        assert!(text.contains("* `A*`"));
        assert!(!text.contains("Traffic factor"));
    }

    #[test]
    fn advisories_are_rendered() {
        let report = RouteReport::from_analysis(&sample_analysis())
            .expect("report")
            .with_advisories(vec!["Expect moderate delays".to_string()]);
        assert!(report
            .render(RouteRenderMode::PlainText)
            .contains("! Expect moderate delays"));
    }

    #[test]
    fn analysis_without_optimum_is_rejected() {
        let mut analysis = sample_analysis();
        analysis.optimal = None;
        assert!(matches!(
            RouteReport::from_analysis(&analysis),
            Err(Error::EmptyRoute)
        ));
    }

    #[test]
    fn timings_serialize_in_milliseconds() {
        let report = RouteReport::from_analysis(&sample_analysis()).expect("report");
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["timings"][0]["algorithm"], "dijkstra");
        assert_eq!(json["timings"][0]["elapsed_ms"], 2.0);
        assert_eq!(json["optimal"]["algorithm"], "dijkstra");
    }
}
