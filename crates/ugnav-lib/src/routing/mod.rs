//! Route optimization across every search algorithm.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Tags for the algorithms that produce candidates
//! - [`OptimizerConfig`] - Scoring weights and the nominal walking speed
//! - [`RouteRequest`] - A named start/goal query with optional waypoints
//! - [`Route`] / [`RouteAnalysis`] - Candidate routes and the selected optimum
//! - [`find_optimal_routes`] - Main entry point for route queries
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] so the optimizer can run,
//! time, and collect them uniformly. A planner that finds nothing returns the
//! shared empty [`PathResult`], which simply contributes no candidate.
//!
//! # Example
//!
//! ```ignore
//! use ugnav_lib::{campus_graph, find_optimal_routes, RouteRequest};
//!
//! let graph = campus_graph();
//! let request = RouteRequest::new("Main Gate", "Balme Library");
//! let analysis = find_optimal_routes(&graph, &request)?;
//! println!("{} candidates", analysis.routes.len());
//! ```

mod ordering;
mod planner;

pub use ordering::{
    filter_by_location, group_by_algorithm, select_optimal, sort_by_distance, sort_by_time,
    top_routes,
};
pub use planner::{
    select_planners, AStarPlanner, DijkstraPlanner, FloydWarshallPlanner, GreedyPlanner,
    RoutePlanner, WaypointPlanner,
};

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::graph::{Graph, LocationId};
use crate::path::{find_divide_and_conquer_paths, find_multiple_paths, PathResult};

/// Algorithms that can contribute a candidate route.
///
/// Declaration order is the order the optimizer runs them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Label-setting single-source search.
    Dijkstra,
    /// Dense all-pairs dynamic programming.
    FloydWarshall,
    /// Heuristic best-first search.
    AStar,
    /// A* forced through the best of the requested waypoints.
    WaypointAStar,
    /// A* alternates produced by edge banning.
    AStarAlternate,
    /// Nearest-neighbour walk without backtracking.
    Greedy,
    /// Dijkstra legs joined at intermediate locations.
    DivideAndConquer,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "Dijkstra",
            RouteAlgorithm::FloydWarshall => "Floyd-Warshall",
            RouteAlgorithm::AStar => "A*",
            RouteAlgorithm::WaypointAStar => "Waypoint A*",
            RouteAlgorithm::AStarAlternate => "A* Alternate",
            RouteAlgorithm::Greedy => "Greedy",
            RouteAlgorithm::DivideAndConquer => "Divide and Conquer",
        };
        f.write_str(value)
    }
}

/// Scoring weights and the nominal speed used to derive route times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimizerConfig {
    /// Weight applied to distance in metres.
    pub distance_weight: f64,
    /// Weight applied to time in seconds.
    pub time_weight: f64,
    /// Metres covered per second when converting distance to time.
    pub speed: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            distance_weight: 0.7,
            time_weight: 0.3,
            speed: 2.0,
        }
    }
}

impl OptimizerConfig {
    /// Validate weights and speed.
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("distance_weight", self.distance_weight),
            ("time_weight", self.time_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!("{label} must be finite and non-negative, got {value}"),
                });
            }
        }

        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(Error::InvalidConfig {
                message: format!("speed must be finite and positive, got {}", self.speed),
            });
        }

        Ok(())
    }

    /// Nominal travel time for a distance.
    pub fn time_for(&self, distance: f64) -> f64 {
        distance / self.speed
    }

    /// Weighted objective minimized by [`select_optimal`].
    pub fn score(&self, route: &Route) -> f64 {
        self.distance_weight * route.distance + self.time_weight * route.time
    }
}

/// High-level route query by location name.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    /// Waypoint names, matched as case-insensitive substrings.
    pub waypoints: Vec<String>,
    pub config: OptimizerConfig,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            waypoints: Vec::new(),
            config: OptimizerConfig::default(),
        }
    }

    pub fn with_waypoints<I, S>(mut self, waypoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.waypoints = waypoints.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }
}

/// Candidate route produced by one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub algorithm: RouteAlgorithm,
    /// Location names from start to goal inclusive.
    pub path: Vec<String>,
    /// Total distance in metres.
    pub distance: f64,
    /// Nominal travel time in seconds.
    pub time: f64,
    pub nodes_explored: usize,
}

impl Route {
    /// Convert a search result into a candidate. `None` when nothing was found.
    pub fn from_result(
        graph: &Graph,
        algorithm: RouteAlgorithm,
        result: &PathResult,
        config: &OptimizerConfig,
    ) -> Option<Self> {
        if !result.is_found() {
            return None;
        }
        Some(Self {
            algorithm,
            path: graph.names_for(&result.path),
            distance: result.distance,
            time: config.time_for(result.distance),
            nodes_explored: result.nodes_explored,
        })
    }

    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Whether any location on the route contains `needle`, ignoring case.
    pub fn passes_through(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.path
            .iter()
            .any(|location| location.to_lowercase().contains(&needle))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2}m, {:.1}s)",
            self.path.join(" -> "),
            self.distance,
            self.time
        )
    }
}

/// Result of a route query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteAnalysis {
    pub start: String,
    pub goal: String,
    /// One entry per algorithm that found a path.
    pub routes: Vec<Route>,
    /// Best candidate by weighted score, `None` when nothing was found.
    pub optimal: Option<Route>,
    /// Wall-clock time spent in each algorithm.
    #[serde(serialize_with = "serialize_timings_ms")]
    pub timings: BTreeMap<RouteAlgorithm, Duration>,
    pub waypoints: Vec<String>,
    /// Multiplier applied to route times; `1.0` when no traffic adjustment ran.
    pub traffic_factor: f64,
}

impl RouteAnalysis {
    fn empty(start: &str, goal: &str) -> Self {
        Self {
            start: start.to_string(),
            goal: goal.to_string(),
            routes: Vec::new(),
            optimal: None,
            timings: BTreeMap::new(),
            waypoints: Vec::new(),
            traffic_factor: 1.0,
        }
    }

    /// Whether any algorithm found a route.
    pub fn has_route(&self) -> bool {
        self.optimal.is_some()
    }

    pub fn timing(&self, algorithm: RouteAlgorithm) -> Option<Duration> {
        self.timings.get(&algorithm).copied()
    }

    /// Candidates with times ignored, for comparing two runs of the same query.
    pub fn candidate_paths(&self) -> Vec<(RouteAlgorithm, Vec<String>, f64)> {
        self.routes
            .iter()
            .map(|route| (route.algorithm, route.path.clone(), route.distance))
            .collect()
    }
}

fn serialize_timings_ms<S>(
    timings: &BTreeMap<RouteAlgorithm, Duration>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(
        timings
            .iter()
            .map(|(algorithm, elapsed)| (algorithm, elapsed.as_secs_f64() * 1_000.0)),
    )
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resolve a location name to its id, returning suggestions for unknown names.
pub fn resolve_location(graph: &Graph, name: &str) -> Result<LocationId> {
    graph.location_id_by_name(name).ok_or_else(|| {
        let suggestions = graph.fuzzy_location_matches(name, 3);
        Error::UnknownLocation {
            name: name.to_string(),
            suggestions,
        }
    })
}

fn run_timed(
    planner: &dyn RoutePlanner,
    graph: &Graph,
    start: LocationId,
    goal: LocationId,
) -> (PathResult, Duration) {
    let started = Instant::now();
    let result = planner.find_path(graph, start, goal);
    let elapsed = started.elapsed();

    tracing::debug!(
        "{} explored {} nodes in {:?} (found: {})",
        planner.algorithm(),
        result.nodes_explored,
        elapsed,
        result.is_found()
    );

    (result, elapsed)
}

// =============================================================================
// Main Entry Point
// =============================================================================

/// Run every algorithm for the request and pick the best candidate.
///
/// This is the main entry point for route queries. It:
/// 1. Resolves start and goal names (unknown names are an error)
/// 2. Runs Dijkstra, Floyd-Warshall, A*, and waypoint A* when waypoints are given
/// 3. Times each algorithm and keeps one candidate per algorithm that found a path
/// 4. Selects the candidate with the lowest weighted distance/time score
///
/// Finding no path at all is a normal outcome: the analysis then has no
/// candidates and no optimum.
pub fn find_optimal_routes(graph: &Graph, request: &RouteRequest) -> Result<RouteAnalysis> {
    request.config.validate()?;

    let start = resolve_location(graph, &request.start)?;
    let goal = resolve_location(graph, &request.goal)?;

    let mut analysis = RouteAnalysis::empty(&request.start, &request.goal);
    analysis.waypoints = request.waypoints.clone();

    for planner in select_planners(request) {
        let (result, elapsed) = run_timed(planner.as_ref(), graph, start, goal);
        analysis.timings.insert(planner.algorithm(), elapsed);

        if let Some(route) =
            Route::from_result(graph, planner.algorithm(), &result, &request.config)
        {
            analysis.routes.push(route);
        }
    }

    analysis.optimal = select_optimal(&analysis.routes, &request.config).cloned();

    if analysis.optimal.is_none() {
        tracing::info!(
            "no route found between {} and {}",
            request.start,
            request.goal
        );
    }

    Ok(analysis)
}

/// Offer up to `count` distinct A* routes, shortest first.
pub fn find_multiple_route_options(
    graph: &Graph,
    request: &RouteRequest,
    count: usize,
) -> Result<RouteAnalysis> {
    ranked_routes(graph, request, RouteAlgorithm::AStarAlternate, |start, goal| {
        find_multiple_paths(graph, start, goal, count)
    })
}

/// Routes split at intermediate locations, shortest first.
pub fn find_divide_and_conquer_routes(
    graph: &Graph,
    request: &RouteRequest,
) -> Result<RouteAnalysis> {
    ranked_routes(graph, request, RouteAlgorithm::DivideAndConquer, |start, goal| {
        find_divide_and_conquer_paths(graph, start, goal)
    })
}

/// The nearest-neighbour walk. A walk that hits a dead end yields no route.
pub fn find_greedy_route(graph: &Graph, request: &RouteRequest) -> Result<RouteAnalysis> {
    ranked_routes(graph, request, RouteAlgorithm::Greedy, |start, goal| {
        vec![GreedyPlanner.find_path(graph, start, goal)]
    })
}

/// Run one multi-result search and rank its routes by distance.
fn ranked_routes<F>(
    graph: &Graph,
    request: &RouteRequest,
    algorithm: RouteAlgorithm,
    search: F,
) -> Result<RouteAnalysis>
where
    F: FnOnce(LocationId, LocationId) -> Vec<PathResult>,
{
    request.config.validate()?;

    let start = resolve_location(graph, &request.start)?;
    let goal = resolve_location(graph, &request.goal)?;

    let mut analysis = RouteAnalysis::empty(&request.start, &request.goal);

    let started = Instant::now();
    let results = search(start, goal);
    analysis.timings.insert(algorithm, started.elapsed());

    analysis.routes = results
        .iter()
        .filter_map(|result| Route::from_result(graph, algorithm, result, &request.config))
        .collect();
    sort_by_distance(&mut analysis.routes);
    analysis.optimal = analysis.routes.first().cloned();

    Ok(analysis)
}

/// Scale every candidate's time by `factor`, then re-rank by time and re-select.
pub fn optimize_for_traffic(
    graph: &Graph,
    request: &RouteRequest,
    factor: f64,
) -> Result<RouteAnalysis> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(Error::InvalidTrafficFactor { factor });
    }

    let mut analysis = find_optimal_routes(graph, request)?;
    analysis.traffic_factor = factor;

    for route in &mut analysis.routes {
        route.time *= factor;
    }

    sort_by_time(&mut analysis.routes);
    analysis.optimal = select_optimal(&analysis.routes, &request.config).cloned();

    Ok(analysis)
}

/// Candidates grouped by the algorithm that produced them.
pub fn compare_algorithms(
    graph: &Graph,
    request: &RouteRequest,
) -> Result<BTreeMap<RouteAlgorithm, Vec<Route>>> {
    let analysis = find_optimal_routes(graph, request)?;
    Ok(group_by_algorithm(&analysis.routes))
}

/// Candidates that pass through `landmark`, with the landmark used as a waypoint.
pub fn find_routes_through(
    graph: &Graph,
    request: &RouteRequest,
    landmark: &str,
) -> Result<Vec<Route>> {
    let request = request.clone().with_waypoints([landmark]);
    let analysis = find_optimal_routes(graph, &request)?;
    Ok(filter_by_location(&analysis.routes, landmark))
}
