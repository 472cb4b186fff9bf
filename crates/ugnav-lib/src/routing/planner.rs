//! Route planning strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and one implementation per
//! search algorithm. [`find_optimal_routes`](super::find_optimal_routes) runs
//! whatever [`select_planners`] returns, so adding an algorithm only means
//! adding a planner here.

use crate::all_pairs::find_route_floyd_warshall;
use crate::graph::{Graph, LocationId};
use crate::path::{
    find_path_with_waypoints, find_route_a_star, find_route_dijkstra, find_route_greedy,
    PathResult,
};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the pathfinding algorithm on the given graph.
    ///
    /// A missing route is reported through [`PathResult::not_found`].
    fn find_path(&self, graph: &Graph, start: LocationId, goal: LocationId) -> PathResult;
}

/// Dijkstra's algorithm planner.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &Graph, start: LocationId, goal: LocationId) -> PathResult {
        find_route_dijkstra(graph, start, goal)
    }
}

/// Floyd-Warshall planner.
///
/// Recomputes the full distance table on every call and reads one pair from it.
#[derive(Debug, Clone, Default)]
pub struct FloydWarshallPlanner;

impl RoutePlanner for FloydWarshallPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::FloydWarshall
    }

    fn find_path(&self, graph: &Graph, start: LocationId, goal: LocationId) -> PathResult {
        find_route_floyd_warshall(graph, start, goal)
    }
}

/// A* planner using the identifier-difference heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, graph: &Graph, start: LocationId, goal: LocationId) -> PathResult {
        find_route_a_star(graph, start, goal)
    }
}

/// Nearest-neighbour planner.
///
/// Not part of [`select_planners`]; it backs
/// [`find_greedy_route`](super::find_greedy_route).
#[derive(Debug, Clone, Default)]
pub struct GreedyPlanner;

impl RoutePlanner for GreedyPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Greedy
    }

    fn find_path(&self, graph: &Graph, start: LocationId, goal: LocationId) -> PathResult {
        find_route_greedy(graph, start, goal)
    }
}

/// A* forced through the cheapest of a set of waypoints.
#[derive(Debug, Clone, Default)]
pub struct WaypointPlanner {
    waypoints: Vec<String>,
}

impl WaypointPlanner {
    pub fn new(waypoints: Vec<String>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[String] {
        &self.waypoints
    }
}

impl RoutePlanner for WaypointPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::WaypointAStar
    }

    fn find_path(&self, graph: &Graph, start: LocationId, goal: LocationId) -> PathResult {
        find_path_with_waypoints(graph, start, goal, &self.waypoints)
    }
}

/// Planners to run for a request, in execution order.
///
/// The waypoint planner is only included when the request names at least one
/// non-blank waypoint.
pub fn select_planners(request: &RouteRequest) -> Vec<Box<dyn RoutePlanner>> {
    let mut planners: Vec<Box<dyn RoutePlanner>> = vec![
        Box::new(DijkstraPlanner),
        Box::new(FloydWarshallPlanner),
        Box::new(AStarPlanner),
    ];

    if request.waypoints.iter().any(|name| !name.trim().is_empty()) {
        planners.push(Box::new(WaypointPlanner::new(request.waypoints.clone())));
    }

    planners
}
