//! UG Navigate library entry points.
//!
//! This crate exposes the campus graph, three shortest-path algorithms
//! (Dijkstra, A*, Floyd-Warshall), greedy and divide-and-conquer route
//! heuristics, and the route optimizer that runs the searches side by side
//! and selects a single best route. Higher-level consumers (the CLI)
//! should only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod adjust;
pub mod all_pairs;
pub mod campus;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;

pub use adjust::{Adjustment, CongestionLevel, CongestionTable, RouteAdjuster};
pub use all_pairs::{find_route_floyd_warshall, AllPairs, PairPath};
pub use campus::{
    campus_graph, default_map_path, load_campus, resolve_map_source, CampusMap, MapEdge,
    MapSource, MAP_ENV_VAR,
};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, GraphMode, Location, LocationId};
pub use output::{AlgorithmTiming, RouteRenderMode, RouteReport};
pub use path::{
    find_divide_and_conquer_paths, find_multiple_paths, find_path_with_waypoints,
    find_route_a_star, find_route_a_star_with, find_route_dijkstra, find_route_greedy,
    id_heuristic, PathResult,
};
pub use routing::{
    compare_algorithms, find_divide_and_conquer_routes, find_greedy_route,
    find_multiple_route_options, find_optimal_routes, find_routes_through, optimize_for_traffic,
    resolve_location, OptimizerConfig, Route, RouteAlgorithm, RouteAnalysis, RouteRequest,
};
