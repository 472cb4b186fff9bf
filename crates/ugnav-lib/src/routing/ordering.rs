//! Ranking and filtering helpers for candidate routes.
//!
//! Sorts are stable: candidates with equal keys keep their production order.

use std::collections::BTreeMap;

use super::{OptimizerConfig, Route, RouteAlgorithm};

/// Sort ascending by distance.
pub fn sort_by_distance(routes: &mut [Route]) {
    routes.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Sort ascending by travel time.
pub fn sort_by_time(routes: &mut [Route]) {
    routes.sort_by(|a, b| a.time.total_cmp(&b.time));
}

/// The `count` shortest routes, shortest first.
pub fn top_routes(routes: &[Route], count: usize) -> Vec<Route> {
    let mut sorted = routes.to_vec();
    sort_by_distance(&mut sorted);
    sorted.truncate(count);
    sorted
}

/// Routes passing through a location whose name contains `needle`, ignoring case.
pub fn filter_by_location(routes: &[Route], needle: &str) -> Vec<Route> {
    routes
        .iter()
        .filter(|route| route.passes_through(needle))
        .cloned()
        .collect()
}

/// Routes keyed by producing algorithm, each group in input order.
pub fn group_by_algorithm(routes: &[Route]) -> BTreeMap<RouteAlgorithm, Vec<Route>> {
    let mut groups: BTreeMap<RouteAlgorithm, Vec<Route>> = BTreeMap::new();
    for route in routes {
        groups
            .entry(route.algorithm)
            .or_default()
            .push(route.clone());
    }
    groups
}

/// Route with the lowest weighted score; the earliest wins ties.
pub fn select_optimal<'a>(routes: &'a [Route], config: &OptimizerConfig) -> Option<&'a Route> {
    let mut best: Option<(&Route, f64)> = None;
    for route in routes {
        let score = config.score(route);
        match best {
            Some((_, current)) if score >= current => {}
            _ => best = Some((route, score)),
        }
    }
    best.map(|(route, _)| route)
}
