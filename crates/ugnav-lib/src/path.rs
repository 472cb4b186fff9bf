use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;

use crate::graph::{Edge, Graph, LocationId};

/// Scale applied to the identifier gap in [`id_heuristic`].
pub const HEURISTIC_SCALE: f64 = 100.0;

/// Upper bound on the number of paths returned by [`find_multiple_paths`],
/// whatever count the caller asks for.
pub const MAX_ALTERNATE_ATTEMPTS: usize = 3;

/// Upper bound on the number of routes returned by
/// [`find_divide_and_conquer_paths`].
pub const MAX_SPLIT_ROUTES: usize = 3;

/// Outcome of a single search.
///
/// Every algorithm reports "no path" the same way: an empty `path`, an
/// infinite `distance`, and however many nodes were explored before giving up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub path: Vec<LocationId>,
    pub distance: f64,
    pub nodes_explored: usize,
}

impl PathResult {
    pub fn found(path: Vec<LocationId>, distance: f64, nodes_explored: usize) -> Self {
        Self {
            path,
            distance,
            nodes_explored,
        }
    }

    pub fn not_found(nodes_explored: usize) -> Self {
        Self {
            path: Vec::new(),
            distance: f64::INFINITY,
            nodes_explored,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Run Dijkstra's algorithm between `start` and `goal`.
///
/// Visited state is local to the call. `start == goal` is reported as no
/// path, exactly like a disconnected pair.
pub fn find_route_dijkstra(graph: &Graph, start: LocationId, goal: LocationId) -> PathResult {
    if start == goal || !graph.contains(start) || !graph.contains(goal) {
        return PathResult::not_found(0);
    }

    let mut distances: HashMap<LocationId, f64> = HashMap::new();
    let mut parents: HashMap<LocationId, Option<LocationId>> = HashMap::new();
    let mut visited: HashSet<LocationId> = HashSet::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        // Lazy deletion: later entries for a settled node are stale.
        if !visited.insert(entry.node) {
            continue;
        }
        let current_distance = entry.cost.0;

        if entry.node == goal {
            return PathResult::found(
                reconstruct_path(&parents, start, goal),
                current_distance,
                visited.len(),
            );
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if visited.contains(&next) {
                continue;
            }

            let next_cost = current_distance + edge.distance;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    PathResult::not_found(visited.len())
}

/// Heuristic used by the A* planner: the gap between two identifiers scaled
/// by [`HEURISTIC_SCALE`].
///
/// This is not derived from geometry and can overestimate the remaining
/// distance, so A* results are near-optimal rather than guaranteed optimal.
pub fn id_heuristic(from: LocationId, to: LocationId) -> f64 {
    (from - to).abs() as f64 * HEURISTIC_SCALE
}

/// Run A* search with [`id_heuristic`].
pub fn find_route_a_star(graph: &Graph, start: LocationId, goal: LocationId) -> PathResult {
    find_route_a_star_with(graph, start, goal, id_heuristic)
}

/// Run A* search with a caller-supplied heuristic.
pub fn find_route_a_star_with<H>(
    graph: &Graph,
    start: LocationId,
    goal: LocationId,
    heuristic: H,
) -> PathResult
where
    H: Fn(LocationId, LocationId) -> f64,
{
    a_star_search(graph, start, goal, heuristic, |_, edge| edge.distance)
}

fn a_star_search<H, C>(
    graph: &Graph,
    start: LocationId,
    goal: LocationId,
    heuristic: H,
    edge_cost: C,
) -> PathResult
where
    H: Fn(LocationId, LocationId) -> f64,
    C: Fn(LocationId, &Edge) -> f64,
{
    if start == goal || !graph.contains(start) || !graph.contains(goal) {
        return PathResult::not_found(0);
    }

    let mut g_score: HashMap<LocationId, f64> = HashMap::new();
    let mut parents: HashMap<LocationId, Option<LocationId>> = HashMap::new();
    let mut closed: HashSet<LocationId> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut explored = 0usize;

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(AStarEntry::new(start, 0.0, heuristic(start, goal)));

    while let Some(entry) = queue.pop() {
        if closed.contains(&entry.node) {
            continue;
        }
        explored += 1;
        let current_score = entry.cost.0;

        if entry.node == goal {
            return PathResult::found(
                reconstruct_path(&parents, start, goal),
                current_score,
                explored,
            );
        }
        closed.insert(entry.node);

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if closed.contains(&next) {
                continue;
            }

            let tentative_g = current_score + edge_cost(entry.node, edge);
            if tentative_g < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, Some(entry.node));
                queue.push(AStarEntry::new(next, tentative_g, heuristic(next, goal)));
            }
        }
    }

    PathResult::not_found(explored)
}

/// Find up to `count` distinct paths, capped at [`MAX_ALTERNATE_ATTEMPTS`].
///
/// The first result is the plain A* path. Each further result is the
/// cheapest unseen detour obtained by banning one edge of the previous
/// result at a time. Paths are deduplicated by their rendered location
/// sequence, so fewer than `count` results come back when the graph offers
/// no further alternatives.
pub fn find_multiple_paths(
    graph: &Graph,
    start: LocationId,
    goal: LocationId,
    count: usize,
) -> Vec<PathResult> {
    let limit = count.min(MAX_ALTERNATE_ATTEMPTS);
    if limit == 0 {
        return Vec::new();
    }

    let first = find_route_a_star(graph, start, goal);
    if !first.is_found() {
        return Vec::new();
    }

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(path_key(graph, &first.path));
    let mut results = vec![first];
    let mut candidates: Vec<PathResult> = Vec::new();

    while results.len() < limit {
        let previous = results[results.len() - 1].path.clone();
        for pair in previous.windows(2) {
            let banned = (pair[0], pair[1]);
            let detour = a_star_search(graph, start, goal, id_heuristic, |from, edge| {
                if (from, edge.target) == banned {
                    f64::INFINITY
                } else {
                    edge.distance
                }
            });
            if !detour.is_found()
                || seen.contains(&path_key(graph, &detour.path))
                || candidates.iter().any(|known| known.path == detour.path)
            {
                continue;
            }
            candidates.push(detour);
        }

        let Some(best) = candidates
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
            .map(|(index, _)| index)
        else {
            tracing::debug!("no further alternates after {} paths", results.len());
            break;
        };

        let next = candidates.remove(best);
        seen.insert(path_key(graph, &next.path));
        results.push(next);
    }

    results
}

fn path_key(graph: &Graph, path: &[LocationId]) -> String {
    graph.names_for(path).join(" -> ")
}

/// Route through whichever resolved waypoint gives the shortest total.
///
/// Waypoint names are matched as case-insensitive substrings of location names
/// (first match wins). Names that match nothing are ignored; with no usable
/// waypoint this is a plain A* search.
pub fn find_path_with_waypoints(
    graph: &Graph,
    start: LocationId,
    goal: LocationId,
    waypoints: &[String],
) -> PathResult {
    if start == goal {
        return PathResult::not_found(0);
    }

    let resolved = resolve_waypoints(graph, waypoints);
    if resolved.is_empty() {
        return find_route_a_star(graph, start, goal);
    }

    let mut best: Option<PathResult> = None;
    let mut explored_total = 0usize;

    for waypoint in resolved {
        let to_waypoint = waypoint_leg(graph, start, waypoint);
        let from_waypoint = waypoint_leg(graph, waypoint, goal);
        let explored = to_waypoint.nodes_explored + from_waypoint.nodes_explored;
        explored_total += explored;

        if !to_waypoint.is_found() || !from_waypoint.is_found() {
            continue;
        }

        let distance = to_waypoint.distance + from_waypoint.distance;
        if best.as_ref().is_some_and(|current| distance >= current.distance) {
            continue;
        }

        let mut path = to_waypoint.path;
        path.extend(from_waypoint.path.into_iter().skip(1));
        best = Some(PathResult::found(path, distance, explored));
    }

    best.unwrap_or_else(|| PathResult::not_found(explored_total))
}

/// Walk from `start` by always taking the shortest edge to a location not yet
/// on the path.
///
/// The walk never backtracks, so reaching a location whose every neighbour is
/// already on the path ends the search with no path even when one exists.
pub fn find_route_greedy(graph: &Graph, start: LocationId, goal: LocationId) -> PathResult {
    if start == goal || !graph.contains(start) || !graph.contains(goal) {
        return PathResult::not_found(0);
    }

    let mut path = vec![start];
    let mut on_path: HashSet<LocationId> = HashSet::from([start]);
    let mut distance = 0.0;
    let mut current = start;

    while current != goal {
        let nearest = graph
            .neighbours(current)
            .iter()
            .filter(|edge| !on_path.contains(&edge.target))
            .min_by(|a, b| a.distance.total_cmp(&b.distance));

        let Some(edge) = nearest else {
            tracing::debug!(
                "greedy walk stuck at {} after {} hops",
                current,
                path.len() - 1
            );
            return PathResult::not_found(path.len());
        };

        on_path.insert(edge.target);
        path.push(edge.target);
        distance += edge.distance;
        current = edge.target;
    }

    let explored = path.len();
    PathResult::found(path, distance, explored)
}

/// Split the query at intermediate locations and join the two Dijkstra legs.
///
/// Intermediates are the first half of the locations by ascending id, minus
/// `start` and `goal`. Joined paths are deduplicated and the shortest
/// [`MAX_SPLIT_ROUTES`] come back sorted by distance.
pub fn find_divide_and_conquer_paths(
    graph: &Graph,
    start: LocationId,
    goal: LocationId,
) -> Vec<PathResult> {
    if start == goal || !graph.contains(start) || !graph.contains(goal) {
        return Vec::new();
    }

    let ids: Vec<LocationId> = graph.location_ids().collect();
    let mut results: Vec<PathResult> = Vec::new();

    for &via in &ids[..ids.len() / 2] {
        if via == start || via == goal {
            continue;
        }

        let first = find_route_dijkstra(graph, start, via);
        let second = find_route_dijkstra(graph, via, goal);
        if !first.is_found() || !second.is_found() {
            continue;
        }

        let distance = first.distance + second.distance;
        let explored = first.nodes_explored + second.nodes_explored;
        let mut path = first.path;
        path.extend(second.path.into_iter().skip(1));

        if results.iter().any(|known| known.path == path) {
            continue;
        }
        results.push(PathResult::found(path, distance, explored));
    }

    results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    results.truncate(MAX_SPLIT_ROUTES);
    results
}

/// One leg of a waypoint route. A waypoint that is the leg's own start is a
/// zero-length leg rather than a missing path.
fn waypoint_leg(graph: &Graph, from: LocationId, to: LocationId) -> PathResult {
    if from == to && graph.contains(from) {
        PathResult::found(vec![from], 0.0, 0)
    } else {
        find_route_a_star(graph, from, to)
    }
}

fn resolve_waypoints(graph: &Graph, waypoints: &[String]) -> Vec<LocationId> {
    waypoints
        .iter()
        .filter(|name| !name.trim().is_empty())
        .filter_map(|name| match graph.find_location(name.trim()) {
            Some(location) => Some(location.id),
            None => {
                tracing::debug!("ignoring unknown waypoint '{}'", name);
                None
            }
        })
        .collect()
}

fn reconstruct_path(
    parents: &HashMap<LocationId, Option<LocationId>>,
    start: LocationId,
    goal: LocationId,
) -> Vec<LocationId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: LocationId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: LocationId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: LocationId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: LocationId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Location;

    // Identifiers are chosen so the id heuristic does not mislead A* here.
    const A: LocationId = 1;
    const C: LocationId = 2;
    const B: LocationId = 3;
    const D: LocationId = 4;

    fn diamond() -> Graph {
        let a = Location::new(A, "A");
        let b = Location::new(B, "B");
        let c = Location::new(C, "C");
        let d = Location::new(D, "D");
        let mut graph = Graph::directed();
        graph.add_edge(&a, &b, 1.0);
        graph.add_edge(&a, &c, 4.0);
        graph.add_edge(&b, &d, 1.0);
        graph.add_edge(&c, &d, 1.0);
        graph
    }

    #[test]
    fn dijkstra_finds_diamond_shortcut() {
        let result = find_route_dijkstra(&diamond(), A, D);
        assert_eq!(result.path, vec![A, B, D]);
        assert_eq!(result.distance, 2.0);
        assert_eq!(result.nodes_explored, 3);
        assert_eq!(result.hop_count(), 2);
    }

    #[test]
    fn a_star_finds_diamond_shortcut() {
        let result = find_route_a_star(&diamond(), A, D);
        assert_eq!(result.path, vec![A, B, D]);
        assert_eq!(result.distance, 2.0);
    }

    #[test]
    fn misleading_identifiers_make_a_star_overshoot() {
        // Same diamond with B and C swapped: the heuristic now favours C.
        let mut graph = Graph::directed();
        let a = Location::new(1, "A");
        let b = Location::new(2, "B");
        let c = Location::new(3, "C");
        let d = Location::new(4, "D");
        graph.add_edge(&a, &b, 1.0);
        graph.add_edge(&a, &c, 4.0);
        graph.add_edge(&b, &d, 1.0);
        graph.add_edge(&c, &d, 1.0);

        let a_star = find_route_a_star(&graph, 1, 4);
        let dijkstra = find_route_dijkstra(&graph, 1, 4);
        assert_eq!(dijkstra.distance, 2.0);
        assert_eq!(a_star.path, vec![1, 3, 4]);
        assert!(a_star.distance >= dijkstra.distance);

        let zero = find_route_a_star_with(&graph, 1, 4, |_, _| 0.0);
        assert_eq!(zero.distance, dijkstra.distance);
    }

    #[test]
    fn same_start_and_goal_is_no_path() {
        let graph = diamond();
        let dijkstra = find_route_dijkstra(&graph, B, B);
        let a_star = find_route_a_star(&graph, B, B);
        assert!(!dijkstra.is_found());
        assert!(dijkstra.distance.is_infinite());
        assert!(!a_star.is_found());
        assert_eq!(a_star.nodes_explored, 0);
    }

    #[test]
    fn unknown_endpoint_is_no_path() {
        let result = find_route_dijkstra(&diamond(), A, 99);
        assert_eq!(result, PathResult::not_found(0));
    }

    #[test]
    fn against_edge_direction_is_no_path() {
        let graph = diamond();
        let dijkstra = find_route_dijkstra(&graph, D, A);
        let a_star = find_route_a_star(&graph, D, A);
        assert!(dijkstra.path.is_empty());
        assert_eq!(dijkstra.nodes_explored, 1);
        assert!(a_star.distance.is_infinite());
        assert_eq!(a_star.nodes_explored, 1);
    }

    #[test]
    fn id_heuristic_scales_gap() {
        assert_eq!(id_heuristic(3, 7), 400.0);
        assert_eq!(id_heuristic(7, 3), 400.0);
        assert_eq!(id_heuristic(5, 5), 0.0);
    }

    #[test]
    fn multiple_paths_returns_distinct_detours() {
        let results = find_multiple_paths(&diamond(), A, D, 5);
        let paths: Vec<_> = results.iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec![vec![A, B, D], vec![A, C, D]]);
        assert_eq!(results[0].distance, 2.0);
        assert_eq!(results[1].distance, 5.0);
    }

    #[test]
    fn multiple_paths_respects_requested_count() {
        assert_eq!(find_multiple_paths(&diamond(), A, D, 1).len(), 1);
        assert!(find_multiple_paths(&diamond(), A, D, 0).is_empty());
        assert!(find_multiple_paths(&diamond(), D, A, 3).is_empty());
    }

    #[test]
    fn waypoint_search_detours_through_waypoint() {
        let result = find_path_with_waypoints(&diamond(), A, D, &["c".to_string()]);
        assert_eq!(result.path, vec![A, C, D]);
        assert_eq!(result.distance, 5.0);
    }

    #[test]
    fn waypoint_search_picks_cheapest_waypoint() {
        let waypoints = vec!["C".to_string(), "B".to_string()];
        let result = find_path_with_waypoints(&diamond(), A, D, &waypoints);
        assert_eq!(result.path, vec![A, B, D]);
        assert_eq!(result.distance, 2.0);
    }

    #[test]
    fn unknown_waypoints_fall_back_to_plain_search() {
        let waypoints = vec!["Stadium".to_string(), "  ".to_string()];
        let result = find_path_with_waypoints(&diamond(), A, D, &waypoints);
        assert_eq!(result, find_route_a_star(&diamond(), A, D));
    }

    #[test]
    fn waypoint_at_start_is_a_zero_length_leg() {
        let result = find_path_with_waypoints(&diamond(), A, D, &["a".to_string()]);
        assert_eq!(result.path, vec![A, B, D]);
        assert_eq!(result.distance, 2.0);
    }

    #[test]
    fn waypoint_at_goal_is_a_zero_length_leg() {
        let result = find_path_with_waypoints(&diamond(), A, D, &["D".to_string()]);
        assert_eq!(result.path, vec![A, B, D]);
        assert_eq!(result.distance, 2.0);
    }

    #[test]
    fn waypoint_search_keeps_same_start_and_goal_unreachable() {
        let result = find_path_with_waypoints(&diamond(), B, B, &["B".to_string()]);
        assert_eq!(result, PathResult::not_found(0));
    }

    #[test]
    fn greedy_follows_nearest_neighbour() {
        let result = find_route_greedy(&diamond(), A, D);
        assert_eq!(result.path, vec![A, B, D]);
        assert_eq!(result.distance, 2.0);
        assert_eq!(result.nodes_explored, 3);
    }

    #[test]
    fn greedy_stops_at_dead_end() {
        let a = Location::new(A, "A");
        let b = Location::new(B, "B");
        let c = Location::new(C, "C");
        let d = Location::new(D, "D");
        let mut graph = Graph::directed();
        graph.add_edge(&a, &b, 1.0);
        graph.add_edge(&a, &c, 4.0);
        graph.add_edge(&c, &d, 1.0);

        let greedy = find_route_greedy(&graph, A, D);
        assert!(!greedy.is_found());
        assert!(greedy.distance.is_infinite());
        assert_eq!(greedy.nodes_explored, 2);
        assert_eq!(find_route_dijkstra(&graph, A, D).path, vec![A, C, D]);
    }

    #[test]
    fn greedy_same_start_and_goal_is_no_path() {
        assert_eq!(find_route_greedy(&diamond(), C, C), PathResult::not_found(0));
    }

    #[test]
    fn divide_and_conquer_splits_at_first_half() {
        // Ascending ids are A, C, B, D; A is the start, so only C splits.
        let results = find_divide_and_conquer_paths(&diamond(), A, D);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, vec![A, C, D]);
        assert_eq!(results[0].distance, 5.0);
    }

    #[test]
    fn divide_and_conquer_drops_duplicate_joins() {
        // Every intermediate lies on the one chain, so each split joins the same path.
        let mut graph = Graph::directed();
        let stops: Vec<Location> = (1..=6)
            .map(|id| Location::new(id, format!("S{id}")))
            .collect();
        for pair in stops.windows(2) {
            graph.add_edge(&pair[0], &pair[1], 10.0);
        }

        let results = find_divide_and_conquer_paths(&graph, 1, 6);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(results[0].distance, 50.0);
        assert!(find_divide_and_conquer_paths(&graph, 6, 1).is_empty());
    }
}
