use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::path::{find_route_dijkstra, PathResult};

/// Stable identifier for a campus location.
pub type LocationId = i64;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Named location within the campus graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Directed edge owned by its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: LocationId,
    /// Walking distance in metres.
    pub distance: f64,
}

/// Whether edges are one-way or mirrored on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphMode {
    Directed,
    Undirected,
}

#[derive(Debug, Clone)]
struct Node {
    location: Location,
    edges: Vec<Edge>,
}

/// Weighted graph shared read-only by every search algorithm.
///
/// Nodes are kept ordered by identifier, so iteration (and therefore every
/// search) is deterministic for a given set of insertions.
#[derive(Debug, Clone)]
pub struct Graph {
    mode: GraphMode,
    nodes: BTreeMap<LocationId, Node>,
}

impl Graph {
    pub fn new(mode: GraphMode) -> Self {
        Self {
            mode,
            nodes: BTreeMap::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(GraphMode::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(GraphMode::Undirected)
    }

    /// Mode fixed at construction.
    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    pub fn is_directed(&self) -> bool {
        self.mode == GraphMode::Directed
    }

    /// Register a location without any edges. Existing ids keep their name.
    pub fn add_location(&mut self, location: &Location) {
        self.nodes
            .entry(location.id)
            .or_insert_with(|| Node {
                location: location.clone(),
                edges: Vec::new(),
            });
    }

    /// Insert or update the edge `source -> destination`, registering both
    /// endpoints when they are new. Undirected graphs also write the mirror
    /// edge unless the edge is a self-loop.
    ///
    /// Weights are not validated. Negative weights are accepted but void the
    /// optimality of the label-setting and all-pairs searches.
    pub fn add_edge(&mut self, source: &Location, destination: &Location, distance: f64) {
        if distance < 0.0 {
            tracing::warn!(
                "negative edge weight {} between {} and {}",
                distance,
                source.name,
                destination.name
            );
        }

        self.add_location(source);
        self.add_location(destination);
        self.upsert_edge(source.id, destination.id, distance);

        if self.mode == GraphMode::Undirected && source.id != destination.id {
            self.upsert_edge(destination.id, source.id, distance);
        }
    }

    fn upsert_edge(&mut self, from: LocationId, to: LocationId, distance: f64) {
        let Some(node) = self.nodes.get_mut(&from) else {
            return;
        };
        if let Some(existing) = node.edges.iter_mut().find(|edge| edge.target == to) {
            existing.distance = distance;
        } else {
            node.edges.push(Edge {
                target: to,
                distance,
            });
        }
    }

    /// Whether the directed edge `source -> destination` exists.
    pub fn has_edge(&self, source: LocationId, destination: LocationId) -> bool {
        self.edge_weight(source, destination).is_some()
    }

    /// Weight of the directed edge `source -> destination`, if present.
    pub fn edge_weight(&self, source: LocationId, destination: LocationId) -> Option<f64> {
        self.neighbours(source)
            .iter()
            .find(|edge| edge.target == destination)
            .map(|edge| edge.distance)
    }

    /// Return the outgoing edges for a given location identifier.
    pub fn neighbours(&self, location: LocationId) -> &[Edge] {
        self.nodes
            .get(&location)
            .map(|node| node.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Owned copy of every location, ordered by id.
    pub fn locations(&self) -> Vec<Location> {
        self.nodes
            .values()
            .map(|node| node.location.clone())
            .collect()
    }

    /// Location identifiers in ascending order.
    pub fn location_ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.nodes.get(&id).map(|node| &node.location)
    }

    pub fn location_name(&self, id: LocationId) -> Option<&str> {
        self.location(id).map(|location| location.name.as_str())
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of directed edges, mirrored edges counted separately.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.edges.len()).sum()
    }

    /// Lookup a location by its full name, ignoring case.
    pub fn location_id_by_name(&self, name: &str) -> Option<LocationId> {
        let needle = name.trim();
        self.nodes
            .values()
            .find(|node| node.location.name.eq_ignore_ascii_case(needle))
            .map(|node| node.location.id)
    }

    /// First location (by ascending id) whose name contains `query`, ignoring case.
    pub fn find_location(&self, query: &str) -> Option<&Location> {
        let needle = query.to_lowercase();
        self.nodes
            .values()
            .map(|node| &node.location)
            .find(|location| location.name.to_lowercase().contains(&needle))
    }

    /// Names similar to `query`, most similar first, for "did you mean" hints.
    pub fn fuzzy_location_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .values()
            .map(|node| {
                let name = node.location.name.as_str();
                (strsim::jaro_winkler(&needle, &name.to_lowercase()), name)
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Resolve identifiers to display names, skipping unknown ids.
    pub fn names_for(&self, path: &[LocationId]) -> Vec<String> {
        path.iter()
            .filter_map(|id| self.location_name(*id).map(str::to_string))
            .collect()
    }

    /// Sum of edge weights along `path`, or `None` if a hop has no edge.
    pub fn path_distance(&self, path: &[LocationId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(pair[0], pair[1]))
            .sum()
    }

    /// Label-setting shortest path between two locations.
    ///
    /// `start == end` reports no path, the same as a disconnected pair.
    pub fn shortest_path(&self, start: LocationId, end: LocationId) -> PathResult {
        find_route_dijkstra(self, start, end)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::directed()
    }
}
