//! Floyd-Warshall all-pairs shortest paths.
//!
//! The matrices are rebuilt from scratch on every call; the campus graph is
//! small enough that incremental updates are not worth the bookkeeping.

use std::collections::HashMap;

use serde::Serialize;

use crate::graph::{Graph, LocationId};
use crate::path::PathResult;

/// Dense distance and next-hop tables over every location in a graph.
#[derive(Debug, Clone, Serialize)]
pub struct AllPairs {
    /// Location id for each matrix row/column, ascending.
    locations: Vec<LocationId>,
    #[serde(skip)]
    index: HashMap<LocationId, usize>,
    distances: Vec<Vec<f64>>,
    next: Vec<Vec<Option<usize>>>,
}

/// Path between one ordered pair of locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairPath {
    pub from: LocationId,
    pub to: LocationId,
    pub distance: f64,
    pub path: Vec<LocationId>,
}

impl AllPairs {
    /// Run Floyd-Warshall over `graph`.
    pub fn compute(graph: &Graph) -> Self {
        let locations: Vec<LocationId> = graph.location_ids().collect();
        let index: HashMap<LocationId, usize> = locations
            .iter()
            .enumerate()
            .map(|(position, id)| (*id, position))
            .collect();
        let n = locations.len();

        let mut distances = vec![vec![f64::INFINITY; n]; n];
        let mut next: Vec<Vec<Option<usize>>> = vec![vec![None; n]; n];

        for (i, row) in distances.iter_mut().enumerate() {
            row[i] = 0.0;
        }

        for (i, &id) in locations.iter().enumerate() {
            for edge in graph.neighbours(id) {
                let Some(&j) = index.get(&edge.target) else {
                    continue;
                };
                if i == j {
                    continue;
                }
                distances[i][j] = edge.distance;
                next[i][j] = Some(j);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let via_k = distances[i][k];
                if via_k == f64::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let candidate = via_k + distances[k][j];
                    if candidate < distances[i][j] {
                        distances[i][j] = candidate;
                        next[i][j] = next[i][k];
                    }
                }
            }
        }

        Self {
            locations,
            index,
            distances,
            next,
        }
    }

    /// Location ids labelling the matrix rows and columns.
    pub fn locations(&self) -> &[LocationId] {
        &self.locations
    }

    pub fn distance_matrix(&self) -> &[Vec<f64>] {
        &self.distances
    }

    /// Next-hop table: `next[i][j]` is the row index of the first step from
    /// `i` towards `j`, or `None` when `j` is unreachable (or `i == j`).
    pub fn next_matrix(&self) -> &[Vec<Option<usize>>] {
        &self.next
    }

    /// Shortest distance between two locations; infinite when unreachable or unknown.
    pub fn distance(&self, from: LocationId, to: LocationId) -> f64 {
        match (self.index.get(&from), self.index.get(&to)) {
            (Some(&i), Some(&j)) => self.distances[i][j],
            _ => f64::INFINITY,
        }
    }

    /// Follow the next-hop table from `from` to `to`.
    ///
    /// Empty when there is no path, including `from == to`.
    pub fn path(&self, from: LocationId, to: LocationId) -> Vec<LocationId> {
        let (Some(&start), Some(&end)) = (self.index.get(&from), self.index.get(&to)) else {
            return Vec::new();
        };
        self.path_by_index(start, end)
    }

    fn path_by_index(&self, start: usize, end: usize) -> Vec<LocationId> {
        if self.next[start][end].is_none() {
            return Vec::new();
        }

        let mut path = vec![self.locations[start]];
        let mut current = start;
        while current != end {
            // Each hop is bounded by n; a broken table (negative cycle) stops early.
            let Some(step) = self.next[current][end] else {
                return Vec::new();
            };
            if path.len() > self.locations.len() {
                return Vec::new();
            }
            current = step;
            path.push(self.locations[current]);
        }
        path
    }

    /// Reconstruct every reachable ordered pair `(i, j)` with `i != j`.
    pub fn all_paths(&self) -> Vec<PairPath> {
        let n = self.locations.len();
        let mut paths = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if i == j || self.distances[i][j] == f64::INFINITY {
                    continue;
                }
                let path = self.path_by_index(i, j);
                if path.is_empty() {
                    continue;
                }
                paths.push(PairPath {
                    from: self.locations[i],
                    to: self.locations[j],
                    distance: self.distances[i][j],
                    path,
                });
            }
        }
        paths
    }

    /// Single-pair result in the shared search contract.
    ///
    /// `nodes_explored` is the number of intermediate locations relaxed, i.e.
    /// the size of the graph.
    pub fn route(&self, start: LocationId, goal: LocationId) -> PathResult {
        let explored = self.locations.len();
        let path = self.path(start, goal);
        if path.is_empty() {
            return PathResult::not_found(explored);
        }
        PathResult::found(path, self.distance(start, goal), explored)
    }
}

/// Compute all pairs and extract the `start -> goal` route.
pub fn find_route_floyd_warshall(graph: &Graph, start: LocationId, goal: LocationId) -> PathResult {
    AllPairs::compute(graph).route(start, goal)
}
