//! Common test utilities and graph fixtures.
//!
//! Each integration test binary compiles this module separately, so helpers
//! unused by one binary are allowed to be dead there.

use ugnav_lib::{Graph, Location, LocationId};

// Identifiers ordered so the id heuristic agrees with the true distances.
// The A=1, B=2, C=3, D=4 ordering, where the heuristic steers A* onto the
// longer branch, is covered by `misleading_identifiers_make_a_star_overshoot`
// in src/path.rs.
#[allow(dead_code)]
pub const A: LocationId = 1;
#[allow(dead_code)]
pub const C: LocationId = 2;
#[allow(dead_code)]
pub const B: LocationId = 3;
#[allow(dead_code)]
pub const D: LocationId = 4;

/// A->B (1), A->C (4), B->D (1), C->D (1).
#[allow(dead_code)]
pub fn diamond() -> Graph {
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

/// Two locations and no edges.
#[allow(dead_code)]
pub fn disconnected() -> Graph {
    let mut graph = Graph::directed();
    graph.add_location(&Location::new(10, "X"));
    graph.add_location(&Location::new(11, "Y"));
    graph
}

/// Campus ids by name, panicking on typos in the test itself.
#[allow(dead_code)]
pub fn campus_id(graph: &Graph, name: &str) -> LocationId {
    graph
        .location_id_by_name(name)
        .unwrap_or_else(|| panic!("campus location {name} present"))
}

#[allow(dead_code)]
pub fn names(path: &[&str]) -> Vec<String> {
    path.iter().map(|name| name.to_string()).collect()
}
