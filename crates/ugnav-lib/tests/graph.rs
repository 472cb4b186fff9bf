mod common;

use ugnav_lib::{campus_graph, Graph, GraphMode, Location};

use common::{diamond, disconnected, A, B, C, D};

#[test]
fn diamond_has_expected_topology() {
    let graph = diamond();

    assert_eq!(graph.mode(), GraphMode::Directed);
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.edge_weight(A, C), Some(4.0));
    assert!(!graph.has_edge(D, B));
    assert!(graph.neighbours(D).is_empty());
}

#[test]
fn neighbours_of_unknown_location_is_empty() {
    let graph = diamond();
    assert!(graph.neighbours(99).is_empty());
    assert!(!graph.contains(99));
}

#[test]
fn locations_are_ordered_by_id() {
    let ids: Vec<_> = diamond().locations().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![A, C, B, D]);
}

#[test]
fn undirected_mirror_updates_both_directions() {
    let mut graph = Graph::undirected();
    let x = Location::new(1, "X");
    let y = Location::new(2, "Y");
    graph.add_edge(&x, &y, 5.0);
    graph.add_edge(&y, &x, 2.0);

    assert_eq!(graph.edge_weight(1, 2), Some(2.0));
    assert_eq!(graph.edge_weight(2, 1), Some(2.0));
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn negative_weights_are_stored() {
    let mut graph = Graph::directed();
    graph.add_edge(&Location::new(1, "X"), &Location::new(2, "Y"), -3.0);
    assert_eq!(graph.edge_weight(1, 2), Some(-3.0));
}

#[test]
fn disconnected_graph_has_no_edges() {
    let graph = disconnected();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn campus_lookup_helpers() {
    let graph = campus_graph();

    assert_eq!(graph.len(), 22);
    assert_eq!(graph.location_id_by_name("balme library"), Some(7));
    assert_eq!(graph.location_id_by_name("  Main Gate "), Some(4));
    assert_eq!(graph.find_location("hall").map(|l| l.id), Some(10));
    assert_eq!(graph.location_name(21), Some("Diaspora Halls"));
}

#[test]
fn campus_fuzzy_matches_typos() {
    let graph = campus_graph();
    let matches = graph.fuzzy_location_matches("Balme Libary", 3);
    assert_eq!(matches.first().map(String::as_str), Some("Balme Library"));
    assert!(graph.fuzzy_location_matches("zzzz", 3).is_empty());
}

#[test]
fn shortest_path_on_graph_matches_free_function() {
    let graph = diamond();
    let result = graph.shortest_path(A, D);
    assert_eq!(result.path, vec![A, B, D]);
    assert_eq!(result.distance, 2.0);
}
