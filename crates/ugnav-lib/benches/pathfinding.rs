use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use ugnav_lib::{
    campus_graph, find_multiple_paths, find_optimal_routes, find_route_a_star,
    find_route_dijkstra, AllPairs, Graph, LocationId, RouteRequest,
};

static CAMPUS: Lazy<Graph> = Lazy::new(campus_graph);
static MAIN_GATE: Lazy<LocationId> = Lazy::new(|| location(&CAMPUS, "Main Gate"));
static DIASPORA: Lazy<LocationId> = Lazy::new(|| location(&CAMPUS, "Diaspora Halls"));
static LONG_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new("Main Gate", "Diaspora Halls").with_waypoints(["Balme"]));

fn location(graph: &Graph, name: &str) -> LocationId {
    graph.location_id_by_name(name).expect("campus location")
}

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*CAMPUS;
    let (start, goal) = (*MAIN_GATE, *DIASPORA);

    c.bench_function("dijkstra_main_gate_diaspora", |b| {
        b.iter(|| black_box(find_route_dijkstra(graph, start, goal).distance));
    });

    c.bench_function("astar_main_gate_diaspora", |b| {
        b.iter(|| black_box(find_route_a_star(graph, start, goal).distance));
    });

    c.bench_function("floyd_warshall_campus", |b| {
        b.iter(|| black_box(AllPairs::compute(graph).distance(start, goal)));
    });

    c.bench_function("alternates_main_gate_diaspora", |b| {
        b.iter(|| black_box(find_multiple_paths(graph, start, goal, 3).len()));
    });

    c.bench_function("optimizer_main_gate_diaspora", |b| {
        let request = &*LONG_REQUEST;
        b.iter(|| {
            let analysis = find_optimal_routes(graph, request).expect("names resolve");
            black_box(analysis.routes.len())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
