use criterion::{Criterion, black_box, criterion_group, criterion_main};
use safewalk_core::prelude::*;

/// Square grid of `side * side` intersections with four-way streets
fn grid_store(side: usize) -> InMemoryStore {
    let id = |row: usize, col: usize| format!("{row}-{col}");

    let mut nodes = Vec::with_capacity(side * side);
    let mut edges = Vec::with_capacity(2 * side * side);
    for row in 0..side {
        for col in 0..side {
            #[allow(clippy::cast_precision_loss)]
            nodes.push(Node::new(id(row, col), col as f64 * 0.001, row as f64 * 0.001));
            let danger = ((row * 31 + col * 17) % 100) as f64;
            if col + 1 < side {
                edges.push(
                    Edge::new(format!("h{row}-{col}"), id(row, col), id(row, col + 1), 100.0)
                        .with_danger(danger),
                );
            }
            if row + 1 < side {
                let mut edge =
                    Edge::new(format!("v{row}-{col}"), id(row, col), id(row + 1, col), 120.0)
                        .with_danger(100.0 - danger);
                edge.is_accessible = (row + col) % 7 != 0;
                edges.push(edge);
            }
        }
    }

    InMemoryStore::from_parts(nodes, edges).unwrap()
}

fn bench_routing(c: &mut Criterion) {
    let store = grid_store(100);
    let far_corner = "99-99".to_string();

    c.bench_function("build_snapshot_safest", |b| {
        b.iter(|| GraphSnapshot::build(black_box(&store), RoutingMode::Safest, false).unwrap());
    });

    let snapshot = GraphSnapshot::build(&store, RoutingMode::Safest, true).unwrap();
    c.bench_function("dijkstra_path_corner_to_corner", |b| {
        b.iter(|| dijkstra_path(black_box(&snapshot), "0-0", &far_corner));
    });

    c.bench_function("compute_route_shortest_ada", |b| {
        let request = RouteRequest::new("0-0", far_corner.clone())
            .mode(RoutingMode::Shortest)
            .ada_required(true);
        b.iter(|| compute_route(black_box(&store), &request));
    });
}

criterion_group!(benches, bench_routing);
criterion_main!(benches);
